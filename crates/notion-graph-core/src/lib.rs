//! notion-graph core — record model, record → edge transformation, and the note graph

pub mod error;
pub mod graph;
pub mod model;
pub mod transform;


pub use error::TransformError;
pub use graph::NoteGraph;
pub use model::{Edge, NoteNode, PropertySchema, Record};
pub use transform::{
    build_edges, extract_children, extract_id, extract_title, id_to_title, parse_record,
    parse_records,
};
