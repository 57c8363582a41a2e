//! HTML rendering of the note graph on top of vis-network

pub mod assets;
pub mod error;
pub mod html;
pub mod layout;

pub use error::RenderError;
pub use html::{GraphData, RenderOptions, VisSource, render_html, write_html};
pub use layout::LayoutOptions;
