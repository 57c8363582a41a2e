//! Record sources for notion-graph
//!
//! A [`RecordSource`] returns the raw, unvalidated records of one database
//! query. [`NotionClient`] talks to the Notion API; [`StaticSource`] serves a
//! saved response from memory or disk.

pub mod error;
pub mod notion;
pub mod source;

pub use error::FetchError;
pub use notion::{ClientConfig, DEFAULT_TIMEOUT, NOTION_API_BASE, NOTION_VERSION, NotionClient};
pub use source::{RecordSource, StaticSource};
