//! Core data structures for the note graph

use serde::{Deserialize, Serialize};

/// Property name Notion templates use for the page title.
pub const DEFAULT_TITLE_PROPERTY: &str = "Name";

/// Relation property that lists a note's children.
pub const DEFAULT_CHILDREN_PROPERTY: &str = "Children";

/// One page of the source database, reduced to what the graph needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Notion page id, unique within the database.
    pub id: String,
    /// First plain-text run of the title property.
    pub title: String,
    /// Page ids listed in the relation property, in API order.
    pub children: Vec<String>,
}

impl Record {
    pub fn new(id: impl Into<String>, title: impl Into<String>, children: Vec<String>) -> Self {
        Record {
            id: id.into(),
            title: title.into(),
            children,
        }
    }
}

/// "parent references child", both sides named by title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub parent: String,
    pub child: String,
}

impl Edge {
    pub fn new(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Edge {
            parent: parent.into(),
            child: child.into(),
        }
    }
}

/// Which properties of a raw record hold the title and the child relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertySchema {
    pub title_property: String,
    pub children_property: String,
}

impl Default for PropertySchema {
    fn default() -> Self {
        PropertySchema {
            title_property: DEFAULT_TITLE_PROPERTY.to_string(),
            children_property: DEFAULT_CHILDREN_PROPERTY.to_string(),
        }
    }
}

/// A node of the note graph. Identity is the title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteNode {
    pub title: String,
    /// Number of records whose title mapped onto this node.
    /// Anything above 1 means distinct pages were conflated.
    pub record_count: u32,
}
