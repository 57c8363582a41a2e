//! Errors raised while turning raw API records into edges

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// A field on the path to the title, id or relation is absent.
    #[error("record {index}: missing field `{path}`")]
    MissingField { index: usize, path: String },

    /// A field exists but has the wrong JSON type.
    #[error("record {index}: field `{path}` is not {expected}")]
    WrongType {
        index: usize,
        path: String,
        expected: &'static str,
    },

    /// The title array is present but holds no text run.
    #[error("record {index}: title `{path}` is empty")]
    EmptyTitle { index: usize, path: String },

    /// A relation points at a page that is not part of the result set.
    #[error("record `{parent}` references unknown child id `{child_id}`")]
    UnknownChild { parent: String, child_id: String },
}
