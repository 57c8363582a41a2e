//! Render failures

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// The embedded page template is missing from the binary.
    #[error("embedded template `{0}` not found")]
    MissingTemplate(&'static str),

    #[error("failed to serialize graph data")]
    Serialize(#[from] serde_json::Error),

    /// The output file could not be written.
    #[error("cannot write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
