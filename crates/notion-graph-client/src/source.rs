//! The fetch seam and the in-memory source

use std::path::Path;

use serde_json::Value;

use crate::error::FetchError;

/// Anything that can produce the raw record list of a database query.
#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch the raw records. Called once per run.
    async fn fetch_records(&self) -> Result<Vec<Value>, FetchError>;

    /// Human-readable source name for logging.
    fn name(&self) -> &str;
}

/// Serves a fixed record list, typically a saved query response.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<Value>,
    name: String,
}

impl StaticSource {
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records,
            name: "static".to_string(),
        }
    }

    /// Accepts either a full query response (`{"results": [...]}`) or a bare array.
    pub fn from_json(json: Value) -> Result<Self, FetchError> {
        let records = match json {
            Value::Array(records) => records,
            Value::Object(mut body) => match body.remove("results") {
                Some(Value::Array(records)) => records,
                Some(_) => {
                    return Err(FetchError::MalformedResponse(
                        "`results` is not an array".to_string(),
                    ));
                }
                None => {
                    return Err(FetchError::MalformedResponse(
                        "missing `results` field".to_string(),
                    ));
                }
            },
            _ => {
                return Err(FetchError::MalformedResponse(
                    "expected an object or an array".to_string(),
                ));
            }
        };
        Ok(Self::new(records))
    }

    /// Load a saved response from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FetchError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| FetchError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let json: Value = serde_json::from_str(&text)
            .map_err(|e| FetchError::MalformedResponse(format!("{}: {}", path.display(), e)))?;

        let mut source = Self::from_json(json)?;
        source.name = path.display().to_string();
        Ok(source)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait::async_trait]
impl RecordSource for StaticSource {
    async fn fetch_records(&self) -> Result<Vec<Value>, FetchError> {
        tracing::debug!("Serving {} records from {}", self.records.len(), self.name);
        Ok(self.records.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
