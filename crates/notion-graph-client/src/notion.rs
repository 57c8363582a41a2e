//! Notion database query client

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::Value;

use crate::error::FetchError;
use crate::source::RecordSource;

/// Public Notion API root.
pub const NOTION_API_BASE: &str = "https://api.notion.com";

/// API version pinned in the `Notion-Version` header.
pub const NOTION_VERSION: &str = "2022-02-22";

/// Default bound on the single query request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for [`NotionClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, overridable for proxies and mock servers.
    pub base_url: String,
    pub notion_version: String,
    /// `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: NOTION_API_BASE.to_string(),
            notion_version: NOTION_VERSION.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    results: Vec<Value>,
    #[serde(default)]
    has_more: bool,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: String,
    message: String,
}

/// Issues one `POST /v1/databases/{id}/query` and returns its `results`.
///
/// Only the first page is fetched. When Notion reports more pages the
/// client logs a warning and returns what it got.
pub struct NotionClient {
    client: reqwest::Client,
    token: String,
    database_id: String,
    config: ClientConfig,
}

impl std::fmt::Debug for NotionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionClient")
            .field("database_id", &self.database_id)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl NotionClient {
    pub fn new(
        token: impl Into<String>,
        database_id: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self, FetchError> {
        let token = token.into();
        let database_id = database_id.into();
        if token.is_empty() {
            return Err(FetchError::EmptyArgument("token"));
        }
        if database_id.is_empty() {
            return Err(FetchError::EmptyArgument("database id"));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|source| FetchError::Request {
            url: config.base_url.clone(),
            source,
        })?;

        Ok(Self {
            client,
            token,
            database_id,
            config,
        })
    }

    /// Full query endpoint for the configured database.
    pub fn query_url(&self) -> String {
        format!(
            "{}/v1/databases/{}/query",
            self.config.base_url.trim_end_matches('/'),
            self.database_id
        )
    }
}

#[async_trait::async_trait]
impl RecordSource for NotionClient {
    async fn fetch_records(&self) -> Result<Vec<Value>, FetchError> {
        let url = self.query_url();
        tracing::info!("Querying Notion database {}", self.database_id);

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header("Notion-Version", &self.config.notion_version)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| FetchError::Request {
            url: url.clone(),
            source,
        })?;

        if !status.is_success() {
            let body = match serde_json::from_str::<ApiError>(&body) {
                Ok(err) if !err.code.is_empty() => format!("{} ({})", err.message, err.code),
                Ok(err) => err.message,
                Err(_) => body,
            };
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: QueryResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

        if parsed.has_more {
            tracing::warn!(
                "Database has more than one page of results; only the first {} records are graphed",
                parsed.results.len()
            );
        }

        tracing::debug!("Fetched {} records", parsed.results.len());
        Ok(parsed.results)
    }

    fn name(&self) -> &str {
        "Notion API"
    }
}
