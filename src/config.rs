//! TOML configuration and environment fallbacks

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use notion_graph_client::{ClientConfig, DEFAULT_TIMEOUT, NOTION_API_BASE, NOTION_VERSION};
use notion_graph_core::PropertySchema;
use notion_graph_render::LayoutOptions;
use serde::Deserialize;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "notion-graph.toml";

/// Environment variable read when the token argument is `-`.
pub const TOKEN_ENV: &str = "NOTION_TOKEN";

/// Environment variable read when the database argument is `-`.
pub const DATABASE_ENV: &str = "NOTION_DATABASE_ID";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub notion: NotionSection,
    pub layout: LayoutOptions,
    pub render: RenderSection,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct NotionSection {
    pub base_url: String,
    pub notion_version: String,
    /// `0` disables the timeout.
    pub timeout_secs: u64,
    pub title_property: String,
    pub children_property: String,
}

impl Default for NotionSection {
    fn default() -> Self {
        let schema = PropertySchema::default();
        Self {
            base_url: NOTION_API_BASE.to_string(),
            notion_version: NOTION_VERSION.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            title_property: schema.title_property,
            children_property: schema.children_property,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSection {
    pub heading: String,
    /// Show notes that neither reference nor are referenced by anything.
    /// Set to `false` to graph only notes that appear in some relation.
    pub include_isolated: bool,
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            heading: "Notion graph".to_string(),
            include_isolated: true,
        }
    }
}

impl AppConfig {
    /// Load `path` if given, else `notion-graph.toml` if it exists, else defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path: PathBuf = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn schema(&self) -> PropertySchema {
        PropertySchema {
            title_property: self.notion.title_property.clone(),
            children_property: self.notion.children_property.clone(),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.notion.base_url.clone(),
            notion_version: self.notion.notion_version.clone(),
            timeout: match self.notion.timeout_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
        }
    }
}

/// `-` means "take it from the environment" (a `.env` file counts).
pub fn resolve_arg(value: &str, env_var: &str) -> anyhow::Result<String> {
    if value != "-" {
        return Ok(value.to_string());
    }
    std::env::var(env_var).with_context(|| format!("`-` given but {env_var} is not set"))
}
