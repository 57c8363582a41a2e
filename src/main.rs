//! notion-graph CLI entry point

use clap::Parser;
use clap::error::ErrorKind;
use notion_graph_client::{NotionClient, RecordSource, StaticSource};
use notion_graph_render::{RenderOptions, VisSource};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use config::{AppConfig, DATABASE_ENV, TOKEN_ENV, resolve_arg};

const USAGE_HINT: &str = "\
Usage: notion-graph <TOKEN> <DATABASE_ID> <OUTPUT>
  TOKEN        Notion integration secret (or `-` to read NOTION_TOKEN)
  DATABASE_ID  id of a database shared with the integration (or `-` to read NOTION_DATABASE_ID)
  OUTPUT       HTML file to write
Run `notion-graph --help` for all options.";

#[derive(Parser)]
#[command(name = "notion-graph")]
#[command(
    about = "Plot how the notes of a Notion database reference each other",
    long_about = None
)]
struct Cli {
    /// Notion integration token, or `-` for $NOTION_TOKEN
    token: String,

    /// Database to query, or `-` for $NOTION_DATABASE_ID
    database_id: String,

    /// HTML file to write (overwritten if present)
    output: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// TOML config file (defaults to ./notion-graph.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read a saved query response instead of calling the API
    #[arg(long, value_name = "JSON")]
    from_file: Option<PathBuf>,

    /// Inline this vis-network bundle instead of the built-in one
    #[arg(long, value_name = "FILE", conflicts_with = "cdn")]
    vis_js: Option<PathBuf>,

    /// Load vis-network from unpkg instead of embedding it in the page
    #[arg(long)]
    cdn: bool,

    /// Request timeout in seconds (0 waits forever)
    #[arg(long)]
    timeout: Option<u64>,

    /// Layout option forwarded to the force-directed solver
    #[arg(long = "layout", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    layout: Vec<(String, String)>,

    /// Open the result in the default browser
    #[arg(short, long)]
    open: bool,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => return report_failure(&e),
        },
    };

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!("notion_graph={}", log_level))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // A missing .env is fine; a broken one is worth knowing about.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!("Ignoring malformed .env file: {}", e);
        }
    }

    tracing::debug!("notion-graph v{}", env!("CARGO_PKG_VERSION"));

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_failure(&format!("{e:#}")),
    }
}

/// The one failure path: message, usage text, status 1.
fn report_failure(message: &dyn std::fmt::Display) -> ExitCode {
    let message = message.to_string();
    eprintln!("error: {}", message.trim_end().trim_start_matches("error: "));
    eprintln!();
    eprintln!("{USAGE_HINT}");
    ExitCode::FAILURE
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(timeout) = cli.timeout {
        config.notion.timeout_secs = timeout;
    }

    let mut layout = config.layout.clone();
    for (key, value) in &cli.layout {
        layout.set(key, value).map_err(anyhow::Error::msg)?;
    }

    let vis_source = match &cli.vis_js {
        Some(path) => VisSource::Inline(std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read vis-network bundle {}: {}", path.display(), e)
        })?),
        None if cli.cdn => VisSource::cdn(),
        None => VisSource::default(),
    };

    let source: Box<dyn RecordSource> = match &cli.from_file {
        Some(path) => Box::new(StaticSource::from_file(path)?),
        None => {
            let token = resolve_arg(&cli.token, TOKEN_ENV)?;
            let database_id = resolve_arg(&cli.database_id, DATABASE_ENV)?;
            Box::new(NotionClient::new(token, database_id, config.client_config())?)
        }
    };

    let request = commands::GraphRequest {
        output: cli.output.clone(),
        schema: config.schema(),
        render: RenderOptions {
            layout,
            heading: config.render.heading.clone(),
            vis_source,
        },
        include_isolated: config.render.include_isolated,
    };

    commands::generate(source.as_ref(), &request).await?;
    println!("results in {}", cli.output.display());

    if cli.open {
        if let Err(e) = open::that(&cli.output) {
            tracing::warn!("Could not open {}: {}", cli.output.display(), e);
        }
    }

    Ok(())
}
