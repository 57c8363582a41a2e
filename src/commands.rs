//! The fetch → transform → graph → render pipeline

use std::path::PathBuf;

use anyhow::Context;
use notion_graph_client::RecordSource;
use notion_graph_core::{NoteGraph, PropertySchema, build_edges, parse_records};
use notion_graph_render::{RenderOptions, write_html};

/// Everything one run needs besides the record source.
#[derive(Debug, Clone)]
pub struct GraphRequest {
    pub output: PathBuf,
    pub schema: PropertySchema,
    pub render: RenderOptions,
    pub include_isolated: bool,
}

/// Run every stage in order. The output file is only written once all
/// previous stages succeeded.
pub async fn generate(
    source: &dyn RecordSource,
    request: &GraphRequest,
) -> anyhow::Result<NoteGraph> {
    tracing::info!("Fetching records from {}", source.name());
    let raw = source
        .fetch_records()
        .await
        .with_context(|| format!("Failed to fetch records from {}", source.name()))?;

    let records = parse_records(&raw, &request.schema).context("Failed to read database records")?;
    let edges = build_edges(&records).context("Failed to resolve note relations")?;
    tracing::info!("{} records, {} relations", records.len(), edges.len());

    let graph = if request.include_isolated {
        NoteGraph::from_records(&records, &edges)
    } else {
        NoteGraph::from_edges(&edges)
    };
    tracing::info!("Graph has {} nodes, {} edges", graph.node_count(), graph.edge_count());

    write_html(&graph, &request.render, &request.output)
        .with_context(|| format!("Failed to write {}", request.output.display()))?;

    Ok(graph)
}
