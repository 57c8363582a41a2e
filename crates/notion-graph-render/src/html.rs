//! Graph → self-contained interactive HTML page

use std::collections::HashMap;
use std::path::Path;

use notion_graph_core::NoteGraph;
use serde::Serialize;

use crate::assets::{GRAPH_TEMPLATE, VIS_NETWORK_CDN, fill, template, vis_bundle};
use crate::error::RenderError;
use crate::layout::LayoutOptions;

/// Where the page loads the vis-network runtime from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisSource {
    /// `<script src=...>` pointing at a CDN or local URL.
    Cdn(String),
    /// The bundle's source, inlined so the page works offline.
    Inline(String),
}

impl VisSource {
    /// The pinned release on unpkg.
    pub fn cdn() -> Self {
        VisSource::Cdn(VIS_NETWORK_CDN.to_string())
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, VisSource::Inline(_))
    }
}

/// The bundle compiled into the binary, so the page needs no network.
/// Falls back to the CDN only for builds made without `assets/vendor/`.
impl Default for VisSource {
    fn default() -> Self {
        match vis_bundle() {
            Some(js) => VisSource::Inline(js),
            None => {
                tracing::warn!(
                    "vis-network bundle not embedded in this build; the page will load it from {}",
                    VIS_NETWORK_CDN
                );
                VisSource::cdn()
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub layout: LayoutOptions,
    /// Page title and header text.
    pub heading: String,
    pub vis_source: VisSource,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            layout: LayoutOptions::default(),
            heading: "Notion graph".to_string(),
            vis_source: VisSource::default(),
        }
    }
}

/// Node as vis-network expects it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VisNode {
    pub id: usize,
    pub label: String,
    /// Hover tooltip.
    pub title: String,
    /// Drives node size under `nodes.scaling`.
    pub value: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VisEdge {
    pub from: usize,
    pub to: usize,
}

/// The `{nodes, edges}` payload embedded in the page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GraphData {
    pub nodes: Vec<VisNode>,
    pub edges: Vec<VisEdge>,
}

impl GraphData {
    pub fn from_graph(graph: &NoteGraph) -> Self {
        let mut ids: HashMap<&str, usize> = HashMap::with_capacity(graph.node_count());
        let mut nodes = Vec::with_capacity(graph.node_count());

        for (id, note) in graph.notes().enumerate() {
            ids.insert(note.title.as_str(), id);

            let incoming = graph.in_degree(&note.title);
            let outgoing = graph.out_degree(&note.title);
            let mut tooltip = format!(
                "{}\nreferenced by {incoming}, references {outgoing}",
                note.title
            );
            if note.record_count > 1 {
                tooltip.push_str(&format!("\n{} pages share this title", note.record_count));
            }

            nodes.push(VisNode {
                id,
                label: note.title.clone(),
                title: tooltip,
                value: incoming + outgoing,
            });
        }

        let edges = graph
            .edges()
            .filter_map(|(parent, child)| {
                Some(VisEdge {
                    from: *ids.get(parent)?,
                    to: *ids.get(child)?,
                })
            })
            .collect();

        GraphData { nodes, edges }
    }
}

/// JSON that is safe to drop inside a `<script>` element.
fn script_json<T: Serialize>(value: &T) -> Result<String, RenderError> {
    Ok(serde_json::to_string(value)?
        .replace("</", "<\\/")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029"))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn vis_script(source: &VisSource) -> String {
    match source {
        VisSource::Cdn(url) => format!(
            r#"<script type="text/javascript" src="{}"></script>"#,
            escape_html(url)
        ),
        VisSource::Inline(js) => format!(
            "<script type=\"text/javascript\">\n{}\n</script>",
            js.replace("</script", "<\\/script")
        ),
    }
}

/// Render the whole page in memory.
pub fn render_html(graph: &NoteGraph, options: &RenderOptions) -> Result<String, RenderError> {
    if graph.is_empty() {
        tracing::warn!("Graph is empty; rendering a page without notes");
    }

    let page = template(GRAPH_TEMPLATE)?;
    let graph_json = script_json(&GraphData::from_graph(graph))?;
    let options_json = script_json(&options.layout.vis_options())?;
    let heading = escape_html(&options.heading);
    let script = vis_script(&options.vis_source);

    Ok(fill(
        &page,
        &[
            ("heading", heading.as_str()),
            ("vis_script", script.as_str()),
            ("graph_json", graph_json.as_str()),
            ("options_json", options_json.as_str()),
        ],
    ))
}

/// Render, then write to `path` in one go, replacing any existing file.
///
/// Nothing touches the filesystem unless rendering succeeded.
pub fn write_html(
    graph: &NoteGraph,
    options: &RenderOptions,
    path: &Path,
) -> Result<(), RenderError> {
    let html = render_html(graph, options)?;
    std::fs::write(path, html).map_err(|source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        "Wrote {} notes and {} links to {}",
        graph.node_count(),
        graph.edge_count(),
        path.display()
    );
    Ok(())
}
