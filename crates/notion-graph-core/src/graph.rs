//! Note graph wrapper around petgraph::DiGraph, keyed by title

use crate::model::{Edge, NoteNode, Record};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Directed note graph. Node identity is the title, so two records with the
/// same title end up as one node; repeated edges collapse to one.
pub struct NoteGraph {
    inner: DiGraph<NoteNode, ()>,
    by_title: HashMap<String, NodeIndex>,
}

impl std::fmt::Debug for NoteGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteGraph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl NoteGraph {
    pub fn new() -> Self {
        NoteGraph {
            inner: DiGraph::new(),
            by_title: HashMap::new(),
        }
    }

    /// Graph containing only the notes that take part in an edge.
    pub fn from_edges(edges: &[Edge]) -> Self {
        let mut graph = NoteGraph::new();
        for edge in edges {
            graph.add_edge(edge);
        }
        graph
    }

    /// Every record becomes a node (isolated notes included), then every edge.
    pub fn from_records(records: &[Record], edges: &[Edge]) -> Self {
        let mut graph = NoteGraph::new();
        for record in records {
            graph.add_note(&record.title);
        }
        for edge in edges {
            graph.add_edge(edge);
        }

        let conflated: Vec<&str> = graph
            .notes()
            .filter(|n| n.record_count > 1)
            .map(|n| n.title.as_str())
            .collect();
        if !conflated.is_empty() {
            tracing::warn!(
                "{} titles are shared by several records and were merged: {}",
                conflated.len(),
                conflated.join(", ")
            );
        }

        graph
    }

    /// Register a record's title, bumping `record_count` if it already exists.
    pub fn add_note(&mut self, title: &str) -> NodeIndex {
        if let Some(&idx) = self.by_title.get(title) {
            self.inner[idx].record_count += 1;
            return idx;
        }
        self.insert(title, 1)
    }

    /// Add `parent → child`. Missing endpoints are created; a repeated pair is a no-op.
    pub fn add_edge(&mut self, edge: &Edge) {
        let source = self.ensure(&edge.parent);
        let target = self.ensure(&edge.child);
        self.inner.update_edge(source, target, ());
    }

    fn ensure(&mut self, title: &str) -> NodeIndex {
        match self.by_title.get(title) {
            Some(&idx) => idx,
            None => self.insert(title, 0),
        }
    }

    fn insert(&mut self, title: &str, record_count: u32) -> NodeIndex {
        let idx = self.inner.add_node(NoteNode {
            title: title.to_string(),
            record_count,
        });
        self.by_title.insert(title.to_string(), idx);
        idx
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    /// Look up a node by title.
    pub fn note(&self, title: &str) -> Option<&NoteNode> {
        self.by_title.get(title).map(|&idx| &self.inner[idx])
    }

    /// Iterate over nodes in insertion order.
    pub fn notes(&self) -> impl Iterator<Item = &NoteNode> {
        self.inner
            .node_indices()
            .map(move |idx| &self.inner[idx])
    }

    /// Iterate over edges as (parent title, child title), in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.raw_edges().iter().map(move |edge| {
            (
                self.inner[edge.source()].title.as_str(),
                self.inner[edge.target()].title.as_str(),
            )
        })
    }

    pub fn has_edge(&self, parent: &str, child: &str) -> bool {
        match (self.by_title.get(parent), self.by_title.get(child)) {
            (Some(&a), Some(&b)) => self.inner.contains_edge(a, b),
            _ => false,
        }
    }

    /// Number of notes this note references.
    pub fn out_degree(&self, title: &str) -> usize {
        self.degree(title, Direction::Outgoing)
    }

    /// Number of notes referencing this note.
    pub fn in_degree(&self, title: &str) -> usize {
        self.degree(title, Direction::Incoming)
    }

    fn degree(&self, title: &str, direction: Direction) -> usize {
        self.by_title
            .get(title)
            .map_or(0, |&idx| self.inner.neighbors_directed(idx, direction).count())
    }
}

impl Default for NoteGraph {
    fn default() -> Self {
        Self::new()
    }
}
