//! Declarative graph documents.
//!
//! A document is a thin JSON description of a graph: a list of vertices and
//! a list of edges referencing vertices by index. Translation into a
//! [`Graph`] is all-or-nothing; a malformed document or an out-of-range edge
//! endpoint produces a [`DocumentError`] and no graph.

use log::debug;
use serde::Deserialize;

use crate::error::{DocumentError, QuiverError};
use crate::graph::{Graph, Vertex, VertexId};
use crate::style::{EdgeStyle, VertexStyle};

/// A parsed graph document, not yet translated into a [`Graph`].
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// Graph label.
    pub label: String,

    /// Whether edges are directed.
    #[serde(default)]
    pub directed: bool,

    /// Vertex descriptions; edge endpoints index into this list.
    pub vertices: Vec<VertexSpec>,

    /// Edge descriptions.
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

/// Description of a single vertex.
#[derive(Debug, Clone, Deserialize)]
pub struct VertexSpec {
    /// Vertex label.
    pub label: String,

    /// Drawing style; the standard style when absent.
    #[serde(default)]
    pub style: Option<VertexStyle>,
}

/// Description of a single edge between two vertex indices.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeSpec {
    /// Edge label; empty when absent.
    #[serde(default)]
    pub label: Option<String>,

    /// Edge weight; must be positive. Absent or zero resolves to 1.
    #[serde(default)]
    pub weight: Option<f32>,

    /// Index of the start vertex.
    pub from: usize,

    /// Index of the end vertex.
    pub to: usize,

    /// Drawing style; the standard style when absent.
    #[serde(default)]
    pub style: Option<EdgeStyle>,
}

impl Document {
    /// Parses a JSON document.
    pub fn from_json(input: &str) -> Result<Self, QuiverError> {
        let document: Document = serde_json::from_str(input).map_err(DocumentError::from)?;
        Ok(document)
    }

    /// Translates this document into a [`Graph`].
    pub fn build(&self) -> Result<Graph, QuiverError> {
        let mut graph = Graph::new(self.label.clone(), self.directed);

        let ids: Vec<VertexId> = self
            .vertices
            .iter()
            .map(|spec| {
                let style = spec.style.clone().unwrap_or_default();
                graph.insert_vertex(Vertex::with_style(spec.label.clone(), style))
            })
            .collect();

        for spec in &self.edges {
            let label = spec.label.clone().unwrap_or_default();
            let from = *ids
                .get(spec.from)
                .ok_or_else(|| endpoint_error(&label, spec.from, ids.len()))?;
            let to = *ids
                .get(spec.to)
                .ok_or_else(|| endpoint_error(&label, spec.to, ids.len()))?;
            let weight = resolve_weight(&label, spec.weight)?;
            let style = spec.style.clone().unwrap_or_default();
            graph.insert_edge(label, weight, from, to, style);
        }

        debug!(
            graph_label = graph.label(),
            vertices = graph.vertex_count(),
            edges = self.edges.len();
            "Built graph from document",
        );
        Ok(graph)
    }
}

/// Parses a JSON document and translates it into a [`Graph`] in one step.
pub fn parse(input: &str) -> Result<Graph, QuiverError> {
    Document::from_json(input)?.build()
}

fn endpoint_error(edge: &str, index: usize, vertex_count: usize) -> QuiverError {
    DocumentError::EdgeEndpoint {
        edge: edge.to_string(),
        index,
        vertex_count,
    }
    .into()
}

/// A missing or zero weight resolves to the default of 1; a negative weight
/// violates the data model and is rejected.
fn resolve_weight(edge: &str, weight: Option<f32>) -> Result<f32, QuiverError> {
    match weight {
        None => Ok(1.0),
        Some(value) if value == 0.0 => Ok(1.0),
        Some(value) if value > 0.0 => Ok(value),
        Some(value) => Err(DocumentError::NonPositiveWeight {
            edge: edge.to_string(),
            weight: value,
        }
        .into()),
    }
}
