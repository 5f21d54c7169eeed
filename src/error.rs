//! Error types for quiver operations.
//!
//! This module provides the main error type [`QuiverError`] which wraps the
//! error conditions that can occur while building a graph from a document or
//! running a layout engine over it.

use thiserror::Error;

/// The main error type for quiver operations.
#[derive(Debug, Error)]
pub enum QuiverError {
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// Errors raised while translating a declarative document into a graph.
///
/// Construction is all-or-nothing: when any of these is returned, no
/// partially built graph is observable.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("edge {edge:?} references vertex index {index} out of range (vertex count {vertex_count})")]
    EdgeEndpoint {
        edge: String,
        index: usize,
        vertex_count: usize,
    },

    #[error("edge {edge:?} has non-positive weight {weight}")]
    NonPositiveWeight { edge: String, weight: f32 },
}

/// Errors raised by layout engines.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    /// Rooted-tree layout requires at least one zero-in-degree vertex.
    #[error("rooted tree layout requires at least one root vertex")]
    NoRoots,

    /// Topological processing left vertices unleveled, so a cycle hides
    /// behind the roots.
    #[error("rooted tree layout ran on a cyclic graph ({unleveled} vertices unleveled)")]
    CyclicGraph { unleveled: usize },

    /// The caller's cancellation token was set mid-run. All transient
    /// vertices have been removed; positions hold the last iteration state.
    #[error("layout cancelled by caller")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_error_display() {
        assert_eq!(
            LayoutError::CyclicGraph { unleveled: 2 }.to_string(),
            "rooted tree layout ran on a cyclic graph (2 vertices unleveled)"
        );
    }

    #[test]
    fn test_document_error_wraps_into_quiver_error() {
        let err = QuiverError::from(DocumentError::EdgeEndpoint {
            edge: "e".to_string(),
            index: 7,
            vertex_count: 3,
        });
        assert!(err.to_string().starts_with("Document error"));
    }
}
