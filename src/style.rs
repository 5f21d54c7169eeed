//! Visual style definitions for vertices and edges.
//!
//! Styles are carried by the graph model and handed unchanged to the
//! rendering collaborator; the layout engines never interpret them beyond
//! the vertex extents used for edge anchor points.

use serde::Deserialize;

/// Shape used to draw a vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// Ellipse fitted to the vertex extents.
    #[default]
    Ellipse,
    /// Rectangle fitted to the vertex extents.
    Rect,
}

/// Drawing options for a single vertex.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VertexStyle {
    /// Shape of the vertex outline.
    pub shape: Shape,
    /// Width in px.
    pub width: f32,
    /// Height in px.
    pub height: f32,
    /// Fill color as an RGB hex string.
    pub fill_color: String,
    /// Border color as an RGB hex string.
    pub border_color: String,
    /// Whether the vertex label is drawn.
    pub show_label: bool,
}

impl Default for VertexStyle {
    fn default() -> Self {
        Self {
            shape: Shape::Ellipse,
            width: 80.0,
            height: 40.0,
            fill_color: "#ffffff".to_string(),
            border_color: "#000000".to_string(),
            show_label: true,
        }
    }
}

/// Drawing options for a single edge.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EdgeStyle {
    /// Line width in px.
    pub width: f32,
    /// Line color as an RGB hex string.
    pub color: String,
    /// Whether the arrowhead is drawn (directed graphs only).
    pub show_arrow: bool,
    /// Whether the edge label is drawn.
    pub show_label: bool,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            width: 2.0,
            color: "#000000".to_string(),
            show_arrow: true,
            show_label: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_style_default() {
        let style = VertexStyle::default();
        assert_eq!(style.shape, Shape::Ellipse);
        assert_eq!(style.width, 80.0);
        assert_eq!(style.height, 40.0);
        assert_eq!(style.fill_color, "#ffffff");
        assert!(style.show_label);
    }

    #[test]
    fn test_edge_style_default() {
        let style = EdgeStyle::default();
        assert_eq!(style.width, 2.0);
        assert!(style.show_arrow);
        assert!(!style.show_label);
    }

    #[test]
    fn test_shape_deserialize() {
        let shape: Shape = serde_json::from_str("\"rect\"").unwrap();
        assert_eq!(shape, Shape::Rect);
    }
}
