//! Rendering collaborator interface.
//!
//! The layout library never draws. [`plot`] walks a laid-out graph and hands
//! final geometry to a caller-supplied [`Surface`]: edges first so vertices
//! draw over their endpoints, hidden entities never surfaced. What a surface
//! does with the frames is its own business; no drawing backend ships here.

use crate::geometry::Point;
use crate::graph::Graph;
use crate::style::{EdgeStyle, VertexStyle};

/// Geometry and style of one vertex, ready to draw.
#[derive(Debug)]
pub struct VertexFrame<'a> {
    position: Point,
    style: &'a VertexStyle,
    label: &'a str,
}

impl<'a> VertexFrame<'a> {
    /// Top-left position of the vertex.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Center of the vertex, offset by half the styled extents.
    pub fn center(&self) -> Point {
        self.position.add_point(Point::new(
            self.style.width / 2.0,
            self.style.height / 2.0,
        ))
    }

    /// Drawing style.
    pub fn style(&self) -> &'a VertexStyle {
        self.style
    }

    /// Label text; drawn centered when the style asks for it.
    pub fn label(&self) -> &'a str {
        self.label
    }
}

/// Geometry and style of one edge, ready to draw.
#[derive(Debug)]
pub struct EdgeFrame<'a> {
    start: Point,
    end: Point,
    control: Option<Point>,
    style: &'a EdgeStyle,
    label: &'a str,
    show_arrow: bool,
}

impl<'a> EdgeFrame<'a> {
    /// Start point, at the source vertex center.
    pub fn start(&self) -> Point {
        self.start
    }

    /// End point, at the target vertex center.
    pub fn end(&self) -> Point {
        self.end
    }

    /// Quadratic control point for curved edges.
    pub fn control(&self) -> Option<Point> {
        self.control
    }

    /// Drawing style.
    pub fn style(&self) -> &'a EdgeStyle {
        self.style
    }

    /// Label text.
    pub fn label(&self) -> &'a str {
        self.label
    }

    /// True when the surface should draw an arrowhead at the end point.
    pub fn show_arrow(&self) -> bool {
        self.show_arrow
    }

    /// Samples the edge path at `t` in `[0, 1]`.
    ///
    /// Straight edges interpolate linearly; curved edges follow the
    /// quadratic Bezier through the control point, so a surface can flatten
    /// the curve into as many segments as it likes.
    pub fn point_at(&self, t: f32) -> Point {
        match self.control {
            Some(control) => {
                let u = 1.0 - t;
                self.start
                    .scale(u * u)
                    .add_point(control.scale(2.0 * u * t))
                    .add_point(self.end.scale(t * t))
            }
            None => self.start.add_point(self.end.sub_point(self.start).scale(t)),
        }
    }
}

/// A drawing backend consuming final layout geometry.
pub trait Surface {
    /// Draw one straight or curved edge.
    fn draw_edge(&mut self, edge: &EdgeFrame<'_>);

    /// Draw one vertex.
    fn draw_vertex(&mut self, vertex: &VertexFrame<'_>);
}

/// Plots a graph onto a surface.
pub fn plot(graph: &Graph, surface: &mut impl Surface) {
    // Draw edges first.
    for (_, vertex) in graph.visible_vertices() {
        for edge in vertex.edges() {
            if edge.is_hidden() {
                continue;
            }
            let Some(target) = graph.vertex(edge.to()) else {
                continue;
            };
            if target.is_hidden() {
                continue;
            }
            surface.draw_edge(&EdgeFrame {
                start: vertex.center().round(),
                end: target.center().round(),
                control: edge.is_curved().then(|| edge.control()),
                style: edge.style(),
                label: edge.label(),
                show_arrow: graph.is_directed() && edge.style().show_arrow,
            });
        }
    }

    // Then the vertices.
    for (_, vertex) in graph.visible_vertices() {
        surface.draw_vertex(&VertexFrame {
            position: vertex.position(),
            style: vertex.style(),
            label: vertex.label(),
        });
    }
}
