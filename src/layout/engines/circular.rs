//! Circular vertex layout.
//!
//! Spreads the visible vertices evenly on a circle. No cross reduction.

use std::f32::consts::TAU;

use crate::error::QuiverError;
use crate::geometry::Point;
use crate::graph::Graph;
use crate::layout::engines::LayoutEngine;

/// Circular layout engine.
pub struct Engine {
    width: f32,
    height: f32,
}

impl Engine {
    /// Create a circular layout engine for the given area.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl LayoutEngine for Engine {
    fn run(&self, graph: &mut Graph) -> Result<(), QuiverError> {
        let count = graph.visible_vertices().count();
        if count == 0 {
            return Ok(());
        }

        let radius = self.width.min(self.height) / 2.0;
        let center = Point::new(self.width / 2.0, self.height / 2.0);
        // Step so that the vertices are equally apart, visited in
        // traversal order.
        let step = TAU / count as f32;

        let mut angle = 0.0_f32;
        for id in graph.vertex_ids() {
            let vertex = graph
                .vertex_mut(id)
                .expect("vertex ids snapshot is live");
            if vertex.is_hidden() {
                continue;
            }
            let offset = Point::new(radius * angle.cos(), radius * angle.sin());
            vertex.set_position(center.add_point(offset).round());
            angle += step;
        }
        Ok(())
    }
}
