//! Rooted-tree vertex layout.
//!
//! Levels vertices by hierarchy and assigns coordinates column by column.
//! Assumes a directed acyclic graph with at least one zero-in-degree vertex;
//! anything else is a precondition violation reported as a
//! [`LayoutError`](crate::error::LayoutError).

use log::debug;

use crate::error::{LayoutError, QuiverError};
use crate::geometry::Point;
use crate::graph::{Graph, VertexId};
use crate::layout::engines::LayoutEngine;

/// Vertical offset of the root row.
const TOP_MARGIN: f32 = 75.0;

/// Vertical distance between consecutive levels.
const LEVEL_SPACING: f32 = 80.0;

/// Horizontal distance between consecutive columns.
const COLUMN_SPACING: f32 = 100.0;

/// Horizontal offset of the first column.
const LEFT_MARGIN: f32 = 25.0;

/// Rooted-tree layout engine.
pub struct Engine;

impl Engine {
    /// Create a rooted-tree layout engine.
    pub fn new() -> Self {
        Self
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine for Engine {
    fn run(&self, graph: &mut Graph) -> Result<(), QuiverError> {
        if graph.vertex_count() == 0 {
            return Ok(());
        }

        let ids = graph.vertex_ids();
        let live = "vertex set is stable during tree layout";

        // Level and in-degree are scratch owned by this call.
        for &id in &ids {
            let vertex = graph.vertex_mut(id).expect(live);
            vertex.set_level(-1);
            vertex.set_parent_count(0);
        }
        for &id in &ids {
            let targets: Vec<VertexId> = graph.edges_from(id).map(|edge| edge.to()).collect();
            for target in targets {
                let vertex = graph.vertex_mut(target).expect(live);
                vertex.set_parent_count(vertex.parent_count() + 1);
            }
        }

        // Roots are the zero-in-degree vertices.
        let mut sort_stack = Vec::new();
        let mut draw_stack = Vec::new();
        for &id in &ids {
            if graph.vertex(id).expect(live).parent_count() == 0 {
                graph.vertex_mut(id).expect(live).set_level(0);
                sort_stack.push(id);
                draw_stack.push(id);
            }
        }
        if sort_stack.is_empty() {
            return Err(LayoutError::NoRoots.into());
        }

        // Topological processing: level each vertex one below the parent
        // that reached it first.
        let mut sorted = Vec::with_capacity(ids.len());
        while let Some(id) = sort_stack.pop() {
            sorted.push(id);
            let level = graph.vertex(id).expect(live).level();
            let targets: Vec<VertexId> = graph.edges_from(id).map(|edge| edge.to()).collect();
            for target in targets {
                let vertex = graph.vertex_mut(target).expect(live);
                vertex.set_parent_count(vertex.parent_count() - 1);
                if vertex.level() == -1 {
                    vertex.set_level(level + 1);
                }
                if vertex.parent_count() == 0 {
                    sort_stack.push(target);
                }
            }
        }
        if sorted.len() < ids.len() {
            return Err(LayoutError::CyclicGraph {
                unleveled: ids.len() - sorted.len(),
            }
            .into());
        }

        // Forward correction: multi-parent vertices settle below all
        // parents.
        for &id in &sorted {
            let level = graph.vertex(id).expect(live).level();
            let targets: Vec<VertexId> = graph.edges_from(id).map(|edge| edge.to()).collect();
            for target in targets {
                let vertex = graph.vertex_mut(target).expect(live);
                if vertex.level() <= level {
                    vertex.set_level(level + 1);
                }
            }
        }

        // Backward compaction: pull a vertex down towards its successors to
        // minimize tree height without violating ordering.
        for &id in sorted.iter().rev() {
            let min_successor = graph
                .edges_from(id)
                .map(|edge| graph.vertex(edge.to()).expect(live).level())
                .min();
            if let Some(min_level) = min_successor {
                let vertex = graph.vertex_mut(id).expect(live);
                if vertex.level() < min_level {
                    vertex.set_level(min_level - 1);
                }
            }
        }

        debug!(
            vertices = sorted.len(),
            roots = draw_stack.len();
            "Assigning rooted tree coordinates",
        );

        // Coordinate assignment via a LIFO draw queue seeded with the
        // roots. A return to a shallower or equal level starts a new
        // column; the level sentinel marks a vertex as placed.
        let mut cursor = LEFT_MARGIN;
        let mut last_level = -1;
        while let Some(id) = draw_stack.pop() {
            let level = graph.vertex(id).expect(live).level();
            if level == -1 {
                continue;
            }
            if level <= last_level {
                cursor += COLUMN_SPACING;
            }
            last_level = level;

            let vertex = graph.vertex_mut(id).expect(live);
            vertex.set_position(Point::new(
                cursor,
                TOP_MARGIN + level as f32 * LEVEL_SPACING,
            ));
            vertex.set_level(-1);

            let unplaced: Vec<VertexId> = graph
                .edges_from(id)
                .filter(|edge| graph.vertex(edge.to()).expect(live).level() != -1)
                .map(|edge| edge.to())
                .collect();
            draw_stack.extend(unplaced);
        }

        Ok(())
    }
}
