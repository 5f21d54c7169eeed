//! Curvilinear edge layout.
//!
//! A decorator over force-directed layout: each edge is temporarily modeled
//! as two straight segments through a free-floating hidden control vertex,
//! the simulation positions that vertex, and the edge collapses back into a
//! single quadratic curve through the settled control point. The vertex set
//! and the non-hidden edge set are observably identical before and after a
//! run; only the curve fields change.

use log::debug;

use crate::error::QuiverError;
use crate::graph::{Edge, Graph, Vertex, VertexId};
use crate::layout::engines::{LayoutEngine, force};
use crate::style::EdgeStyle;

/// Curvilinear edge layout engine.
pub struct Engine {
    inner: force::Engine,
}

impl Engine {
    /// Create a curvilinear engine running `iterations` rounds of force
    /// simulation over the hidden control vertices.
    pub fn new(width: f32, height: f32, iterations: usize) -> Self {
        Self {
            inner: force::Engine::new(width, height, iterations, false),
        }
    }

    /// Wrap a pre-configured force engine. The vertex layout of the input
    /// graph is assumed optimal, so the seeding step is disabled.
    pub fn with_inner(mut inner: force::Engine) -> Self {
        inner.set_randomize(false);
        Self { inner }
    }
}

impl LayoutEngine for Engine {
    fn run(&self, graph: &mut Graph) -> Result<(), QuiverError> {
        if graph.vertex_count() == 0 {
            return Ok(());
        }

        let mut transform = HiddenVertexTransform::apply(graph);
        let outcome = self.inner.run(transform.graph_mut());
        transform.restore();
        outcome
    }
}

struct SplitRecord {
    source: VertexId,
    control: VertexId,
    edge: Option<Edge>,
}

/// Scoped graph rewrite splitting every edge through a hidden control
/// vertex.
///
/// The transform owns the graph borrow for its whole scope; dropping it
/// without calling [`HiddenVertexTransform::restore`] still removes every
/// control vertex and re-attaches the original edges, so the rewrite cannot
/// leak hidden vertices on any exit path.
struct HiddenVertexTransform<'g> {
    graph: &'g mut Graph,
    records: Vec<SplitRecord>,
    fixed: Vec<(VertexId, bool)>,
    restored: bool,
}

impl<'g> HiddenVertexTransform<'g> {
    /// Splits every outgoing edge of every visible vertex and pins the
    /// visible vertices in place.
    fn apply(graph: &'g mut Graph) -> Self {
        let mut records = Vec::new();
        let mut fixed = Vec::new();

        for source in graph.vertex_ids() {
            let snapshot = graph.vertex(source).expect("snapshot ids are live");
            if snapshot.is_hidden() {
                continue;
            }
            let was_fixed = snapshot.is_fixed();
            let targets: Vec<VertexId> =
                snapshot.edges().iter().map(|edge| edge.to()).collect();

            fixed.push((source, was_fixed));
            graph
                .vertex_mut(source)
                .expect("snapshot ids are live")
                .set_fixed(true);

            for target in targets {
                let edge = graph
                    .detach_edge(source, target)
                    .expect("edge listed in outgoing list");

                let mut control_vertex = Vertex::new_hidden("control");
                // Seed the control point on the chord so the simulation
                // settles near it.
                let chord_midpoint = graph
                    .vertex(source)
                    .expect("snapshot ids are live")
                    .position()
                    .midpoint(graph.vertex(target).expect("snapshot ids are live").position());
                control_vertex.set_position(chord_midpoint);

                let control = graph.insert_vertex(control_vertex);
                graph.insert_edge("", 1.0, source, control, EdgeStyle::default());
                graph.insert_edge("", 1.0, control, target, EdgeStyle::default());

                records.push(SplitRecord {
                    source,
                    control,
                    edge: Some(edge),
                });
            }
        }

        debug!(split_edges = records.len(); "Split edges through hidden control vertices");

        Self {
            graph,
            records,
            fixed,
            restored: false,
        }
    }

    fn graph_mut(&mut self) -> &mut Graph {
        &mut *self.graph
    }

    /// Collapses every split back into a single curved edge.
    fn restore(mut self) {
        self.restore_inner();
    }

    fn restore_inner(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;

        for record in &mut self.records {
            let Some(mut edge) = record.edge.take() else {
                continue;
            };
            let control_position = self.graph.vertex(record.control).map(Vertex::position);
            // Removing the control vertex also removes its two segments.
            self.graph.remove_vertex(record.control);
            if let Some(position) = control_position {
                edge.set_curved(position);
            }
            self.graph.attach_edge(record.source, edge);
        }

        for &(id, was_fixed) in &self.fixed {
            if let Some(vertex) = self.graph.vertex_mut(id) {
                vertex.set_fixed(was_fixed);
            }
        }
    }
}

impl Drop for HiddenVertexTransform<'_> {
    fn drop(&mut self) {
        self.restore_inner();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LayoutError, QuiverError};
    use crate::geometry::Point;
    use crate::layout::engines::CancelToken;

    fn triangle() -> (Graph, Vec<VertexId>) {
        let mut graph = Graph::new("triangle", true);
        let ids: Vec<VertexId> = ["a", "b", "c"]
            .iter()
            .map(|label| graph.insert_vertex(Vertex::new(*label)))
            .collect();
        graph.insert_edge("ab", 1.0, ids[0], ids[1], EdgeStyle::default());
        graph.insert_edge("bc", 2.0, ids[1], ids[2], EdgeStyle::default());
        graph.insert_edge("ca", 1.0, ids[2], ids[0], EdgeStyle::default());

        // Pre-position the vertices the way a vertex layout would.
        let positions = [(100.0, 100.0), (500.0, 120.0), (300.0, 400.0)];
        for (&id, &(x, y)) in ids.iter().zip(positions.iter()) {
            graph.vertex_mut(id).unwrap().set_position(Point::new(x, y));
        }
        (graph, ids)
    }

    #[test]
    fn test_vertex_and_edge_sets_are_preserved() {
        let (mut graph, ids) = triangle();
        Engine::new(800.0, 600.0, 30).run(&mut graph).unwrap();

        assert_eq!(graph.vertex_count(), 3);
        assert!(graph.vertices().all(|(_, v)| !v.is_hidden()));
        assert!(graph.vertices().all(|(_, v)| !v.is_fixed()));

        let visible_edges: usize = graph
            .vertices()
            .map(|(_, v)| v.edges().iter().filter(|e| !e.is_hidden()).count())
            .sum();
        assert_eq!(visible_edges, 3);
        assert_eq!(graph.edge_between(ids[1], ids[2]).unwrap().weight(), 2.0);
    }

    #[test]
    fn test_every_edge_becomes_curved() {
        let (mut graph, ids) = triangle();
        Engine::new(800.0, 600.0, 30).run(&mut graph).unwrap();

        for &id in &ids {
            for edge in graph.vertex(id).unwrap().edges() {
                assert!(edge.is_curved());
            }
        }
    }

    #[test]
    fn test_transform_drop_restores_the_graph() {
        let (mut graph, ids) = triangle();
        {
            let _transform = HiddenVertexTransform::apply(&mut graph);
            // Dropped without restore(), as after an inner-layout failure.
        }

        assert_eq!(graph.vertex_count(), 3);
        assert!(graph.vertices().all(|(_, v)| !v.is_hidden()));
        assert!(graph.edge_between(ids[0], ids[1]).is_some());
        assert!(graph.vertices().all(|(_, v)| !v.is_fixed()));
    }

    #[test]
    fn test_cancelled_inner_run_still_restores() {
        let (mut graph, _) = triangle();
        let token = CancelToken::new();
        token.cancel();

        let mut inner = force::Engine::new(800.0, 600.0, 30, false);
        inner.set_cancel(token);
        let err = Engine::with_inner(inner).run(&mut graph).unwrap_err();

        assert!(matches!(err, QuiverError::Layout(LayoutError::Cancelled)));
        assert_eq!(graph.vertex_count(), 3);
        assert!(graph.vertices().all(|(_, v)| !v.is_hidden()));
    }

    #[test]
    fn test_fixed_flag_set_by_caller_survives() {
        let (mut graph, ids) = triangle();
        graph.vertex_mut(ids[0]).unwrap().set_fixed(true);

        Engine::new(800.0, 600.0, 10).run(&mut graph).unwrap();
        assert!(graph.vertex(ids[0]).unwrap().is_fixed());
        assert!(!graph.vertex(ids[1]).unwrap().is_fixed());
    }
}
