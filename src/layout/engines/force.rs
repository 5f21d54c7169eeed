//! Fruchterman-Reingold force-directed vertex layout.
//!
//! Vertices repel each other while edges act as springs pulling their
//! endpoints together; a linearly cooling temperature caps the per-iteration
//! displacement so the simulation settles into a static equilibrium.

mod components;

use log::debug;

use crate::error::{LayoutError, QuiverError};
use crate::geometry::Point;
use crate::graph::Graph;
use crate::layout::engines::{CancelToken, LayoutEngine, Progress, ProgressCallback, random};

/// Minimum inter-vertex distance, guarding the force terms against
/// coincident vertices.
const MIN_DISTANCE: f32 = 20.0;

/// Fine tune attraction.
const ATTRACTION: f32 = 1.5;

/// Fine tune repulsion.
const REPULSION: f32 = 0.5;

/// Explicit parameters of the force model.
///
/// The forces are pure functions of these parameters; nothing is captured
/// from the engine configuration.
#[derive(Debug, Clone, Copy)]
pub struct Params {
    /// Ideal edge length, derived from layout area and vertex count.
    pub k: f32,
    /// Distance floor applied before evaluating either force.
    pub eps: f32,
    /// Attraction scalar.
    pub attraction: f32,
    /// Repulsion scalar.
    pub repulsion: f32,
}

impl Params {
    /// Derives parameters for a layout area and vertex count.
    pub fn for_area(width: f32, height: f32, vertex_count: usize) -> Self {
        Self {
            k: (width * height / vertex_count as f32).sqrt(),
            eps: MIN_DISTANCE,
            attraction: ATTRACTION,
            repulsion: REPULSION,
        }
    }

    /// Attractive force between edge endpoints at distance `d`.
    pub fn attractive(&self, d: f32) -> f32 {
        self.attraction * d * d / self.k
    }

    /// Repulsive force between a vertex pair at distance `d`.
    pub fn repulsive(&self, d: f32) -> f32 {
        self.repulsion * self.k * self.k / d
    }
}

/// Force-directed layout engine.
pub struct Engine {
    width: f32,
    height: f32,
    iterations: usize,
    randomize: bool,
    seed: Option<u64>,
    progress_interval: usize,
    progress: Option<ProgressCallback>,
    cancel: Option<CancelToken>,
}

impl Engine {
    /// Create a force-directed layout engine.
    ///
    /// With `randomize` set, initial positions are seeded uniformly at
    /// random; otherwise the simulation refines the current positions.
    pub fn new(width: f32, height: f32, iterations: usize, randomize: bool) -> Self {
        Self {
            width,
            height,
            iterations,
            randomize,
            seed: None,
            progress_interval: 10,
            progress: None,
            cancel: None,
        }
    }

    /// Set a seed making the randomized seeding step reproducible
    pub fn set_seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    /// Set whether initial positions are randomized
    pub fn set_randomize(&mut self, randomize: bool) -> &mut Self {
        self.randomize = randomize;
        self
    }

    /// Set a progress callback
    pub fn set_progress(&mut self, callback: ProgressCallback) -> &mut Self {
        self.progress = Some(callback);
        self
    }

    /// Set how many iterations pass between progress callbacks
    pub fn set_progress_interval(&mut self, interval: usize) -> &mut Self {
        self.progress_interval = interval.max(1);
        self
    }

    /// Set a cancellation token checked once per iteration
    pub fn set_cancel(&mut self, token: CancelToken) -> &mut Self {
        self.cancel = Some(token);
        self
    }

    fn simulate(&self, graph: &mut Graph, params: &Params) -> Result<(), QuiverError> {
        let ids = graph.vertex_ids();
        let live = "vertex set is stable during simulation";

        let mut temperature = self.width / 10.0;
        let cooling = temperature / (self.iterations as f32 + 1.0);
        let margin_x = self.width / 50.0;
        let margin_y = self.height / 50.0;

        for iteration in 0..self.iterations {
            if let Some(token) = &self.cancel {
                if token.is_cancelled() {
                    debug!(iteration; "Layout cancelled");
                    return Err(LayoutError::Cancelled.into());
                }
            }

            // Repulsive forces between every pair of non-fixed vertices.
            for &id in &ids {
                let vertex = graph.vertex(id).expect(live);
                let position = vertex.position();
                let fixed = vertex.is_fixed();
                graph.vertex_mut(id).expect(live).set_displacement(Point::default());
                if fixed {
                    continue;
                }

                let mut displacement = Point::default();
                for &other_id in &ids {
                    if other_id == id {
                        continue;
                    }
                    let other = graph.vertex(other_id).expect(live);
                    if other.is_fixed() {
                        continue;
                    }
                    let difference = position.sub_point(other.position());
                    let distance = difference.hypot().max(params.eps);
                    let force = params.repulsive(distance);
                    displacement = displacement.add_point(difference.scale(force / distance));
                }
                graph.vertex_mut(id).expect(live).set_displacement(displacement);
            }

            // Attractive forces along every outgoing edge, pulling both
            // endpoints together.
            for &id in &ids {
                let vertex = graph.vertex(id).expect(live);
                if vertex.is_fixed() {
                    continue;
                }
                let position = vertex.position();
                let targets: Vec<_> = vertex.edges().iter().map(|edge| edge.to()).collect();

                for target in targets {
                    let difference = position.sub_point(graph.vertex(target).expect(live).position());
                    let distance = difference.hypot().max(params.eps);
                    let force = params.attractive(distance);
                    let delta = difference.scale(force / distance);

                    graph.vertex_mut(id).expect(live).add_displacement(delta.scale(-1.0));
                    graph.vertex_mut(target).expect(live).add_displacement(delta);
                }
            }

            // Limit the displacement to the temperature and keep every
            // vertex inside the frame.
            for &id in &ids {
                let vertex = graph.vertex(id).expect(live);
                if vertex.is_fixed() {
                    continue;
                }
                let displacement = vertex.displacement();
                let distance = displacement.hypot().max(params.eps);
                let step = displacement.scale(distance.min(temperature) / distance);
                let moved = vertex.position().add_point(step);
                let clamped = Point::new(
                    moved.x().clamp(margin_x, self.width - margin_x),
                    moved.y().clamp(margin_y, self.height - margin_y),
                );
                graph.vertex_mut(id).expect(live).set_position(clamped.round());
            }

            temperature -= cooling;

            if let Some(callback) = &self.progress {
                if iteration % self.progress_interval == 0 {
                    callback(Progress {
                        iteration,
                        total: self.iterations,
                    });
                }
            }
        }
        Ok(())
    }
}

impl LayoutEngine for Engine {
    fn run(&self, graph: &mut Graph) -> Result<(), QuiverError> {
        if graph.vertex_count() <= 1 {
            return Ok(());
        }

        let params = Params::for_area(self.width, self.height, graph.vertex_count());
        debug!(
            vertices = graph.vertex_count(),
            iterations = self.iterations,
            k = params.k;
            "Running force-directed layout",
        );

        // Anchor disconnected components so they attract each other instead
        // of drifting apart.
        let anchors = components::insert_anchors(graph);

        if self.randomize {
            random::scatter(graph, self.width, self.height, self.seed);
        }

        let outcome = self.simulate(graph, &params);
        components::remove_anchors(graph, &anchors);
        outcome?;

        graph.normalize(self.width, self.height);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Vertex, VertexId};
    use crate::style::EdgeStyle;
    use std::cell::Cell;

    /// Two disconnected components of size 3 and 4.
    fn two_components() -> Graph {
        let mut graph = Graph::new("components", false);
        let ids: Vec<VertexId> = (0..7)
            .map(|n| graph.insert_vertex(Vertex::new(format!("{n}"))))
            .collect();
        graph.insert_edge("", 1.0, ids[0], ids[1], EdgeStyle::default());
        graph.insert_edge("", 1.0, ids[1], ids[2], EdgeStyle::default());
        graph.insert_edge("", 1.0, ids[3], ids[4], EdgeStyle::default());
        graph.insert_edge("", 1.0, ids[4], ids[5], EdgeStyle::default());
        graph.insert_edge("", 1.0, ids[5], ids[6], EdgeStyle::default());
        graph
    }

    fn engine() -> Engine {
        let mut engine = Engine::new(800.0, 600.0, 100, true);
        engine.set_seed(42);
        engine
    }

    #[test]
    fn test_anchors_are_fully_removed() {
        let mut graph = two_components();
        engine().run(&mut graph).unwrap();

        assert_eq!(graph.vertex_count(), 7);
        assert!(graph.vertices().all(|(_, v)| !v.is_hidden()));
        for (_, vertex) in graph.vertices() {
            for edge in vertex.edges() {
                assert!(!edge.is_hidden());
            }
        }
    }

    #[test]
    fn test_positions_stay_inside_the_area() {
        let mut graph = two_components();
        engine().run(&mut graph).unwrap();

        for (_, vertex) in graph.vertices() {
            let position = vertex.position();
            assert!((0.0..=800.0).contains(&position.x()), "{position:?}");
            assert!((0.0..=600.0).contains(&position.y()), "{position:?}");
        }
    }

    #[test]
    fn test_no_two_vertices_coincide() {
        let mut graph = two_components();
        engine().run(&mut graph).unwrap();

        let positions: Vec<Point> = graph.vertices().map(|(_, v)| v.position()).collect();
        for (i, a) in positions.iter().enumerate() {
            for b in positions.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_single_vertex_short_circuits() {
        let mut graph = Graph::new("one", false);
        let id = graph.insert_vertex(Vertex::new("only"));
        graph.vertex_mut(id).unwrap().set_position(Point::new(5.0, 5.0));

        engine().run(&mut graph).unwrap();
        assert_eq!(graph.vertex(id).unwrap().position(), Point::new(5.0, 5.0));
    }

    #[test]
    fn test_cancellation_cleans_up_anchors() {
        let mut graph = two_components();
        let token = CancelToken::new();
        token.cancel();

        let mut engine = engine();
        engine.set_cancel(token);
        let err = engine.run(&mut graph).unwrap_err();

        assert!(matches!(
            err,
            QuiverError::Layout(LayoutError::Cancelled)
        ));
        assert_eq!(graph.vertex_count(), 7);
        assert!(graph.vertices().all(|(_, v)| !v.is_hidden()));
    }

    #[test]
    fn test_progress_callback_fires_every_interval() {
        let mut graph = two_components();
        let calls = std::rc::Rc::new(Cell::new(0usize));
        let seen = calls.clone();

        let mut engine = Engine::new(800.0, 600.0, 40, true);
        engine.set_seed(1);
        engine.set_progress_interval(10);
        engine.set_progress(Box::new(move |progress: Progress| {
            assert_eq!(progress.total, 40);
            seen.set(seen.get() + 1);
        }));

        engine.run(&mut graph).unwrap();
        assert_eq!(calls.get(), 4); // iterations 0, 10, 20, 30
    }

    #[test]
    fn test_params_guard_against_coincident_vertices() {
        let params = Params::for_area(800.0, 600.0, 4);
        // The distance floor keeps both force terms finite.
        assert!(params.repulsive(params.eps).is_finite());
        assert!(params.attractive(params.eps).is_finite());
    }
}
