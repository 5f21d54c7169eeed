//! Random vertex layout.
//!
//! Assigns every vertex a uniformly random position inside the layout area.
//! Used standalone and as the seeding step for force-directed layout.

use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};

use crate::error::QuiverError;
use crate::geometry::Point;
use crate::graph::Graph;
use crate::layout::engines::LayoutEngine;

/// Random layout engine.
pub struct Engine {
    width: f32,
    height: f32,
    seed: Option<u64>,
}

impl Engine {
    /// Create a random layout engine for the given area. A seed makes the
    /// placement reproducible.
    pub fn new(width: f32, height: f32, seed: Option<u64>) -> Self {
        Self {
            width,
            height,
            seed,
        }
    }
}

impl LayoutEngine for Engine {
    fn run(&self, graph: &mut Graph) -> Result<(), QuiverError> {
        scatter(graph, self.width, self.height, self.seed);
        Ok(())
    }
}

/// Scatters all vertices uniformly over `[0, width] x [0, height]`.
pub(crate) fn scatter(graph: &mut Graph, width: f32, height: f32, seed: Option<u64>) {
    match seed {
        Some(seed) => scatter_with(graph, width, height, &mut StdRng::seed_from_u64(seed)),
        None => scatter_with(graph, width, height, &mut rand::rng()),
    }
}

fn scatter_with(graph: &mut Graph, width: f32, height: f32, rng: &mut impl Rng) {
    for id in graph.vertex_ids() {
        let position = Point::new(
            rng.random_range(0.0..=width),
            rng.random_range(0.0..=height),
        );
        graph
            .vertex_mut(id)
            .expect("vertex ids snapshot is live")
            .set_position(position.round());
    }
}
