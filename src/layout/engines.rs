//! Layout engine factory module
//!
//! This module provides a system for selecting and using different layout
//! engines. Engines are interchangeable: each one takes a mutable graph,
//! rewrites vertex positions (and edge curve data) in place, and returns.
//!
//! The module uses a builder pattern for creating and configuring engines.

// Layout engine modules with different implementations
mod circular;
mod curvilinear;
mod force;
mod random;
mod tree;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Deserialize;

use crate::config::LayoutConfig;
use crate::error::QuiverError;
use crate::graph::Graph;

/// Trait defining the interface for layout engines.
///
/// An engine mutates vertex positions (and edge curve data) in place. It may
/// insert hidden vertices while running but must remove every one of them
/// before returning, on success and on failure alike.
pub trait LayoutEngine {
    /// Calculate a layout for the graph.
    fn run(&self, graph: &mut Graph) -> Result<(), QuiverError>;
}

/// Selects which layout engine the builder constructs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Uniformly random placement.
    Random,
    /// Even placement on a circle.
    Circular,
    /// Fruchterman-Reingold force-directed placement.
    #[default]
    Force,
    /// Hierarchical placement for rooted directed acyclic graphs.
    Tree,
    /// Force-directed curve routing on top of an existing vertex layout.
    Curvilinear,
}

/// Progress report handed to the caller's progress callback.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    /// Completed simulation iterations so far.
    pub iteration: usize,
    /// Total iterations the run will perform.
    pub total: usize,
}

/// Callback invoked periodically during long-running simulations.
pub type ProgressCallback = Box<dyn Fn(Progress)>;

/// Cooperative cancellation flag checked once per simulation iteration.
///
/// Cloning shares the flag, so the caller keeps one clone and hands the
/// other to the engine. Cancellation surfaces as
/// [`LayoutError::Cancelled`](crate::error::LayoutError::Cancelled) after
/// all transient vertices have been cleaned up.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of the running layout.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Returns true once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Builder for creating and configuring layout engines.
/// Builder is not reusable after build() is called.
pub struct EngineBuilder {
    width: f32,
    height: f32,
    iterations: usize,
    randomize: bool,
    seed: Option<u64>,
    progress_interval: usize,
    progress: Option<ProgressCallback>,
    cancel: Option<CancelToken>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    /// Create a new engine builder with default configuration
    pub fn new() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            iterations: 100,
            randomize: true,
            seed: None,
            progress_interval: 10,
            progress: None,
            cancel: None,
        }
    }

    /// Create a builder pre-configured from a [`LayoutConfig`]
    pub fn from_config(config: &LayoutConfig) -> Self {
        let mut builder = Self::new();
        builder.width = config.width();
        builder.height = config.height();
        builder.iterations = config.iterations();
        builder.randomize = config.randomize();
        builder.seed = config.seed();
        builder
    }

    /// Set the dimensions of the layout area
    pub fn with_dimensions(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the number of iterations for force simulation
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set whether force-directed layout seeds random initial positions
    pub fn with_randomize(mut self, randomize: bool) -> Self {
        self.randomize = randomize;
        self
    }

    /// Set a seed making randomized placement reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set a progress callback invoked every `progress_interval` iterations
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Set how many iterations pass between progress callbacks
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    /// Set a cancellation token checked once per iteration
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Build an engine of the specified kind with the configured options
    pub fn build(self, kind: EngineKind) -> Box<dyn LayoutEngine> {
        match kind {
            EngineKind::Random => Box::new(random::Engine::new(self.width, self.height, self.seed)),
            EngineKind::Circular => Box::new(circular::Engine::new(self.width, self.height)),
            EngineKind::Tree => Box::new(tree::Engine::new()),
            EngineKind::Force => {
                let randomize = self.randomize;
                Box::new(self.build_force(randomize))
            }
            EngineKind::Curvilinear => {
                // The curvilinear decorator reuses current vertex positions.
                Box::new(curvilinear::Engine::with_inner(self.build_force(false)))
            }
        }
    }

    fn build_force(self, randomize: bool) -> force::Engine {
        let mut engine = force::Engine::new(self.width, self.height, self.iterations, randomize);
        if let Some(seed) = self.seed {
            engine.set_seed(seed);
        }
        engine.set_progress_interval(self.progress_interval);
        if let Some(callback) = self.progress {
            engine.set_progress(callback);
        }
        if let Some(token) = self.cancel {
            engine.set_cancel(token);
        }
        engine
    }
}
