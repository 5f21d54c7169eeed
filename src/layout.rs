//! Layout engines for positioning graph vertices and routing edges.

pub mod engines;

// Public re-export of the engine builder for easier access
pub use engines::EngineBuilder;
