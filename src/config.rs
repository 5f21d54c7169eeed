//! Layout configuration.
//!
//! [`LayoutConfig`] controls which layout engine is used and the parameters
//! common to all engines. It implements [`serde::Deserialize`] so callers
//! can load it from external sources; every field has a default.

use serde::Deserialize;

use crate::layout::engines::EngineKind;

/// Configuration for a layout run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Layout engine to use.
    engine: EngineKind,

    /// Width of the layout area in px.
    width: f32,

    /// Height of the layout area in px.
    height: f32,

    /// Number of force-simulation iterations (force and curvilinear engines).
    iterations: usize,

    /// Whether force-directed layout seeds uniformly random initial
    /// positions before simulating.
    randomize: bool,

    /// Optional seed making randomized layouts reproducible.
    seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            engine: EngineKind::default(),
            width: 800.0,
            height: 600.0,
            iterations: 100,
            randomize: true,
            seed: None,
        }
    }
}

impl LayoutConfig {
    /// Returns the configured engine kind.
    pub fn engine(&self) -> EngineKind {
        self.engine
    }

    /// Returns the layout area width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the layout area height.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Returns the number of force-simulation iterations.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns whether initial positions are randomized.
    pub fn randomize(&self) -> bool {
        self.randomize
    }

    /// Returns the random seed, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = LayoutConfig::default();
        assert_eq!(config.engine(), EngineKind::Force);
        assert_eq!(config.width(), 800.0);
        assert_eq!(config.iterations(), 100);
        assert!(config.randomize());
        assert!(config.seed().is_none());
    }

    #[test]
    fn test_config_deserializes_with_partial_fields() {
        let config: LayoutConfig =
            serde_json::from_str(r#"{"engine": "tree", "width": 400}"#).unwrap();
        assert_eq!(config.engine(), EngineKind::Tree);
        assert_eq!(config.width(), 400.0);
        assert_eq!(config.height(), 600.0);
    }
}
