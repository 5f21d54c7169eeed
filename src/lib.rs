//! Quiver is a 2-D graph layout library.
//!
//! A [`Graph`] of labeled, styled vertices and weighted directed edges is
//! positioned by a layout engine and then handed to a caller-supplied
//! [`render::Surface`] for drawing. Engines cover uniform random scatter,
//! circular arrangement, Fruchterman-Reingold force simulation with
//! connected-component anchoring, rooted-tree leveling, and a curvilinear
//! decorator bending every edge into a quadratic curve.
//!
//! ```no_run
//! use quiver::{EngineBuilder, EngineKind, LayoutEngine, graph::{Graph, Vertex}, style::EdgeStyle};
//!
//! # fn main() -> Result<(), quiver::QuiverError> {
//! let mut graph = Graph::new("example", true);
//! let a = graph.insert_vertex(Vertex::new("a"));
//! let b = graph.insert_vertex(Vertex::new("b"));
//! graph.insert_edge("a to b", 1.0, a, b, EdgeStyle::default());
//!
//! let engine = EngineBuilder::new()
//!     .with_dimensions(800.0, 600.0)
//!     .with_iterations(100)
//!     .build(EngineKind::Force);
//! engine.run(&mut graph)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod layout;
pub mod render;
pub mod style;

pub use config::LayoutConfig;
pub use document::{Document, parse};
pub use error::{DocumentError, LayoutError, QuiverError};
pub use graph::{Edge, Graph, Vertex, VertexId};
pub use layout::engines::{
    CancelToken, EngineBuilder, EngineKind, LayoutEngine, Progress, ProgressCallback,
};
