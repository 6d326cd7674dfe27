//! spring-rs: retained-mode spring-path geometry.
//!
//! Draws a parametric spring (helix) between two endpoints such that the
//! coil's diameter keeps a fixed physical size while the enclosing viewport
//! is resized, panned, or rescaled anisotropically. Geometry is described in
//! deferred units (viewport fractions plus absolute lengths) and resolved
//! lazily against the current viewport, keyed by a monotonic version token.

pub mod core;
pub mod error;
pub mod layer;
pub mod render;
pub mod scene;
pub mod telemetry;

pub use error::{SpringError, SpringResult};
pub use layer::{CoordTransform, DataRow, LayerBuild, LayerConfig, PanelParams, draw_layer};
pub use scene::SpringNode;
