mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, LineCap, LinePattern, PathPrimitive, StrokeStyle};

use crate::error::SpringResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from unit resolution and scene lifecycle.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> SpringResult<()>;
}
