use crate::error::SpringResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless embedding.
///
/// It still validates frame content so tests catch invalid geometry before a
/// real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_path_count: usize,
    pub last_point_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> SpringResult<()> {
        frame.validate()?;
        self.last_path_count = frame.paths.len();
        self.last_point_count = frame.point_count();
        Ok(())
    }
}
