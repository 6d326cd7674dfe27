use serde::{Deserialize, Serialize};

use crate::core::ViewportContext;
use crate::error::SpringResult;
use crate::render::PathPrimitive;

/// Backend-agnostic scene for one draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: ViewportContext,
    pub paths: Vec<PathPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: ViewportContext) -> Self {
        Self {
            viewport,
            paths: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: PathPrimitive) -> Self {
        self.paths.push(path);
        self
    }

    pub fn validate(&self) -> SpringResult<()> {
        for path in &self.paths {
            path.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.iter().all(PathPrimitive::is_empty)
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.paths.iter().map(PathPrimitive::point_count).sum()
    }
}
