use serde::{Deserialize, Serialize};

use crate::error::{SpringError, SpringResult};

/// Tags one disjoint sub-path inside a batched drawable so renderers can
/// separate paths without duplicating style state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PathId(u32);

impl PathId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Point in canonical physical millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointMm {
    pub x: f64,
    pub y: f64,
}

impl PointMm {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx.hypot(dy)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Ordered point sequence in physical millimetres.
///
/// Points are monotonically ordered by the generating parameter and never
/// reordered after generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    id: PathId,
    points: Vec<PointMm>,
}

impl Polyline {
    #[must_use]
    pub fn new(id: PathId, points: Vec<PointMm>) -> Self {
        Self { id, points }
    }

    /// The explicit "nothing to draw" outcome for degenerate geometry.
    #[must_use]
    pub fn empty(id: PathId) -> Self {
        Self {
            id,
            points: Vec::new(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> PathId {
        self.id
    }

    #[must_use]
    pub fn points(&self) -> &[PointMm] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn validate(&self) -> SpringResult<()> {
        for point in &self.points {
            if !point.is_finite() {
                return Err(SpringError::InvalidConfiguration(format!(
                    "polyline {} contains a non-finite point",
                    self.id.raw()
                )));
            }
        }
        Ok(())
    }
}
