use serde::{Deserialize, Serialize};

use crate::core::units::Axis;
use crate::error::{SpringError, SpringResult};

/// Monotonic token identifying one viewport generation.
///
/// Scene nodes compare tokens to decide staleness instead of subscribing to
/// resize notifications, so coalesced or repeated resize events are no-ops
/// after the first draw against the new token.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct ViewportVersion(u64);

impl ViewportVersion {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Drawing-surface geometry a [`crate::core::UnitValue`] is resolved against.
///
/// `scale` carries millimetres per device pixel and may be anisotropic.
/// A context is read-only during one resolution pass and superseded wholesale
/// on the next resize; there is no incremental patching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportContext {
    origin: (f64, f64),
    extent: (f64, f64),
    scale: (f64, f64),
    version: ViewportVersion,
}

impl ViewportContext {
    pub fn new(
        origin: (f64, f64),
        extent: (f64, f64),
        scale: (f64, f64),
        version: ViewportVersion,
    ) -> SpringResult<Self> {
        if !origin.0.is_finite() || !origin.1.is_finite() {
            return Err(SpringError::InvalidConfiguration(
                "viewport origin must be finite".to_owned(),
            ));
        }
        if !extent.0.is_finite() || !extent.1.is_finite() || extent.0 <= 0.0 || extent.1 <= 0.0 {
            return Err(SpringError::InvalidViewport {
                width: extent.0,
                height: extent.1,
            });
        }
        if !scale.0.is_finite() || !scale.1.is_finite() || scale.0 <= 0.0 || scale.1 <= 0.0 {
            return Err(SpringError::InvalidScale {
                sx: scale.0,
                sy: scale.1,
            });
        }

        Ok(Self {
            origin,
            extent,
            scale,
            version,
        })
    }

    /// Convenience constructor for isotropic device-to-physical scale.
    pub fn with_uniform_scale(
        extent: (f64, f64),
        mm_per_pixel: f64,
        version: ViewportVersion,
    ) -> SpringResult<Self> {
        Self::new((0.0, 0.0), extent, (mm_per_pixel, mm_per_pixel), version)
    }

    /// Successor context after a resize; the version token advances.
    pub fn resized(&self, extent: (f64, f64)) -> SpringResult<Self> {
        Self::new(self.origin, extent, self.scale, self.version.next())
    }

    /// Successor context after a device-to-physical scale change.
    pub fn rescaled(&self, scale: (f64, f64)) -> SpringResult<Self> {
        Self::new(self.origin, self.extent, scale, self.version.next())
    }

    #[must_use]
    pub const fn origin(&self) -> (f64, f64) {
        self.origin
    }

    #[must_use]
    pub const fn extent(&self) -> (f64, f64) {
        self.extent
    }

    #[must_use]
    pub const fn scale(&self) -> (f64, f64) {
        self.scale
    }

    #[must_use]
    pub const fn version(&self) -> ViewportVersion {
        self.version
    }

    #[must_use]
    pub const fn extent_along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.extent.0,
            Axis::Y => self.extent.1,
        }
    }

    #[must_use]
    pub const fn scale_along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.scale.0,
            Axis::Y => self.scale.1,
        }
    }

    /// Physical size of the surface in millimetres.
    #[must_use]
    pub fn physical_extent(&self) -> (f64, f64) {
        (self.extent.0 * self.scale.0, self.extent.1 * self.scale.1)
    }
}
