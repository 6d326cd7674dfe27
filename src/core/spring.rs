//! Pure spring-path generation.
//!
//! The helix is modeled as a uniform circular offset superimposed on a linear
//! sweep between the endpoints; angular and linear parameters are sampled in
//! lockstep so coil pitch stays visually uniform along the segment.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::polyline::{PathId, PointMm, Polyline};
use crate::error::{SpringError, SpringResult};

/// Hard per-path ceiling on generated samples. Extreme tension/diameter
/// ratios clamp to this budget.
pub const MAX_SAMPLE_COUNT: usize = 65_536;

/// Fully resolved description of one spring in physical millimetres.
///
/// Immutable once constructed; a fresh spec is built whenever parameters or
/// the viewport change. Parameter validation happens here, not inside the
/// generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringSpec {
    p0: PointMm,
    p1: PointMm,
    diameter_mm: f64,
    tension: f64,
    samples_per_revolution: u32,
}

impl SpringSpec {
    pub fn new(
        p0: PointMm,
        p1: PointMm,
        diameter_mm: f64,
        tension: f64,
        samples_per_revolution: u32,
    ) -> SpringResult<Self> {
        if !p0.is_finite() || !p1.is_finite() {
            return Err(SpringError::InvalidConfiguration(
                "spring endpoints must be finite".to_owned(),
            ));
        }
        if !diameter_mm.is_finite() || diameter_mm <= 0.0 {
            return Err(SpringError::InvalidConfiguration(
                "spring diameter must be finite and > 0".to_owned(),
            ));
        }
        if !tension.is_finite() || tension <= 0.0 {
            return Err(SpringError::InvalidConfiguration(
                "spring tension must be finite and > 0".to_owned(),
            ));
        }
        if samples_per_revolution == 0 {
            return Err(SpringError::InvalidConfiguration(
                "samples per revolution must be > 0".to_owned(),
            ));
        }

        Ok(Self {
            p0,
            p1,
            diameter_mm,
            tension,
            samples_per_revolution,
        })
    }

    #[must_use]
    pub const fn p0(&self) -> PointMm {
        self.p0
    }

    #[must_use]
    pub const fn p1(&self) -> PointMm {
        self.p1
    }

    #[must_use]
    pub const fn diameter_mm(&self) -> f64 {
        self.diameter_mm
    }

    #[must_use]
    pub const fn tension(&self) -> f64 {
        self.tension
    }

    #[must_use]
    pub const fn samples_per_revolution(&self) -> u32 {
        self.samples_per_revolution
    }

    /// Straight-line span between the endpoints.
    #[must_use]
    pub fn length_mm(&self) -> f64 {
        self.p0.distance_to(self.p1)
    }

    /// Coil count over the span. Tension is an inverse pitch-density control:
    /// lower tension packs more revolutions into the same span.
    #[must_use]
    pub fn revolutions(&self) -> f64 {
        self.length_mm() / (self.diameter_mm * self.tension)
    }
}

/// Generates the spring polyline for a validated spec.
///
/// A zero-length segment yields an empty polyline; callers must treat that as
/// "nothing to draw", not as an error.
#[must_use]
pub fn generate_spring_path(spec: &SpringSpec, id: PathId) -> Polyline {
    let revolutions = spec.revolutions();
    if revolutions == 0.0 {
        return Polyline::empty(id);
    }

    let requested = f64::from(spec.samples_per_revolution) * revolutions;
    let sample_count = if !requested.is_finite() || requested >= MAX_SAMPLE_COUNT as f64 {
        warn!(
            requested,
            budget = MAX_SAMPLE_COUNT,
            "spring sample count exceeds budget, clamping"
        );
        MAX_SAMPLE_COUNT
    } else {
        (requested.ceil() as usize).max(2)
    };

    let radius = spec.diameter_mm() / 2.0;
    let sweep = revolutions * TAU;
    let p0 = spec.p0();
    let p1 = spec.p1();
    let last = (sample_count - 1) as f64;

    let mut points = Vec::with_capacity(sample_count);
    for index in 0..sample_count {
        let t = index as f64 / last;
        let angle = sweep * t;
        let along_x = p0.x + (p1.x - p0.x) * t;
        let along_y = p0.y + (p1.y - p0.y) * t;
        points.push(PointMm::new(
            angle.cos() * radius + along_x,
            angle.sin() * radius + along_y,
        ));
    }

    Polyline::new(id, points)
}

#[cfg(test)]
mod tests {
    use super::{MAX_SAMPLE_COUNT, SpringSpec, generate_spring_path};
    use crate::core::polyline::{PathId, PointMm};
    use crate::error::SpringError;

    fn spec(
        p0: (f64, f64),
        p1: (f64, f64),
        diameter: f64,
        tension: f64,
        samples: u32,
    ) -> SpringSpec {
        SpringSpec::new(
            PointMm::new(p0.0, p0.1),
            PointMm::new(p1.0, p1.1),
            diameter,
            tension,
            samples,
        )
        .expect("valid spec")
    }

    #[test]
    fn horizontal_span_end_to_end_values() {
        let spec = spec((0.0, 0.0), (10.0, 0.0), 2.0, 1.0, 50);
        assert_eq!(spec.revolutions(), 5.0);

        let polyline = generate_spring_path(&spec, PathId::new(0));
        assert_eq!(polyline.len(), 250);

        let first = polyline.points()[0];
        let last = polyline.points()[polyline.len() - 1];
        assert!((first.x - 1.0).abs() <= 1e-9);
        assert!(first.y.abs() <= 1e-9);
        assert!((last.x - 11.0).abs() <= 1e-9);
        assert!(last.y.abs() <= 1e-9);
    }

    #[test]
    fn zero_length_segment_yields_empty_polyline() {
        let spec = spec((3.0, 4.0), (3.0, 4.0), 2.0, 0.75, 50);
        let polyline = generate_spring_path(&spec, PathId::new(1));

        assert!(polyline.is_empty());
        assert!(polyline.validate().is_ok());
    }

    #[test]
    fn all_generated_points_are_finite() {
        let spec = spec((-5.0, 2.0), (7.5, -3.25), 1.25, 0.4, 40);
        let polyline = generate_spring_path(&spec, PathId::new(0));

        assert!(polyline.len() >= 2);
        assert!(polyline.validate().is_ok());
    }

    #[test]
    fn higher_tension_never_increases_revolutions() {
        let loose = spec((0.0, 0.0), (10.0, 0.0), 1.0, 0.5, 50);
        let tight = spec((0.0, 0.0), (10.0, 0.0), 1.0, 2.0, 50);
        assert!(tight.revolutions() <= loose.revolutions());
    }

    #[test]
    fn revolutions_scale_linearly_with_length() {
        let short = spec((0.0, 0.0), (5.0, 0.0), 2.0, 0.75, 50);
        let long = spec((0.0, 0.0), (15.0, 0.0), 2.0, 0.75, 50);
        assert!((long.revolutions() / short.revolutions() - 3.0).abs() <= 1e-12);
    }

    #[test]
    fn extreme_tension_ratio_clamps_to_sample_budget() {
        let spec = spec((0.0, 0.0), (1000.0, 0.0), 0.001, 0.001, 1000);
        let polyline = generate_spring_path(&spec, PathId::new(0));

        assert_eq!(polyline.len(), MAX_SAMPLE_COUNT);
        assert!(polyline.validate().is_ok());
    }

    #[test]
    fn construction_rejects_non_positive_tension() {
        let result = SpringSpec::new(
            PointMm::new(0.0, 0.0),
            PointMm::new(1.0, 0.0),
            1.0,
            0.0,
            50,
        );
        assert!(matches!(
            result,
            Err(SpringError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn construction_rejects_non_positive_diameter() {
        let result = SpringSpec::new(
            PointMm::new(0.0, 0.0),
            PointMm::new(1.0, 0.0),
            -2.0,
            0.75,
            50,
        );
        assert!(matches!(
            result,
            Err(SpringError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn construction_rejects_zero_sample_density() {
        let result = SpringSpec::new(
            PointMm::new(0.0, 0.0),
            PointMm::new(1.0, 0.0),
            1.0,
            0.75,
            0,
        );
        assert!(matches!(
            result,
            Err(SpringError::InvalidConfiguration(_))
        ));
    }
}
