use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PathId, Polyline};
use crate::error::{SpringError, SpringResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    pub fn validate(self) -> SpringResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(SpringError::InvalidConfiguration(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Stroke end-cap shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Dash layout of a stroked path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum LinePattern {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
    /// Explicit on/off run lengths in millimetres.
    Custom(Vec<f64>),
}

impl LinePattern {
    /// Concrete dash runs scaled by stroke width; empty means solid.
    #[must_use]
    pub fn dash_array(&self, stroke_width_mm: f64) -> SmallVec<[f64; 6]> {
        let w = stroke_width_mm;
        match self {
            Self::Solid => SmallVec::new(),
            Self::Dashed => SmallVec::from_slice(&[4.0 * w, 4.0 * w]),
            Self::Dotted => SmallVec::from_slice(&[w, 3.0 * w]),
            Self::DashDot => SmallVec::from_slice(&[4.0 * w, 3.0 * w, w, 3.0 * w]),
            Self::Custom(runs) => runs.iter().copied().collect(),
        }
    }

    pub fn validate(&self) -> SpringResult<()> {
        if let Self::Custom(runs) = self {
            if runs.is_empty() {
                return Err(SpringError::InvalidConfiguration(
                    "custom dash pattern must not be empty".to_owned(),
                ));
            }
            for run in runs {
                if !run.is_finite() || *run <= 0.0 {
                    return Err(SpringError::InvalidConfiguration(
                        "custom dash runs must be finite and > 0".to_owned(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Stroke aesthetics consumed by the spring drawable: color, width, dash
/// pattern, and cap style. Any other style attribute is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    pub width_mm: f64,
    pub pattern: LinePattern,
    pub cap: LineCap,
}

impl StrokeStyle {
    #[must_use]
    pub fn new(color: Color, width_mm: f64) -> Self {
        Self {
            color,
            width_mm,
            pattern: LinePattern::Solid,
            cap: LineCap::Butt,
        }
    }

    #[must_use]
    pub fn with_pattern(mut self, pattern: LinePattern) -> Self {
        self.pattern = pattern;
        self
    }

    #[must_use]
    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn validate(&self) -> SpringResult<()> {
        if !self.width_mm.is_finite() || self.width_mm <= 0.0 {
            return Err(SpringError::InvalidConfiguration(
                "stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()?;
        self.pattern.validate()
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new(Color::BLACK, 0.5)
    }
}

/// Multi-path drawable: disjoint sub-paths sharing one style application.
///
/// `PathId`s distinguish the sub-paths; within one id the points keep their
/// generation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathPrimitive {
    pub style: StrokeStyle,
    pub subpaths: Vec<Polyline>,
}

impl PathPrimitive {
    #[must_use]
    pub fn new(style: StrokeStyle) -> Self {
        Self {
            style,
            subpaths: Vec::new(),
        }
    }

    pub fn push(&mut self, polyline: Polyline) {
        self.subpaths.push(polyline);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subpaths.iter().all(Polyline::is_empty)
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.subpaths.iter().map(Polyline::len).sum()
    }

    #[must_use]
    pub fn path_ids(&self) -> Vec<PathId> {
        self.subpaths.iter().map(Polyline::id).collect()
    }

    pub fn validate(&self) -> SpringResult<()> {
        self.style.validate()?;
        let mut seen: Vec<PathId> = Vec::with_capacity(self.subpaths.len());
        for polyline in &self.subpaths {
            polyline.validate()?;
            if seen.contains(&polyline.id()) {
                return Err(SpringError::InvalidConfiguration(format!(
                    "duplicate path id {} inside one primitive",
                    polyline.id().raw()
                )));
            }
            seen.push(polyline.id());
        }
        Ok(())
    }
}
