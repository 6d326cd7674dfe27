//! Layer-level boundary: domain rows in, retained spring node out.
//!
//! This is the coordinate-adapter seam. Domain endpoints are rescaled into
//! viewport fractions against the panel ranges before node construction;
//! the spring geometry itself never sees domain units. Non-linear coordinate
//! systems are flagged as degraded correctness, not bent around.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{DefaultUnit, LengthUnit, UnitValue};
use crate::error::{SpringError, SpringResult};
use crate::render::{Color, LineCap, LinePattern, StrokeStyle};
use crate::scene::SpringNode;

pub const DEFAULT_DIAMETER: f64 = 0.35;
pub const DEFAULT_TENSION: f64 = 0.75;
pub const DEFAULT_STROKE_WIDTH: f64 = 0.5;

/// One domain-space segment row. `x`, `y`, `xend`, `yend` are required;
/// everything else falls back to layer defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DataRow {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub xend: Option<f64>,
    pub yend: Option<f64>,
    pub colour: Option<Color>,
    pub size: Option<f64>,
    pub linetype: Option<LinePattern>,
    pub alpha: Option<f64>,
    pub diameter: Option<f64>,
    pub tension: Option<f64>,
}

impl DataRow {
    #[must_use]
    pub fn segment(x: f64, y: f64, xend: f64, yend: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            xend: Some(xend),
            yend: Some(yend),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_diameter(mut self, diameter: f64) -> Self {
        self.diameter = Some(diameter);
        self
    }

    #[must_use]
    pub fn with_tension(mut self, tension: f64) -> Self {
        self.tension = Some(tension);
        self
    }

    #[must_use]
    pub fn with_colour(mut self, colour: Color) -> Self {
        self.colour = Some(colour);
        self
    }

    /// All required fields present and finite. Non-finite coordinates are
    /// treated the same as missing ones.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [self.x, self.y, self.xend, self.yend]
            .iter()
            .all(|field| field.is_some_and(f64::is_finite))
    }
}

/// Domain ranges of the enclosing panel, used to rescale endpoints into
/// viewport fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelParams {
    x_range: (f64, f64),
    y_range: (f64, f64),
}

impl PanelParams {
    pub fn new(x_range: (f64, f64), y_range: (f64, f64)) -> SpringResult<Self> {
        for (axis, range) in [("x", x_range), ("y", y_range)] {
            if !range.0.is_finite() || !range.1.is_finite() || range.0 == range.1 {
                return Err(SpringError::InvalidConfiguration(format!(
                    "panel {axis} range must be finite and non-degenerate"
                )));
            }
        }
        Ok(Self { x_range, y_range })
    }

    #[must_use]
    pub fn rescale_x(&self, value: f64) -> f64 {
        (value - self.x_range.0) / (self.x_range.1 - self.x_range.0)
    }

    #[must_use]
    pub fn rescale_y(&self, value: f64) -> f64 {
        (value - self.y_range.0) / (self.y_range.1 - self.y_range.0)
    }
}

/// Coordinate system marker handed in by the enclosing plotting layer.
///
/// Spring paths are only correct under linear transforms; anything else
/// degrades to a linear approximation with a warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordTransform {
    Linear,
    NonLinear { name: String },
}

impl CoordTransform {
    #[must_use]
    pub fn polar() -> Self {
        Self::NonLinear {
            name: "polar".to_owned(),
        }
    }

    #[must_use]
    pub const fn is_linear(&self) -> bool {
        matches!(self, Self::Linear)
    }
}

/// Knobs of one spring layer invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    pub samples_per_revolution: u32,
    pub cap: LineCap,
    /// When set, suppresses the dropped-rows warning (the rows are dropped
    /// either way; they cannot be drawn).
    pub drop_missing: bool,
    /// How row diameters are interpreted. Physical centimetres by default.
    pub diameter_unit: DefaultUnit,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            samples_per_revolution: 50,
            cap: LineCap::Butt,
            drop_missing: false,
            diameter_unit: DefaultUnit::Physical(LengthUnit::Cm),
        }
    }
}

/// Non-fatal, advisory outcomes of a layer build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerWarning {
    /// Non-linear coordinate system: drawing proceeded with the linear
    /// approximation.
    NonLinearCoords,
    DroppedRows { count: usize },
}

/// Result of [`draw_layer`]: an optional node (`None` means nothing to draw)
/// plus any advisory warnings raised on the way.
#[derive(Debug)]
pub struct LayerBuild {
    pub node: Option<SpringNode>,
    pub warnings: Vec<LayerWarning>,
}

impl LayerBuild {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node.is_none()
    }
}

/// Builds one retained spring node from domain rows.
///
/// Rows missing required fields are dropped; zero surviving rows yield the
/// empty drawable rather than an error. A non-linear coordinate system is
/// reported exactly once per call and drawing proceeds anyway.
pub fn draw_layer(
    rows: &[DataRow],
    panel: &PanelParams,
    coord: &CoordTransform,
    config: &LayerConfig,
) -> SpringResult<LayerBuild> {
    let mut warnings = Vec::new();

    if let CoordTransform::NonLinear { name } = coord {
        warn!(
            coord = name.as_str(),
            "spring paths assume a linear coordinate system; drawing a linear approximation"
        );
        warnings.push(LayerWarning::NonLinearCoords);
    }

    let complete: Vec<&DataRow> = rows.iter().filter(|row| row.is_complete()).collect();
    let dropped = rows.len() - complete.len();
    if dropped > 0 && !config.drop_missing {
        warn!(dropped, "dropped rows with missing required fields");
        warnings.push(LayerWarning::DroppedRows { count: dropped });
    }

    if complete.is_empty() {
        return Ok(LayerBuild {
            node: None,
            warnings,
        });
    }

    let mut builder = SpringNode::builder(DefaultUnit::Fraction)
        .samples_per_revolution(config.samples_per_revolution);

    for row in complete {
        // is_complete() guaranteed the unwraps below.
        let x = row.x.unwrap_or_default();
        let y = row.y.unwrap_or_default();
        let xend = row.xend.unwrap_or_default();
        let yend = row.yend.unwrap_or_default();

        let colour = row.colour.unwrap_or(Color::BLACK);
        let alpha = row.alpha.unwrap_or(1.0);
        let style = StrokeStyle::new(
            colour.with_alpha(colour.alpha * alpha),
            row.size.unwrap_or(DEFAULT_STROKE_WIDTH),
        )
        .with_pattern(row.linetype.clone().unwrap_or_default())
        .with_cap(config.cap);

        let diameter = config
            .diameter_unit
            .tag(row.diameter.unwrap_or(DEFAULT_DIAMETER));

        builder = builder.spring(
            (
                UnitValue::fraction(panel.rescale_x(x)),
                UnitValue::fraction(panel.rescale_y(y)),
            ),
            (
                UnitValue::fraction(panel.rescale_x(xend)),
                UnitValue::fraction(panel.rescale_y(yend)),
            ),
            diameter,
            row.tension.unwrap_or(DEFAULT_TENSION),
            style,
        );
    }

    Ok(LayerBuild {
        node: Some(builder.build()?),
        warnings,
    })
}
