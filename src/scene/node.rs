//! Retained spring scene node.
//!
//! A node holds unresolved unit parameters and materializes drawable geometry
//! lazily: on first draw, and again whenever the viewport version token
//! differs from the one cached at last resolution (pull model, no observer
//! graph). Between resizes the cached batch is served untouched.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    Axis, DefaultUnit, PathId, PointMm, SpringSpec, UnitScope, UnitValue, ViewportContext,
    ViewportVersion, generate_spring_path,
};
use crate::error::{SpringError, SpringResult};
use crate::render::{PathPrimitive, RenderFrame, StrokeStyle};
use crate::scene::batch::assemble_batch;

/// Scalar-or-unit argument accepted by construction APIs. Bare scalars are
/// tagged with the builder's default unit kind.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitInput {
    Scalar(f64),
    Unit(UnitValue),
}

impl From<f64> for UnitInput {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<UnitValue> for UnitInput {
    fn from(value: UnitValue) -> Self {
        Self::Unit(value)
    }
}

impl UnitInput {
    fn into_unit(self, default_unit: DefaultUnit) -> UnitValue {
        match self {
            Self::Scalar(value) => default_unit.tag(value),
            Self::Unit(unit) => unit,
        }
    }
}

/// One unresolved spring description inside a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    pub start: (UnitValue, UnitValue),
    pub end: (UnitValue, UnitValue),
    pub diameter: UnitValue,
    pub tension: f64,
    pub style: StrokeStyle,
}

/// Observable lifecycle state of a [`SpringNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeState {
    Unresolved,
    Resolved,
    Stale,
    Disposed,
}

/// Retained drawable holding raw parameters plus the lazily materialized
/// batch. `resolved` is replaced wholesale on regeneration; nothing outside
/// the node mutates it.
#[derive(Debug, Clone)]
pub struct SpringNode {
    rows: Vec<SpringParams>,
    scope: UnitScope,
    samples_per_revolution: u32,
    resolved: Vec<PathPrimitive>,
    last_version: Option<ViewportVersion>,
    disposed: bool,
}

impl SpringNode {
    #[must_use]
    pub fn builder(default_unit: DefaultUnit) -> SpringNodeBuilder {
        SpringNodeBuilder::new(default_unit)
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn rows(&self) -> &[SpringParams] {
        &self.rows
    }

    #[must_use]
    pub const fn samples_per_revolution(&self) -> u32 {
        self.samples_per_revolution
    }

    #[must_use]
    pub const fn last_version(&self) -> Option<ViewportVersion> {
        self.last_version
    }

    /// Cached batch from the last successful resolution (empty before the
    /// first draw and after disposal).
    #[must_use]
    pub fn resolved_paths(&self) -> &[PathPrimitive] {
        &self.resolved
    }

    /// Lifecycle state without reference to any viewport.
    #[must_use]
    pub fn state(&self) -> NodeState {
        if self.disposed {
            NodeState::Disposed
        } else if self.last_version.is_some() {
            NodeState::Resolved
        } else {
            NodeState::Unresolved
        }
    }

    /// Lifecycle state relative to `viewport`: a resolved node whose cached
    /// token differs from the context's is stale.
    #[must_use]
    pub fn state_for(&self, viewport: &ViewportContext) -> NodeState {
        match self.state() {
            NodeState::Resolved if self.last_version != Some(viewport.version()) => {
                NodeState::Stale
            }
            other => other,
        }
    }

    /// Resolves units, regenerates spring paths, and returns the batched
    /// drawables for this viewport.
    ///
    /// Idempotent: repeated calls with an unchanged context serve the cached
    /// batch with no recomputation. Regeneration is all-or-nothing per node:
    /// on any failure the previous cache stays intact and no partial polyline
    /// is exposed.
    pub fn draw(&mut self, viewport: &ViewportContext) -> SpringResult<&[PathPrimitive]> {
        if self.disposed {
            return Err(SpringError::NodeDisposed);
        }
        if self.last_version == Some(viewport.version()) {
            return Ok(&self.resolved);
        }

        let regenerated = self.regenerate(viewport)?;
        debug!(
            version = viewport.version().raw(),
            paths = regenerated.len(),
            rows = self.rows.len(),
            "spring node regenerated"
        );
        self.resolved = regenerated;
        self.last_version = Some(viewport.version());
        Ok(&self.resolved)
    }

    /// Assembles a render frame from this node's draw output.
    pub fn render_frame(&mut self, viewport: &ViewportContext) -> SpringResult<RenderFrame> {
        let paths = self.draw(viewport)?.to_vec();
        Ok(RenderFrame {
            viewport: *viewport,
            paths,
        })
    }

    /// Terminal transition: clears the cache and rejects further draws.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.resolved.clear();
        self.last_version = None;
    }

    fn regenerate(&self, viewport: &ViewportContext) -> SpringResult<Vec<PathPrimitive>> {
        // Resolve every row first; resolution failures surface before any
        // generation starts.
        let mut specs = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let x0 = row.start.0.resolve_with(viewport, Axis::X, &self.scope)?;
            let y0 = row.start.1.resolve_with(viewport, Axis::Y, &self.scope)?;
            let x1 = row.end.0.resolve_with(viewport, Axis::X, &self.scope)?;
            let y1 = row.end.1.resolve_with(viewport, Axis::Y, &self.scope)?;
            // Diameter is a single scalar: it resolves once, on the width
            // axis by convention.
            let diameter = row.diameter.resolve_with(viewport, Axis::X, &self.scope)?;

            specs.push(SpringSpec::new(
                PointMm::new(x0, y0),
                PointMm::new(x1, y1),
                diameter,
                row.tension,
                self.samples_per_revolution,
            )?);
        }

        let mut entries = Vec::with_capacity(specs.len());
        for (index, (row, spec)) in self.rows.iter().zip(&specs).enumerate() {
            let polyline = generate_spring_path(spec, PathId::new(index as u32));
            if polyline.is_empty() {
                // Zero-length segment: nothing to draw for this row.
                continue;
            }
            entries.push((row.style.clone(), polyline));
        }
        Ok(assemble_batch(entries))
    }
}

/// Builder for [`SpringNode`]; parameter validation happens at [`build`],
/// and a failing build adds no node anywhere.
///
/// [`build`]: SpringNodeBuilder::build
#[derive(Debug, Clone)]
pub struct SpringNodeBuilder {
    default_unit: DefaultUnit,
    samples_per_revolution: u32,
    scope: UnitScope,
    rows: Vec<SpringParams>,
}

impl SpringNodeBuilder {
    #[must_use]
    fn new(default_unit: DefaultUnit) -> Self {
        Self {
            default_unit,
            samples_per_revolution: 50,
            scope: UnitScope::new(),
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn samples_per_revolution(mut self, samples: u32) -> Self {
        self.samples_per_revolution = samples;
        self
    }

    /// Registers a named unit that rows may reference via
    /// [`UnitValue::FromSibling`].
    #[must_use]
    pub fn define_unit(mut self, name: impl Into<String>, value: UnitValue) -> Self {
        self.scope.define(name, value);
        self
    }

    #[must_use]
    pub fn spring(
        mut self,
        p0: (impl Into<UnitInput>, impl Into<UnitInput>),
        p1: (impl Into<UnitInput>, impl Into<UnitInput>),
        diameter: impl Into<UnitInput>,
        tension: f64,
        style: StrokeStyle,
    ) -> Self {
        let default_unit = self.default_unit;
        self.rows.push(SpringParams {
            start: (
                p0.0.into().into_unit(default_unit),
                p0.1.into().into_unit(default_unit),
            ),
            end: (
                p1.0.into().into_unit(default_unit),
                p1.1.into().into_unit(default_unit),
            ),
            diameter: diameter.into().into_unit(default_unit),
            tension,
            style,
        });
        self
    }

    pub fn build(self) -> SpringResult<SpringNode> {
        if self.samples_per_revolution == 0 {
            return Err(SpringError::InvalidConfiguration(
                "samples per revolution must be > 0".to_owned(),
            ));
        }
        for (index, row) in self.rows.iter().enumerate() {
            if !row.tension.is_finite() || row.tension <= 0.0 {
                return Err(SpringError::InvalidConfiguration(format!(
                    "spring row {index}: tension must be finite and > 0"
                )));
            }
            row.style.validate()?;
        }

        Ok(SpringNode {
            rows: self.rows,
            scope: self.scope,
            samples_per_revolution: self.samples_per_revolution,
            resolved: Vec::new(),
            last_version: None,
            disposed: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{NodeState, SpringNode};
    use crate::core::{DefaultUnit, UnitValue, ViewportContext, ViewportVersion};
    use crate::error::SpringError;
    use crate::render::StrokeStyle;

    fn viewport(version: u64) -> ViewportContext {
        ViewportContext::with_uniform_scale((800.0, 600.0), 0.25, ViewportVersion::new(version))
            .expect("valid viewport")
    }

    fn one_spring_node() -> SpringNode {
        SpringNode::builder(DefaultUnit::Fraction)
            .spring(
                (0.1, 0.5),
                (0.9, 0.5),
                UnitValue::mm(4.0),
                0.75,
                StrokeStyle::default(),
            )
            .build()
            .expect("valid node")
    }

    #[test]
    fn node_starts_unresolved_and_resolves_on_first_draw() {
        let mut node = one_spring_node();
        assert_eq!(node.state(), NodeState::Unresolved);

        let viewport = viewport(0);
        let paths = node.draw(&viewport).expect("draw");
        assert_eq!(paths.len(), 1);
        assert_eq!(node.state(), NodeState::Resolved);
        assert_eq!(node.state_for(&viewport), NodeState::Resolved);
    }

    #[test]
    fn version_change_marks_node_stale() {
        let mut node = one_spring_node();
        let first = viewport(0);
        node.draw(&first).expect("draw");

        let resized = first.resized((1200.0, 900.0)).expect("resize");
        assert_eq!(node.state_for(&resized), NodeState::Stale);
    }

    #[test]
    fn tension_zero_fails_build_and_produces_no_node() {
        let result = SpringNode::builder(DefaultUnit::Fraction)
            .spring((0.0, 0.0), (1.0, 1.0), 0.2, 0.0, StrokeStyle::default())
            .build();
        assert!(matches!(
            result,
            Err(SpringError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn disposed_node_rejects_draw() {
        let mut node = one_spring_node();
        node.dispose();
        assert_eq!(node.state(), NodeState::Disposed);

        let result = node.draw(&viewport(0));
        assert!(matches!(result, Err(SpringError::NodeDisposed)));
    }
}
