//! Deferred unit values resolved against a concrete viewport.
//!
//! A [`UnitValue`] is inert data until resolved; resolution is a pure function
//! of `(UnitValue, ViewportContext, Axis)` into canonical millimetres. Mixed
//! kinds combine through the explicit [`UnitValue::Sum`] variant rather than
//! implicit deferral, and are only flattened into numbers by `resolve`.

use std::ops::Add;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::viewport::ViewportContext;
use crate::error::{SpringError, SpringResult};

/// Resolution axis for viewport-relative units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Absolute length unit convertible to canonical millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    Mm,
    Cm,
    Pt,
    In,
}

impl LengthUnit {
    /// Millimetres represented by one of this unit.
    #[must_use]
    pub const fn mm_per_unit(self) -> f64 {
        match self {
            Self::Mm => 1.0,
            Self::Cm => 10.0,
            Self::Pt => 25.4 / 72.0,
            Self::In => 25.4,
        }
    }

    #[must_use]
    pub fn to_mm(self, magnitude: f64) -> f64 {
        magnitude * self.mm_per_unit()
    }
}

/// Default interpretation applied to bare scalar arguments in construction
/// APIs: either a viewport fraction or an absolute length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefaultUnit {
    Fraction,
    Physical(LengthUnit),
}

impl DefaultUnit {
    #[must_use]
    pub fn tag(self, magnitude: f64) -> UnitValue {
        match self {
            Self::Fraction => UnitValue::Fraction(magnitude),
            Self::Physical(unit) => UnitValue::Physical { magnitude, unit },
        }
    }
}

/// A scalar tagged with a dimension kind, resolved lazily per axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UnitValue {
    /// Fraction of the viewport extent along the resolution axis.
    Fraction(f64),
    /// Absolute physical length, independent of the viewport.
    Physical { magnitude: f64, unit: LengthUnit },
    /// Deferred sum of mixed-kind terms; resolution distributes over terms.
    Sum(Vec<UnitValue>),
    /// Resolves to the named sibling unit on the recorded axis.
    FromSibling { name: String, axis: Axis },
}

impl UnitValue {
    #[must_use]
    pub const fn fraction(value: f64) -> Self {
        Self::Fraction(value)
    }

    #[must_use]
    pub const fn mm(magnitude: f64) -> Self {
        Self::Physical {
            magnitude,
            unit: LengthUnit::Mm,
        }
    }

    #[must_use]
    pub const fn cm(magnitude: f64) -> Self {
        Self::Physical {
            magnitude,
            unit: LengthUnit::Cm,
        }
    }

    #[must_use]
    pub const fn points(magnitude: f64) -> Self {
        Self::Physical {
            magnitude,
            unit: LengthUnit::Pt,
        }
    }

    #[must_use]
    pub const fn inches(magnitude: f64) -> Self {
        Self::Physical {
            magnitude,
            unit: LengthUnit::In,
        }
    }

    #[must_use]
    pub fn from_sibling(name: impl Into<String>, axis: Axis) -> Self {
        Self::FromSibling {
            name: name.into(),
            axis,
        }
    }

    /// Resolves this unit into millimetres with no sibling scope.
    pub fn resolve(&self, viewport: &ViewportContext, axis: Axis) -> SpringResult<f64> {
        self.resolve_with(viewport, axis, &UnitScope::default())
    }

    /// Resolves this unit into millimetres, looking sibling references up in
    /// `scope`. A missing sibling or a reference cycle fails with
    /// [`SpringError::UnresolvedReference`] before any geometry is generated.
    pub fn resolve_with(
        &self,
        viewport: &ViewportContext,
        axis: Axis,
        scope: &UnitScope,
    ) -> SpringResult<f64> {
        self.resolve_inner(viewport, axis, scope, 0)
    }

    fn resolve_inner(
        &self,
        viewport: &ViewportContext,
        axis: Axis,
        scope: &UnitScope,
        depth: usize,
    ) -> SpringResult<f64> {
        // Bounds sibling chains; a cycle hits the limit instead of recursing.
        const MAX_RESOLUTION_DEPTH: usize = 32;
        if depth > MAX_RESOLUTION_DEPTH {
            return Err(SpringError::UnresolvedReference(
                "unit reference nesting exceeds depth limit (cycle?)".to_owned(),
            ));
        }

        let resolved = match self {
            Self::Fraction(fraction) => {
                fraction * viewport.extent_along(axis) * viewport.scale_along(axis)
            }
            Self::Physical { magnitude, unit } => unit.to_mm(*magnitude),
            Self::Sum(terms) => {
                let mut total = 0.0;
                for term in terms {
                    total += term.resolve_inner(viewport, axis, scope, depth + 1)?;
                }
                total
            }
            Self::FromSibling {
                name,
                axis: sibling_axis,
            } => {
                let sibling = scope.get(name).ok_or_else(|| {
                    SpringError::UnresolvedReference(format!(
                        "sibling unit `{name}` is not defined"
                    ))
                })?;
                sibling.resolve_inner(viewport, *sibling_axis, scope, depth + 1)?
            }
        };

        if !resolved.is_finite() {
            return Err(SpringError::InvalidConfiguration(
                "unit value resolves to a non-finite length".to_owned(),
            ));
        }
        Ok(resolved)
    }
}

impl Add for UnitValue {
    type Output = UnitValue;

    /// Combines units of any kinds into a deferred [`UnitValue::Sum`],
    /// flattening nested sums so the tree stays shallow.
    fn add(self, rhs: UnitValue) -> UnitValue {
        let mut terms = Vec::with_capacity(2);
        match self {
            UnitValue::Sum(inner) => terms.extend(inner),
            other => terms.push(other),
        }
        match rhs {
            UnitValue::Sum(inner) => terms.extend(inner),
            other => terms.push(other),
        }
        UnitValue::Sum(terms)
    }
}

/// Named sibling units visible to [`UnitValue::FromSibling`] references.
///
/// Insertion order is preserved so resolution diagnostics stay deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitScope {
    entries: IndexMap<String, UnitValue>,
}

impl UnitScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: impl Into<String>, value: UnitValue) {
        self.entries.insert(name.into(), value);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&UnitValue> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
