//! Style-keyed batch assembly.
//!
//! Springs sharing identical stroke aesthetics are folded into one
//! multi-path primitive so style application happens once per batch; rows
//! with differing aesthetics get distinct primitives. Grouping preserves
//! first-appearance order so batch output is deterministic.

use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use crate::core::Polyline;
use crate::render::{LineCap, LinePattern, PathPrimitive, StrokeStyle};

/// Hashable grouping key over the four consumed stroke aesthetics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct StyleKey {
    color: [OrderedFloat<f64>; 4],
    width: OrderedFloat<f64>,
    pattern: PatternKey,
    cap: LineCap,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum PatternKey {
    Solid,
    Dashed,
    Dotted,
    DashDot,
    Custom(Vec<OrderedFloat<f64>>),
}

fn style_key(style: &StrokeStyle) -> StyleKey {
    let pattern = match &style.pattern {
        LinePattern::Solid => PatternKey::Solid,
        LinePattern::Dashed => PatternKey::Dashed,
        LinePattern::Dotted => PatternKey::Dotted,
        LinePattern::DashDot => PatternKey::DashDot,
        LinePattern::Custom(runs) => {
            PatternKey::Custom(runs.iter().copied().map(OrderedFloat).collect())
        }
    };

    StyleKey {
        color: [
            OrderedFloat(style.color.red),
            OrderedFloat(style.color.green),
            OrderedFloat(style.color.blue),
            OrderedFloat(style.color.alpha),
        ],
        width: OrderedFloat(style.width_mm),
        pattern,
        cap: style.cap,
    }
}

/// Folds per-row polylines into the minimum number of style groups.
pub(crate) fn assemble_batch(entries: Vec<(StrokeStyle, Polyline)>) -> Vec<PathPrimitive> {
    let mut groups: IndexMap<StyleKey, PathPrimitive> = IndexMap::new();
    for (style, polyline) in entries {
        groups
            .entry(style_key(&style))
            .or_insert_with(|| PathPrimitive::new(style))
            .push(polyline);
    }
    groups.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::assemble_batch;
    use crate::core::{PathId, PointMm, Polyline};
    use crate::render::{Color, LinePattern, StrokeStyle};

    fn line(id: u32) -> Polyline {
        Polyline::new(
            PathId::new(id),
            vec![PointMm::new(0.0, 0.0), PointMm::new(1.0, 1.0)],
        )
    }

    #[test]
    fn identical_styles_share_one_primitive() {
        let style = StrokeStyle::new(Color::BLACK, 0.5);
        let batch = assemble_batch(vec![
            (style.clone(), line(0)),
            (style.clone(), line(1)),
            (style, line(2)),
        ]);

        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].subpaths.len(), 3);
    }

    #[test]
    fn differing_styles_split_into_distinct_primitives() {
        let solid = StrokeStyle::new(Color::BLACK, 0.5);
        let dashed = solid.clone().with_pattern(LinePattern::Dashed);
        let red = StrokeStyle::new(Color::rgb(1.0, 0.0, 0.0), 0.5);

        let batch = assemble_batch(vec![
            (solid.clone(), line(0)),
            (dashed, line(1)),
            (red, line(2)),
            (solid, line(3)),
        ]);

        assert_eq!(batch.len(), 3);
        // First-appearance ordering: the solid group owns rows 0 and 3.
        assert_eq!(batch[0].subpaths.len(), 2);
        assert_eq!(batch[0].subpaths[1].id(), PathId::new(3));
    }

    #[test]
    fn batching_preserves_total_row_count() {
        let solid = StrokeStyle::new(Color::BLACK, 0.5);
        let wide = StrokeStyle::new(Color::BLACK, 1.0);
        let entries = vec![
            (solid.clone(), line(0)),
            (wide.clone(), line(1)),
            (solid, line(2)),
            (wide, line(3)),
        ];

        let batch = assemble_batch(entries);
        let total: usize = batch.iter().map(|p| p.subpaths.len()).sum();
        assert_eq!(total, 4);
    }
}
