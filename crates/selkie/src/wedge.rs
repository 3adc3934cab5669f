//! Category wedges: partitioning the circle among item categories.

use indexmap::IndexMap;
use serde::Serialize;

use crate::geom::{self, FULL_CIRCLE, Point};
use crate::model::{CategoryMode, ChartConfig, Item};

/// Minimum wedge span that still admits the in-wedge placement padding.
const MIN_PADDED_SPAN: f64 = 0.5;
/// Angular padding keeping items off the wedge borders, radians.
const PLACEMENT_PADDING: f64 = 0.1;

/// A category's angular sector. Angles are radians, counterclockwise; `end`
/// may exceed `2π` when the wedge wraps past the rotation origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wedge {
    pub name: String,
    pub label: String,
    /// Aggregate frequency of the category's items.
    pub freq: f64,
    pub start: f64,
    pub end: f64,
}

impl Wedge {
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Angle range for candidate sampling: padded inward when the wedge is
    /// wide enough, the full wedge otherwise.
    pub fn padded(&self) -> (f64, f64) {
        if self.span() > MIN_PADDED_SPAN {
            (self.start + PLACEMENT_PADDING, self.end - PLACEMENT_PADDING)
        } else {
            (self.start, self.end)
        }
    }

    /// True when `angle` (any representation) falls inside the wedge.
    pub fn contains(&self, angle: f64) -> bool {
        self.to_local(angle) <= self.span()
    }

    /// Projects `angle` onto the nearest wedge boundary if it lies outside;
    /// returns an angle inside `[start, end]` otherwise.
    pub fn clamp_angle(&self, angle: f64) -> f64 {
        let local = self.to_local(angle);
        if local <= self.span() {
            return self.start + local;
        }
        // Outside: pick whichever boundary is angularly closer.
        let past_end = local - self.span();
        let before_start = FULL_CIRCLE - local;
        if past_end <= before_start {
            self.end
        } else {
            self.start
        }
    }

    pub fn bisector(&self) -> f64 {
        self.start + self.span() / 2.0
    }

    fn to_local(&self, angle: f64) -> f64 {
        geom::normalize_angle(angle - self.start)
    }
}

/// Anchor point for a category label: the wedge bisector pushed
/// `label_padding` beyond `outer_radius`.
pub fn wedge_label_anchor(wedge: &Wedge, outer_radius: f64, label_padding: f64) -> Point {
    geom::point_on_circle(outer_radius + label_padding, wedge.bisector())
}

/// Partitions the circle among the categories present in `items`, in first
/// appearance order. Categories with no weight are dropped; returns an empty
/// list when category mode is off or nothing qualifies.
pub fn partition_categories(items: &[Item], cfg: &ChartConfig) -> Vec<Wedge> {
    if cfg.category.mode == CategoryMode::None {
        return Vec::new();
    }

    let mut groups: IndexMap<&str, (f64, usize)> = IndexMap::new();
    for item in items {
        let Some(name) = item.category.as_deref() else {
            continue;
        };
        let entry = groups.entry(name).or_insert((0.0, 0));
        entry.0 += item.freq;
        entry.1 += 1;
    }
    groups.retain(|_, (_, count)| *count > 0);

    let weights: Vec<(&str, f64, f64)> = groups
        .iter()
        .map(|(name, (freq, _))| {
            let w = match cfg.category.mode {
                CategoryMode::Weighted => *freq,
                _ => 1.0,
            };
            (*name, *freq, w)
        })
        .filter(|(_, _, w)| *w > 0.0)
        .collect();

    let total: f64 = weights.iter().map(|(_, _, w)| w).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    // Gap between neighbors, proportional to the border stroke so strokes
    // never visually overlap; spans share what the gaps leave over.
    let gap = cfg
        .category
        .gap
        .unwrap_or(cfg.category.stroke_width / cfg.half_width().max(1.0));
    let n = weights.len() as f64;
    let usable = (FULL_CIRCLE - gap * n).max(0.0);

    let mut wedges = Vec::with_capacity(weights.len());
    let mut cursor = cfg.category.rotation;
    for (name, freq, w) in weights {
        let span = usable * w / total;
        wedges.push(Wedge {
            name: name.to_string(),
            label: name.to_string(),
            freq,
            start: cursor,
            end: cursor + span,
        });
        cursor += span + gap;
    }
    wedges
}
