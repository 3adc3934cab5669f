//! Input items, resolved configuration and layout outputs.
//!
//! These are intentionally lightweight and `Clone`-friendly: a layout pass
//! consumes borrowed items and produces owned positioned records, so nothing
//! here carries interior mutability across passes.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::geom::Point;

/// One sub-reading of an opposed-pair item (one side's circle).
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub id: String,
    pub freq: f64,
    pub score: f64,
}

impl Reading {
    pub fn new(id: impl Into<String>, freq: f64, score: f64) -> Self {
        Self {
            id: id.into(),
            freq,
            score,
        }
    }
}

/// A word to place: identity, display text and its metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: String,
    pub text: String,
    pub freq: f64,
    /// Signed distance/affinity driving radial distance or horizontal offset.
    pub score: f64,
    pub category: Option<String>,
    /// The opposed variant's two sub-readings; `None` for radial items.
    pub readings: Option<(Reading, Reading)>,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        freq: f64,
        score: f64,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            freq,
            score,
            category: None,
            readings: None,
        }
    }

    pub fn with_category(mut self, name: impl Into<String>) -> Self {
        self.category = Some(name.into());
        self
    }

    pub fn with_readings(mut self, first: Reading, second: Reading) -> Self {
        self.readings = Some((first, second));
        self
    }

    /// Size metric used to order items before placement: bigger items compete
    /// for space first.
    pub(crate) fn weight(&self) -> f64 {
        match &self.readings {
            Some((a, b)) => a.freq + b.freq,
            None => self.freq,
        }
    }
}

/// The privileged reference word(s) the chart is built around.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorWord {
    pub text: String,
    pub freq: f64,
}

impl AnchorWord {
    pub fn new(text: impl Into<String>, freq: f64) -> Self {
        Self {
            text: text.into(),
            freq,
        }
    }
}

/// Anchor placement, which also selects the chart variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Anchor {
    /// Radial variant: a single word fixed at the chart center.
    Center(AnchorWord),
    /// Opposed variant: two words pinned to the left/right plot edges.
    Edges(AnchorWord, AnchorWord),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryMode {
    #[default]
    None,
    /// Every category gets the same angular span.
    EqualAngle,
    /// Spans proportional to each category's aggregate frequency.
    Weighted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryConfig {
    pub mode: CategoryMode,
    /// Stroke width used to render wedge borders; the default inter-wedge gap
    /// is proportional to it so strokes never visually overlap.
    pub stroke_width: f64,
    /// Rotation of the first wedge's start angle, radians.
    pub rotation: f64,
    /// Override for the inter-wedge gap, radians.
    pub gap: Option<f64>,
    /// Extra radius beyond the outer ring for category label anchors.
    pub label_padding: f64,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            mode: CategoryMode::None,
            stroke_width: 8.0,
            rotation: std::f64::consts::FRAC_PI_4,
            gap: None,
            label_padding: 75.0,
        }
    }
}

/// Resolved chart configuration. Merging user-supplied partial configs into
/// these values is the caller's job; the engine only reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    /// Circle radius range, smallest to largest frequency.
    pub radius_range: (f64, f64),
    /// Font size range, smallest to largest frequency.
    pub font_range: (f64, f64),
    /// Approximate legend tick count.
    pub tick_count: usize,
    /// Radial variant: include the anchor word's own circle in the layout.
    pub include_anchor: bool,
    /// Radial variant: inner ring radius when the anchor circle is excluded.
    pub space_around_center: f64,
    /// Opposed variant: width of each anchor word panel at the plot edges.
    pub anchor_panel_width: f64,
    /// Keep only the highest-frequency items when set.
    pub max_items: Option<usize>,
    /// Animation on/off; affects only the refinement step budget.
    pub animation: bool,
    pub category: CategoryConfig,
}

impl ChartConfig {
    pub fn radial() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            margin: Margin::uniform(50.0),
            radius_range: (5.0, 40.0),
            font_range: (15.0, 30.0),
            tick_count: 3,
            include_anchor: true,
            space_around_center: 50.0,
            anchor_panel_width: 0.0,
            max_items: None,
            animation: true,
            category: CategoryConfig::default(),
        }
    }

    pub fn opposed() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
            margin: Margin {
                top: 80.0,
                right: 50.0,
                bottom: 60.0,
                left: 50.0,
            },
            radius_range: (0.0, 35.0),
            font_range: (13.0, 25.0),
            tick_count: 7,
            include_anchor: false,
            space_around_center: 0.0,
            anchor_panel_width: 100.0,
            max_items: None,
            animation: true,
            category: CategoryConfig::default(),
        }
    }

    /// Plot width after the margin convention (and anchor panels, opposed).
    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right - 2.0 * self.anchor_panel_width
    }

    pub fn inner_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    pub fn half_width(&self) -> f64 {
        self.inner_width() / 2.0
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::radial()
    }
}

/// One accepted circle of a placed item (one for radial, two for opposed).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacedCircle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub freq: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedItem {
    pub id: String,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
    pub score: f64,
    pub category: Option<String>,
    pub circles: Vec<PlacedCircle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedAnchor {
    pub text: String,
    pub position: Point,
    pub radius: f64,
    pub font_size: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    /// Placed items, in placement order (largest first).
    pub items: Vec<PositionedItem>,
    /// One anchor for the radial variant, two for the opposed one.
    pub anchors: Vec<PositionedAnchor>,
    /// True when the collision-free budget was exhausted and the final pass
    /// accepted overlapping candidates.
    pub failed: bool,
}

impl LayoutResult {
    /// Orders items ascending by score so renderers can draw inside-out.
    pub fn sort_by_score(&mut self) {
        self.items
            .sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal));
    }
}

/// Validates item and anchor metrics up front so the layout loops never
/// meet NaN.
pub(crate) fn validate(items: &[Item], anchor: &Anchor) -> Result<()> {
    match anchor {
        Anchor::Center(word) => check_anchor_word(word)?,
        Anchor::Edges(left, right) => {
            check_anchor_word(left)?;
            check_anchor_word(right)?;
        }
    }

    let opposed = matches!(anchor, Anchor::Edges(..));
    for item in items {
        check_finite(&item.id, "freq", item.freq)?;
        check_finite(&item.id, "score", item.score)?;
        if item.freq < 0.0 {
            return Err(Error::NegativeFrequency {
                item_id: item.id.clone(),
            });
        }
        match &item.readings {
            Some((a, b)) => {
                for r in [a, b] {
                    check_finite(&item.id, "reading freq", r.freq)?;
                    check_finite(&item.id, "reading score", r.score)?;
                    if r.freq < 0.0 {
                        return Err(Error::NegativeFrequency {
                            item_id: item.id.clone(),
                        });
                    }
                }
            }
            None if opposed => {
                return Err(Error::MissingReadings {
                    item_id: item.id.clone(),
                });
            }
            None => {}
        }
    }
    Ok(())
}

// The anchor's frequency feeds the radial inner-ring clearance and the font
// scale, so it gets the same screening as item frequencies.
fn check_anchor_word(word: &AnchorWord) -> Result<()> {
    check_finite(&word.text, "anchor freq", word.freq)?;
    if word.freq < 0.0 {
        return Err(Error::NegativeFrequency {
            item_id: word.text.clone(),
        });
    }
    Ok(())
}

fn check_finite(id: &str, field: &'static str, v: f64) -> Result<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(Error::NonFinite {
            item_id: id.to_string(),
            field,
        })
    }
}
