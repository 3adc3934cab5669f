#![forbid(unsafe_code)]

//! Headless layout algorithms for comparative word charts.
//!
//! `selkie` computes positions for two chart families built around one or two
//! anchor words: radial clouds, where items orbit a central anchor at a
//! distance set by their score, and opposed-pair plots, where each item sits
//! between two rival anchors with a circle per reading. The crate produces
//! coordinates, radii, and font sizes only; rendering, colors, and
//! interaction belong to the caller.
//!
//! The usual flow is [`compute_scales`], [`partition_categories`], then
//! [`place::layout`], all wrapped by [`layout_chart`]. A finished radial
//! layout can be relaxed frame by frame with [`refine::Refinement`].

pub mod error;
pub mod geom;
pub mod measure;
pub mod model;
pub mod place;
pub mod refine;
pub mod rng;
pub mod scale;
pub mod wedge;

pub use error::{Error, Result};
pub use geom::{Circle, Point, Rect};
pub use measure::{HeuristicMetrics, TextMetrics, TextSize};
pub use model::{
    Anchor, AnchorWord, CategoryConfig, CategoryMode, ChartConfig, Item, LayoutResult, Margin,
    PlacedCircle, PositionedAnchor, PositionedItem, Reading,
};
pub use refine::{RefineOptions, Refinement, StepOutcome};
pub use rng::{RandomSource, XorShift64Star};
pub use scale::{ColorScale, LinearScale, ScaleSet, SqrtScale, compute_scales, ticks};
pub use wedge::{Wedge, partition_categories, wedge_label_anchor};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Headless layout entry point: scales, category wedges, and placement in
/// one call, seeded for reproducibility.
pub fn layout_chart(
    items: &[Item],
    anchor: &Anchor,
    cfg: &ChartConfig,
    metrics: &dyn TextMetrics,
    seed: u64,
) -> Result<LayoutResult> {
    // Scales and wedges reflect only the items that survive `max_items`, so
    // dropped items cannot stretch the domains.
    let kept: Vec<Item>;
    let items = match cfg.max_items {
        Some(max) if items.len() > max => {
            kept = place::participating(items, cfg)
                .into_iter()
                .cloned()
                .collect();
            kept.as_slice()
        }
        _ => items,
    };

    let scales = compute_scales(items, anchor, cfg);
    let wedges = match anchor {
        Anchor::Center(_) => partition_categories(items, cfg),
        Anchor::Edges(..) => Vec::new(),
    };
    let mut rng = XorShift64Star::new(seed);
    place::layout(items, anchor, &scales, &wedges, cfg, metrics, &mut rng)
}
