//! Randomized collision-avoiding placement.
//!
//! One pass proposes a position per item (largest first), testing candidate
//! circles and text boxes against everything already accepted. A failed pass
//! narrows the radius and font ranges and retries from scratch; after the
//! shrink budget a final forced pass accepts overlapping candidates rather
//! than leaving items unplaced.

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::geom::{self, Circle, Point, Rect};
use crate::measure::{TextMetrics, TextSize};
use crate::model::{
    self, Anchor, ChartConfig, Item, LayoutResult, PlacedCircle, PositionedAnchor, PositionedItem,
};
use crate::rng::RandomSource;
use crate::scale::ScaleSet;
use crate::wedge::Wedge;

const SHRINK_ROUNDS: usize = 10;
const RADIUS_SHRINK: f64 = 0.9;
const FONT_SHRINK: f64 = 0.95;
const BUDGET_NUMERATOR: f64 = 1000.0;
const MIN_ATTEMPTS: usize = 12;

/// Per-item attempt budget: more items, fewer attempts each, floored so small
/// layouts are never starved.
fn attempt_budget(item_count: usize) -> usize {
    let n = item_count.max(1) as f64;
    let raw = (BUDGET_NUMERATOR / (n * n)).round() as usize;
    raw.clamp(MIN_ATTEMPTS, BUDGET_NUMERATOR as usize)
}

/// Items taking part in the layout: heaviest first, truncated to `max_items`
/// when set.
pub(crate) fn participating<'a>(items: &'a [Item], cfg: &ChartConfig) -> Vec<&'a Item> {
    let mut ordered: Vec<&Item> = items.iter().collect();
    ordered.sort_by(|a, b| {
        b.weight()
            .partial_cmp(&a.weight())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    if let Some(max) = cfg.max_items {
        ordered.truncate(max);
    }
    ordered
}

/// Shapes accepted so far in one pass. Candidates are tested against every
/// accepted circle and text box before joining them.
#[derive(Debug, Default)]
struct PassState {
    circles: Vec<Circle>,
    texts: Vec<Rect>,
}

impl PassState {
    fn collides(&self, circles: &[Circle], text: &Rect) -> bool {
        if self
            .circles
            .iter()
            .any(|c| circles.iter().any(|n| geom::circles_collide(c, n)))
        {
            return true;
        }
        self.texts.iter().any(|t| geom::rects_collide(t, text))
    }

    fn accept(&mut self, circles: &[Circle], text: Rect) {
        self.circles.extend_from_slice(circles);
        self.texts.push(text);
    }
}

struct Candidate {
    x: f64,
    y: f64,
    circles: Vec<Circle>,
    text: Rect,
}

struct PassOutput {
    placed: Vec<PositionedItem>,
    anchors: Vec<PositionedAnchor>,
    failures: usize,
}

/// Lays out every item. `wedges` applies to the radial variant only; the
/// opposed variant keeps one shared collision space.
pub fn layout(
    items: &[Item],
    anchor: &Anchor,
    scales: &ScaleSet,
    wedges: &[Wedge],
    cfg: &ChartConfig,
    metrics: &dyn TextMetrics,
    rng: &mut dyn RandomSource,
) -> Result<LayoutResult> {
    model::validate(items, anchor)?;

    let timing_enabled = std::env::var("SELKIE_LAYOUT_TIMING").ok().as_deref() == Some("1");
    let total_start = timing_enabled.then(std::time::Instant::now);

    let ordered = participating(items, cfg);

    let wedge_of: FxHashMap<&str, &Wedge> =
        wedges.iter().map(|w| (w.name.as_str(), w)).collect();

    let mut working = scales.clone();
    let mut passes = 0usize;
    let mut shrink_rounds = 0usize;
    let mut outcome: Option<PassOutput> = None;

    for _ in 0..SHRINK_ROUNDS {
        passes += 1;
        let pass = run_pass(&ordered, anchor, &working, &wedge_of, cfg, metrics, rng, false);
        if pass.failures == 0 {
            outcome = Some(pass);
            break;
        }
        working.shrink(RADIUS_SHRINK, FONT_SHRINK);
        shrink_rounds += 1;
    }

    let (pass, failed) = match outcome {
        Some(pass) => (pass, false),
        None => {
            passes += 1;
            let forced = run_pass(&ordered, anchor, &working, &wedge_of, cfg, metrics, rng, true);
            (forced, true)
        }
    };

    if let Some(s) = total_start {
        eprintln!(
            "[selkie-layout-timing] total={:?} items={} passes={} shrink_rounds={} forced={}",
            s.elapsed(),
            ordered.len(),
            passes,
            shrink_rounds,
            failed,
        );
    }

    Ok(LayoutResult {
        items: pass.placed,
        anchors: pass.anchors,
        failed,
    })
}

#[allow(clippy::too_many_arguments)]
fn run_pass(
    ordered: &[&Item],
    anchor: &Anchor,
    scales: &ScaleSet,
    wedge_of: &FxHashMap<&str, &Wedge>,
    cfg: &ChartConfig,
    metrics: &dyn TextMetrics,
    rng: &mut dyn RandomSource,
    forced: bool,
) -> PassOutput {
    let mut state = PassState::default();
    let anchors = seed_anchors(anchor, scales, cfg, metrics, &mut state);

    let budget = attempt_budget(ordered.len());
    let mut placed = Vec::with_capacity(ordered.len());
    let mut failures = 0usize;

    for item in ordered {
        // Size does not depend on position; measure once per item per pass.
        let font_size = scales.font.scale(font_input(item, anchor));
        let size = metrics.measure(&item.text, font_size);

        let mut accepted: Option<Candidate> = None;
        let mut last: Option<Candidate> = None;

        for _ in 0..budget {
            let candidate = propose(item, anchor, scales, wedge_of, cfg, rng, size);
            if !state.collides(&candidate.circles, &candidate.text) {
                accepted = Some(candidate);
                break;
            }
            last = Some(candidate);
        }

        let candidate = match accepted {
            Some(c) => c,
            None => {
                failures += 1;
                if forced {
                    match last {
                        Some(c) => c,
                        None => continue,
                    }
                } else {
                    // Pass will be discarded; no point keeping a position.
                    continue;
                }
            }
        };

        state.accept(&candidate.circles, candidate.text);
        placed.push(PositionedItem {
            id: item.id.clone(),
            text: item.text.clone(),
            x: candidate.x,
            y: candidate.y,
            width: size.width,
            height: size.height,
            font_size,
            score: item.score,
            category: item.category.clone(),
            circles: candidate
                .circles
                .iter()
                .zip(circle_freqs(item))
                .map(|(c, freq)| PlacedCircle {
                    x: c.x,
                    y: c.y,
                    r: c.r,
                    freq,
                })
                .collect(),
        });
    }

    PassOutput {
        placed,
        anchors,
        failures,
    }
}

fn propose(
    item: &Item,
    anchor: &Anchor,
    scales: &ScaleSet,
    wedge_of: &FxHashMap<&str, &Wedge>,
    cfg: &ChartConfig,
    rng: &mut dyn RandomSource,
    size: TextSize,
) -> Candidate {
    match anchor {
        Anchor::Center(_) => {
            let ring = scales.position.scale(item.score);
            let range = item
                .category
                .as_deref()
                .and_then(|name| wedge_of.get(name))
                .map(|w| w.padded());
            let p = geom::random_point_on_circle(rng, ring, range);
            let circle = Circle {
                x: p.x,
                y: p.y,
                r: scales.radius.scale(item.freq),
            };
            Candidate {
                x: p.x,
                y: p.y,
                circles: vec![circle],
                text: Rect {
                    x: p.x,
                    y: p.y,
                    width: size.width,
                    height: size.height,
                },
            }
        }
        Anchor::Edges(..) => {
            let x = scales.position.scale(item.score);
            let min_y = scales.radius.range().1;
            let max_y = cfg.inner_height() - min_y;
            let y = if max_y > min_y {
                rng.next_in_range(min_y, max_y)
            } else {
                cfg.inner_height() / 2.0
            };

            // Each reading gets its own circle, tangent to the shared anchor
            // point from opposite sides.
            let circles = match &item.readings {
                Some((a, b)) => {
                    let r1 = scales.radius.scale(a.freq);
                    let r2 = scales.radius.scale(b.freq);
                    vec![
                        Circle {
                            x: x + r1,
                            y,
                            r: r1,
                        },
                        Circle {
                            x: x - r2,
                            y,
                            r: r2,
                        },
                    ]
                }
                // Unreachable after validation; keep a sane fallback.
                None => {
                    let r = scales.radius.scale(item.freq);
                    vec![Circle { x, y, r }]
                }
            };

            Candidate {
                x,
                y,
                circles,
                text: Rect {
                    x,
                    y,
                    width: size.width,
                    height: size.height,
                },
            }
        }
    }
}

fn seed_anchors(
    anchor: &Anchor,
    scales: &ScaleSet,
    cfg: &ChartConfig,
    metrics: &dyn TextMetrics,
    state: &mut PassState,
) -> Vec<PositionedAnchor> {
    match anchor {
        Anchor::Center(word) => {
            let font_size = scales.font.scale(word.freq);
            let size = metrics.measure(&word.text, font_size);
            // Only the anchor's text competes for space; the innermost ring
            // of items may touch its circle.
            state.texts.push(Rect {
                x: 0.0,
                y: 0.0,
                width: size.width,
                height: size.height,
            });
            vec![PositionedAnchor {
                text: word.text.clone(),
                position: Point { x: 0.0, y: 0.0 },
                radius: if cfg.include_anchor {
                    scales.radius.scale(word.freq)
                } else {
                    0.0
                },
                font_size,
                width: size.width,
                height: size.height,
            }]
        }
        Anchor::Edges(left, right) => {
            let y = cfg.inner_height() / 2.0;
            let x = cfg.half_width() + cfg.anchor_panel_width / 2.0;
            [(left, -x), (right, x)]
                .into_iter()
                .map(|(word, x)| {
                    let font_size = scales.font.scale(word.freq);
                    let size = metrics.measure(&word.text, font_size);
                    PositionedAnchor {
                        text: word.text.clone(),
                        position: Point { x, y },
                        radius: 0.0,
                        font_size,
                        width: size.width,
                        height: size.height,
                    }
                })
                .collect()
        }
    }
}

fn font_input(item: &Item, anchor: &Anchor) -> f64 {
    match anchor {
        Anchor::Center(_) => item.freq,
        Anchor::Edges(..) => item.weight(),
    }
}

fn circle_freqs(item: &Item) -> impl Iterator<Item = f64> + '_ {
    let freqs: Vec<f64> = match &item.readings {
        Some((a, b)) => vec![a.freq, b.freq],
        None => vec![item.freq],
    };
    freqs.into_iter()
}
