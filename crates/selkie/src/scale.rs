//! Frequency and score scales, and legend tick generation.
//!
//! Scales are plain value types built once per layout pass. The placement
//! engine clones the set and narrows the radius/font ranges between shrink
//! rounds; the originals stay untouched.

use crate::model::{Anchor, ChartConfig, Item};

/// Linear domain → range mapping. A degenerate (zero-span) domain maps every
/// input to the range midpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn scale(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 {
            return (r0 + r1) / 2.0;
        }
        // Lerp form so domain endpoints land exactly on range endpoints.
        let t = (v - d0) / span;
        r0 * (1.0 - t) + r1 * t
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn set_range(&mut self, range: (f64, f64)) {
        self.range = range;
    }

    pub fn shrink_range(&mut self, factor: f64) {
        self.range = (self.range.0 * factor, self.range.1 * factor);
    }
}

/// Square-root domain → range mapping, so circle area tracks frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn scale(&self, v: f64) -> f64 {
        let s0 = self.domain.0.max(0.0).sqrt();
        let s1 = self.domain.1.max(0.0).sqrt();
        let (r0, r1) = self.range;
        let span = s1 - s0;
        if span == 0.0 {
            return (r0 + r1) / 2.0;
        }
        let t = (v.max(0.0).sqrt() - s0) / span;
        r0 * (1.0 - t) + r1 * t
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn shrink_range(&mut self, factor: f64) {
        self.range = (self.range.0 * factor, self.range.1 * factor);
    }
}

/// Score → color-ramp position in `[0, 1]`.
///
/// The engine owns no color values (rendering concern); it exposes where on a
/// caller-supplied two-color gradient each score sits. When the score domain
/// misses zero, the ramp is built over a companion domain mirroring the
/// domain midpoint across zero, and the data extent becomes an asymmetric
/// sub-range of that ramp. One-sided data then still shades toward the
/// neutral middle instead of spanning the full gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    inner: LinearScale,
}

impl ColorScale {
    pub fn new(domain: (f64, f64)) -> Self {
        let (d0, d1) = domain;
        let straddles = d0 < 0.0 && d1 > 0.0;
        let ramp = if straddles {
            (0.0, 1.0)
        } else {
            let companion = -(d0 + d1) / 2.0;
            let lo = d0.min(companion);
            let hi = d1.max(companion);
            let pos = LinearScale::new((lo, hi), (0.0, 1.0));
            (pos.scale(d0), pos.scale(d1))
        };
        Self {
            inner: LinearScale::new(domain, ramp),
        }
    }

    pub fn ramp_position(&self, score: f64) -> f64 {
        self.inner.scale(score)
    }

    /// Ramp positions of the data extent; `(0, 1)` unless the domain missed
    /// zero and was corrected.
    pub fn endpoints(&self) -> (f64, f64) {
        self.inner.range()
    }
}

/// Power-of-ten tick step with 1/2/5 mantissa, d3-style.
fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let span = stop - start;
    if !(span > 0.0) {
        return 1.0;
    }
    let step0 = span / count.max(1) as f64;
    let power = 10f64.powf(step0.log10().floor());
    let error = step0 / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * power
}

/// Round tick values covering `[min, max]`, extended by one margin step at
/// each end so outermost data never renders flush against the chart edge.
/// Strictly increasing.
pub fn ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    let step = tick_step(min, max, count);
    let mut i0 = (min / step).ceil() as i64;
    let mut i1 = (max / step).floor() as i64;
    while i0 as f64 * step > min {
        i0 -= 1;
    }
    while (i1 as f64) * step < max {
        i1 += 1;
    }
    // Margin tick at each end.
    i0 -= 1;
    i1 += 1;
    (i0..=i1).map(|i| i as f64 * step).collect()
}

/// Opposed-legend ticks: integer-ceiled ends, padded to an odd length so a
/// center tick always exists between the two anchor panels. Ceiling only
/// moves the high end outward, so the low end is walked back down by whole
/// steps until the true data minimum is covered.
pub fn even_score_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    let mut t = ticks(min.ceil(), max.ceil(), count);
    let step = if t.len() > 1 { t[1] - t[0] } else { 1.0 };
    while min.is_finite() && t[0] > min {
        let below = t[0] - step;
        t.insert(0, below);
    }
    if t.len() % 2 == 0 {
        let last = t[t.len() - 1];
        t.push(last + step);
    }
    t
}

/// The scale functions a layout pass needs, plus the legend tick values they
/// were derived from.
#[derive(Debug, Clone)]
pub struct ScaleSet {
    pub radius: SqrtScale,
    pub font: LinearScale,
    pub position: LinearScale,
    pub color: ColorScale,
    pub ticks: Vec<f64>,
}

impl ScaleSet {
    pub(crate) fn shrink(&mut self, radius_factor: f64, font_factor: f64) {
        self.radius.shrink_range(radius_factor);
        self.font.shrink_range(font_factor);
    }
}

/// Derives the four scales and the tick list from the item extents.
pub fn compute_scales(items: &[Item], anchor: &Anchor, cfg: &ChartConfig) -> ScaleSet {
    match anchor {
        Anchor::Center(word) => {
            let freq_domain = extent(
                items
                    .iter()
                    .map(|i| i.freq)
                    .chain(cfg.include_anchor.then_some(word.freq)),
            );
            let radius = SqrtScale::new(freq_domain, cfg.radius_range);
            let font = LinearScale::new(freq_domain, cfg.font_range);

            let score_domain = extent(items.iter().map(|i| i.score));
            let min_ring = if cfg.include_anchor {
                // Keep the first ring of items clear of the anchor circle.
                radius.scale(word.freq) * 1.75
            } else {
                cfg.space_around_center
            };
            let position = LinearScale::new(score_domain, (min_ring, cfg.half_width()));

            ScaleSet {
                radius,
                font,
                position,
                color: ColorScale::new(score_domain),
                ticks: ticks(score_domain.0, score_domain.1, cfg.tick_count),
            }
        }
        Anchor::Edges(..) => {
            let freq_domain = extent(items.iter().flat_map(|i| match &i.readings {
                Some((a, b)) => [a.freq, b.freq],
                None => [i.freq, i.freq],
            }));
            let sum_domain = extent(items.iter().map(|i| match &i.readings {
                Some((a, b)) => a.freq + b.freq,
                None => i.freq,
            }));

            let score_domain = extent(items.iter().map(|i| i.score));
            let legend = even_score_ticks(score_domain.0, score_domain.1, cfg.tick_count);
            // The margin ticks widen the working domain, keeping items clear
            // of the anchor panels.
            let tick_domain = match (legend.first(), legend.last()) {
                (Some(&lo), Some(&hi)) => (lo, hi),
                _ => score_domain,
            };
            let half = cfg.half_width();

            ScaleSet {
                radius: SqrtScale::new(freq_domain, cfg.radius_range),
                font: LinearScale::new(sum_domain, cfg.font_range),
                position: LinearScale::new(tick_domain, (-half, half)),
                color: ColorScale::new(tick_domain),
                ticks: legend,
            }
        }
    }
}

fn extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut out: Option<(f64, f64)> = None;
    for v in values {
        out = Some(match out {
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
            None => (v, v),
        });
    }
    out.unwrap_or((0.0, 0.0))
}
