//! Incremental physics refinement for radial layouts.
//!
//! The placement pass leaves items on their score rings but makes no effort
//! to spread them evenly. [`Refinement`] relaxes a finished radial layout
//! with a small force simulation: nodes repel each other, a restoring force
//! pulls each node back toward its score radius, and nodes assigned to a
//! category wedge are reprojected into it after every step. The caller drives
//! one [`Refinement::step`] per animation frame and applies the positions
//! back with [`Refinement::apply`]; dropping the value cancels the run.

use crate::model::{Anchor, ChartConfig, LayoutResult};
use crate::rng::{RandomSource, XorShift64Star};
use crate::scale::ScaleSet;
use crate::wedge::Wedge;

/// Tuning knobs for the force simulation.
#[derive(Debug, Clone)]
pub struct RefineOptions {
    /// Hard iteration cap; cooling is scheduled against it.
    pub max_iterations: usize,
    /// Converged when the summed displacement of a step drops below this
    /// value times the node count.
    pub displacement_threshold: f64,
    /// Pairwise repulsion scale.
    pub repulsion_strength: f64,
    /// Pull back toward the score radius, per unit of radial error.
    pub radial_strength: f64,
    /// Per-axis displacement cap for a single step, before cooling.
    pub max_displacement: f64,
}

impl Default for RefineOptions {
    fn default() -> Self {
        Self {
            max_iterations: 300,
            displacement_threshold: 0.35,
            repulsion_strength: 60.0,
            radial_strength: 0.12,
            max_displacement: 8.0,
        }
    }
}

impl RefineOptions {
    /// Defaults adjusted to the chart: animated charts get the full schedule,
    /// static ones a short settle.
    pub fn for_chart(cfg: &ChartConfig) -> Self {
        let mut opts = Self::default();
        if !cfg.animation {
            opts.max_iterations = 60;
        }
        opts
    }
}

#[derive(Debug, Clone)]
struct RefineNode {
    x: f64,
    y: f64,
    // Half extents cover both the text box and the circle.
    half_w: f64,
    half_h: f64,
    target_radius: f64,
    wedge_idx: Option<usize>,
}

/// Outcome of one simulation step.
#[derive(Debug, Clone, Copy)]
pub struct StepOutcome {
    pub iteration: usize,
    pub total_displacement: f64,
    pub done: bool,
}

/// A running refinement over one radial layout.
#[derive(Debug)]
pub struct Refinement {
    nodes: Vec<RefineNode>,
    wedges: Vec<Wedge>,
    opts: RefineOptions,
    iteration: usize,
    done: bool,
    rng: XorShift64Star,
}

impl Refinement {
    /// Builds a refinement from a finished radial layout. Target radii come
    /// from the position scale, so refinement never moves items off their
    /// score ring for long. Applying to an opposed layout is not supported;
    /// there the horizontal position carries the score and must not move.
    pub fn new(
        result: &LayoutResult,
        anchor: &Anchor,
        scales: &ScaleSet,
        wedges: &[Wedge],
        opts: RefineOptions,
        seed: u64,
    ) -> Self {
        let done = matches!(anchor, Anchor::Edges(..)) || result.items.is_empty();
        let nodes = result
            .items
            .iter()
            .map(|item| {
                let r = item
                    .circles
                    .iter()
                    .map(|c| c.r)
                    .fold(0.0f64, f64::max);
                let wedge_idx = item
                    .category
                    .as_deref()
                    .and_then(|name| wedges.iter().position(|w| w.name == name));
                RefineNode {
                    x: item.x,
                    y: item.y,
                    half_w: (item.width / 2.0).max(r),
                    half_h: (item.height / 2.0).max(r),
                    target_radius: scales.position.scale(item.score),
                    wedge_idx,
                }
            })
            .collect();
        Self {
            nodes,
            wedges: wedges.to_vec(),
            opts,
            iteration: 0,
            done,
            rng: XorShift64Star::new(seed),
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Advances the simulation by one tick. Calling after convergence is a
    /// no-op that keeps reporting `done`.
    pub fn step(&mut self) -> StepOutcome {
        if self.done {
            return StepOutcome {
                iteration: self.iteration,
                total_displacement: 0.0,
                done: true,
            };
        }

        let n = self.nodes.len();
        let max_iter = self.opts.max_iterations.max(1);
        let cooling = (max_iter - self.iteration.min(max_iter)) as f64 / max_iter as f64;
        let mut disp = vec![(0.0f64, 0.0f64); n];

        for i in 0..n {
            for j in (i + 1)..n {
                let (fx, fy) = self.repulsion(i, j);
                disp[i].0 += fx;
                disp[i].1 += fy;
                disp[j].0 -= fx;
                disp[j].1 -= fy;
            }
        }

        for (node, d) in self.nodes.iter().zip(disp.iter_mut()) {
            let cur_r = node.x.hypot(node.y);
            if cur_r > f64::EPSILON {
                let pull = self.opts.radial_strength * (node.target_radius - cur_r);
                d.0 += pull * node.x / cur_r;
                d.1 += pull * node.y / cur_r;
            } else {
                d.0 += self.opts.radial_strength * node.target_radius;
            }
        }

        let cap = self.opts.max_displacement * cooling;
        let mut total = 0.0;
        for (node, d) in self.nodes.iter_mut().zip(disp) {
            let dx = d.0.clamp(-cap, cap);
            let dy = d.1.clamp(-cap, cap);
            node.x += dx;
            node.y += dy;
            total += dx.abs() + dy.abs();
        }

        self.reproject_into_wedges();

        self.iteration += 1;
        if self.iteration >= self.opts.max_iterations
            || total < self.opts.displacement_threshold * n as f64
        {
            self.done = true;
        }

        StepOutcome {
            iteration: self.iteration,
            total_displacement: total,
            done: self.done,
        }
    }

    /// Writes current node positions into `result`, moving each item and its
    /// circles by the same offset. Anchors are left alone.
    pub fn apply(&self, result: &mut LayoutResult) {
        for (item, node) in result.items.iter_mut().zip(&self.nodes) {
            let dx = node.x - item.x;
            let dy = node.y - item.y;
            item.x = node.x;
            item.y = node.y;
            for circle in &mut item.circles {
                circle.x += dx;
                circle.y += dy;
            }
        }
    }

    fn repulsion(&mut self, i: usize, j: usize) -> (f64, f64) {
        let a = &self.nodes[i];
        let b = &self.nodes[j];
        let mut dx = a.x - b.x;
        let mut dy = a.y - b.y;
        let mut dist = dx.hypot(dy);
        if dist < 1e-6 {
            // Coincident nodes get a small random kick so the pair can split.
            dx = self.rng.next_in_range(-0.5, 0.5);
            dy = self.rng.next_in_range(-0.5, 0.5);
            dist = dx.hypot(dy).max(1e-6);
        }

        let mut f = self.opts.repulsion_strength / dist.max(1.0);
        // Normalized elliptical distance below 1 means the extents overlap;
        // overlapping pairs push much harder than merely close ones.
        let a_ref = &self.nodes[i];
        let b_ref = &self.nodes[j];
        let q = (dx / (a_ref.half_w + b_ref.half_w)).hypot(dy / (a_ref.half_h + b_ref.half_h));
        if q < 1.0 {
            f += (1.0 - q) * self.opts.repulsion_strength;
        }

        (f * dx / dist, f * dy / dist)
    }

    fn reproject_into_wedges(&mut self) {
        for node in &mut self.nodes {
            let Some(idx) = node.wedge_idx else { continue };
            let Some(wedge) = self.wedges.get(idx) else { continue };
            let angle = node.y.atan2(node.x);
            if wedge.contains(angle) {
                continue;
            }
            let clamped = wedge.clamp_angle(angle);
            let r = node.x.hypot(node.y);
            node.x = r * clamped.cos();
            node.y = r * clamped.sin();
        }
    }
}
