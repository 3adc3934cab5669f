//! Seeded randomness for the placement engine.
//!
//! Candidate angles and offsets are sampled through [`RandomSource`] so layouts are
//! reproducible from a seed and tests can feed fixed sequences to assert exact
//! placements.

/// A source of uniform random numbers in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Uniform value in `[lo, hi)`.
    fn next_in_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }
}

/// xorshift64* generator.
///
/// Small, allocation-free and good enough for layout sampling; not a
/// cryptographic generator.
#[derive(Debug, Clone)]
pub struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D_u64)
    }
}

impl RandomSource for XorShift64Star {
    fn next_f64(&mut self) -> f64 {
        // Map to [0, 1) with 53 bits of precision.
        let u = self.next_u64() >> 11;
        (u as f64) / ((1u64 << 53) as f64)
    }
}
