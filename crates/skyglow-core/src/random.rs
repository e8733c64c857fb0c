//! Bounded random scalars for initializing particle attributes.

use rand::Rng;

/// Draw a uniform float in `[lo, hi)`.
///
/// A degenerate range (`hi <= lo`) yields `lo` rather than panicking.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        return lo;
    }
    rng.random_range(lo..hi)
}

/// Draw a uniform float in `[0, 1)`.
pub fn unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    uniform(rng, 0.0, 1.0)
}
