//! Weighted destination sampling.

use lift_core::{FloorId, FloorRng};

/// Draws destination floors proportionally to profile-supplied weights.
///
/// Built once per floor per traffic interval.  Weights need not be
/// normalized; sampling divides by the running total.  Lookup is a binary
/// search over the cumulative weights.
#[derive(Debug, Default)]
pub struct DestinationSampler {
    floors: Vec<FloorId>,
    /// Running weight sums, parallel to `floors`.
    cumulative: Vec<f64>,
    total: f64,
}

impl DestinationSampler {
    /// Build from `(floor, weight)` pairs.  Pairs with a zero, negative, or
    /// non-finite weight are skipped entirely.
    pub fn new(weights: impl IntoIterator<Item = (FloorId, f64)>) -> Self {
        let mut sampler = Self::default();
        for (floor, w) in weights {
            if w.is_finite() && w > 0.0 {
                sampler.total += w;
                sampler.floors.push(floor);
                sampler.cumulative.push(sampler.total);
            }
        }
        sampler
    }

    /// `true` when no destination carries any weight.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    /// Draw one destination, or `None` when the sampler is empty.
    pub fn sample(&self, rng: &mut FloorRng) -> Option<FloorId> {
        if self.is_empty() {
            return None;
        }
        let x: f64 = rng.gen_range(0.0..self.total);
        // First bucket whose cumulative weight exceeds the draw; the clamp
        // covers the float edge where x rounds up to the exact total.
        let idx = self.cumulative.partition_point(|&c| c <= x);
        Some(self.floors[idx.min(self.floors.len() - 1)])
    }
}
