use crate::{Error, Result};

/// Capacity growth policy applied when an append or resize outgrows the buffer.
///
/// The next capacity is `max(ceil(capacity * factor), required)`, so repeated
/// single-element appends reallocate `O(log N)` times for `N` elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthPolicy {
    factor: f64,
}

impl GrowthPolicy {
    pub const DEFAULT_FACTOR: f64 = 2.0;

    /// Creates a policy with the given factor, which must be finite and `> 1`.
    pub fn new(factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor <= 1.0 {
            return Err(Error::InvalidGrowthFactor(factor));
        }
        Ok(Self { factor })
    }

    #[inline]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Capacity to allocate so that at least `required` elements fit.
    ///
    /// Returns `current` unchanged when it already suffices.
    #[inline]
    pub fn next_capacity(&self, current: usize, required: usize) -> usize {
        if required <= current {
            return current;
        }
        // Float to int casts saturate, so huge capacities clamp to usize::MAX.
        let grown = (current as f64 * self.factor).ceil() as usize;
        grown.max(required)
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            factor: Self::DEFAULT_FACTOR,
        }
    }
}
