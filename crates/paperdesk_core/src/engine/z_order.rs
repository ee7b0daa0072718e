//! Stacking-order counter.
//!
//! # Invariants
//! - `next()` is strictly increasing between resets, saturating at `i64::MAX`.
//! - A reset never moves the counter below an arranged stack it covers.

/// Hands out front-most z-indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZOrderAllocator {
    current_max: i64,
}

impl ZOrderAllocator {
    pub fn new(initial_max: i64) -> Self {
        Self {
            current_max: initial_max,
        }
    }

    pub fn current_max(&self) -> i64 {
        self.current_max
    }

    /// Advances the counter and returns the new front-most value.
    pub fn next(&mut self) -> i64 {
        self.current_max = self.current_max.saturating_add(1);
        self.current_max
    }

    /// Rebases the counter after a bulk arrangement.
    pub fn reset_to(&mut self, max: i64) {
        self.current_max = max;
    }
}
