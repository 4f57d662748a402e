//! Linear (arithmetic progression) provider

use super::ValueProvider;

/// Yields `start, start + step, start + 2 * step, ...`.
///
/// Exhausts instead of overflowing `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearValueProvider {
    start: i64,
    step: i64,
}

impl LinearValueProvider {
    /// Create a provider starting at `start` and advancing by `step`.
    #[must_use]
    pub const fn new(start: i64, step: i64) -> Self {
        Self { start, step }
    }
}

impl ValueProvider for LinearValueProvider {
    fn value_at(&self, position: u64) -> Option<i64> {
        let position = i64::try_from(position).ok()?;
        self.step
            .checked_mul(position)
            .and_then(|offset| self.start.checked_add(offset))
    }
}
