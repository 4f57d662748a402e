//! Exponential provider

use super::ValueProvider;

/// Yields `factor * base^position`: `factor, factor * base, factor * base^2, ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExponentialValueProvider {
    base: i64,
    factor: i64,
}

impl ExponentialValueProvider {
    /// Create a provider with growth `base` and multiplier `factor`.
    #[must_use]
    pub const fn new(base: i64, factor: i64) -> Self {
        Self { base, factor }
    }
}

impl ValueProvider for ExponentialValueProvider {
    fn value_at(&self, position: u64) -> Option<i64> {
        let exp = u32::try_from(position).ok()?;
        self.base
            .checked_pow(exp)
            .and_then(|power| power.checked_mul(self.factor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_powers_of_two() {
        let provider = ExponentialValueProvider::new(2, 1);
        let values: Vec<_> = (0..5).filter_map(|p| provider.value_at(p)).collect();
        assert_eq!(values, vec![1, 2, 4, 8, 16]);
    }

    #[test]
    fn test_factor_scales() {
        let provider = ExponentialValueProvider::new(10, 3);
        assert_eq!(provider.value_at(2), Some(300));
    }

    #[test]
    fn test_overflow_exhausts() {
        let provider = ExponentialValueProvider::new(2, 1);
        assert_eq!(provider.value_at(62), Some(1 << 62));
        assert_eq!(provider.value_at(63), None);
    }
}
