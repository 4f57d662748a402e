//! Polynomial provider

use super::ValueProvider;

/// Yields `factor * position^exponent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolynomialValueProvider {
    factor: i64,
    exponent: u32,
}

impl PolynomialValueProvider {
    /// Create a provider with multiplier `factor` and power `exponent`.
    #[must_use]
    pub const fn new(factor: i64, exponent: u32) -> Self {
        Self { factor, exponent }
    }
}

impl ValueProvider for PolynomialValueProvider {
    fn value_at(&self, position: u64) -> Option<i64> {
        let position = i64::try_from(position).ok()?;
        position
            .checked_pow(self.exponent)
            .and_then(|power| power.checked_mul(self.factor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squares() {
        let provider = PolynomialValueProvider::new(1, 2);
        let values: Vec<_> = (0..4).filter_map(|p| provider.value_at(p)).collect();
        assert_eq!(values, vec![0, 1, 4, 9]);
    }

    #[test]
    fn test_scaled_cubes() {
        let provider = PolynomialValueProvider::new(2, 3);
        assert_eq!(provider.value_at(3), Some(54));
    }
}
