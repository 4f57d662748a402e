//! Enumerated-list provider

use super::ValueProvider;

/// Yields a fixed list of values in declared order.
///
/// The list is taken as-is. A list that is not sorted ascending interacts
/// with the "value above max stops the factor" rule of the enumerator: every
/// entry after the first out-of-range one is never probed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetValueProvider {
    values: Vec<i64>,
}

impl SetValueProvider {
    /// Create a provider over `values`.
    #[must_use]
    pub fn new(values: Vec<i64>) -> Self {
        Self { values }
    }

    /// Number of values in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ValueProvider for SetValueProvider {
    fn value_at(&self, position: u64) -> Option<i64> {
        let index = usize::try_from(position).ok()?;
        self.values.get(index).copied()
    }
}
