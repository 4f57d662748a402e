//! Depth-first enumeration of factor-level combinations
//!
//! Walks the factors left to right and visits their cross product in
//! nested-loop order: the first factor varies slowest, the last fastest.
//! One buffer is shared by the whole walk; a value is pushed before
//! descending and popped on the way back, so the callback only borrows the
//! current combination. Callbacks that keep a combination must copy it
//! ([`Combination::levels`]).
//!
//! Per factor, positions `0, 1, 2, ...` are probed until one of:
//! - the provider is exhausted,
//! - `max_variations` positions were probed,
//! - a value above `max_value` is produced (the rest of the factor is not
//!   probed; providers are assumed non-decreasing).
//!
//! Values below `min_value` are skipped.
//!
//! # Example
//!
//! ```rust
//! use expauto::enumerator::{Factor, VariationEnumerator};
//! use expauto::experiment::{Variation, VariationKind};
//! use expauto::provider::ValueProviderSpec;
//!
//! let variations = vec![
//!     Variation::new("a", "x", VariationKind::LoopIteration,
//!         ValueProviderSpec::Set { values: vec![1, 2] }),
//!     Variation::new("b", "y", VariationKind::LoopIteration,
//!         ValueProviderSpec::Set { values: vec![7] }),
//! ];
//! let factors = Factor::from_variations(&variations)?;
//!
//! let mut fragments = Vec::new();
//! VariationEnumerator::new(&factors).for_each_combination(|c| {
//!     fragments.push(c.fragment());
//!     Ok::<(), expauto::Error>(())
//! })?;
//!
//! assert_eq!(fragments, vec!["a=1, b=7", "a=2, b=7"]);
//! # Ok::<(), expauto::Error>(())
//! ```

use crate::experiment::Variation;
use crate::provider::{create_value_provider, ValueProvider};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Separator between `name=value` entries of a folder fragment.
pub const FRAGMENT_SEPARATOR: &str = ", ";

/// A variation paired with its instantiated value provider.
#[derive(Debug)]
pub struct Factor<'a> {
    variation: &'a Variation,
    provider: Box<dyn ValueProvider>,
}

impl<'a> Factor<'a> {
    /// Pair `variation` with an explicit provider.
    #[must_use]
    pub fn new(variation: &'a Variation, provider: Box<dyn ValueProvider>) -> Self {
        Self {
            variation,
            provider,
        }
    }

    /// Instantiate the provider declared by `variation`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Configuration`] if the provider is unusable.
    pub fn from_variation(variation: &'a Variation) -> Result<Self> {
        Ok(Self::new(
            variation,
            create_value_provider(&variation.value_provider)?,
        ))
    }

    /// Instantiate the providers of all `variations`, keeping order.
    ///
    /// # Errors
    ///
    /// Returns the first provider configuration error.
    pub fn from_variations(variations: &'a [Variation]) -> Result<Vec<Self>> {
        variations.iter().map(Self::from_variation).collect()
    }

    /// The factor's variation.
    #[must_use]
    pub const fn variation(&self) -> &'a Variation {
        self.variation
    }

    /// Admissible values of this factor in probe order.
    #[must_use]
    pub fn admissible_values(&self) -> Vec<i64> {
        let mut values = Vec::new();
        self.probe(|value| values.push(value));
        values
    }

    fn probe(&self, mut accept: impl FnMut(i64)) {
        let _ = self.try_probe(|value| {
            accept(value);
            Ok::<(), std::convert::Infallible>(())
        });
    }

    fn try_probe<E>(
        &self,
        mut accept: impl FnMut(i64) -> std::result::Result<(), E>,
    ) -> std::result::Result<(), E> {
        let variation = self.variation;
        let mut position = 0u64;
        while position < variation.max_variations {
            let Some(value) = self.provider.value_at(position) else {
                break;
            };
            if value > variation.max_value {
                break;
            }
            if value >= variation.min_value {
                accept(value)?;
            } else {
                tracing::debug!(
                    variation = %variation.name,
                    position,
                    value,
                    "Below min_value, skipped"
                );
            }
            position += 1;
        }
        Ok(())
    }
}

/// One factor of a combination bound to a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombinationEntry<'a> {
    /// The varied factor
    pub variation: &'a Variation,
    /// Its value in this combination
    pub value: i64,
}

/// Owned `name=value` pair, for callers that retain a combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FactorLevel {
    /// Variation name
    pub name: String,
    /// Value
    pub value: i64,
}

/// The combination currently being visited; borrowed by callbacks.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Combination<'a> {
    entries: Vec<CombinationEntry<'a>>,
}

impl<'a> Combination<'a> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Number of bound factors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no factor is bound (experiment without variations).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in factor order.
    #[must_use]
    pub fn entries(&self) -> &[CombinationEntry<'a>] {
        &self.entries
    }

    /// Values in factor order.
    #[must_use]
    pub fn values(&self) -> Vec<i64> {
        self.entries.iter().map(|e| e.value).collect()
    }

    /// Owned copy of this combination.
    #[must_use]
    pub fn levels(&self) -> Vec<FactorLevel> {
        self.entries
            .iter()
            .map(|e| FactorLevel {
                name: e.variation.name.clone(),
                value: e.value,
            })
            .collect()
    }

    /// Folder name fragment: `name=value` entries joined by `", "`.
    ///
    /// Empty for a combination without factors.
    #[must_use]
    pub fn fragment(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}={}", e.variation.name, e.value))
            .collect::<Vec<_>>()
            .join(FRAGMENT_SEPARATOR)
    }
}

/// Cross-product walk over a list of factors.
#[derive(Debug, Clone, Copy)]
pub struct VariationEnumerator<'f, 'a> {
    factors: &'f [Factor<'a>],
}

impl<'f, 'a> VariationEnumerator<'f, 'a> {
    /// Enumerator over `factors`, in slice order.
    #[must_use]
    pub const fn new(factors: &'f [Factor<'a>]) -> Self {
        Self { factors }
    }

    /// Invoke `callback` once per complete combination, depth first.
    ///
    /// With no factors the callback runs exactly once with an empty
    /// combination. Returns the number of callback invocations.
    ///
    /// # Errors
    ///
    /// The first callback error ends the walk and is returned unchanged.
    pub fn for_each_combination<F, E>(&self, mut callback: F) -> std::result::Result<usize, E>
    where
        F: FnMut(&Combination<'a>) -> std::result::Result<(), E>,
    {
        let mut buffer = Combination::with_capacity(self.factors.len());
        let mut visited = 0;
        self.descend(0, &mut buffer, &mut callback, &mut visited)?;
        Ok(visited)
    }

    /// Owned copies of every combination, in visiting order.
    #[must_use]
    pub fn collect_levels(&self) -> Vec<Vec<FactorLevel>> {
        let mut all = Vec::new();
        let _ = self.for_each_combination(|c| {
            all.push(c.levels());
            Ok::<(), std::convert::Infallible>(())
        });
        all
    }

    /// Number of combinations, computed from each factor's admissible set.
    #[must_use]
    pub fn count(&self) -> u128 {
        self.factors
            .iter()
            .map(|f| f.admissible_values().len() as u128)
            .product()
    }

    fn descend<F, E>(
        &self,
        depth: usize,
        buffer: &mut Combination<'a>,
        callback: &mut F,
        visited: &mut usize,
    ) -> std::result::Result<(), E>
    where
        F: FnMut(&Combination<'a>) -> std::result::Result<(), E>,
    {
        let Some(factor) = self.factors.get(depth) else {
            *visited += 1;
            return callback(buffer);
        };

        factor.try_probe(|value| {
            buffer.entries.push(CombinationEntry {
                variation: factor.variation,
                value,
            });
            let result = self.descend(depth + 1, buffer, callback, visited);
            buffer.entries.pop();
            result
        })
    }
}
