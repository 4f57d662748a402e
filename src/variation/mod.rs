//! Variation strategies: applying a factor value to a model element
//!
//! A strategy first binds to its target inside a freshly loaded
//! [`ResolutionContext`], then writes the value into the bound element and
//! returns an audit line describing the result.
//!
//! # Example
//!
//! ```rust
//! use expauto::experiment::VariationKind;
//! use expauto::model::{ElementKind, ModelDocument, ModelElement, ResolutionContext};
//! use expauto::variation::StrategyRegistry;
//!
//! let mut ctx = ResolutionContext::new();
//! ctx.add_resource(
//!     "usage.json",
//!     ModelDocument::new(vec![ModelElement::new("loop-1", "Retry", ElementKind::Loop)]),
//! )?;
//!
//! let registry = StrategyRegistry::with_builtins();
//! let strategy = registry.get(VariationKind::LoopIteration)?;
//! let handle = strategy.bind("loop-1", &ctx)?;
//! let description = strategy.apply(&handle, &mut ctx, 4)?;
//!
//! assert!(description.starts_with("Loop Iteration Count = 4"));
//! # Ok::<(), expauto::Error>(())
//! ```

mod property;

pub use property::IntPropertyVariation;

use crate::experiment::VariationKind;
use crate::model::{ElementHandle, ResolutionContext};
use crate::{Error, Result};
use std::collections::HashMap;

/// Applies factor values of one [`VariationKind`] to model elements.
pub trait VariationStrategy: std::fmt::Debug {
    /// Kind served by this strategy.
    fn kind(&self) -> VariationKind;

    /// Locate `target` in `ctx` and check it is an element this strategy
    /// can mutate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TargetResolution`] if the id is unknown or names an
    /// element of the wrong kind.
    fn bind(&self, target: &str, ctx: &ResolutionContext) -> Result<ElementHandle>;

    /// Write `value` into the bound element and describe the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Application`] if the value is not legal for the
    /// element, or [`Error::TargetResolution`] if `handle` does not belong
    /// to `ctx`.
    fn apply(&self, handle: &ElementHandle, ctx: &mut ResolutionContext, value: i64)
        -> Result<String>;
}

/// Strategies keyed by variation kind.
#[derive(Debug, Default)]
pub struct StrategyRegistry {
    strategies: HashMap<VariationKind, Box<dyn VariationStrategy>>,
}

impl StrategyRegistry {
    /// Registry without any strategy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a strategy for every built-in [`VariationKind`].
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for kind in VariationKind::ALL {
            registry.register(Box::new(IntPropertyVariation::for_kind(kind)));
        }
        registry
    }

    /// Register `strategy` for its kind, replacing any previous one.
    pub fn register(&mut self, strategy: Box<dyn VariationStrategy>) {
        self.strategies.insert(strategy.kind(), strategy);
    }

    /// Whether a strategy serves `kind`.
    #[must_use]
    pub fn contains(&self, kind: VariationKind) -> bool {
        self.strategies.contains_key(&kind)
    }

    /// Strategy serving `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if no strategy is registered.
    pub fn get(&self, kind: VariationKind) -> Result<&dyn VariationStrategy> {
        self.strategies
            .get(&kind)
            .map(|strategy| strategy.as_ref())
            .ok_or_else(|| Error::Configuration(format!("no variation strategy for kind '{kind}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_cover_all_kinds() {
        let registry = StrategyRegistry::with_builtins();
        for kind in VariationKind::ALL {
            assert!(registry.contains(kind), "{kind}");
            assert_eq!(registry.get(kind).unwrap().kind(), kind);
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = StrategyRegistry::new();
        let err = registry.get(VariationKind::ProcessingRate).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("processing_rate"));
    }
}
