//! Value providers: the candidate levels of one variation factor
//!
//! A provider maps an enumeration position (0, 1, 2, ...) to a candidate
//! value. Providers are pure functions of position and hold no cursor, so
//! the same provider can be queried from any depth of the search.
//!
//! # Example
//!
//! ```rust
//! use expauto::provider::{create_value_provider, ValueProviderSpec};
//!
//! let spec = ValueProviderSpec::Set { values: vec![4, 8, 16] };
//! let provider = create_value_provider(&spec)?;
//!
//! assert_eq!(provider.value_at(1), Some(8));
//! assert_eq!(provider.value_at(3), None); // exhausted
//! # Ok::<(), expauto::Error>(())
//! ```

mod exponential;
mod linear;
mod polynomial;
mod set;

pub use exponential::ExponentialValueProvider;
pub use linear::LinearValueProvider;
pub use polynomial::PolynomialValueProvider;
pub use set::SetValueProvider;

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Produces the candidate value of a factor at a given enumeration position.
pub trait ValueProvider: std::fmt::Debug {
    /// Value at `position`, or `None` once the provider has nothing more to
    /// offer. `None` is a hard stop for the factor.
    fn value_at(&self, position: u64) -> Option<i64>;
}

/// Declarative provider configuration, tagged by provider kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValueProviderSpec {
    /// `start + step * position`
    Linear {
        /// Value at position 0
        #[serde(default)]
        start: i64,
        /// Increment per position (non-zero)
        #[serde(default = "default_step")]
        step: i64,
    },
    /// `factor * base ^ position`
    Exponential {
        /// Growth base (at least 2)
        base: i64,
        /// Multiplier (at least 1)
        #[serde(default = "default_factor")]
        factor: i64,
    },
    /// `factor * position ^ exponent`
    Polynomial {
        /// Multiplier (at least 1)
        #[serde(default = "default_factor")]
        factor: i64,
        /// Power applied to the position (at least 1)
        exponent: u32,
    },
    /// Explicit list of values, exhausted past the last entry
    Set {
        /// Values in enumeration order
        values: Vec<i64>,
    },
}

const fn default_step() -> i64 {
    1
}

const fn default_factor() -> i64 {
    1
}

impl ValueProviderSpec {
    /// Kind tag as written in experiment configuration files.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Linear { .. } => "linear",
            Self::Exponential { .. } => "exponential",
            Self::Polynomial { .. } => "polynomial",
            Self::Set { .. } => "set",
        }
    }
}

/// Build the provider selected by `spec`.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if the parameters cannot produce a
/// usable sequence (zero step, base below 2, empty set, repeated set
/// value, ...).
pub fn create_value_provider(spec: &ValueProviderSpec) -> Result<Box<dyn ValueProvider>> {
    match spec {
        ValueProviderSpec::Linear { start, step } => {
            if *step == 0 {
                return Err(Error::Configuration(
                    "linear value provider requires a non-zero step".to_string(),
                ));
            }
            Ok(Box::new(LinearValueProvider::new(*start, *step)))
        }
        ValueProviderSpec::Exponential { base, factor } => {
            if *base < 2 || *factor < 1 {
                return Err(Error::Configuration(format!(
                    "exponential value provider requires base >= 2 and factor >= 1 (got base={base}, factor={factor})"
                )));
            }
            Ok(Box::new(ExponentialValueProvider::new(*base, *factor)))
        }
        ValueProviderSpec::Polynomial { factor, exponent } => {
            if *exponent < 1 || *factor < 1 {
                return Err(Error::Configuration(format!(
                    "polynomial value provider requires exponent >= 1 and factor >= 1 (got factor={factor}, exponent={exponent})"
                )));
            }
            Ok(Box::new(PolynomialValueProvider::new(*factor, *exponent)))
        }
        ValueProviderSpec::Set { values } => {
            if values.is_empty() {
                return Err(Error::Configuration(
                    "set value provider requires at least one value".to_string(),
                ));
            }
            let mut seen = HashSet::with_capacity(values.len());
            if let Some(duplicate) = values.iter().find(|v| !seen.insert(**v)) {
                return Err(Error::Configuration(format!(
                    "set value provider lists {duplicate} twice"
                )));
            }
            Ok(Box::new(SetValueProvider::new(values.clone())))
        }
    }
}
