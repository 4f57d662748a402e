//! Experiment definitions
//!
//! An experiment names a base model, the factors varied over it, the tools
//! that simulate each variant, and when those simulations stop.
//!
//! ## Schema Overview
//!
//! ```text
//! Experiment (1) ──< Variation (N)          [factors, enumeration order]
//!      │
//!      ├──< ToolConfiguration (N)           [one run per tool]
//!      └──< StopCondition (N)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use expauto::experiment::{Experiment, StopCondition, ToolConfiguration, Variation, VariationKind};
//! use expauto::provider::ValueProviderSpec;
//! use expauto::workspace::ModelFiles;
//!
//! let experiment = Experiment::builder("exp-1", "Loop sweep", ModelFiles::new("u.json", "a.json"))
//!     .variation(
//!         Variation::new(
//!             "loops",
//!             "loop-1",
//!             VariationKind::LoopIteration,
//!             ValueProviderSpec::Linear { start: 1, step: 1 },
//!         )
//!         .with_range(1, 5),
//!     )
//!     .tool(ToolConfiguration::new("dry", "dry_run"))
//!     .stop_condition(StopCondition::SimulationTime { seconds: 600 })
//!     .build();
//!
//! assert!(experiment.validate().is_ok());
//! ```

mod tool_config;
mod variation;

pub use tool_config::{StopCondition, ToolConfiguration};
pub use variation::{Variation, VariationKind, DEFAULT_MAX_VARIATIONS};

use crate::workspace::ModelFiles;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A full-factorial experiment over one base model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experiment {
    /// Unique identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Base model; read-only during a run
    pub initial_model: ModelFiles,
    /// Factors, leftmost varies slowest
    #[serde(default)]
    pub variations: Vec<Variation>,
    /// Tools, run one after another in declared order
    #[serde(default)]
    pub tool_configurations: Vec<ToolConfiguration>,
    /// Stop conditions handed to every tool run
    #[serde(default)]
    pub stop_conditions: Vec<StopCondition>,
}

impl Experiment {
    /// Create a builder with the required fields.
    #[must_use]
    pub fn builder(
        id: impl Into<String>,
        name: impl Into<String>,
        initial_model: ModelFiles,
    ) -> ExperimentBuilder {
        ExperimentBuilder::new(id, name, initial_model)
    }

    /// Names of the factors in enumeration order.
    #[must_use]
    pub fn factor_names(&self) -> Vec<&str> {
        self.variations.iter().map(|v| v.name.as_str()).collect()
    }

    /// Check the definition before any model work starts.
    ///
    /// Tool kinds are not checked here; they depend on the adapters
    /// registered with the runner.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an empty id, no tool
    /// configurations, duplicate factor or tool names, or an invalid factor.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Configuration(format!(
                "experiment '{}' has an empty id",
                self.name
            )));
        }
        if self.tool_configurations.is_empty() {
            return Err(Error::Configuration(format!(
                "experiment '{}' has no tool configuration",
                self.id
            )));
        }

        let mut names = HashSet::new();
        for variation in &self.variations {
            if !names.insert(variation.name.as_str()) {
                return Err(Error::Configuration(format!(
                    "experiment '{}' declares variation '{}' twice",
                    self.id, variation.name
                )));
            }
            variation.validate().map_err(|e| match e {
                Error::Configuration(msg) => {
                    Error::Configuration(format!("experiment '{}': {msg}", self.id))
                }
                other => other,
            })?;
        }

        let mut tools = HashSet::new();
        for tool in &self.tool_configurations {
            if !tools.insert(tool.name.as_str()) {
                return Err(Error::Configuration(format!(
                    "experiment '{}' declares tool configuration '{}' twice",
                    self.id, tool.name
                )));
            }
        }
        Ok(())
    }
}

/// Builder for `Experiment`.
#[derive(Debug)]
pub struct ExperimentBuilder {
    experiment: Experiment,
}

impl ExperimentBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, initial_model: ModelFiles) -> Self {
        Self {
            experiment: Experiment {
                id: id.into(),
                name: name.into(),
                initial_model,
                variations: Vec::new(),
                tool_configurations: Vec::new(),
                stop_conditions: Vec::new(),
            },
        }
    }

    /// Append a factor.
    #[must_use]
    pub fn variation(mut self, variation: Variation) -> Self {
        self.experiment.variations.push(variation);
        self
    }

    /// Append a tool configuration.
    #[must_use]
    pub fn tool(mut self, tool: ToolConfiguration) -> Self {
        self.experiment.tool_configurations.push(tool);
        self
    }

    /// Append a stop condition.
    #[must_use]
    pub fn stop_condition(mut self, condition: StopCondition) -> Self {
        self.experiment.stop_conditions.push(condition);
        self
    }

    /// Build the `Experiment`.
    #[must_use]
    pub fn build(self) -> Experiment {
        self.experiment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ValueProviderSpec;

    fn linear(name: &str) -> Variation {
        Variation::new(
            name,
            "loop-1",
            VariationKind::LoopIteration,
            ValueProviderSpec::Linear { start: 0, step: 1 },
        )
        .with_range(0, 3)
    }

    fn base() -> ExperimentBuilder {
        Experiment::builder("exp-1", "Test", ModelFiles::new("u.json", "a.json"))
    }

    #[test]
    fn test_builder_keeps_order() {
        let exp = base()
            .variation(linear("a"))
            .variation(linear("b"))
            .tool(ToolConfiguration::new("t", "dry_run"))
            .build();
        assert_eq!(exp.factor_names(), vec!["a", "b"]);
        assert!(exp.validate().is_ok());
    }

    #[test]
    fn test_requires_tool() {
        let err = base().variation(linear("a")).build().validate().unwrap_err();
        assert!(err.to_string().contains("no tool configuration"));
    }

    #[test]
    fn test_duplicate_variation_names() {
        let err = base()
            .variation(linear("a"))
            .variation(linear("a"))
            .tool(ToolConfiguration::new("t", "dry_run"))
            .build()
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_invalid_variation_reports_experiment() {
        let err = base()
            .variation(linear("a").with_range(5, 1))
            .tool(ToolConfiguration::new("t", "dry_run"))
            .build()
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("exp-1"));
    }

    #[test]
    fn test_zero_variations_is_valid() {
        let exp = base().tool(ToolConfiguration::new("t", "dry_run")).build();
        assert!(exp.validate().is_ok());
    }
}
