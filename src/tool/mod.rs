//! Simulation tool adapters
//!
//! An adapter runs one repetition of a simulation against a prepared
//! workspace. Adapters are created through a [`ToolRegistry`] keyed by the
//! `kind` tag of a [`ToolConfiguration`]; the runner asks for a fresh
//! adapter for every repetition.
//!
//! Built-in kinds:
//!
//! | Kind | Adapter |
//! |---|---|
//! | `dry_run` | [`DryRunAdapter`]: writes the simulation configuration only |
//! | `command` | [`CommandAdapter`]: runs an external simulator process |

mod command;
mod dry_run;

pub use command::CommandAdapter;
pub use dry_run::DryRunAdapter;

use crate::experiment::{StopCondition, ToolConfiguration};
use crate::workspace::WorkspaceHandle;
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Key of the experiment name in a simulation configuration map.
pub const EXPERIMENT_NAME: &str = "experiment_name";
/// Key of the simulator identifier in a simulation configuration map.
pub const SIMULATOR_ID: &str = "simulator_id";
/// Key of the simulated-time stop condition.
pub const SIMULATION_TIME: &str = "simulation_time";
/// Key of the measurement-count stop condition.
pub const MAX_MEASUREMENTS: &str = "max_measurements";

/// Executes simulation runs of prepared models.
pub trait ToolAdapter {
    /// Run one simulation of the model in `workspace`.
    ///
    /// # Errors
    ///
    /// Returns an error (typically [`Error::Tool`]) if the simulation fails.
    fn run_experiment(
        &mut self,
        label: &str,
        workspace: &WorkspaceHandle,
        config: &ToolConfiguration,
        stop_conditions: &[StopCondition],
    ) -> Result<()>;
}

/// Creates an adapter for a tool configuration.
pub type AdapterFactory = Box<dyn Fn(&ToolConfiguration) -> Result<Box<dyn ToolAdapter>>>;

/// Adapter factories keyed by tool kind tag.
#[derive(Default)]
pub struct ToolRegistry {
    factories: HashMap<String, AdapterFactory>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

impl ToolRegistry {
    /// Registry without any adapter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the `dry_run` and `command` adapters.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(DryRunAdapter::KIND, |_| Ok(Box::new(DryRunAdapter::new())));
        registry.register(CommandAdapter::KIND, |config| {
            Ok(Box::new(CommandAdapter::from_config(config)?))
        });
        registry
    }

    /// Register `factory` under `kind`, replacing any previous one.
    pub fn register<F>(&mut self, kind: impl Into<String>, factory: F)
    where
        F: Fn(&ToolConfiguration) -> Result<Box<dyn ToolAdapter>> + 'static,
    {
        self.factories.insert(kind.into(), Box::new(factory));
    }

    /// Whether an adapter is registered for `kind`.
    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    /// Registered kinds, sorted.
    #[must_use]
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Create an adapter for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an unknown kind, or whatever the
    /// factory reports for unusable settings.
    pub fn create(&self, config: &ToolConfiguration) -> Result<Box<dyn ToolAdapter>> {
        let factory = self.factories.get(&config.kind).ok_or_else(|| {
            Error::Configuration(format!(
                "tool configuration '{}' uses unknown tool kind '{}' (known: {})",
                config.name,
                config.kind,
                self.kinds().join(", ")
            ))
        })?;
        factory(config)
    }
}

/// Build the simulation configuration map handed to a tool.
///
/// Starts from the settings object and adds the experiment name, the
/// simulator id (defaults to the tool kind unless the settings name one),
/// and one entry per stop condition.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if the settings are neither an object
/// nor null.
pub fn config_map(
    config: &ToolConfiguration,
    stop_conditions: &[StopCondition],
    experiment_name: &str,
) -> Result<Map<String, Value>> {
    let mut map = match &config.settings {
        Value::Object(settings) => settings.clone(),
        Value::Null => Map::new(),
        other => {
            return Err(Error::Configuration(format!(
                "settings of tool configuration '{}' must be an object, found {other}",
                config.name
            )))
        }
    };

    map.insert(EXPERIMENT_NAME.to_string(), Value::from(experiment_name));
    map.entry(SIMULATOR_ID.to_string())
        .or_insert_with(|| Value::from(config.kind.as_str()));
    for condition in stop_conditions {
        match condition {
            StopCondition::SimulationTime { seconds } => {
                map.insert(SIMULATION_TIME.to_string(), Value::from(*seconds));
            }
            StopCondition::MeasurementCount { count } => {
                map.insert(MAX_MEASUREMENTS.to_string(), Value::from(*count));
            }
        }
    }
    Ok(map)
}
