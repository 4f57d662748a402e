//! Tool configurations and stop conditions

use serde::{Deserialize, Serialize};

fn empty_settings() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Which simulation tool runs the prepared models, and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfiguration {
    /// Display name, unique within the experiment
    pub name: String,
    /// Adapter kind tag, looked up in the tool registry
    pub kind: String,
    /// Tool-specific settings object
    #[serde(default = "empty_settings")]
    pub settings: serde_json::Value,
}

impl ToolConfiguration {
    /// Configuration with empty settings.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            settings: empty_settings(),
        }
    }

    /// Replace the settings object.
    #[must_use]
    pub fn with_settings(mut self, settings: serde_json::Value) -> Self {
        self.settings = settings;
        self
    }
}

/// Criterion ending one simulation repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StopCondition {
    /// Stop after this much simulated time
    SimulationTime {
        /// Simulated seconds
        seconds: u64,
    },
    /// Stop after this many measurements were taken
    MeasurementCount {
        /// Number of measurements
        count: u64,
    },
}
