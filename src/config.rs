//! Experiment suite configuration
//!
//! A suite is a JSON document with an `experiments` array. Relative model
//! paths are resolved against the directory holding the document, and every
//! experiment is validated on load.

use crate::experiment::Experiment;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Experiments declared in one configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentSuite {
    /// Experiments in run order
    #[serde(default)]
    pub experiments: Vec<Experiment>,
}

impl ExperimentSuite {
    /// Load and validate a suite from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the file cannot be read, is not a
    /// valid suite document, or declares an invalid experiment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("Failed to read {}: {e}", path.display()))
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_json_str(&contents, base_dir).map_err(|e| match e {
            Error::Configuration(msg) => {
                Error::Configuration(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Parse and validate a suite, resolving model paths against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] on malformed JSON, unknown tags, or a
    /// failed experiment validation.
    pub fn from_json_str(json: &str, base_dir: &Path) -> Result<Self> {
        let mut suite: Self = serde_json::from_str(json)
            .map_err(|e| Error::Configuration(format!("invalid experiment document: {e}")))?;

        for experiment in &mut suite.experiments {
            experiment.initial_model = experiment.initial_model.resolved_against(base_dir);
        }
        suite.validate()?;

        tracing::debug!(
            experiments = suite.experiments.len(),
            "Loaded experiment suite"
        );
        Ok(suite)
    }

    /// Validate every experiment and reject duplicate experiment ids.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::Configuration`] found.
    pub fn validate(&self) -> Result<()> {
        let mut ids = std::collections::HashSet::new();
        for experiment in &self.experiments {
            experiment.validate()?;
            if !ids.insert(experiment.id.as_str()) {
                return Err(Error::Configuration(format!(
                    "experiment id '{}' is declared twice",
                    experiment.id
                )));
            }
        }
        Ok(())
    }

    /// Number of experiments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    /// True if the suite declares no experiment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }
}
