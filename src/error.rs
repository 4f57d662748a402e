//! Error types for expauto
//!
//! Every failure past configuration validation is fatal for the whole batch,
//! so variants carry enough context to reproduce the failing combination.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// expauto error types
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed experiment, variation or tool configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A variation target does not resolve in the loaded model copy
    #[error("Target resolution failed for '{target}': {reason}")]
    TargetResolution {
        /// Identifier of the varied model element
        target: String,
        /// Why the identifier could not be bound
        reason: String,
    },

    /// A strategy could not apply a value to its bound element
    #[error("Cannot apply value {value} to '{target}': {reason}")]
    Application {
        /// Identifier of the varied model element
        target: String,
        /// Value that was rejected
        value: i64,
        /// Why the value was rejected
        reason: String,
    },

    /// A model file could not be read or parsed into a resolution context
    #[error("Model load error: {0}")]
    Load(String),

    /// Writing a mutated model copy back to storage failed
    #[error("Persist error: {0}\nOn-disk state of this combination is unreliable")]
    Persist(String),

    /// Copying the base model into a combination folder failed
    #[error("Workspace error: {0}")]
    Workspace(String),

    /// Failure reported by a simulation tool itself
    #[error("Tool failure: {0}")]
    Tool(String),

    /// The tool adapter failed for a repetition
    #[error("Simulation '{label}' failed at repetition {repetition}")]
    Simulation {
        /// Run label handed to the adapter
        label: String,
        /// 1-based repetition number
        repetition: u32,
        /// Originating cause
        #[source]
        source: Box<Error>,
    },

    /// Failure inside the pipeline of one combination
    #[error("Experiment '{experiment}' with tool '{tool}' failed at combination [{combination}]")]
    Combination {
        /// Display name of the experiment run
        experiment: String,
        /// Tool configuration name
        tool: String,
        /// Folder fragment of the failing combination
        combination: String,
        /// Underlying cause
        #[source]
        source: Box<Error>,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Strip combination context and return the originating error.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Combination { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Wrap this error with the identity of the combination that produced it.
    #[must_use]
    pub fn in_combination(
        self,
        experiment: impl Into<String>,
        tool: impl Into<String>,
        combination: impl Into<String>,
    ) -> Self {
        Self::Combination {
            experiment: experiment.into(),
            tool: tool.into(),
            combination: combination.into(),
            source: Box::new(self),
        }
    }
}
