//! Run Record - one experiment × tool run

use super::CombinationRecord;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Run is created but not yet started.
    Pending,
    /// Run is currently executing.
    Running,
    /// Every combination was simulated.
    Success,
    /// A combination failed and the batch was aborted.
    Failed,
}

/// Run Record represents the execution of one experiment with one tool.
///
/// Tracks the run lifecycle, the process arguments that started it, and
/// one [`CombinationRecord`] per visited combination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunRecord {
    run_id: String,
    experiment_id: String,
    name: String,
    tool: String,
    folder: PathBuf,
    repetitions: u32,
    status: RunStatus,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    arguments: Vec<String>,
    combinations: Vec<CombinationRecord>,
}

impl RunRecord {
    /// Create a new run record in Pending status.
    ///
    /// # Arguments
    ///
    /// * `run_id` - Unique identifier for the run (its folder name)
    /// * `experiment_id` - ID of the experiment
    #[must_use]
    pub fn new(run_id: impl Into<String>, experiment_id: impl Into<String>) -> Self {
        RunRecordBuilder::new(run_id, experiment_id).build()
    }

    /// Create a builder for constructing a run record with optional fields.
    #[must_use]
    pub fn builder(
        run_id: impl Into<String>,
        experiment_id: impl Into<String>,
    ) -> RunRecordBuilder {
        RunRecordBuilder::new(run_id, experiment_id)
    }

    /// Get the run ID.
    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Get the experiment ID.
    #[must_use]
    pub fn experiment_id(&self) -> &str {
        &self.experiment_id
    }

    /// Get the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the tool configuration name.
    #[must_use]
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Get the run folder.
    #[must_use]
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Get the repetition count used for every combination.
    #[must_use]
    pub const fn repetitions(&self) -> u32 {
        self.repetitions
    }

    /// Get the current run status.
    #[must_use]
    pub const fn status(&self) -> RunStatus {
        self.status
    }

    /// Get the start timestamp, if the run has started.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Get the end timestamp, if the run has completed.
    #[must_use]
    pub const fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Get the arguments of the process that started the run.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Get the combinations visited so far, in visiting order.
    #[must_use]
    pub fn combinations(&self) -> &[CombinationRecord] {
        &self.combinations
    }

    /// Get the most recent combination for updating.
    pub fn last_combination_mut(&mut self) -> Option<&mut CombinationRecord> {
        self.combinations.last_mut()
    }

    /// Append a visited combination.
    pub fn push_combination(&mut self, combination: CombinationRecord) {
        self.combinations.push(combination);
    }

    /// Start the run, transitioning from Pending to Running.
    ///
    /// Sets the `started_at` timestamp to now.
    pub fn start(&mut self) {
        self.status = RunStatus::Running;
        self.started_at = Some(Utc::now());
    }

    /// Complete the run with the given final status.
    ///
    /// Sets the `ended_at` timestamp to now.
    pub fn complete(&mut self, status: RunStatus) {
        self.status = status;
        self.ended_at = Some(Utc::now());
    }

    /// Write this record as pretty JSON to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Builder for `RunRecord`.
#[derive(Debug)]
pub struct RunRecordBuilder {
    run_id: String,
    experiment_id: String,
    name: Option<String>,
    tool: String,
    folder: PathBuf,
    repetitions: u32,
    arguments: Vec<String>,
}

impl RunRecordBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(run_id: impl Into<String>, experiment_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            experiment_id: experiment_id.into(),
            name: None,
            tool: String::new(),
            folder: PathBuf::new(),
            repetitions: 1,
            arguments: Vec::new(),
        }
    }

    /// Set the display name (defaults to the run ID).
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the tool configuration name.
    #[must_use]
    pub fn tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    /// Set the run folder.
    #[must_use]
    pub fn folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.folder = folder.into();
        self
    }

    /// Set the repetition count.
    #[must_use]
    pub const fn repetitions(mut self, repetitions: u32) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Set the process arguments.
    #[must_use]
    pub fn arguments(mut self, arguments: Vec<String>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Build the `RunRecord`.
    #[must_use]
    pub fn build(self) -> RunRecord {
        RunRecord {
            name: self.name.unwrap_or_else(|| self.run_id.clone()),
            run_id: self.run_id,
            experiment_id: self.experiment_id,
            tool: self.tool,
            folder: self.folder,
            repetitions: self.repetitions,
            status: RunStatus::Pending,
            started_at: None,
            ended_at: None,
            arguments: self.arguments,
            combinations: Vec::new(),
        }
    }
}
