//! Per experiment × tool run context

use crate::experiment::{Experiment, ToolConfiguration};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide sequence number appended to run folder names.
static RUN_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Derived state of one experiment run with one tool.
#[derive(Debug, Clone)]
pub struct ExperimentRunContext<'a> {
    experiment: &'a Experiment,
    tool: &'a ToolConfiguration,
    name: String,
    folder: PathBuf,
    repetitions: u32,
    started_at: DateTime<Utc>,
}

impl<'a> ExperimentRunContext<'a> {
    /// Context for running `experiment` with `tool` below `output_dir`.
    ///
    /// The display name is `"(<id>, <tool>) <name>"`; the folder appends the
    /// start time in milliseconds and a process-wide sequence number so no
    /// two runs share a folder.
    #[must_use]
    pub fn new(
        experiment: &'a Experiment,
        tool: &'a ToolConfiguration,
        repetitions: u32,
        output_dir: &Path,
    ) -> Self {
        let started_at = Utc::now();
        let name = format!("({}, {}) {}", experiment.id, tool.name, experiment.name);
        let sequence = RUN_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let folder = output_dir.join(format!(
            "{name} ({}.{sequence})",
            started_at.timestamp_millis()
        ));
        Self {
            experiment,
            tool,
            name,
            folder,
            repetitions,
            started_at,
        }
    }

    /// Experiment being run.
    #[must_use]
    pub const fn experiment(&self) -> &'a Experiment {
        self.experiment
    }

    /// Tool configuration being run.
    #[must_use]
    pub const fn tool(&self) -> &'a ToolConfiguration {
        self.tool
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run folder holding one subfolder per combination.
    #[must_use]
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Unique run identifier (the run folder name).
    #[must_use]
    pub fn run_id(&self) -> String {
        self.folder
            .file_name()
            .map_or_else(|| self.name.clone(), |n| n.to_string_lossy().into_owned())
    }

    /// Repetitions per combination.
    #[must_use]
    pub const fn repetitions(&self) -> u32 {
        self.repetitions
    }

    /// Start timestamp.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Label handed to the tool adapter: display name and tool name.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.name, self.tool.name)
    }

    /// Folder of the combination with `fragment`.
    #[must_use]
    pub fn combination_folder(&self, fragment: &str) -> PathBuf {
        self.folder.join(fragment)
    }
}
