//! Run Log - in-memory collection of run records

use super::{CombinationRecord, RunRecord, RunStatus};

/// Ordered collection of the runs of one batch.
///
/// ## Design
///
/// Runs are kept in execution order; the last one is the run in progress.
/// After a fatal error the log still holds everything done up to the
/// failure, with the failing run marked [`RunStatus::Failed`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunLog {
    runs: Vec<RunRecord>,
}

impl RunLog {
    /// Create a new empty run log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Get the number of runs.
    #[must_use]
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Get all runs in execution order.
    #[must_use]
    pub fn runs(&self) -> &[RunRecord] {
        &self.runs
    }

    /// Append a run; it becomes the current run.
    pub fn push(&mut self, run: RunRecord) {
        self.runs.push(run);
    }

    /// Get the run in progress (the last one pushed).
    pub fn current_mut(&mut self) -> Option<&mut RunRecord> {
        self.runs.last_mut()
    }

    /// Get a run by ID.
    #[must_use]
    pub fn get_run(&self, run_id: &str) -> Option<&RunRecord> {
        self.runs.iter().find(|run| run.run_id() == run_id)
    }

    /// Get all runs of an experiment.
    #[must_use]
    pub fn runs_for_experiment(&self, experiment_id: &str) -> Vec<&RunRecord> {
        self.runs
            .iter()
            .filter(|run| run.experiment_id() == experiment_id)
            .collect()
    }

    /// Get every combination of every run, in visiting order.
    pub fn combinations(&self) -> impl Iterator<Item = &CombinationRecord> {
        self.runs.iter().flat_map(RunRecord::combinations)
    }

    /// Total number of visited combinations.
    #[must_use]
    pub fn combination_count(&self) -> usize {
        self.runs.iter().map(|run| run.combinations().len()).sum()
    }

    /// Total number of completed repetitions.
    #[must_use]
    pub fn repetition_count(&self) -> u64 {
        self.combinations()
            .map(|c| u64::from(c.repetitions_completed()))
            .sum()
    }

    /// Whether every run finished successfully.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.runs.iter().all(|run| run.status() == RunStatus::Success)
    }
}
