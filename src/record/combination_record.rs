//! Combination Record - what one combination did

use crate::enumerator::FactorLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Combination Record captures one visited combination.
///
/// Holds the factor levels, the description produced by each applied
/// variation, and how many repetitions completed against the persisted
/// model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CombinationRecord {
    fragment: String,
    folder: PathBuf,
    levels: Vec<FactorLevel>,
    descriptions: Vec<String>,
    repetitions_completed: u32,
    prepared_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl CombinationRecord {
    /// Create a record for a prepared (mutated and persisted) combination.
    ///
    /// # Arguments
    ///
    /// * `fragment` - Folder fragment (`"a=1, b=2"`)
    /// * `folder` - Workspace folder of the combination
    /// * `levels` - Factor levels in factor order
    /// * `descriptions` - One audit line per applied variation
    #[must_use]
    pub fn new(
        fragment: impl Into<String>,
        folder: impl Into<PathBuf>,
        levels: Vec<FactorLevel>,
        descriptions: Vec<String>,
    ) -> Self {
        Self {
            fragment: fragment.into(),
            folder: folder.into(),
            levels,
            descriptions,
            repetitions_completed: 0,
            prepared_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Get the folder fragment.
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Get the workspace folder.
    #[must_use]
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Get the factor levels.
    #[must_use]
    pub fn levels(&self) -> &[FactorLevel] {
        &self.levels
    }

    /// Get the variation descriptions.
    #[must_use]
    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    /// Get the number of successful repetitions.
    #[must_use]
    pub const fn repetitions_completed(&self) -> u32 {
        self.repetitions_completed
    }

    /// Get the preparation timestamp.
    #[must_use]
    pub const fn prepared_at(&self) -> DateTime<Utc> {
        self.prepared_at
    }

    /// Get the timestamp of the last repetition, once all completed.
    #[must_use]
    pub const fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Count one successful repetition.
    pub fn record_repetition(&mut self) {
        self.repetitions_completed += 1;
    }

    /// Mark every repetition as done.
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }
}
