//! Adapter that records what would be simulated

use super::{config_map, ToolAdapter};
use crate::experiment::{StopCondition, ToolConfiguration};
use crate::workspace::WorkspaceHandle;
use crate::{Error, Result};
use serde_json::{json, Value};
use std::path::PathBuf;

/// Writes the simulation configuration of each repetition to
/// `simulation-<n>.json` in the workspace instead of simulating.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunAdapter {
    _private: (),
}

impl DryRunAdapter {
    /// Registry kind tag.
    pub const KIND: &'static str = "dry_run";

    /// Create the adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    fn next_artifact(workspace: &WorkspaceHandle) -> PathBuf {
        (1u32..)
            .map(|n| workspace.root().join(format!("simulation-{n}.json")))
            .find(|path| !path.exists())
            .unwrap_or_else(|| workspace.root().join("simulation.json"))
    }
}

impl ToolAdapter for DryRunAdapter {
    fn run_experiment(
        &mut self,
        label: &str,
        workspace: &WorkspaceHandle,
        config: &ToolConfiguration,
        stop_conditions: &[StopCondition],
    ) -> Result<()> {
        let map = config_map(config, stop_conditions, label)?;
        let artifact = json!({
            "label": label,
            "tool": config.name,
            "model": workspace.files(),
            "config": Value::Object(map),
        });
        let path = Self::next_artifact(workspace);
        std::fs::write(&path, serde_json::to_string_pretty(&artifact)?)
            .map_err(|e| Error::Tool(format!("Failed to write {}: {e}", path.display())))?;
        tracing::debug!(label, artifact = %path.display(), "Dry run recorded");
        Ok(())
    }
}
