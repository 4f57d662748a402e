//! Adapter running an external simulator process

use super::{config_map, ToolAdapter};
use crate::experiment::{StopCondition, ToolConfiguration};
use crate::workspace::WorkspaceHandle;
use crate::{Error, Result};
use serde_json::Value;
use std::io::Write;
use std::process::Command;

/// File the simulation configuration is written to before each run.
pub const CONFIG_FILE: &str = "simulation.json";
/// File collecting the simulator's output across repetitions.
pub const LOG_FILE: &str = "simulation.log";

/// Runs `settings.program` with `settings.args` in the workspace folder.
///
/// The simulation configuration is written to [`CONFIG_FILE`] and its path
/// passed as the last argument; the run label is exported as
/// `EXPAUTO_RUN_LABEL`. A non-zero exit status fails the repetition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandAdapter {
    program: String,
    args: Vec<String>,
}

impl CommandAdapter {
    /// Registry kind tag.
    pub const KIND: &'static str = "command";

    /// Adapter running `program` with `args`.
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Read `program` and optional `args` from the tool settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `program` is missing or `args`
    /// is not a list of strings.
    pub fn from_config(config: &ToolConfiguration) -> Result<Self> {
        let program = config
            .settings
            .get("program")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::Configuration(format!(
                    "tool configuration '{}' needs a string 'program' setting",
                    config.name
                ))
            })?;

        let args = match config.settings.get("args") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        Error::Configuration(format!(
                            "tool configuration '{}' has a non-string entry in 'args'",
                            config.name
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            Some(_) => {
                return Err(Error::Configuration(format!(
                    "'args' of tool configuration '{}' must be a list",
                    config.name
                )))
            }
        };

        Ok(Self::new(program, args))
    }
}

impl ToolAdapter for CommandAdapter {
    fn run_experiment(
        &mut self,
        label: &str,
        workspace: &WorkspaceHandle,
        config: &ToolConfiguration,
        stop_conditions: &[StopCondition],
    ) -> Result<()> {
        let map = config_map(config, stop_conditions, label)?;
        let config_path = workspace.root().join(CONFIG_FILE);
        std::fs::write(&config_path, serde_json::to_string_pretty(&map)?)?;

        tracing::debug!(label, program = %self.program, "Starting simulator");
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(&config_path)
            .current_dir(workspace.root())
            .env("EXPAUTO_RUN_LABEL", label)
            .output()
            .map_err(|e| Error::Tool(format!("Failed to start '{}': {e}", self.program)))?;

        let mut log = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(workspace.root().join(LOG_FILE))?;
        writeln!(log, "=== {label} ===")?;
        log.write_all(&output.stdout)?;
        log.write_all(&output.stderr)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Tool(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}
