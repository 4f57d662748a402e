//! Experiment runner: drives enumeration and the per-combination pipeline
//!
//! For every experiment and every tool configuration (in declared order) the
//! runner walks the combinations depth first. Each combination goes through:
//!
//! 1. copy the base model into `<run folder>/<fragment>/`
//! 2. load the copy into a fresh [`ResolutionContext`]
//! 3. bind and apply every factor value, collecting descriptions
//! 4. persist the mutated resources
//! 5. run the tool `repetitions` times
//!
//! Any failure aborts the whole batch. The [`RunLog`] keeps what was done up
//! to that point.
//!
//! # Example
//!
//! ```rust,no_run
//! use expauto::config::ExperimentSuite;
//! use expauto::runner::{ExperimentRunner, RunnerConfig};
//!
//! let suite = ExperimentSuite::load("experiments.json")?;
//! let mut runner = ExperimentRunner::new(RunnerConfig::new("out"));
//! let log = runner.run(&suite.experiments, 3)?;
//! println!("{} combinations simulated", log.combination_count());
//! # Ok::<(), expauto::Error>(())
//! ```

mod context;

pub use context::ExperimentRunContext;

use crate::enumerator::{Combination, Factor, VariationEnumerator};
use crate::experiment::{Experiment, ToolConfiguration};
use crate::model::ResolutionContext;
use crate::record::{CombinationRecord, RunLog, RunRecord, RunStatus};
use crate::tool::ToolRegistry;
use crate::variation::StrategyRegistry;
use crate::workspace::{FsWorkspace, ModelWorkspace, WorkspaceHandle};
use crate::{Error, Result};
use std::path::PathBuf;

/// File name of the run record written into each run folder.
pub const RUN_RECORD_FILE: &str = "run.json";

/// Settings of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Folder receiving one subfolder per experiment × tool run
    pub output_dir: PathBuf,
    /// Arguments of the invoking process, recorded as metadata
    pub arguments: Vec<String>,
}

impl RunnerConfig {
    /// Config writing below `output_dir` with no recorded arguments.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            arguments: Vec::new(),
        }
    }

    /// Record `arguments` as the invoking process's arguments.
    #[must_use]
    pub fn with_arguments(mut self, arguments: Vec<String>) -> Self {
        self.arguments = arguments;
        self
    }
}

/// Orchestrates experiment batches.
#[derive(Debug)]
pub struct ExperimentRunner<W = FsWorkspace> {
    config: RunnerConfig,
    workspace: W,
    strategies: StrategyRegistry,
    tools: ToolRegistry,
    log: RunLog,
}

impl ExperimentRunner<FsWorkspace> {
    /// Runner with the filesystem workspace and built-in strategies and tools.
    #[must_use]
    pub fn new(config: RunnerConfig) -> Self {
        Self::with_workspace(config, FsWorkspace::new())
    }
}

impl<W: ModelWorkspace> ExperimentRunner<W> {
    /// Runner using `workspace` for model copies.
    #[must_use]
    pub fn with_workspace(config: RunnerConfig, workspace: W) -> Self {
        Self {
            config,
            workspace,
            strategies: StrategyRegistry::with_builtins(),
            tools: ToolRegistry::with_builtins(),
            log: RunLog::new(),
        }
    }

    /// Replace the tool registry.
    #[must_use]
    pub fn tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    /// Replace the strategy registry.
    #[must_use]
    pub fn strategies(mut self, strategies: StrategyRegistry) -> Self {
        self.strategies = strategies;
        self
    }

    /// Batch settings.
    #[must_use]
    pub const fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Audit trail of everything run so far, including failed runs.
    #[must_use]
    pub const fn log(&self) -> &RunLog {
        &self.log
    }

    /// Take the audit trail, leaving an empty one.
    pub fn take_log(&mut self) -> RunLog {
        std::mem::take(&mut self.log)
    }

    /// Check experiments against this runner before any model work.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for zero repetitions, an invalid
    /// experiment, a variation kind without strategy, or a tool
    /// configuration no registered adapter accepts.
    pub fn validate(&self, experiments: &[Experiment], repetitions: u32) -> Result<()> {
        if repetitions == 0 {
            return Err(Error::Configuration(
                "repetitions must be at least 1".to_string(),
            ));
        }
        for experiment in experiments {
            experiment.validate()?;
            for variation in &experiment.variations {
                self.strategies.get(variation.kind)?;
            }
            for tool in &experiment.tool_configurations {
                self.tools.create(tool)?;
            }
        }
        Ok(())
    }

    /// Run every experiment with every attached tool, in order.
    ///
    /// # Errors
    ///
    /// Configuration problems are reported before anything runs. After
    /// that, the first failure of any combination aborts the batch and is
    /// returned wrapped in [`Error::Combination`].
    pub fn run(&mut self, experiments: &[Experiment], repetitions: u32) -> Result<&RunLog> {
        self.validate(experiments, repetitions)?;
        tracing::info!(
            experiments = experiments.len(),
            repetitions,
            "Starting experiment batch"
        );

        for experiment in experiments {
            for tool in &experiment.tool_configurations {
                self.run_experiment(experiment, tool, repetitions)?;
            }
        }
        Ok(&self.log)
    }

    fn run_experiment(
        &mut self,
        experiment: &Experiment,
        tool: &ToolConfiguration,
        repetitions: u32,
    ) -> Result<()> {
        let ctx =
            ExperimentRunContext::new(experiment, tool, repetitions, &self.config.output_dir);
        let _span =
            tracing::info_span!("run", experiment = %experiment.id, tool = %tool.name).entered();
        tracing::info!(name = ctx.name(), folder = %ctx.folder().display(), "Starting run");

        let mut record = RunRecord::builder(ctx.run_id(), &experiment.id)
            .name(ctx.name())
            .tool(&tool.name)
            .folder(ctx.folder())
            .repetitions(repetitions)
            .arguments(self.config.arguments.clone())
            .build();
        record.start();
        self.log.push(record);

        if let Err(e) = std::fs::create_dir_all(ctx.folder()) {
            if let Some(run) = self.log.current_mut() {
                run.complete(RunStatus::Failed);
            }
            return Err(Error::Workspace(format!(
                "Failed to create run folder {}: {e}",
                ctx.folder().display()
            )));
        }

        let result = Factor::from_variations(&experiment.variations).and_then(|factors| {
            let enumerator = VariationEnumerator::new(&factors);
            enumerator.for_each_combination(|combination| {
                self.run_combination(&ctx, combination).map_err(|e| {
                    e.in_combination(ctx.name(), &tool.name, combination.fragment())
                })
            })
        });

        let status = if result.is_ok() {
            RunStatus::Success
        } else {
            RunStatus::Failed
        };
        if let Some(run) = self.log.current_mut() {
            run.complete(status);
            if let Err(e) = run.write_json(ctx.folder().join(RUN_RECORD_FILE)) {
                tracing::warn!(error = %e, "Failed to write run record");
            }
        }

        match result {
            Ok(count) => {
                tracing::info!(combinations = count, "Run finished");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, cause = %e.root_cause(), "Run aborted");
                Err(e)
            }
        }
    }

    fn run_combination(
        &mut self,
        ctx: &ExperimentRunContext<'_>,
        combination: &Combination<'_>,
    ) -> Result<()> {
        let fragment = combination.fragment();
        let _span = tracing::info_span!(
            "combination",
            experiment = %ctx.experiment().id,
            tool = %ctx.tool().name,
            %fragment
        )
        .entered();

        let (workspace, descriptions) = self.prepare(ctx, combination, &fragment)?;
        tracing::info!(folder = %workspace.root().display(), "Combination prepared");

        let record = CombinationRecord::new(
            &fragment,
            workspace.root(),
            combination.levels(),
            descriptions,
        );
        if let Some(run) = self.log.current_mut() {
            run.push_combination(record);
        }

        self.simulate(ctx, &workspace)
    }

    /// Copy, load, mutate and persist the model of one combination.
    fn prepare(
        &self,
        ctx: &ExperimentRunContext<'_>,
        combination: &Combination<'_>,
        fragment: &str,
    ) -> Result<(WorkspaceHandle, Vec<String>)> {
        let folder = ctx.combination_folder(fragment);
        let workspace = self
            .workspace
            .copy_to_folder(&ctx.experiment().initial_model, &folder)?;

        let mut model = ResolutionContext::new();
        workspace.load_into(&mut model)?;

        // every target must resolve before the first value is applied
        let mut bound = Vec::with_capacity(combination.len());
        for entry in combination.entries() {
            let strategy = self.strategies.get(entry.variation.kind)?;
            let handle = strategy.bind(&entry.variation.varied_object_id, &model)?;
            bound.push((strategy, handle, entry.value));
        }

        let mut descriptions = Vec::with_capacity(bound.len());
        for (strategy, handle, value) in bound {
            let description = strategy.apply(&handle, &mut model, value)?;
            tracing::debug!(%description, "Applied variation");
            descriptions.push(description);
        }

        self.workspace.persist(&workspace, &mut model)?;
        Ok((workspace, descriptions))
    }

    /// Run all repetitions of a prepared combination.
    fn simulate(
        &mut self,
        ctx: &ExperimentRunContext<'_>,
        workspace: &WorkspaceHandle,
    ) -> Result<()> {
        let label = ctx.label();
        for repetition in 1..=ctx.repetitions() {
            tracing::debug!(repetition, "Simulating");
            let run_once = || -> Result<()> {
                let mut adapter = self.tools.create(ctx.tool())?;
                adapter.run_experiment(
                    &label,
                    workspace,
                    ctx.tool(),
                    &ctx.experiment().stop_conditions,
                )
            };
            run_once().map_err(|e| Error::Simulation {
                label: label.clone(),
                repetition,
                source: Box::new(e),
            })?;

            if let Some(combination) = self
                .log
                .current_mut()
                .and_then(RunRecord::last_combination_mut)
            {
                combination.record_repetition();
            }
        }

        if let Some(combination) = self
            .log
            .current_mut()
            .and_then(RunRecord::last_combination_mut)
        {
            combination.finish();
        }
        Ok(())
    }
}
