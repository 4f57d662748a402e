//! # expauto: Full-Factorial Simulation Experiment Automation
//!
//! **Version**: 0.1.0
//!
//! expauto sweeps a simulation model across every combination of its
//! experiment factors. Each combination gets an isolated copy of the base
//! model, mutated in place and handed to one or more simulation tools for a
//! fixed number of repetitions.
//!
//! ## Design Principles
//!
//! - **Isolation**: every combination runs in its own folder on a freshly
//!   loaded model copy; the base model is never written
//! - **Fail-fast**: the first failure aborts the batch with the failing
//!   combination named in the error
//! - **Determinism**: combinations are visited depth first, first factor
//!   outermost, so folder names and order are reproducible
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use expauto::config::ExperimentSuite;
//! use expauto::runner::{ExperimentRunner, RunnerConfig};
//!
//! let suite = ExperimentSuite::load("experiments.json")?;
//! let mut runner = ExperimentRunner::new(RunnerConfig::new("out"));
//! for run in runner.run(&suite.experiments, 2)?.runs() {
//!     println!("{}: {} combinations", run.name(), run.combinations().len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod config;
pub mod enumerator;
pub mod error;
pub mod experiment;
pub mod model;
pub mod provider;
pub mod record;
pub mod runner;
pub mod tool;
pub mod variation;
pub mod workspace;

pub use error::{Error, Result};
