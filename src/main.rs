use anyhow::{Context, Result};
use clap::{value_parser, Arg, Command};
use expauto::config::ExperimentSuite;
use expauto::enumerator::{Factor, VariationEnumerator};
use expauto::record::RunLog;
use expauto::runner::{ExperimentRunner, RunnerConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("expauto")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Full-factorial simulation experiment automation")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("run")
                .about("Run every experiment of a configuration file")
                .arg(
                    Arg::new("config")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Experiment configuration (JSON)"),
                )
                .arg(
                    Arg::new("repetitions")
                        .long("repetitions")
                        .short('r')
                        .default_value("1")
                        .value_parser(value_parser!(u32))
                        .help("Simulation repetitions per combination"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .default_value("experiments")
                        .value_parser(value_parser!(PathBuf))
                        .help("Folder receiving one subfolder per run"),
                ),
        )
        .subcommand(
            Command::new("plan")
                .about("List the combinations each experiment would run")
                .arg(
                    Arg::new("config")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Experiment configuration (JSON)"),
                ),
        )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = dispatch() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn dispatch() -> Result<()> {
    let matches = cli().get_matches();
    match matches.subcommand() {
        Some(("run", args)) => {
            let config = args
                .get_one::<PathBuf>("config")
                .context("missing configuration path")?;
            let repetitions = *args
                .get_one::<u32>("repetitions")
                .context("missing repetitions")?;
            let output = args
                .get_one::<PathBuf>("output")
                .context("missing output folder")?;
            run(config, repetitions, output.clone())
        }
        Some(("plan", args)) => {
            let config = args
                .get_one::<PathBuf>("config")
                .context("missing configuration path")?;
            plan(config)
        }
        _ => unreachable!("clap enforces a subcommand"),
    }
}

fn load(config: &Path) -> Result<ExperimentSuite> {
    ExperimentSuite::load(config)
        .with_context(|| format!("Failed to load experiments from {}", config.display()))
}

fn run(config: &Path, repetitions: u32, output: PathBuf) -> Result<()> {
    let suite = load(config)?;
    let runner_config = RunnerConfig::new(output).with_arguments(std::env::args().collect());
    let mut runner = ExperimentRunner::new(runner_config);

    let outcome = runner.run(&suite.experiments, repetitions).map(|_| ());
    print_summary(runner.log());
    outcome.context("Experiment batch aborted")
}

fn print_summary(log: &RunLog) {
    for run in log.runs() {
        let repetitions: u64 = run
            .combinations()
            .iter()
            .map(|c| u64::from(c.repetitions_completed()))
            .sum();
        println!(
            "{:?}  {}  combinations={} repetitions={}  {}",
            run.status(),
            run.name(),
            run.combinations().len(),
            repetitions,
            run.folder().display()
        );
    }
}

fn plan(config: &Path) -> Result<()> {
    let suite = load(config)?;
    for experiment in &suite.experiments {
        let factors = Factor::from_variations(&experiment.variations)?;
        let enumerator = VariationEnumerator::new(&factors);
        println!(
            "({}) {}: {} combinations x {} tools",
            experiment.id,
            experiment.name,
            enumerator.count(),
            experiment.tool_configurations.len()
        );
        enumerator.for_each_combination(|combination| {
            let fragment = combination.fragment();
            if fragment.is_empty() {
                println!("  <base model>");
            } else {
                println!("  {fragment}");
            }
            Ok::<(), anyhow::Error>(())
        })?;
    }
    Ok(())
}
