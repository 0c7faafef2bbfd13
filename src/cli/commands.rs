//! CLI command definitions for doomlab.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::experiment::{
    catalog, render_summary, CancellationToken, RunError, Runner,
};
use crate::persist;
use crate::workflow::ComposeWorkflow;

/// Multi-agent DOOM research orchestrator.
#[derive(Parser)]
#[command(name = "doomlab")]
#[command(about = "Run factorial/OFAT experiments against the simulated DOOM environment")]
#[command(version)]
#[command(
    long_about = "doomlab drives design-of-experiments runs: each condition of a named \
experiment is executed over a deterministic seed set against the compose-managed VizDoom \
environment, and the outcome is recorded as a reproducible, time-stamped summary.\n\n\
Example usage:\n  doomlab run DOE-001 --episodes-per-condition 10"
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Run an experiment from the catalog.
    Run(RunArgs),

    /// List the experiments this binary knows how to run.
    List,

    /// Re-render the summary of the most recent recorded run.
    Status(StatusArgs),

    /// Create the volume directory tree the environment expects.
    Init,
}

/// Arguments for `doomlab run`.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Experiment identifier (see `doomlab list`).
    pub experiment_id: String,

    /// Episodes per condition. Overriding regenerates every condition's
    /// seed set to match, so seeds and episode counts never diverge.
    #[arg(long)]
    pub episodes_per_condition: Option<usize>,

    /// Compose file for the simulated environment.
    #[arg(long)]
    pub compose_file: Option<PathBuf>,

    /// Directory containing the glue scripts that drive episodes.
    #[arg(long)]
    pub glue_dir: Option<PathBuf>,

    /// Data directory where the result document is saved.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Leave the compose stack running after the experiment.
    #[arg(long)]
    pub keep_environment: bool,
}

/// Arguments for `doomlab status`.
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Experiment identifier.
    pub experiment_id: String,

    /// Data directory holding recorded results.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

/// Parse CLI arguments and return the Cli struct.
///
/// This allows main.rs to access CLI arguments (like log_level) before
/// running commands.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Run the CLI by parsing arguments and executing the command.
pub async fn run() -> anyhow::Result<()> {
    run_with_cli(parse_cli()).await
}

/// Run the CLI with the parsed arguments.
pub async fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Run(args) => run_run_command(args).await,
        Commands::List => run_list_command(),
        Commands::Status(args) => run_status_command(args),
        Commands::Init => run_init_command(),
    }
}

async fn run_run_command(args: RunArgs) -> anyhow::Result<()> {
    let app = AppConfig::default();
    let compose_file = args.compose_file.unwrap_or(app.compose_file);
    let glue_dir = args.glue_dir.unwrap_or(app.glue_script_dir);
    let data_dir = args.data_dir.unwrap_or(app.data_dir);

    let config = catalog::experiment_config(&args.experiment_id, args.episodes_per_condition)?
        .with_compose_file(&compose_file)
        .with_glue_script_dir(&glue_dir);

    if let Some(first) = config.conditions.first() {
        if let (Some(head), Some(tail)) = (first.seeds.first(), first.seeds.last()) {
            info!(
                n = first.seeds.len(),
                first = *head,
                last = *tail,
                "Seed set (seed_i = base + i * step)"
            );
        }
    }

    let workflow = ComposeWorkflow::new(&compose_file, &glue_dir);
    let teardown = workflow.clone();
    let runner = Runner::new(config, Box::new(workflow));

    // Ctrl-C requests cancellation; the run stops at the next condition
    // boundary with whatever results have accumulated.
    let token = CancellationToken::new();
    let signal_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received; cancelling after the current condition");
            signal_token.cancel();
        }
    });

    let outcome = runner.run(&token).await;

    if !args.keep_environment {
        if let Err(err) = teardown.shutdown().await {
            warn!(error = %err, "Failed to stop compose stack");
        }
    }

    match outcome {
        Ok(result) => {
            let path = persist::save_result(&data_dir, &result)
                .context("failed to save experiment result")?;
            info!(path = %path.display(), "Result saved");
            println!("{}", render_summary(&result));
            Ok(())
        }
        Err(RunError::Cancelled {
            experiment_id,
            partial,
            ..
        }) => {
            let path = persist::save_result(&data_dir, &partial)
                .context("failed to save partial experiment result")?;
            info!(path = %path.display(), "Partial result saved");
            println!("{}", render_summary(&partial));
            anyhow::bail!("experiment '{}' was cancelled", experiment_id)
        }
        Err(err) => Err(err.into()),
    }
}

fn run_list_command() -> anyhow::Result<()> {
    println!("Available experiments:");
    for experiment in catalog::known_experiments() {
        println!("  {:<10} {}", experiment.id, experiment.title);
    }
    Ok(())
}

fn run_status_command(args: StatusArgs) -> anyhow::Result<()> {
    let data_dir = args
        .data_dir
        .unwrap_or_else(|| AppConfig::default().data_dir);

    match persist::load_latest_result(&data_dir, &args.experiment_id)? {
        Some(result) => {
            println!("{}", render_summary(&result));
            Ok(())
        }
        None => {
            println!("No recorded runs for experiment {}", args.experiment_id);
            Ok(())
        }
    }
}

fn run_init_command() -> anyhow::Result<()> {
    let app = AppConfig::default();
    for dir in app.bootstrap_dirs() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        info!(dir = %dir.display(), "Created");
    }
    println!("Environment initialized.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_override() {
        let cli = Cli::try_parse_from([
            "doomlab",
            "run",
            "DOE-001",
            "--episodes-per-condition",
            "10",
        ])
        .expect("valid args");

        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.experiment_id, "DOE-001");
                assert_eq!(args.episodes_per_condition, Some(10));
                assert!(!args.keep_environment);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_parse_status() {
        let cli = Cli::try_parse_from(["doomlab", "status", "DOE-001"]).expect("valid args");
        match cli.command {
            Commands::Status(args) => assert_eq!(args.experiment_id, "DOE-001"),
            _ => panic!("expected status command"),
        }
    }

    #[test]
    fn test_parse_requires_subcommand() {
        assert!(Cli::try_parse_from(["doomlab"]).is_err());
    }

    #[test]
    fn test_global_log_level() {
        let cli =
            Cli::try_parse_from(["doomlab", "list", "--log-level", "debug"]).expect("valid args");
        assert_eq!(cli.log_level, "debug");
    }
}
