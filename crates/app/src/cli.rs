//! Command line parsing and command handlers.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use colored::Colorize;
use tracing::{error, info};
use url::Url;

use sequent_application::ports::{OperatorPrompt, Reporter, TransportError};
use sequent_application::{ApplicationError, DEFAULT_BASE_PATH, RunSession, RunSessionInput};
use sequent_domain::RunOutcome;
use sequent_infrastructure::{
    AssumeYes, ConsoleReporter, ReadinessPolicy, RemoteHost, ReqwestTransport, StdinPrompt,
    SuiteFile, SuiteFileError, SystemClock,
};

/// Exit code for a configuration or setup error.
const CONFIG_EXIT: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "sequent", author, version, about, long_about = None)]
/// Runs ordered HTTP integration tests against a live server.
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a suite file against a server.
    Run(RunArgs),
    /// Print the registered tests of a suite file without sending anything.
    List(ListArgs),
}

/// Arguments of `sequent run`.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Suite file (YAML or JSON).
    pub suite: PathBuf,

    /// Base URL of the server under test.
    #[arg(long, env = "SEQUENT_BASE_URL")]
    pub base_url: Url,

    /// Path segment between the base URL and each test URL.
    /// Defaults to the suite's `basePath`, then to `api`.
    #[arg(long, env = "SEQUENT_BASE_PATH")]
    pub base_path: Option<String>,

    /// Continue at every breakpoint without asking.
    #[arg(short, long)]
    pub yes: bool,

    /// Readiness probes before giving up on the server.
    #[arg(long, default_value_t = 20)]
    pub wait_attempts: u32,

    /// Pause between readiness probes, in milliseconds.
    #[arg(long, default_value_t = 250)]
    pub wait_interval_ms: u64,
}

/// Arguments of `sequent list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Suite file (YAML or JSON).
    pub suite: PathBuf,
}

/// Errors that stop the binary before a run outcome exists.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The suite file could not be loaded.
    #[error(transparent)]
    Suite(#[from] SuiteFileError),

    /// The HTTP client could not be built.
    #[error("http client: {0}")]
    Transport(#[from] TransportError),

    /// The runner rejected its input.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Console output failed.
    #[error("output: {0}")]
    Io(#[from] std::io::Error),
}

/// Process exit code for a run outcome.
#[must_use]
pub const fn outcome_code(outcome: &RunOutcome) -> u8 {
    match outcome {
        RunOutcome::Completed(_) | RunOutcome::Aborted { .. } => 0,
        RunOutcome::Failed { .. } => 1,
    }
}

/// Dispatches a parsed command line.
pub async fn execute(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Run(args) => {
            let prompt: Box<dyn OperatorPrompt> = if args.yes {
                Box::new(AssumeYes)
            } else {
                Box::new(StdinPrompt::stdin())
            };
            run_suite(&args, Arc::new(ConsoleReporter::stdout()), prompt.as_ref())
                .await
                .map(|outcome| outcome_code(&outcome))
        }
        Command::List(args) => list_suite(&args, &mut std::io::stdout()).await.map(|()| 0),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!(error = %e, "configuration error");
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::from(CONFIG_EXIT)
        }
    }
}

/// Loads a suite file and runs it against `args.base_url`.
///
/// # Errors
/// Returns a [`CliError`] if the suite cannot be loaded or the HTTP client
/// cannot be built. Test failures are part of the returned outcome.
pub async fn run_suite(
    args: &RunArgs,
    reporter: Arc<dyn Reporter>,
    prompt: &dyn OperatorPrompt,
) -> Result<RunOutcome, CliError> {
    let suite = SuiteFile::load(&args.suite).await?;
    let base_path = args
        .base_path
        .clone()
        .or(suite.base_path)
        .unwrap_or_else(|| DEFAULT_BASE_PATH.to_string());

    info!(
        suite = %args.suite.display(),
        base_url = %args.base_url,
        base_path = %base_path,
        tests = suite.descriptors.len(),
        "starting run"
    );

    let host = RemoteHost::new(args.base_url.as_str()).with_policy(ReadinessPolicy {
        attempts: args.wait_attempts.max(1),
        interval: Duration::from_millis(args.wait_interval_ms),
    });

    let session = RunSession::new(
        Arc::new(host),
        Arc::new(ReqwestTransport::new()?),
        Arc::new(SystemClock::new()),
    )
    .with_reporter(reporter)
    .with_base_path(base_path);

    let input = RunSessionInput {
        descriptors: suite.descriptors,
        context: suite.context,
    };

    Ok(session.execute(input, prompt).await?)
}

/// Writes one line per registered test.
///
/// # Errors
/// Returns a [`CliError`] if the suite cannot be loaded or written out.
pub async fn list_suite(args: &ListArgs, out: &mut impl Write) -> Result<(), CliError> {
    let suite = SuiteFile::load(&args.suite).await?;

    for (index, descriptor) in suite.descriptors.iter().enumerate() {
        let mut line = format!(
            "[{index}] {} {} {}",
            descriptor.method, descriptor.url, descriptor.title
        );
        if descriptor.skip {
            line.push_str(" (skip)");
        }
        if descriptor.breakpoint {
            line.push_str(" (break)");
        }
        writeln!(out, "{line}")?;
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "sequent",
            "run",
            "suite.yml",
            "--base-url",
            "http://localhost:3000",
            "--yes",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.suite, PathBuf::from("suite.yml"));
                assert_eq!(args.base_url.as_str(), "http://localhost:3000/");
                assert!(args.yes);
                assert_eq!(args.wait_attempts, 20);
            }
            Command::List(_) => unreachable!("parsed as list"),
        }
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = Cli::try_parse_from(["sequent", "run", "s.yml", "--base-url", "not a url"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_list() {
        let cli = Cli::try_parse_from(["sequent", "list", "suite.json"]).unwrap();
        assert!(matches!(cli.command, Command::List(ListArgs { suite }) if suite == PathBuf::from("suite.json")));
    }

    #[test]
    fn test_outcome_codes() {
        use sequent_domain::{RunError, RunSummary};

        assert_eq!(outcome_code(&RunOutcome::Completed(RunSummary::default())), 0);
        assert_eq!(
            outcome_code(&RunOutcome::Aborted {
                summary: RunSummary::default(),
                after: 0
            }),
            0
        );
        assert_eq!(
            outcome_code(&RunOutcome::Failed {
                summary: RunSummary::default(),
                error: RunError::HostUnavailable("down".to_string()),
            }),
            1
        );
    }
}
