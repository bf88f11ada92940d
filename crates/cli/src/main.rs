//! Vigil - API contract verification harness, command surface.
//!
//! Loads a scenario suite, resolves the effective configuration
//! (flags > environment variables > suite environment profile), runs
//! every scenario and emits the human summary plus the machine-readable
//! JSON report. Exit code 0 means every scenario passed.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vigil_application::error::RunError;
use vigil_application::ports::ExecutorError;
use vigil_application::use_cases::SuiteRunner;
use vigil_domain::{ConfigError, DomainError, Headers, Suite, SuiteConfig};
use vigil_infrastructure::persistence::{SuiteFileError, load_suite};
use vigil_infrastructure::report::{ReportError, render_json, render_summary, write_json};
use vigil_infrastructure::ReqwestExecutor;

/// Declarative HTTP API contract verification.
#[derive(Debug, Parser)]
#[command(name = "vigil", version, about)]
struct Cli {
    /// Path to the scenario suite file (.json, .yaml or .yml).
    suite: PathBuf,

    /// Environment profile label declared in the suite file.
    #[arg(long, env = "VIGIL_ENV")]
    environment: Option<String>,

    /// Base URL override; wins over the environment profile.
    #[arg(long, env = "VIGIL_BASE_URL")]
    base_url: Option<String>,

    /// Extra default header as "Name: value"; repeatable, wins over the
    /// environment profile on name conflicts.
    #[arg(long = "header", env = "VIGIL_HEADERS", value_delimiter = ';')]
    headers: Vec<String>,

    /// Per-request timeout in milliseconds.
    #[arg(long, env = "VIGIL_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    /// Extra whole-scenario attempts for scenarios that do not pass.
    #[arg(long, env = "VIGIL_RETRIES")]
    retries: Option<u32>,

    /// Maximum number of scenarios in flight at once (unbounded when
    /// omitted).
    #[arg(long, env = "VIGIL_WORKERS")]
    workers: Option<usize>,

    /// Write the JSON report to this path instead of stdout.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Suppress the JSON report on stdout (summary only).
    #[arg(long)]
    quiet: bool,
}

/// Process-fatal errors; scenario failures are not errors here.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    SuiteFile(#[from] SuiteFileError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Suite(#[from] DomainError),

    #[error(transparent)]
    Run(#[from] RunError),

    #[error(transparent)]
    Executor(#[from] ExecutorError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(
        "no base URL: pass --base-url, set VIGIL_BASE_URL, or select an environment profile with --environment"
    )]
    MissingBaseUrl,

    #[error("invalid header '{0}' (expected \"Name: value\")")]
    InvalidHeader(String),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match execute(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

#[tokio::main]
async fn execute(cli: Cli) -> Result<bool, CliError> {
    let suite = load_suite(&cli.suite)?;
    let config = resolve_config(&cli, &suite)?;

    let runner = SuiteRunner::new(Arc::new(ReqwestExecutor::new()?));
    let cancel = runner.cancellation();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("cancellation requested, aborting in-flight scenarios");
            cancel.cancel();
        }
    });

    let report = runner.run(&suite, &config).await?;

    print!("{}", render_summary(&report));
    if let Some(path) = &cli.report {
        write_json(&report, path)?;
        info!(path = %path.display(), "report written");
    } else if !cli.quiet {
        println!("{}", render_json(&report)?);
    }

    Ok(report.all_passed())
}

/// Resolves the effective configuration.
///
/// Precedence: command-line flags (and their environment variables,
/// which clap folds into the same options) over the selected suite
/// environment profile over built-in defaults.
fn resolve_config(cli: &Cli, suite: &Suite) -> Result<SuiteConfig, CliError> {
    let mut base_url = cli.base_url.clone();
    let mut headers = Headers::new();
    let mut environment = None;

    if let Some(label) = &cli.environment {
        let profile = suite.environment(label)?;
        if base_url.is_none() {
            base_url = Some(profile.base_url.clone());
        }
        headers = profile.headers.clone();
        environment = Some(label.clone());
    }

    for raw in &cli.headers {
        let (name, value) = parse_header(raw)?;
        headers.set(name, value);
    }

    let base_url = base_url.ok_or(CliError::MissingBaseUrl)?;
    let mut config = SuiteConfig::new(&base_url)?
        .with_default_headers(headers)
        .with_environment(environment);

    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms)?;
    }
    if let Some(workers) = cli.workers {
        config = config.with_workers(workers)?;
    }
    if let Some(retries) = cli.retries {
        config = config.with_retries(retries);
    }

    Ok(config)
}

/// Splits a "Name: value" header argument.
fn parse_header(raw: &str) -> Result<(&str, &str), CliError> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| CliError::InvalidHeader(raw.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::InvalidHeader(raw.to_string()));
    }
    Ok((name, value.trim()))
}
