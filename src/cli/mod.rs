//! Command-line interface.

pub mod output;

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use tokio::time::Instant;
use tracing::debug;

use crate::core::config;
use crate::core::payload::SecretPayload;
use crate::core::provision::{provision, Outcome};
use crate::core::request::SecretRequest;
use crate::error::Result;

/// Long flags that may also be written Go-style, with a single dash.
const LONG_FLAGS: &[&str] = &[
    "name",
    "region",
    "description",
    "json-file",
    "timeout",
    "verbose",
    "help",
    "version",
];

/// Long flags that take a value.
const VALUE_FLAGS: &[&str] = &["name", "region", "description", "json-file", "timeout"];

/// secret-seed - Create an AWS Secrets Manager secret from a file, once.
#[derive(Parser, Debug)]
#[command(
    name = "secret-seed",
    about = "Create an AWS Secrets Manager secret from a file, unless it already exists",
    version,
    after_help = "Flags also accept a single dash, e.g. -name db-pass -json-file=secret.json"
)]
pub struct Cli {
    /// AWS secret name
    #[arg(long, value_name = "NAME", allow_hyphen_values = true)]
    pub name: Option<String>,

    /// AWS region
    #[arg(long, value_name = "REGION", allow_hyphen_values = true)]
    pub region: Option<String>,

    /// Description for the secret
    #[arg(long, value_name = "TEXT", allow_hyphen_values = true)]
    pub description: Option<String>,

    /// Path to the file containing the secret value (sent as-is)
    #[arg(long, value_name = "PATH", allow_hyphen_values = true)]
    pub json_file: Option<PathBuf>,

    /// Deadline for the remote calls (e.g. 10s, 1m30s)
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration, default_value = "10s")]
    pub timeout: Duration,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Rewrite Go-style single-dash long flags (`-name`, `-name=x`) to `--name`.
///
/// The argument after a value-taking flag is its value and passes through
/// untouched, even if it starts with a dash (`-description "-prod db"`).
/// So do arguments after `--`, short flags, and anything that is not a
/// known long flag.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;
    let mut value_next = false;

    for arg in args {
        let arg: OsString = arg.into();
        if passthrough || std::mem::take(&mut value_next) {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
        } else if let Some(text) = arg.to_str() {
            if let Some((flag, inline_value)) = long_flag(text) {
                value_next = !inline_value && VALUE_FLAGS.contains(&flag);
                if !text.starts_with("--") {
                    out.push(OsString::from(format!("-{}", text)));
                    continue;
                }
            }
        }
        out.push(arg);
    }

    out
}

/// Split a known long flag, written with one or two dashes, into its name
/// and whether it carries an inline `=value`.
fn long_flag(arg: &str) -> Option<(&str, bool)> {
    let rest = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-'))?;
    let (flag, inline_value) = match rest.split_once('=') {
        Some((flag, _)) => (flag, true),
        None => (rest, false),
    };
    LONG_FLAGS.contains(&flag).then_some((flag, inline_value))
}

/// Rendered help text, printed after validation errors.
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

/// Run one provisioning pass and print the result.
///
/// # Errors
///
/// Returns the first validation, payload, configuration or store error.
pub fn execute(cli: Cli) -> Result<()> {
    let request = SecretRequest::new(
        cli.name,
        cli.region,
        cli.description,
        cli.json_file,
        Some(cli.timeout),
    )?;
    let payload = SecretPayload::read(request.payload_path())?;

    let rt = config::runtime()?;
    let outcome = rt.block_on(async {
        // Credentials, describe and create all share this one deadline.
        let deadline = Instant::now() + request.timeout();
        let store = open_store(&request, deadline).await?;
        provision(&store, &request, &payload, deadline, || {
            output::dimmed(&format!(
                "secret {} does not exist, creating",
                request.name()
            ))
        })
        .await
    });

    report(&request, outcome)
}

fn report(request: &SecretRequest, outcome: Result<Outcome>) -> Result<()> {
    match outcome? {
        Outcome::Created { arn } => {
            output::success(&format!("created secret {}", output::key(request.name())));
            output::kv("arn", arn);
        }
        Outcome::AlreadyExists(summary) => {
            output::success(&format!(
                "secret {} already exists: {}",
                output::key(request.name()),
                request.description()
            ));
            if let Some(arn) = summary.arn {
                output::kv("arn", arn);
            }
        }
    }

    Ok(())
}

#[cfg(not(feature = "test-store"))]
async fn open_store(
    request: &SecretRequest,
    deadline: Instant,
) -> Result<crate::core::store::SecretsManager> {
    debug!(region = request.region(), "connecting to AWS Secrets Manager");
    config::connect(request.region(), request.timeout(), deadline).await
}

/// Test builds talk to a JSON file instead of AWS.
#[cfg(feature = "test-store")]
async fn open_store(
    request: &SecretRequest,
    _deadline: Instant,
) -> Result<crate::core::store::FileStore> {
    use crate::core::constants::{TEST_DELAY_ENV, TEST_FAIL_ENV, TEST_STORE_ENV};
    use crate::core::store::{parse_scripted, FileStore};
    use crate::error::{ConfigError, StoreError};

    let path = std::env::var_os(TEST_STORE_ENV)
        .map(PathBuf::from)
        .ok_or_else(|| ConfigError::Credentials(format!("{} is not set", TEST_STORE_ENV)))?;
    debug!(path = %path.display(), "using file store");

    let mut store = FileStore::open(&path, request.region())?;
    if let Ok(spec) = std::env::var(TEST_FAIL_ENV) {
        let (operation, message) = parse_scripted(&spec)?;
        store = store.fail_on(operation, message);
    }
    if let Ok(spec) = std::env::var(TEST_DELAY_ENV) {
        let (operation, delay) = parse_scripted(&spec)?;
        let delay =
            humantime::parse_duration(delay).map_err(|e| StoreError::remote(operation, e))?;
        store = store.delay_on(operation, delay);
    }
    Ok(store)
}
