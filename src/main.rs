//! secret-seed - Create an AWS Secrets Manager secret from a file, once.

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use secret_seed::cli::{execute, normalize_args, output, usage, Cli};
use secret_seed::core::constants::LOG_ENV;
use secret_seed::error::{ConfigError, Error};

fn main() {
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(1);
            }
        },
    };

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("secret_seed=debug")
        } else {
            EnvFilter::new("secret_seed=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli) {
        output::error(&e.to_string());
        match &e {
            Error::Validation(_) => print!("{}", usage()),
            Error::Config(ConfigError::Credentials(_)) => {
                output::hint("configure AWS credentials, e.g. AWS_PROFILE or AWS_ACCESS_KEY_ID")
            }
            _ => {}
        }
        std::process::exit(1);
    }
}
