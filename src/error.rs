//! Error types for secret-seed.
//!
//! Every variant is terminal: the CLI prints it and exits with status 1.
//! A missing secret is not an error; the store reports it as
//! [`Lookup::NotFound`](crate::core::store::Lookup::NotFound).

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to read secret payload from {}: {source}", .path.display())]
    Payload {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Invalid or missing command-line input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "please provide all required input parameters: name, region, description, json-file (missing: {})",
        .0.join(", ")
    )]
    MissingInputs(Vec<&'static str>),

    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}

/// AWS configuration or credential resolution failure.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to start async runtime: {0}")]
    Runtime(String),

    #[error("failed to resolve AWS credentials: {0}")]
    Credentials(String),
}

/// Remote store operation, used to label store errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Operation {
    Describe,
    Create,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Describe => f.write_str("describe"),
            Self::Create => f.write_str("create"),
        }
    }
}

/// Failure reported by (or while waiting on) the secrets store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{operation} secret failed: {message}")]
    Remote {
        operation: Operation,
        message: String,
    },

    #[error("{operation} secret timed out after {}", format_timeout(.after))]
    Timeout {
        operation: Operation,
        after: Duration,
    },

    #[error("create secret returned no ARN")]
    MissingArn,
}

impl StoreError {
    /// Build a `Remote` error from anything displayable.
    pub fn remote(operation: Operation, message: impl fmt::Display) -> Self {
        Self::Remote {
            operation,
            message: message.to_string(),
        }
    }

    /// The operation that failed, if known.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Remote { operation, .. } | Self::Timeout { operation, .. } => Some(*operation),
            Self::MissingArn => Some(Operation::Create),
        }
    }
}

fn format_timeout(after: &Duration) -> humantime::FormattedDuration {
    humantime::format_duration(*after)
}

pub type Result<T> = std::result::Result<T, Error>;
