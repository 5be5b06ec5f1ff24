//! Idempotent secret creation.
//!
//! Describe first, create only on a clean not-found answer:
//!
//! ```text
//! describe ──found──────► AlreadyExists
//!     │
//!     ├──not found──► create ──ok──► Created(arn)
//!     │                  └──err──► Err
//!     └──error──────► Err
//! ```
//!
//! One deadline, fixed by the caller when the run starts, bounds both calls
//! together (and credential resolution before them). Nothing is retried.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::core::payload::SecretPayload;
use crate::core::request::SecretRequest;
use crate::core::store::{Lookup, NewSecret, SecretStore, SecretSummary};
use crate::error::{Operation, Result, StoreError};

/// Successful result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The secret was created with this ARN.
    Created { arn: String },
    /// A secret with the requested name was already there; nothing was written.
    AlreadyExists(SecretSummary),
}

/// Create the requested secret unless it already exists.
///
/// `on_not_found` runs once, after describe reports the secret missing and
/// before create is sent. Both calls must finish before `deadline`.
///
/// # Errors
///
/// Returns `StoreError` if describe fails for any reason other than
/// not-found, if create fails, or if the deadline passes first. A failed
/// describe never leads to a create.
pub async fn provision<S>(
    store: &S,
    request: &SecretRequest,
    payload: &SecretPayload,
    deadline: Instant,
    on_not_found: impl FnOnce(),
) -> Result<Outcome>
where
    S: SecretStore + ?Sized,
{
    let timeout = request.timeout();

    debug!(
        store = store.name(),
        name = request.name(),
        region = request.region(),
        "checking for existing secret"
    );

    let lookup = within(
        deadline,
        timeout,
        Operation::Describe,
        store.describe(request.name()),
    )
    .await?;

    if let Lookup::Found(summary) = lookup {
        debug!(name = request.name(), arn = ?summary.arn, "secret already exists");
        return Ok(Outcome::AlreadyExists(summary));
    }

    debug!(
        name = request.name(),
        payload_len = payload.len(),
        "secret not found, creating"
    );
    on_not_found();

    let secret = NewSecret {
        name: request.name(),
        description: request.description(),
        payload,
    };
    let arn = within(deadline, timeout, Operation::Create, store.create(&secret)).await?;

    debug!(name = request.name(), %arn, "secret created");
    Ok(Outcome::Created { arn })
}

/// Run `call`, failing with a timeout if `deadline` passes first.
async fn within<T>(
    deadline: Instant,
    timeout: Duration,
    operation: Operation,
    call: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout_at(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout {
            operation,
            after: timeout,
        }
        .into()),
    }
}
