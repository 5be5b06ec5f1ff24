//! Input validation for a provisioning run.
//!
//! A [`SecretRequest`] can only be built from complete inputs, so holding one
//! means validation already passed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::core::constants::{DEFAULT_TIMEOUT, REQUIRED_FLAGS};
use crate::error::{Result, ValidationError};

/// Everything needed to provision one secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretRequest {
    name: String,
    region: String,
    description: String,
    payload_path: PathBuf,
    timeout: Duration,
}

impl SecretRequest {
    /// Validate raw inputs and build a request.
    ///
    /// # Arguments
    ///
    /// * `name` - Secret name
    /// * `region` - AWS region of the store
    /// * `description` - Human-readable description
    /// * `payload_path` - File whose contents become the secret value
    /// * `timeout` - Deadline for the remote calls, defaults to 10 seconds
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingInputs` naming every absent or empty
    /// input, or `ValidationError::ZeroTimeout` for a zero deadline.
    pub fn new(
        name: Option<String>,
        region: Option<String>,
        description: Option<String>,
        payload_path: Option<PathBuf>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let payload_path = payload_path.filter(|p| !p.as_os_str().is_empty());
        let present = [
            is_present(&name),
            is_present(&region),
            is_present(&description),
            payload_path.is_some(),
        ];

        let missing: Vec<&'static str> = REQUIRED_FLAGS
            .iter()
            .zip(present)
            .filter(|(_, ok)| !ok)
            .map(|(flag, _)| *flag)
            .collect();

        if !missing.is_empty() {
            debug!(?missing, "rejecting incomplete request");
            return Err(ValidationError::MissingInputs(missing).into());
        }

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(ValidationError::ZeroTimeout.into());
        }

        // All four were checked above.
        Ok(Self {
            name: name.unwrap_or_default(),
            region: region.unwrap_or_default(),
            description: description.unwrap_or_default(),
            payload_path: payload_path.unwrap_or_default(),
            timeout,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn payload_path(&self) -> &Path {
        &self.payload_path
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}
