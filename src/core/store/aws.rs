//! AWS Secrets Manager store.
//!
//! Uses credentials from the default provider chain (environment, profile,
//! instance metadata). See [`crate::core::config::connect`].

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_secretsmanager::error::{DisplayErrorContext, SdkError};
use aws_sdk_secretsmanager::operation::describe_secret::{DescribeSecretError, DescribeSecretOutput};
use aws_sdk_secretsmanager::primitives::Blob;
use aws_sdk_secretsmanager::Client;
use tracing::trace;

use super::{Lookup, NewSecret, SecretStore, SecretSummary};
use crate::error::{Operation, Result, StoreError};

/// Secrets Manager client wrapper.
#[derive(Debug, Clone)]
pub struct SecretsManager {
    client: Client,
    timeout: Duration,
}

impl SecretsManager {
    /// Wrap an already configured client.
    ///
    /// `timeout` is only used to label SDK-level timeouts; the deadline
    /// itself is set on the client config.
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

/// Map an SDK failure to a store error, keeping the full error chain.
fn sdk_error<E, R>(operation: Operation, timeout: Duration, err: SdkError<E, R>) -> StoreError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match err {
        SdkError::TimeoutError(_) => StoreError::Timeout {
            operation,
            after: timeout,
        },
        other => StoreError::remote(operation, DisplayErrorContext(&other)),
    }
}

/// Turn a describe response into a lookup.
///
/// Only `ResourceNotFoundException` means the secret is missing; every other
/// failure is an error, so it can never lead to a create.
fn lookup_from<R>(
    name: &str,
    timeout: Duration,
    result: std::result::Result<DescribeSecretOutput, SdkError<DescribeSecretError, R>>,
) -> Result<Lookup>
where
    R: std::fmt::Debug,
{
    match result {
        Ok(output) => Ok(Lookup::Found(SecretSummary {
            name: output.name().unwrap_or(name).to_string(),
            arn: output.arn().map(str::to_string),
            description: output.description().map(str::to_string),
        })),
        Err(err)
            if err
                .as_service_error()
                .is_some_and(|e| e.is_resource_not_found_exception()) =>
        {
            Ok(Lookup::NotFound)
        }
        Err(err) => Err(sdk_error(Operation::Describe, timeout, err).into()),
    }
}

#[async_trait]
impl SecretStore for SecretsManager {
    fn name(&self) -> &'static str {
        "aws-secretsmanager"
    }

    async fn describe(&self, name: &str) -> Result<Lookup> {
        trace!(name, "describing secret");

        let result = self.client.describe_secret().secret_id(name).send().await;
        lookup_from(name, self.timeout, result)
    }

    async fn create(&self, secret: &NewSecret<'_>) -> Result<String> {
        trace!(
            name = secret.name,
            payload_len = secret.payload.len(),
            "creating secret"
        );

        let request = self
            .client
            .create_secret()
            .name(secret.name)
            .description(secret.description);

        // SecretString only carries text; anything else goes through as binary.
        let request = match secret.payload.as_str() {
            Some(text) => request.secret_string(text),
            None => request.secret_binary(Blob::new(secret.payload.as_bytes().to_vec())),
        };

        let output = request
            .send()
            .await
            .map_err(|err| sdk_error(Operation::Create, self.timeout, err))?;

        let arn = output.arn().ok_or(StoreError::MissingArn)?;
        trace!(arn, "created secret");
        Ok(arn.to_string())
    }
}
