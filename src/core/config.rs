//! AWS configuration loading.
//!
//! Resolves region, credentials and timeouts into a ready [`SecretsManager`].
//! This is the only place that reads the ambient AWS environment; the
//! provisioner receives the finished store.

use std::time::Duration;

use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use tokio::time::Instant;
use tracing::debug;

use crate::core::store::SecretsManager;
use crate::error::{ConfigError, Result};

/// Load AWS config for `region` and build a Secrets Manager store.
///
/// Every SDK operation is capped at `timeout` and attempted once. Credentials
/// are resolved here, before `deadline`, so a missing or broken credential
/// source fails before any secret is touched. The same deadline goes on to
/// bound describe and create.
///
/// # Errors
///
/// Returns `ConfigError::Credentials` if no credentials can be resolved.
pub async fn connect(region: &str, timeout: Duration, deadline: Instant) -> Result<SecretsManager> {
    let timeouts = TimeoutConfig::builder().operation_timeout(timeout).build();

    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .timeout_config(timeouts)
        .retry_config(RetryConfig::disabled())
        .load()
        .await;

    let provider = config
        .credentials_provider()
        .ok_or_else(|| ConfigError::Credentials("no credentials provider configured".into()))?;
    resolve_credentials(&provider, deadline, timeout).await?;

    debug!(region, ?timeout, "loaded AWS config");
    let client = aws_sdk_secretsmanager::Client::new(&config);
    Ok(SecretsManager::new(client, timeout))
}

/// Resolve credentials once, giving up at `deadline`.
async fn resolve_credentials<P>(provider: &P, deadline: Instant, timeout: Duration) -> Result<()>
where
    P: ProvideCredentials + ?Sized,
{
    match tokio::time::timeout_at(deadline, provider.provide_credentials()).await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => Err(ConfigError::Credentials(DisplayErrorContext(&e).to_string()).into()),
        Err(_) => Err(ConfigError::Credentials(format!(
            "timed out after {}",
            humantime::format_duration(timeout)
        ))
        .into()),
    }
}

/// Build the single-threaded runtime that drives a run.
///
/// # Errors
///
/// Returns `ConfigError::Runtime` if the runtime cannot start.
pub fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| ConfigError::Runtime(e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::payload::SecretPayload;
    use crate::core::provision::provision;
    use crate::core::request::SecretRequest;
    use crate::core::store::MemoryStore;
    use crate::error::{Error, Operation, StoreError};
    use aws_credential_types::provider::future;
    use aws_credential_types::Credentials;
    use std::path::PathBuf;

    /// Credential source that takes `0` to answer.
    #[derive(Debug)]
    struct SlowProvider(Duration);

    impl ProvideCredentials for SlowProvider {
        fn provide_credentials<'a>(&'a self) -> future::ProvideCredentials<'a>
        where
            Self: 'a,
        {
            future::ProvideCredentials::new(async move {
                tokio::time::sleep(self.0).await;
                Ok(Credentials::new("AKIDEXAMPLE", "secret", None, None, "slow"))
            })
        }
    }

    fn request(timeout: Duration) -> SecretRequest {
        SecretRequest::new(
            Some("db-pass".into()),
            Some("us-east-1".into()),
            Some("db password".into()),
            Some(PathBuf::from("secret.json")),
            Some(timeout),
        )
        .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_credentials_time_out() {
        let timeout = Duration::from_secs(5);
        let deadline = Instant::now() + timeout;

        let err = resolve_credentials(&SlowProvider(Duration::from_secs(30)), deadline, timeout)
            .await
            .unwrap_err();
        match err {
            Error::Config(ConfigError::Credentials(msg)) => {
                assert_eq!(msg, "timed out after 5s");
            }
            other => panic!("expected credentials timeout, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_credentials_and_describe_share_deadline() {
        // Credentials and describe each fit the timeout alone, but not together.
        let timeout = Duration::from_secs(10);
        let deadline = Instant::now() + timeout;

        resolve_credentials(&SlowProvider(Duration::from_secs(6)), deadline, timeout)
            .await
            .unwrap();

        let store = MemoryStore::default().delay_on(Operation::Describe, Duration::from_secs(6));
        let payload = SecretPayload::from("s3cr3t");
        let err = provision(&store, &request(timeout), &payload, deadline, || {})
            .await
            .unwrap_err();
        match err {
            Error::Store(StoreError::Timeout { operation, after }) => {
                assert_eq!(operation, Operation::Describe);
                assert_eq!(after, timeout);
            }
            other => panic!("expected describe timeout, got {:?}", other),
        }
        assert_eq!(store.create_count(), 0);
    }
}
