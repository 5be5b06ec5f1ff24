//! Secrets store abstraction.
//!
//! The provisioner only talks to a [`SecretStore`]. The AWS implementation
//! lives in `aws`; test builds add an in-memory store and, with the
//! `test-store` feature, a file-backed one the CLI can use across runs.
//!
//! ## Adding a New Store
//!
//! 1. Implement the `SecretStore` trait
//! 2. Report a missing secret as `Lookup::NotFound`, not as an error
//! 3. Re-export from this module

use async_trait::async_trait;

use crate::core::payload::SecretPayload;
use crate::error::Result;

mod aws;

#[cfg(any(test, feature = "test-store"))]
mod memory;

#[cfg(feature = "test-store")]
mod file;

pub use aws::SecretsManager;

#[cfg(any(test, feature = "test-store"))]
pub use memory::{Call, MemoryStore, StoredSecret};

#[cfg(feature = "test-store")]
pub use file::{parse_scripted, FileStore};

/// What the store knows about an existing secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretSummary {
    pub name: String,
    pub arn: Option<String>,
    pub description: Option<String>,
}

/// Result of an existence check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(SecretSummary),
    NotFound,
}

/// A secret to be created.
#[derive(Debug)]
pub struct NewSecret<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub payload: &'a SecretPayload,
}

/// Remote secrets store.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Store name for logs.
    fn name(&self) -> &'static str;

    /// Look up a secret by name.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` for anything other than a clean found/not-found
    /// answer: permissions, throttling, network, timeouts.
    async fn describe(&self, name: &str) -> Result<Lookup>;

    /// Create a secret and return its ARN.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store rejects or fails the call.
    async fn create(&self, secret: &NewSecret<'_>) -> Result<String>;
}
