//! File-backed fake store for CLI integration tests.
//!
//! Wraps [`MemoryStore`] and writes its state (secrets and call journal) to a
//! JSON file after every call, so separate process runs share one store.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;

use super::memory::State;
use super::{Lookup, MemoryStore, NewSecret, SecretStore};
use crate::error::{Error, Operation, Result, StoreError};

/// JSON-file store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl FileStore {
    /// Load the store at `path`, starting empty if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file exists but cannot be read or parsed.
    pub fn open(path: &Path, region: &str) -> Result<Self> {
        let state = match std::fs::read(path) {
            Ok(bytes) => serde_json::from_slice::<State>(&bytes).map_err(|e| {
                StoreError::remote(Operation::Describe, format!("corrupt test store: {}", e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => State::default(),
            Err(e) => {
                return Err(StoreError::remote(
                    Operation::Describe,
                    format!("unreadable test store: {}", e),
                )
                .into())
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            inner: MemoryStore::from_state(region, state),
        })
    }

    pub fn fail_on(mut self, operation: Operation, message: &str) -> Self {
        self.inner = self.inner.fail_on(operation, message);
        self
    }

    pub fn delay_on(mut self, operation: Operation, delay: Duration) -> Self {
        self.inner = self.inner.delay_on(operation, delay);
        self
    }

    fn save(&self, operation: Operation) -> Result<()> {
        let json = serde_json::to_vec_pretty(&self.inner.snapshot())
            .map_err(|e| StoreError::remote(operation, e))?;
        std::fs::write(&self.path, json).map_err(|e| StoreError::remote(operation, e).into())
    }

    /// Persist, then hand back the call result. A save failure wins.
    fn persist<T>(&self, operation: Operation, result: Result<T>) -> Result<T> {
        self.save(operation)?;
        result
    }
}

#[async_trait]
impl SecretStore for FileStore {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn describe(&self, name: &str) -> Result<Lookup> {
        let result = self.inner.describe(name).await;
        self.persist(Operation::Describe, result)
    }

    async fn create(&self, secret: &NewSecret<'_>) -> Result<String> {
        let result = self.inner.create(secret).await;
        self.persist(Operation::Create, result)
    }
}

/// Parse `<operation>:<value>` as used by the test-store environment variables.
pub fn parse_scripted(spec: &str) -> Result<(Operation, &str)> {
    let (op, value) = spec.split_once(':').unwrap_or((spec, ""));
    let operation = match op {
        "describe" => Operation::Describe,
        "create" => Operation::Create,
        other => {
            return Err(Error::Store(StoreError::remote(
                Operation::Describe,
                format!("unknown scripted operation: {}", other),
            )))
        }
    };
    Ok((operation, value))
}
