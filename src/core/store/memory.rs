//! In-memory secrets store for tests.
//!
//! Records every call it receives and can be scripted to fail or stall on a
//! given operation. Behaves like Secrets Manager where it matters: creating an
//! existing name fails with `ResourceExistsException`.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{Lookup, NewSecret, SecretStore, SecretSummary};
use crate::error::{Operation, Result, StoreError};

/// A secret held by the fake store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSecret {
    pub arn: String,
    pub description: String,
    pub payload: Vec<u8>,
}

/// One call received by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Call {
    Describe {
        name: String,
    },
    Create {
        name: String,
        description: String,
        payload: Vec<u8>,
    },
}

/// Contents of the store, serializable so `FileStore` can persist it.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub(crate) struct State {
    #[serde(default)]
    pub secrets: BTreeMap<String, StoredSecret>,
    #[serde(default)]
    pub calls: Vec<Call>,
}

/// In-memory store.
#[derive(Debug)]
pub struct MemoryStore {
    region: String,
    state: Mutex<State>,
    failures: BTreeMap<Operation, String>,
    delays: BTreeMap<Operation, Duration>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new("us-east-1")
    }
}

impl MemoryStore {
    /// Create an empty store that mints ARNs for `region`.
    pub fn new(region: &str) -> Self {
        Self::from_state(region, State::default())
    }

    pub(crate) fn from_state(region: &str, state: State) -> Self {
        Self {
            region: region.to_string(),
            state: Mutex::new(state),
            failures: BTreeMap::new(),
            delays: BTreeMap::new(),
        }
    }

    /// Seed a secret, as if created by an earlier run.
    pub fn with_secret(self, name: &str, description: &str, payload: &[u8]) -> Self {
        {
            let mut state = self.lock();
            let arn = self.mint_arn(name, state.secrets.len());
            state.secrets.insert(
                name.to_string(),
                StoredSecret {
                    arn,
                    description: description.to_string(),
                    payload: payload.to_vec(),
                },
            );
        }
        self
    }

    /// Make every call to `operation` fail with `message`.
    pub fn fail_on(mut self, operation: Operation, message: &str) -> Self {
        self.failures.insert(operation, message.to_string());
        self
    }

    /// Make every call to `operation` sleep for `delay` before answering.
    pub fn delay_on(mut self, operation: Operation, delay: Duration) -> Self {
        self.delays.insert(operation, delay);
        self
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn describe_count(&self) -> usize {
        self.count(|c| matches!(c, Call::Describe { .. }))
    }

    pub fn create_count(&self) -> usize {
        self.count(|c| matches!(c, Call::Create { .. }))
    }

    /// A stored secret by name.
    pub fn get(&self, name: &str) -> Option<StoredSecret> {
        self.lock().secrets.get(name).cloned()
    }

    #[cfg_attr(not(feature = "test-store"), allow(dead_code))]
    pub(crate) fn snapshot(&self) -> State {
        self.lock().clone()
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.lock().calls.iter().filter(|c| pred(c)).count()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panic while holding the lock only happens in a failing test.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn mint_arn(&self, name: &str, seq: usize) -> String {
        format!(
            "arn:aws:secretsmanager:{}:000000000000:secret:{}-{:06x}",
            self.region, name, seq
        )
    }

    async fn script(&self, operation: Operation) -> Result<()> {
        if let Some(delay) = self.delays.get(&operation) {
            tokio::time::sleep(*delay).await;
        }
        match self.failures.get(&operation) {
            Some(message) => Err(StoreError::remote(operation, message).into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SecretStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn describe(&self, name: &str) -> Result<Lookup> {
        self.lock().calls.push(Call::Describe {
            name: name.to_string(),
        });
        self.script(Operation::Describe).await?;

        let lookup = match self.get(name) {
            Some(secret) => Lookup::Found(SecretSummary {
                name: name.to_string(),
                arn: Some(secret.arn),
                description: Some(secret.description),
            }),
            None => Lookup::NotFound,
        };
        trace!(name, found = matches!(lookup, Lookup::Found(_)), "memory describe");
        Ok(lookup)
    }

    async fn create(&self, secret: &NewSecret<'_>) -> Result<String> {
        self.lock().calls.push(Call::Create {
            name: secret.name.to_string(),
            description: secret.description.to_string(),
            payload: secret.payload.as_bytes().to_vec(),
        });
        self.script(Operation::Create).await?;

        let mut state = self.lock();
        if state.secrets.contains_key(secret.name) {
            return Err(StoreError::remote(
                Operation::Create,
                format!(
                    "ResourceExistsException: the secret {} already exists",
                    secret.name
                ),
            )
            .into());
        }

        let arn = self.mint_arn(secret.name, state.secrets.len());
        state.secrets.insert(
            secret.name.to_string(),
            StoredSecret {
                arn: arn.clone(),
                description: secret.description.to_string(),
                payload: secret.payload.as_bytes().to_vec(),
            },
        );
        Ok(arn)
    }
}
