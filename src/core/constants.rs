//! Constants used throughout secret-seed.

use std::time::Duration;

/// Deadline for the remote calls when `-timeout` is not given.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "SECRET_SEED_LOG";

/// Flag names of the required string inputs, in the order they are reported.
pub const REQUIRED_FLAGS: [&str; 4] = ["name", "region", "description", "json-file"];

/// Path of the JSON file backing the fake store (`test-store` builds).
#[cfg(feature = "test-store")]
pub const TEST_STORE_ENV: &str = "SECRET_SEED_TEST_STORE";

/// Scripted failure for the fake store, formatted `<operation>:<message>`.
#[cfg(feature = "test-store")]
pub const TEST_FAIL_ENV: &str = "SECRET_SEED_TEST_FAIL";

/// Scripted delay for the fake store, formatted `<operation>:<duration>`.
#[cfg(feature = "test-store")]
pub const TEST_DELAY_ENV: &str = "SECRET_SEED_TEST_DELAY";
