//! Test fixtures and constants.

/// Secret name used by the standard scenario.
pub const NAME: &str = "db-pass";

/// Region used by the standard scenario.
pub const REGION: &str = "us-east-1";

/// Description used by the standard scenario.
pub const DESCRIPTION: &str = "db password";

/// Payload file name inside the test directory.
pub const PAYLOAD_FILE: &str = "secret.json";

/// Payload used by the standard scenario.
pub const PAYLOAD: &[u8] = b"s3cr3t";

/// A JSON payload with whitespace that must survive untouched.
pub const JSON_PAYLOAD: &[u8] = b"{\n  \"username\": \"admin\",\n  \"password\": \"p@ss w0rd\"\n}\n";
