//! secret-seed - Idempotently create an AWS Secrets Manager secret from a file.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── mod           # Flags, Go-style flag normalization, run loop
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── request       # Input validation (SecretRequest)
//!     ├── payload       # Raw secret bytes from a file
//!     ├── config        # AWS config, credentials, runtime
//!     ├── store/        # Secrets store backends
//!     │   ├── mod       # SecretStore trait
//!     │   ├── aws       # AWS Secrets Manager
//!     │   ├── memory    # In-memory fake (tests)
//!     │   └── file      # JSON-file fake (test-store feature)
//!     └── provision     # Describe-then-create
//! ```
//!
//! Running twice with the same inputs is safe: the second run sees the
//! secret and reports it instead of creating it again.

pub mod cli;
pub mod core;
pub mod error;
