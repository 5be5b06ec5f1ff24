//! Core library components.
//!
//! Request validation, payload loading, the store abstraction and the
//! describe-then-create logic. Nothing here prints or reads flags.

pub mod config;
pub mod constants;
pub mod payload;
pub mod provision;
pub mod request;
pub mod store;
