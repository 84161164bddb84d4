//! Transaction dry-run engine
//!
//! This crate asks the chain whether a signed transaction would succeed
//! without committing state, and translates simulation logs into an
//! actionable error message.

pub mod engine;

pub use engine::TransactionSimulator;
