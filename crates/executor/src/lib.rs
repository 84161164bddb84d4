//! SPL transfer execution pipeline
//!
//! Validates a transfer against live chain state, dry-runs the signed
//! transaction, and only then broadcasts it. A transfer that fails any
//! stage is never submitted.

pub mod transfer;
pub mod validation;

pub use transfer::{ExecuteOptions, SplTransferExecutor};
pub use validation::TransferValidator;
