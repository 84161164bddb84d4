//! Error types for the transfer pipeline

use solana_sdk::signature::Signature;
use thiserror::Error;

/// Main error type for the transfer pipeline
#[derive(Error, Debug)]
pub enum ExecutorError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transfer validation errors
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// RPC, account decoding, or signing failures; nothing was broadcast
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    /// The transaction was broadcast but confirmation did not arrive.
    /// The transfer may still land on chain.
    #[error("Transaction submitted but not confirmed: {message}")]
    Submission {
        signature: Option<Signature>,
        message: String,
    },
}

/// Result type alias for transfer pipeline operations
pub type Result<T> = std::result::Result<T, ExecutorError>;

/// Transfer validation specific errors
///
/// Display strings are the caller-facing messages; the fields carry the
/// values the check was made against for diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Sender token account does not exist
    #[error("Sender token account not found")]
    SenderAccountNotFound,

    /// Recipient token account does not exist
    #[error("Recipient token account not found")]
    RecipientAccountNotFound,

    /// Sender balance is lower than the requested amount
    #[error("Insufficient balance")]
    InsufficientBalance { balance: u64, requested: u64 },

    /// Sender and recipient accounts hold different tokens
    #[error("Token mints do not match")]
    MintMismatch {
        sender_mint: String,
        recipient_mint: String,
    },
}

/// Chain access specific errors
#[derive(Error, Debug)]
pub enum ChainError {
    /// RPC request failed
    #[error("RPC request failed: {0}")]
    Rpc(String),

    /// Account exists but could not be decoded as the expected SPL state
    #[error("Malformed account data for {address}: {message}")]
    MalformedAccount { address: String, message: String },

    /// Transaction signing failed
    #[error("Signing failed: {0}")]
    Signing(String),

    /// The transaction was broadcast but never confirmed
    #[error("Transaction {signature} was submitted but not confirmed: {message}")]
    Unconfirmed {
        signature: Signature,
        message: String,
    },
}

/// Configuration specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Parse error
    #[error("Configuration parse error: {0}")]
    ParseError(String),

    /// Validation error
    #[error("Configuration validation error: {field}: {message}")]
    ValidationError { field: String, message: String },
}

// Conversion implementations for common error types

impl From<ChainError> for ExecutorError {
    fn from(err: ChainError) -> Self {
        match err {
            ChainError::Unconfirmed { signature, message } => ExecutorError::Submission {
                signature: Some(signature),
                message,
            },
            other => ExecutorError::Infrastructure(other.to_string()),
        }
    }
}

impl From<ConfigError> for ExecutorError {
    fn from(err: ConfigError) -> Self {
        ExecutorError::Config(err.to_string())
    }
}
