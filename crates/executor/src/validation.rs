//! Transfer validation against live chain state

use std::sync::Arc;

use chain::ChainClient;
use types::{Result, TransferRequest, TransferSnapshot, ValidationError};

/// Validates transfer semantics before any transaction is built
pub struct TransferValidator {
    chain: Arc<dyn ChainClient>,
}

impl TransferValidator {
    /// Create a new validator over a chain backend
    pub fn new(chain: Arc<dyn ChainClient>) -> Self {
        Self { chain }
    }

    /// Check the transfer against current chain state.
    ///
    /// Account existence is checked before balance and mint: a missing
    /// account makes the other checks meaningless. Balance comparison is
    /// u64 base units. The returned snapshot is the exact state the
    /// decision was made on; transaction construction reuses it instead of
    /// re-fetching.
    ///
    /// Idempotent for unchanged chain state.
    pub async fn validate(&self, request: &TransferRequest) -> Result<TransferSnapshot> {
        let sender = self
            .chain
            .token_account(&request.sender_token_account)
            .await?
            .ok_or(ValidationError::SenderAccountNotFound)?;

        let recipient = self
            .chain
            .token_account(&request.recipient_token_account)
            .await?
            .ok_or(ValidationError::RecipientAccountNotFound)?;

        if sender.balance < request.amount {
            return Err(ValidationError::InsufficientBalance {
                balance: sender.balance,
                requested: request.amount,
            }
            .into());
        }

        if sender.mint != recipient.mint {
            return Err(ValidationError::MintMismatch {
                sender_mint: sender.mint.to_string(),
                recipient_mint: recipient.mint.to_string(),
            }
            .into());
        }

        Ok(TransferSnapshot { sender, recipient })
    }
}
