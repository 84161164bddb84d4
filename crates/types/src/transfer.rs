//! Transfer request and on-chain account snapshot types

use solana_sdk::pubkey::Pubkey;

/// Request to move SPL tokens between two token accounts
///
/// Amounts are raw base units of the mint, never UI amounts.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    /// Sender token account
    pub sender_token_account: Pubkey,
    /// Recipient token account
    pub recipient_token_account: Pubkey,
    /// Raw token amount in base units
    pub amount: u64,
    /// Optional decimals override; the on-chain mint value is used when absent
    pub decimals: Option<u8>,
}

/// State of an SPL token account as read from the chain
///
/// Fetched fresh per validation call and never cached. Decimals come from
/// the mint account, since token accounts do not record them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAccountState {
    /// Wallet that owns the token account
    pub owner: Pubkey,
    /// Mint of the token the account holds
    pub mint: Pubkey,
    /// Raw token balance in base units
    pub balance: u64,
    /// Decimals of the mint
    pub decimals: u8,
}

/// Sender and recipient state captured at validation time
///
/// Transaction construction reuses this snapshot instead of re-fetching, so
/// the decision and the built instruction are based on the same read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferSnapshot {
    pub sender: TokenAccountState,
    pub recipient: TokenAccountState,
}

impl TransferRequest {
    /// Create a request with on-chain decimals resolution
    pub fn new(sender: Pubkey, recipient: Pubkey, amount: u64) -> Self {
        Self {
            sender_token_account: sender,
            recipient_token_account: recipient,
            amount,
            decimals: None,
        }
    }

    /// Pin the decimals used for the checked transfer instruction
    pub fn with_decimals(mut self, decimals: u8) -> Self {
        self.decimals = Some(decimals);
        self
    }
}

impl TransferSnapshot {
    /// Decimals the transfer instruction must be built with: the request
    /// override when present, otherwise the sender's on-chain mint value.
    pub fn effective_decimals(&self, request: &TransferRequest) -> u8 {
        request.decimals.unwrap_or(self.sender.decimals)
    }
}
