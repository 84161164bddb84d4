//! Chain client trait and interfaces

use async_trait::async_trait;
use solana_sdk::{hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction};
use types::{Result, TokenAccountState};

/// Raw outcome of a dry-run as reported by the node
///
/// `err: Some` means the transaction would fail on chain. An `Err` from
/// `ChainClient::simulate` means the outcome could not be determined at
/// all; the two must never be conflated.
#[derive(Debug, Clone)]
pub struct DryRunStatus {
    /// Runtime error reported by the node, None when the run succeeded
    pub err: Option<String>,
    /// Program log lines emitted during the run
    pub logs: Vec<String>,
    /// Compute units consumed by the run
    pub units_consumed: Option<u64>,
}

impl DryRunStatus {
    /// Whether the simulated run reported no error
    pub fn is_ok(&self) -> bool {
        self.err.is_none()
    }
}

/// Trait for chain backends the transfer pipeline runs against
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Fetch the state of an SPL token account.
    ///
    /// Returns `Ok(None)` when the account does not exist. An account that
    /// exists but cannot be decoded as SPL token state is an error.
    async fn token_account(&self, address: &Pubkey) -> Result<Option<TokenAccountState>>;

    /// Latest blockhash usable for a new transaction
    async fn latest_blockhash(&self) -> Result<Hash>;

    /// Dry-run a signed transaction without committing state
    async fn simulate(&self, transaction: &Transaction) -> Result<DryRunStatus>;

    /// Broadcast a signed transaction and wait for confirmation at the
    /// configured commitment level. Past broadcast, failures carry the
    /// signature so callers can tell them from pre-broadcast ones.
    async fn send_and_confirm(&self, transaction: &Transaction) -> Result<Signature>;

    /// Name of the backend, for logging
    fn name(&self) -> &str;
}
