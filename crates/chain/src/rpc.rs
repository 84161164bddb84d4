//! JSON-RPC chain client implementation

use std::time::Duration;

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::{CommitmentConfig, CommitmentLevel},
    hash::Hash,
    program_pack::Pack,
    pubkey::Pubkey,
    signature::Signature,
    transaction::Transaction,
};

use crate::traits::{ChainClient, DryRunStatus};
use types::{ChainError, Result, TokenAccountState};

/// Interval between confirmation polls after broadcast
const CONFIRMATION_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Chain client backed by a Solana JSON-RPC node
pub struct RpcChainClient {
    rpc: RpcClient,
    commitment: CommitmentConfig,
    endpoint: String,
}

impl RpcChainClient {
    /// Create a new RPC chain client
    pub fn new(url: String, commitment: CommitmentLevel, timeout_seconds: u64) -> Self {
        let commitment = CommitmentConfig { commitment };
        let rpc = RpcClient::new_with_timeout_and_commitment(
            url.clone(),
            Duration::from_secs(timeout_seconds),
            commitment,
        );

        Self {
            rpc,
            commitment,
            endpoint: url,
        }
    }

    async fn account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>> {
        let response = self
            .rpc
            .get_account_with_commitment(address, self.commitment)
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))?;

        match response.value {
            Some(account) => {
                if account.owner != spl_token::id() {
                    return Err(ChainError::MalformedAccount {
                        address: address.to_string(),
                        message: "account is not owned by the SPL token program".to_string(),
                    }
                    .into());
                }
                Ok(Some(account.data))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn token_account(&self, address: &Pubkey) -> Result<Option<TokenAccountState>> {
        let Some(data) = self.account_data(address).await? else {
            return Ok(None);
        };

        let account =
            spl_token::state::Account::unpack(&data).map_err(|e| ChainError::MalformedAccount {
                address: address.to_string(),
                message: e.to_string(),
            })?;

        // Decimals live on the mint, not the token account
        let mint_data = self.account_data(&account.mint).await?.ok_or_else(|| {
            ChainError::MalformedAccount {
                address: account.mint.to_string(),
                message: "mint account does not exist".to_string(),
            }
        })?;
        let mint = spl_token::state::Mint::unpack(&mint_data).map_err(|e| {
            ChainError::MalformedAccount {
                address: account.mint.to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(Some(TokenAccountState {
            owner: account.owner,
            mint: account.mint,
            balance: account.amount,
            decimals: mint.decimals,
        }))
    }

    async fn latest_blockhash(&self) -> Result<Hash> {
        self.rpc
            .get_latest_blockhash()
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()).into())
    }

    async fn simulate(&self, transaction: &Transaction) -> Result<DryRunStatus> {
        let response = self
            .rpc
            .simulate_transaction(transaction)
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))?;

        let value = response.value;
        Ok(DryRunStatus {
            err: value.err.map(|e| e.to_string()),
            logs: value.logs.unwrap_or_default(),
            units_consumed: value.units_consumed,
        })
    }

    async fn send_and_confirm(&self, transaction: &Transaction) -> Result<Signature> {
        let recent_blockhash = transaction.message.recent_blockhash;

        let signature = self
            .rpc
            .send_transaction(transaction)
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))?;

        tracing::debug!(%signature, "Transaction broadcast, awaiting confirmation");

        // From here on the transfer can land even if we fail to observe it,
        // so every failure carries the signature.
        loop {
            let confirmed = self
                .rpc
                .confirm_transaction_with_commitment(&signature, self.commitment)
                .await
                .map_err(|e| ChainError::Unconfirmed {
                    signature,
                    message: e.to_string(),
                })?;

            if confirmed.value {
                return Ok(signature);
            }

            let blockhash_valid = self
                .rpc
                .is_blockhash_valid(&recent_blockhash, CommitmentConfig::processed())
                .await
                .map_err(|e| ChainError::Unconfirmed {
                    signature,
                    message: e.to_string(),
                })?;

            if !blockhash_valid {
                return Err(ChainError::Unconfirmed {
                    signature,
                    message: "blockhash expired before confirmation".to_string(),
                }
                .into());
            }

            tokio::time::sleep(CONFIRMATION_POLL_INTERVAL).await;
        }
    }

    fn name(&self) -> &str {
        &self.endpoint
    }
}
