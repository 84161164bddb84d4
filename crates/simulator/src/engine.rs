//! Dry-run engine implementation

use std::sync::Arc;

use chain::ChainClient;
use solana_sdk::transaction::Transaction;
use types::{Result, SimulationResult};

/// Known failure markers scanned for in simulation logs, most specific
/// first. Scanning order decides which line wins when several match.
const LOG_ERROR_PATTERNS: &[&str] = &[
    "custom program error:",
    "insufficient funds",
    "insufficient lamports",
    "Error:",
    "failed:",
];

/// Fallback when no log line matches a known pattern
const GENERIC_FAILURE_MESSAGE: &str = "Transaction simulation failed";

/// Dry-runs signed transactions against current chain state
pub struct TransactionSimulator {
    chain: Arc<dyn ChainClient>,
}

impl TransactionSimulator {
    /// Create a new simulator over a chain backend
    pub fn new(chain: Arc<dyn ChainClient>) -> Self {
        Self { chain }
    }

    /// Dry-run a signed transaction.
    ///
    /// A runtime-reported failure comes back as `success: false` with the
    /// raw logs attached, never as an `Err`. `Err` means the outcome could
    /// not be determined (RPC unreachable, malformed transaction) and the
    /// caller must not treat it as "would fail".
    pub async fn simulate(&self, transaction: &Transaction) -> Result<SimulationResult> {
        let status = self.chain.simulate(transaction).await?;

        match status.err {
            Some(err) => {
                tracing::warn!(
                    backend = %self.chain.name(),
                    error = %err,
                    "Dry-run rejected transaction"
                );
                Ok(SimulationResult::failure(
                    err,
                    status.logs,
                    status.units_consumed,
                ))
            }
            None => {
                tracing::debug!(
                    backend = %self.chain.name(),
                    units_consumed = ?status.units_consumed,
                    "Dry-run succeeded"
                );
                Ok(SimulationResult::success(status.logs, status.units_consumed))
            }
        }
    }

    /// Extract the most actionable error line from simulation logs.
    ///
    /// Deterministic: the same log sequence always yields the same message.
    pub fn extract_error_message(&self, logs: &[String]) -> String {
        for pattern in LOG_ERROR_PATTERNS {
            if let Some(line) = logs.iter().find(|line| line.contains(pattern)) {
                return line.trim().to_string();
            }
        }
        GENERIC_FAILURE_MESSAGE.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chain::DryRunStatus;
    use solana_sdk::{
        hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction,
    };
    use types::{ExecutorError, TokenAccountState};

    /// Chain stub that replays a scripted dry-run outcome
    struct ScriptedChain {
        status: Option<DryRunStatus>,
    }

    #[async_trait]
    impl ChainClient for ScriptedChain {
        async fn token_account(&self, _address: &Pubkey) -> types::Result<Option<TokenAccountState>> {
            unimplemented!("not used by the simulator")
        }

        async fn latest_blockhash(&self) -> types::Result<Hash> {
            unimplemented!("not used by the simulator")
        }

        async fn simulate(&self, _transaction: &Transaction) -> types::Result<DryRunStatus> {
            match &self.status {
                Some(status) => Ok(status.clone()),
                None => Err(ExecutorError::Infrastructure("rpc unreachable".to_string())),
            }
        }

        async fn send_and_confirm(&self, _transaction: &Transaction) -> types::Result<Signature> {
            unimplemented!("not used by the simulator")
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn simulator_with(status: Option<DryRunStatus>) -> TransactionSimulator {
        TransactionSimulator::new(Arc::new(ScriptedChain { status }))
    }

    #[tokio::test]
    async fn clean_run_is_success() {
        let simulator = simulator_with(Some(DryRunStatus {
            err: None,
            logs: vec!["Program TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA invoke [1]".to_string()],
            units_consumed: Some(4500),
        }));

        let result = simulator.simulate(&Transaction::default()).await.unwrap();
        assert!(result.is_success());
        assert!(result.error_message().is_none());
        assert_eq!(result.units_consumed, Some(4500));
    }

    #[tokio::test]
    async fn runtime_error_is_a_failed_result_not_an_err() {
        let simulator = simulator_with(Some(DryRunStatus {
            err: Some("InstructionError(0, Custom(1))".to_string()),
            logs: vec![
                "Program log: Error: insufficient funds".to_string(),
                "Program TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA failed: custom program error: 0x1".to_string(),
            ],
            units_consumed: Some(2000),
        }));

        let result = simulator.simulate(&Transaction::default()).await.unwrap();
        assert!(!result.is_success());
        assert_eq!(result.logs.len(), 2);
        assert!(result.error_message().unwrap().contains("Custom(1)"));
    }

    #[tokio::test]
    async fn infrastructure_failure_is_an_err() {
        let simulator = simulator_with(None);
        let result = simulator.simulate(&Transaction::default()).await;
        assert!(result.is_err());
    }

    #[test]
    fn extraction_prefers_the_most_specific_pattern() {
        let simulator = simulator_with(None);
        let logs = vec![
            "Program TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA invoke [1]".to_string(),
            "Program TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA failed: something".to_string(),
            "Program log: custom program error: 0x1".to_string(),
        ];
        // The custom error code line wins over the earlier generic "failed:" line
        assert_eq!(
            simulator.extract_error_message(&logs),
            "Program log: custom program error: 0x1"
        );
    }

    #[test]
    fn extraction_finds_insufficient_funds_marker() {
        let simulator = simulator_with(None);
        let logs = vec![
            "Program log: Instruction: TransferChecked".to_string(),
            "Program log: Error: insufficient funds".to_string(),
        ];
        assert_eq!(
            simulator.extract_error_message(&logs),
            "Program log: Error: insufficient funds"
        );
    }

    #[test]
    fn extraction_falls_back_to_generic_message() {
        let simulator = simulator_with(None);
        let logs = vec!["Program log: Instruction: TransferChecked".to_string()];
        assert_eq!(simulator.extract_error_message(&logs), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn extraction_is_deterministic() {
        let simulator = simulator_with(None);
        let logs = vec![
            "Program log: Error: insufficient funds".to_string(),
            "Program log: custom program error: 0x1".to_string(),
        ];
        let first = simulator.extract_error_message(&logs);
        let second = simulator.extract_error_message(&logs);
        assert_eq!(first, second);
    }
}
