//! SPL transfer executor
//!
//! Flow: validate -> build and sign -> dry-run -> submit. Each stage can
//! short-circuit with a typed outcome; no stage after a failure runs.

use std::sync::Arc;

use chain::{ChainClient, RpcChainClient};
use chrono::Utc;
use simulator::TransactionSimulator;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use tracing::{info, warn};
use types::{
    utils::format_token_amount, ChainError, ExecutionOutcome, ExecutionResult, ExecutorError,
    Result, TransferRequest, TransferSnapshot,
};

use crate::validation::TransferValidator;

/// Per-call execution options
#[derive(Debug, Clone, Default)]
pub struct ExecuteOptions {
    /// Skip the dry-run stage. Explicit opt-out: transfers are
    /// simulated-by-default and a skipped simulation is logged.
    pub skip_simulation: bool,
}

/// Executes SPL token transfers with validation and simulation
pub struct SplTransferExecutor {
    chain: Arc<dyn ChainClient>,
    validator: TransferValidator,
    simulator: TransactionSimulator,
}

impl SplTransferExecutor {
    /// Create an executor over a chain backend
    pub fn new(chain: Arc<dyn ChainClient>) -> Self {
        Self {
            validator: TransferValidator::new(chain.clone()),
            simulator: TransactionSimulator::new(chain.clone()),
            chain,
        }
    }

    /// Wire up an executor from configuration, backed by the JSON-RPC client
    pub fn from_config(config: &config::Config) -> Self {
        let chain = RpcChainClient::new(
            config.rpc.url.clone(),
            config.rpc.commitment,
            config.rpc.timeout_seconds,
        );
        Self::new(Arc::new(chain))
    }

    /// Validate a transfer against current chain state without executing it
    pub async fn validate_transfer(&self, request: &TransferRequest) -> Result<TransferSnapshot> {
        self.validator.validate(request).await
    }

    /// Build the unsigned transfer transaction from the validated snapshot.
    ///
    /// Decimals resolve exactly as validation saw them: request override
    /// first, then the on-chain mint value. Re-fetching here would let the
    /// checked instruction disagree with what validation approved.
    pub async fn create_transfer_transaction(
        &self,
        request: &TransferRequest,
        snapshot: &TransferSnapshot,
        payer: &Pubkey,
    ) -> Result<Transaction> {
        let decimals = snapshot.effective_decimals(request);

        let instruction = spl_token::instruction::transfer_checked(
            &spl_token::id(),
            &request.sender_token_account,
            &snapshot.sender.mint,
            &request.recipient_token_account,
            &snapshot.sender.owner,
            &[],
            request.amount,
            decimals,
        )
        .map_err(|e| ExecutorError::Infrastructure(format!("instruction build failed: {e}")))?;

        let blockhash = self.chain.latest_blockhash().await?;

        let mut transaction = Transaction::new_with_payer(&[instruction], Some(payer));
        transaction.message.recent_blockhash = blockhash;

        Ok(transaction)
    }

    /// Execute an SPL transfer: validate -> simulate -> submit.
    ///
    /// Total: every failure mode comes back as an `ExecutionOutcome`
    /// variant, never as an `Err` or a panic. Once submission starts the
    /// operation is not cancellable and side effects may be irreversible.
    pub async fn execute(
        &self,
        request: &TransferRequest,
        payer: &Keypair,
        options: &ExecuteOptions,
    ) -> ExecutionResult {
        let started_at = Utc::now();
        let outcome = self.run_pipeline(request, payer, options).await;

        ExecutionResult::new(outcome, started_at)
    }

    async fn run_pipeline(
        &self,
        request: &TransferRequest,
        payer: &Keypair,
        options: &ExecuteOptions,
    ) -> ExecutionOutcome {
        // Stage 1: validate. No network writes have happened on failure.
        let snapshot = match self.validator.validate(request).await {
            Ok(snapshot) => snapshot,
            Err(err) => return outcome_from_error(err),
        };
        info!(
            amount = %format_token_amount(request.amount, snapshot.effective_decimals(request)),
            mint = %snapshot.sender.mint,
            "Transfer validated"
        );

        // Stage 2: build and sign. The payer is fee payer and transfer
        // authority; the transaction is immutable once signed.
        let mut transaction =
            match self.create_transfer_transaction(request, &snapshot, &payer.pubkey()).await {
                Ok(transaction) => transaction,
                Err(err) => return outcome_from_error(err),
            };
        let blockhash = transaction.message.recent_blockhash;
        if let Err(e) = transaction.try_sign(&[payer], blockhash) {
            return outcome_from_error(ChainError::Signing(e.to_string()).into());
        }

        // Stage 3: dry-run, unless explicitly skipped. A failed dry-run or
        // an undeterminable one both stop the pipeline before broadcast.
        if options.skip_simulation {
            warn!("Dry-run skipped by caller");
        } else {
            let simulation = match self.simulator.simulate(&transaction).await {
                Ok(simulation) => simulation,
                Err(err) => return outcome_from_error(err),
            };
            if !simulation.is_success() {
                let error = self.simulator.extract_error_message(&simulation.logs);
                warn!(error = %error, "Dry-run failed; transfer will not be submitted");
                return ExecutionOutcome::SimulationFailed { error, simulation };
            }
        }

        // Stage 4: submit. Not cancellable past this point.
        match self.chain.send_and_confirm(&transaction).await {
            Ok(signature) => {
                info!(%signature, "Transfer confirmed");
                ExecutionOutcome::Confirmed { signature }
            }
            Err(err) => outcome_from_error(err),
        }
    }
}

/// Map a pipeline error onto the discriminated outcome
fn outcome_from_error(err: ExecutorError) -> ExecutionOutcome {
    match err {
        ExecutorError::Validation(error) => ExecutionOutcome::ValidationFailed { error },
        ExecutorError::Submission { signature, message } => ExecutionOutcome::SubmissionFailed {
            signature,
            error: message,
        },
        other => ExecutionOutcome::InfrastructureFailed {
            error: other.to_string(),
        },
    }
}
