//! Simulation and execution result types

use chrono::{DateTime, Utc};
use solana_sdk::signature::Signature;

use crate::error::ValidationError;

/// Outcome of a dry-run of a signed transaction against current chain state
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// Whether the simulated run reported no error
    pub success: bool,
    /// Program log lines emitted during the run
    pub logs: Vec<String>,
    /// Compute units consumed by the run
    pub units_consumed: Option<u64>,
    /// Runtime error reported by the node, if any
    pub error: Option<String>,
}

impl SimulationResult {
    /// Create a successful simulation result
    pub fn success(logs: Vec<String>, units_consumed: Option<u64>) -> Self {
        Self {
            success: true,
            logs,
            units_consumed,
            error: None,
        }
    }

    /// Create a failed simulation result
    pub fn failure(error: String, logs: Vec<String>, units_consumed: Option<u64>) -> Self {
        Self {
            success: false,
            logs,
            units_consumed,
            error: Some(error),
        }
    }

    /// Check if the simulation was successful
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get the error message if simulation failed
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Terminal outcome of one `execute` attempt
///
/// Every failure mode is a distinct variant so callers handle each case
/// explicitly instead of string-matching an error message.
#[derive(Debug, Clone)]
pub enum ExecutionOutcome {
    /// Transaction was submitted and confirmed
    Confirmed { signature: Signature },
    /// Rejected during validation; no transaction was built
    ValidationFailed { error: ValidationError },
    /// Dry-run reported the transaction would fail; nothing was submitted
    SimulationFailed {
        error: String,
        simulation: SimulationResult,
    },
    /// RPC or signing failure before broadcast; nothing was submitted
    InfrastructureFailed { error: String },
    /// Broadcast happened but confirmation did not arrive; the transfer
    /// may still land on chain
    SubmissionFailed {
        signature: Option<Signature>,
        error: String,
    },
}

/// What happened during one `execute` call
///
/// This is the single source of truth returned to the caller; `execute`
/// never surfaces failures any other way.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Terminal outcome of the attempt
    pub outcome: ExecutionOutcome,
    /// When the attempt started
    pub timestamp: DateTime<Utc>,
}

impl ExecutionResult {
    pub fn new(outcome: ExecutionOutcome, timestamp: DateTime<Utc>) -> Self {
        Self { outcome, timestamp }
    }

    /// True only when the transfer was submitted and confirmed
    pub fn success(&self) -> bool {
        matches!(self.outcome, ExecutionOutcome::Confirmed { .. })
    }

    /// Signature of the broadcast transaction, when one was broadcast
    pub fn signature(&self) -> Option<&Signature> {
        match &self.outcome {
            ExecutionOutcome::Confirmed { signature } => Some(signature),
            ExecutionOutcome::SubmissionFailed { signature, .. } => signature.as_ref(),
            _ => None,
        }
    }

    /// Caller-facing error message for failed outcomes
    pub fn error(&self) -> Option<String> {
        match &self.outcome {
            ExecutionOutcome::Confirmed { .. } => None,
            ExecutionOutcome::ValidationFailed { error } => Some(error.to_string()),
            ExecutionOutcome::SimulationFailed { error, .. } => Some(error.clone()),
            ExecutionOutcome::InfrastructureFailed { error } => Some(error.clone()),
            ExecutionOutcome::SubmissionFailed { error, .. } => Some(error.clone()),
        }
    }

    /// Simulation result attached to the attempt, when the dry-run ran
    /// and rejected the transaction
    pub fn simulation_result(&self) -> Option<&SimulationResult> {
        match &self.outcome {
            ExecutionOutcome::SimulationFailed { simulation, .. } => Some(simulation),
            _ => None,
        }
    }

    /// True when the transaction reached the network, even if confirmation
    /// did not arrive. Side effects past this point are irreversible.
    pub fn submitted(&self) -> bool {
        matches!(
            self.outcome,
            ExecutionOutcome::Confirmed { .. } | ExecutionOutcome::SubmissionFailed { .. }
        )
    }
}
