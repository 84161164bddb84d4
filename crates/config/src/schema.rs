//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use solana_sdk::commitment_config::{CommitmentConfig, CommitmentLevel};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// RPC endpoint configuration
    pub rpc: RpcConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// RPC endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// JSON-RPC endpoint URL
    pub url: String,
    /// Commitment level transfers are confirmed at
    #[serde(default = "default_commitment")]
    pub commitment: CommitmentLevel,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions

fn default_commitment() -> CommitmentLevel {
    CommitmentLevel::Confirmed
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Config {
    /// Commitment config used for account reads, simulation, and confirmation
    pub fn commitment_config(&self) -> CommitmentConfig {
        CommitmentConfig {
            commitment: self.rpc.commitment,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc: RpcConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "https://api.mainnet-beta.solana.com".to_string(),
            commitment: default_commitment(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
