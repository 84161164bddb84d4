//! Execute a single SPL transfer from the command line.
//!
//! Usage:
//!   cargo run --example transfer -- <SENDER_TOKEN_ACCOUNT> <RECIPIENT_TOKEN_ACCOUNT> <AMOUNT>
//!
//! Reads configuration from config.yaml (or CONFIG_PATH) and the payer
//! keypair from PAYER_KEYPAIR_PATH (defaults to ~/.config/solana/id.json).

use anyhow::{anyhow, Context, Result};
use config::ConfigLoader;
use executor::{ExecuteOptions, SplTransferExecutor};
use solana_sdk::{pubkey::Pubkey, signature::read_keypair_file};
use std::env;
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::EnvFilter;
use types::TransferRequest;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    let config = ConfigLoader::load(&config_path).context("Failed to load configuration")?;

    init_logging(&config.logging)?;
    info!("Configuration loaded from: {}", config_path);
    info!("RPC endpoint: {}", config.rpc.url);

    let mut args = env::args().skip(1);
    let sender = parse_pubkey(args.next(), "sender token account")?;
    let recipient = parse_pubkey(args.next(), "recipient token account")?;
    let amount: u64 = args
        .next()
        .ok_or_else(|| anyhow!("missing amount"))?
        .parse()
        .context("amount must be a raw u64 base-unit value")?;

    let keypair_path = env::var("PAYER_KEYPAIR_PATH").unwrap_or_else(|_| {
        let home = env::var("HOME").unwrap_or_default();
        format!("{home}/.config/solana/id.json")
    });
    let payer = read_keypair_file(&keypair_path)
        .map_err(|e| anyhow!("Failed to read payer keypair from {keypair_path}: {e}"))?;

    let executor = SplTransferExecutor::from_config(&config);
    let request = TransferRequest::new(sender, recipient, amount);

    let result = executor
        .execute(&request, &payer, &ExecuteOptions::default())
        .await;

    if result.success() {
        info!(signature = %result.signature().unwrap(), "Transfer confirmed");
        Ok(())
    } else {
        if let Some(simulation) = result.simulation_result() {
            for line in &simulation.logs {
                info!("sim log: {line}");
            }
        }
        Err(anyhow!(
            "Transfer failed: {}",
            result.error().unwrap_or_else(|| "unknown error".to_string())
        ))
    }
}

fn parse_pubkey(arg: Option<String>, what: &str) -> Result<Pubkey> {
    let value = arg.ok_or_else(|| anyhow!("missing {what}"))?;
    Pubkey::from_str(&value).map_err(|e| anyhow!("invalid {what}: {e}"))
}

fn init_logging(logging: &config::LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.clone()));

    if logging.format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    Ok(())
}
