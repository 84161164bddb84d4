//! Configuration validation utilities

use crate::schema::Config;
use solana_sdk::commitment_config::CommitmentLevel;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate complete configuration
    pub fn validate(config: &Config) -> ValidationReport {
        let mut report = ValidationReport::new();

        Self::validate_rpc(config, &mut report);
        Self::validate_logging(config, &mut report);

        report
    }

    fn validate_rpc(config: &Config, report: &mut ValidationReport) {
        if config.rpc.url.is_empty() {
            report.add_error("rpc.url", "RPC URL cannot be empty");
        } else if !config.rpc.url.starts_with("http://")
            && !config.rpc.url.starts_with("https://")
        {
            report.add_error("rpc.url", "RPC URL must start with http:// or https://");
        } else if config.rpc.url.starts_with("http://")
            && !config.rpc.url.contains("localhost")
            && !config.rpc.url.contains("127.0.0.1")
        {
            report.add_warning("rpc.url", "Plain HTTP endpoint outside localhost");
        }

        if config.rpc.timeout_seconds == 0 {
            report.add_error("rpc.timeout_seconds", "Timeout must be greater than 0");
        } else if config.rpc.timeout_seconds > 300 {
            report.add_warning("rpc.timeout_seconds", "Timeout is very high (max sensible 300s)");
        }

        if config.rpc.commitment == CommitmentLevel::Processed {
            report.add_warning(
                "rpc.commitment",
                "Processed commitment can observe forked state; confirmations may be rolled back",
            );
        }
    }

    fn validate_logging(config: &Config, report: &mut ValidationReport) {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&config.logging.level.as_str()) {
            report.add_error(
                "logging.level",
                &format!(
                    "Invalid log level: {}. Valid levels: {:?}",
                    config.logging.level, valid_levels
                ),
            );
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&config.logging.format.as_str()) {
            report.add_error(
                "logging.format",
                &format!(
                    "Invalid log format: {}. Valid formats: {:?}",
                    config.logging.format, valid_formats
                ),
            );
        }
    }
}

/// Validation report containing errors and warnings
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// A validation issue (error or warning)
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }
}
