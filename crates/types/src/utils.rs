//! Utility functions and helpers

/// Convert a raw base-unit amount to a UI amount using mint decimals.
///
/// Display only. Balance and amount comparisons stay in u64 base units.
pub fn ui_amount(amount: u64, decimals: u8) -> f64 {
    amount as f64 / 10f64.powi(decimals as i32)
}

/// Format a raw amount for logging, e.g. 1_500_000 with 6 decimals -> "1.5"
pub fn format_token_amount(amount: u64, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }
    let divisor = 10u64.pow(decimals as u32);
    let whole = amount / divisor;
    let frac = amount % divisor;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{frac:0width$}", width = decimals as usize);
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

/// Shorten a base58 address or signature for logging
pub fn sanitize_for_logging(s: &str) -> String {
    if s.len() <= 12 {
        return s.to_string();
    }
    format!("{}...{}", &s[..6], &s[s.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_amount() {
        assert_eq!(ui_amount(1_500_000, 6), 1.5);
        assert_eq!(ui_amount(0, 6), 0.0);
        assert_eq!(ui_amount(42, 0), 42.0);
    }

    #[test]
    fn test_format_token_amount() {
        assert_eq!(format_token_amount(1_500_000, 6), "1.5");
        assert_eq!(format_token_amount(1_000_000, 6), "1");
        assert_eq!(format_token_amount(1, 6), "0.000001");
        assert_eq!(format_token_amount(42, 0), "42");
    }

    #[test]
    fn test_sanitize_for_logging() {
        assert_eq!(
            sanitize_for_logging("4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T"),
            "4Nd1mB...DB4T"
        );
        assert_eq!(sanitize_for_logging("short"), "short");
    }
}
