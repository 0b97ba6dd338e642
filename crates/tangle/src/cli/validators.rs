//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

use tangle_engine::QueryKind;

/// Parse a query kind, ignoring case.
pub fn validate_query_kind(s: &str) -> Result<QueryKind, String> {
    s.trim().parse().map_err(|e: tangle_engine::Error| e.to_string())
}

/// Validate a per-query timeout in milliseconds (must be positive).
pub fn validate_timeout_ms(s: &str) -> Result<u64, String> {
    let value: u64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid timeout '{s}': expected a whole number of milliseconds"))?;

    if value == 0 {
        return Err("Timeout must be greater than 0 milliseconds".to_string());
    }
    Ok(value)
}
