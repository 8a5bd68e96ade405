//! Configuration management for the voucher CLI
//!
//! Values come from environment variables with sensible defaults; command
//! line flags override them.

use rust_decimal::Decimal;
use std::env;
use voucher_sdk::format_money;

/// Centralized configuration for the voucher CLI
#[derive(Debug, Clone)]
pub struct VoucherCliConfig {
    /// Shared webhook secret used by `sign` and `verify` when `--secret` is absent
    pub webhook_secret: Option<String>,

    /// Default output format for CLI commands
    pub default_output_format: String,

    /// Unit price used when a command does not pass `--unit-price`
    pub default_unit_price: Decimal,

    /// Symbol prefixed to amounts in human output
    pub currency_symbol: String,
}

impl VoucherCliConfig {
    /// Create a new configuration instance with values from environment variables
    /// or sensible defaults if not set
    #[must_use]
    pub fn new() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key lookup, falling back to defaults
    /// for keys that are missing or unparsable
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            webhook_secret: lookup("VOUCHER_WEBHOOK_SECRET").filter(|secret| !secret.is_empty()),

            default_output_format: lookup("VOUCHER_DEFAULT_OUTPUT_FORMAT")
                .unwrap_or_else(|| "human".to_string()),

            default_unit_price: lookup("VOUCHER_DEFAULT_UNIT_PRICE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(Decimal::ZERO),

            currency_symbol: lookup("VOUCHER_CURRENCY_SYMBOL").unwrap_or_default(),
        }
    }

    /// Format a major-unit amount for human output
    #[must_use]
    pub fn format_amount(&self, amount: Decimal) -> String {
        format!("{}{}", self.currency_symbol, format_money(amount))
    }

    /// Pick the webhook secret, preferring an explicit flag over the environment
    #[must_use]
    pub fn resolve_secret<'a>(&'a self, flag: Option<&'a str>) -> Option<&'a str> {
        flag.or(self.webhook_secret.as_deref())
    }
}

impl Default for VoucherCliConfig {
    fn default() -> Self {
        Self::new()
    }
}
