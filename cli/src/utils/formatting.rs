//! Output formatting utilities for the voucher CLI

use crate::config::VoucherCliConfig;
use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use voucher_sdk::{format_money, Voucher};

/// Format a pricing result for human-readable output
#[must_use]
pub fn format_quote_human(
    base_price: Decimal,
    voucher: &Voucher,
    price: Option<Decimal>,
    discount: Option<Decimal>,
    config: &VoucherCliConfig,
) -> String {
    use std::fmt::Write;

    let mut output = format!("Voucher: {}\n", voucher.label());

    // Use write! to avoid extra allocations
    write!(&mut output, "Base price: {}", config.format_amount(base_price)).unwrap();
    if let Some(discount) = discount {
        write!(&mut output, "\nDiscount: {}", config.format_amount(discount)).unwrap();
    }
    if let Some(price) = price {
        write!(&mut output, "\nPrice: {}", config.format_amount(price)).unwrap();
    }
    output
}

/// Format a pricing result for JSON output
///
/// Amounts are emitted as two-decimal strings so no precision is lost.
///
/// # Errors
///
/// Returns an error if JSON serialization fails
pub fn format_quote_json(
    base_price: Decimal,
    voucher: &Voucher,
    price: Option<Decimal>,
    discount: Option<Decimal>,
) -> Result<String> {
    let mut json = serde_json::json!({
        "voucher_type": voucher.label(),
        "voucher": voucher,
        "base_price": format_money(base_price),
    });
    if let Some(discount) = discount {
        json["discount"] = serde_json::Value::String(format_money(discount));
    }
    if let Some(price) = price {
        json["price"] = serde_json::Value::String(format_money(price));
    }

    serde_json::to_string_pretty(&json)
        .map_err(|e| anyhow!("Failed to serialize pricing result to JSON: {e}"))
}
