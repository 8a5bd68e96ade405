//! Price, discount and quote command implementation

use crate::commands::OutputFormat;
use crate::config::VoucherCliConfig;
use crate::utils::formatting::{format_quote_human, format_quote_json};
use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use tracing::info;
use voucher_sdk::{calculate_discount, calculate_price, quote, Voucher};

/// Which amount the command reports
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PricingMode {
    /// Price left to pay
    Price,
    /// Discount granted
    Discount,
    /// Both
    Quote,
}

/// Arguments for the pricing commands
#[derive(Debug)]
pub struct PriceRequest<'a> {
    pub base_price: &'a str,
    pub voucher_json: &'a str,
    pub unit_price: Option<&'a str>,
}

/// Execute the price, discount or quote command
///
/// # Errors
///
/// Returns an error if:
/// - The base price or unit price is not a decimal number, or is negative
/// - The voucher JSON cannot be parsed or describes an unsupported voucher
/// - The voucher discount value is out of range
pub fn execute(
    request: &PriceRequest<'_>,
    mode: PricingMode,
    output_format: OutputFormat,
    config: &VoucherCliConfig,
) -> Result<String> {
    info!("Starting {mode:?} calculation");

    let base_price = parse_amount("base price", request.base_price)?;
    let unit_price = match request.unit_price {
        Some(unit_price) => parse_amount("unit price", unit_price)?,
        None => config.default_unit_price,
    };

    let voucher = Voucher::from_json_str(request.voucher_json)
        .map_err(|e| anyhow!("Invalid voucher: {e}"))?;
    info!("Using {} voucher", voucher.label());

    let (price, discount) = match mode {
        PricingMode::Price => (Some(calculate_price(base_price, &voucher, unit_price)?), None),
        PricingMode::Discount => (
            None,
            Some(calculate_discount(base_price, &voucher, unit_price)?),
        ),
        PricingMode::Quote => {
            let quote = quote(base_price, &voucher, unit_price)?;
            (Some(quote.price), Some(quote.discount))
        }
    };

    match output_format {
        OutputFormat::Human => Ok(format_quote_human(
            base_price,
            &voucher,
            price,
            discount,
            config,
        )),
        OutputFormat::Json => format_quote_json(base_price, &voucher, price, discount),
    }
}

/// Parse a non-negative decimal amount in major units
fn parse_amount(name: &str, value: &str) -> Result<Decimal> {
    let amount: Decimal = value
        .trim()
        .parse()
        .map_err(|e| anyhow!("Invalid {name} '{value}': {e}"))?;
    if amount < Decimal::ZERO {
        return Err(anyhow!("Invalid {name} '{value}': must not be negative"));
    }
    Ok(amount)
}
