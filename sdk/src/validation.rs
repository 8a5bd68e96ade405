//! Validation of discount values

use crate::error::{PricingError, Result};
use rust_decimal::Decimal;

/// Message for a missing or out-of-range percent discount
pub const PERCENT_DISCOUNT_MESSAGE: &str =
    "Invalid voucher, percent discount should be between 0-100.";

/// Message for a missing or negative amount discount
pub const AMOUNT_DISCOUNT_MESSAGE: &str =
    "Invalid voucher, amount discount must be equal or higher than zero.";

/// Message for a missing or negative unit discount
pub const UNIT_DISCOUNT_MESSAGE: &str =
    "Invalid voucher, unit discount must be equal or higher than zero.";

/// Message for a missing or negative gift card balance
pub const GIFT_BALANCE_MESSAGE: &str =
    "Invalid voucher, gift balance must be equal or higher than zero.";

/// Validate a percent discount
///
/// # Errors
/// Returns `InvalidVoucher` unless `0 <= percent_off <= 100`
pub fn validate_percent_discount(percent_off: Decimal) -> Result<()> {
    if percent_off < Decimal::ZERO || percent_off > Decimal::ONE_HUNDRED {
        return Err(PricingError::invalid_voucher(PERCENT_DISCOUNT_MESSAGE));
    }
    Ok(())
}

/// Validate an amount discount
///
/// # Errors
/// Returns `InvalidVoucher` if `amount_off` is negative
pub fn validate_amount_discount(amount_off: Decimal) -> Result<()> {
    if amount_off < Decimal::ZERO {
        return Err(PricingError::invalid_voucher(AMOUNT_DISCOUNT_MESSAGE));
    }
    Ok(())
}

/// Validate a unit discount
///
/// # Errors
/// Returns `InvalidVoucher` if `unit_off` is negative
pub fn validate_unit_discount(unit_off: Decimal) -> Result<()> {
    if unit_off < Decimal::ZERO {
        return Err(PricingError::invalid_voucher(UNIT_DISCOUNT_MESSAGE));
    }
    Ok(())
}
