//! Money rounding and currency unit conversions
//!
//! All amounts are `Decimal` so that rounding never inherits binary floating
//! point error. Prices are expressed in major currency units (e.g. dollars);
//! gift balances and amount discounts arrive in minor units (e.g. cents).

#![forbid(unsafe_code)]

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of minor currency units in one major unit
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Number of decimal places kept on every monetary output
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Round a monetary value to two decimal places, ties away from zero
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use voucher_sdk::money::round_money;
///
/// assert_eq!(round_money(dec!(1.005)), dec!(1.01));
/// assert_eq!(round_money(dec!(-1.005)), dec!(-1.01));
/// assert_eq!(round_money(dec!(80)), dec!(80));
/// ```
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert minor currency units to major units
///
/// Returns `None` only if the division cannot be represented.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use voucher_sdk::money::minor_to_major;
///
/// assert_eq!(minor_to_major(dec!(10000)), Some(dec!(100)));
/// assert_eq!(minor_to_major(dec!(1)), Some(dec!(0.01)));
/// ```
#[must_use]
pub fn minor_to_major(minor: Decimal) -> Option<Decimal> {
    minor.checked_div(Decimal::from(MINOR_UNITS_PER_MAJOR))
}

/// Format a major-unit amount with exactly two decimal places
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use voucher_sdk::money::format_money;
///
/// assert_eq!(format_money(dec!(80)), "80.00");
/// assert_eq!(format_money(dec!(0.5)), "0.50");
/// ```
#[must_use]
pub fn format_money(value: Decimal) -> String {
    let mut rounded = round_money(value);
    rounded.rescale(MONEY_DECIMAL_PLACES);
    rounded.to_string()
}
