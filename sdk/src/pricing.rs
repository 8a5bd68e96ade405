//! Price and discount calculation
//!
//! Both calculations take the base price and unit price in major currency
//! units and return a value rounded with [`round_money`]. They dispatch on the
//! same voucher variants but clamp differently:
//!
//! | Voucher | `calculate_price`                      | `calculate_discount`               |
//! |---------|----------------------------------------|------------------------------------|
//! | Gift    | `base - min(balance / 100, base)`      | `min(balance / 100, base)`         |
//! | Percent | `base - base * percent / 100`          | `base * percent / 100`             |
//! | Amount  | `max(0, base - amount_off / 100)`      | `amount_off / 100`, or `base` (1)  |
//! | Unit    | `max(0, base - unit_price * unit_off)` | `min(unit_price * unit_off, base)` |
//!
//! (1) `base` when the amount leaves no positive price.
//!
//! Arithmetic is checked. A unit product too large for `Decimal` is treated as
//! exceeding the base price; any other overflow is `ArithmeticOverflow`.

use crate::error::{PricingError, Result};
use crate::money::{minor_to_major, round_money};
use crate::validation::{
    validate_amount_discount, validate_percent_discount, validate_unit_discount,
};
use crate::voucher::{Discount, Voucher};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

/// Final price and the discount that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub price: Decimal,
    pub discount: Decimal,
}

/// Calculate the price left to pay after applying a voucher
///
/// # Arguments
/// * `base_price` - Price before the voucher, in major units
/// * `voucher` - Voucher to apply
/// * `unit_price` - Price of a single unit, used by unit discounts
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use voucher_sdk::{calculate_price, Voucher};
///
/// let price = calculate_price(dec!(100), &Voucher::percent(dec!(20)), dec!(0))?;
/// assert_eq!(price, dec!(80.00));
/// # Ok::<(), voucher_sdk::PricingError>(())
/// ```
///
/// # Errors
/// Returns `InvalidVoucher` when the discount value is out of range and
/// `ArithmeticOverflow` when an intermediate amount cannot be represented
pub fn calculate_price(
    base_price: Decimal,
    voucher: &Voucher,
    unit_price: Decimal,
) -> Result<Decimal> {
    let price = match voucher {
        Voucher::Gift { balance } => {
            checked_sub(base_price, gift_discount(*balance, base_price)?)?
        }
        Voucher::Discount(Discount::Percent { percent_off }) => {
            validate_percent_discount(*percent_off)?;
            checked_sub(base_price, percent_discount(base_price, *percent_off)?)?
        }
        Voucher::Discount(Discount::Amount { amount_off }) => {
            validate_amount_discount(*amount_off)?;
            let discount = minor_to_major(*amount_off).ok_or(PricingError::ArithmeticOverflow)?;
            checked_sub(base_price, discount)?.max(Decimal::ZERO)
        }
        Voucher::Discount(Discount::Unit { unit_off }) => {
            validate_unit_discount(*unit_off)?;
            checked_sub(base_price, unit_discount(base_price, unit_price, *unit_off))?
                .max(Decimal::ZERO)
        }
    };
    let price = round_money(price);

    debug!(
        service = "voucher-sdk",
        component = "pricing",
        event = "price_calculated",
        voucher = voucher.label(),
        %base_price,
        %unit_price,
        %price,
        "Calculated price"
    );

    Ok(price)
}

/// Calculate the discount a voucher grants on a base price
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use voucher_sdk::{calculate_discount, Voucher};
///
/// let discount = calculate_discount(dec!(30), &Voucher::unit(dec!(4)), dec!(5))?;
/// assert_eq!(discount, dec!(20.00));
/// # Ok::<(), voucher_sdk::PricingError>(())
/// ```
///
/// # Errors
/// Returns `InvalidVoucher` when the discount value is out of range and
/// `ArithmeticOverflow` when an intermediate amount cannot be represented
pub fn calculate_discount(
    base_price: Decimal,
    voucher: &Voucher,
    unit_price: Decimal,
) -> Result<Decimal> {
    let discount = match voucher {
        Voucher::Gift { balance } => gift_discount(*balance, base_price)?,
        Voucher::Discount(Discount::Percent { percent_off }) => {
            validate_percent_discount(*percent_off)?;
            percent_discount(base_price, *percent_off)?
        }
        Voucher::Discount(Discount::Amount { amount_off }) => {
            let discount = minor_to_major(*amount_off).ok_or(PricingError::ArithmeticOverflow)?;
            validate_amount_discount(discount)?;
            // A discount that consumes the whole price is reported as the price itself
            if checked_sub(base_price, discount)? > Decimal::ZERO {
                discount
            } else {
                base_price
            }
        }
        Voucher::Discount(Discount::Unit { unit_off }) => {
            validate_unit_discount(*unit_off)?;
            unit_discount(base_price, unit_price, *unit_off)
        }
    };
    let discount = round_money(discount);

    debug!(
        service = "voucher-sdk",
        component = "pricing",
        event = "discount_calculated",
        voucher = voucher.label(),
        %base_price,
        %unit_price,
        %discount,
        "Calculated discount"
    );

    Ok(discount)
}

/// Calculate both the final price and the discount
///
/// # Errors
/// Same as [`calculate_price`] and [`calculate_discount`]
pub fn quote(base_price: Decimal, voucher: &Voucher, unit_price: Decimal) -> Result<Quote> {
    Ok(Quote {
        price: calculate_price(base_price, voucher, unit_price)?,
        discount: calculate_discount(base_price, voucher, unit_price)?,
    })
}

/// Gift card discount in major units, never more than the base price
fn gift_discount(balance: u64, base_price: Decimal) -> Result<Decimal> {
    let balance =
        minor_to_major(Decimal::from(balance)).ok_or(PricingError::ArithmeticOverflow)?;
    Ok(balance.min(base_price))
}

/// Percentage of the base price, `percent_off` already validated to `[0, 100]`
fn percent_discount(base_price: Decimal, percent_off: Decimal) -> Result<Decimal> {
    percent_off
        .checked_div(Decimal::ONE_HUNDRED)
        .and_then(|ratio| base_price.checked_mul(ratio))
        .ok_or(PricingError::ArithmeticOverflow)
}

/// Unit discount capped at the base price
///
/// A product too large to represent is larger than any base price, so it
/// caps as well.
fn unit_discount(base_price: Decimal, unit_price: Decimal, unit_off: Decimal) -> Decimal {
    unit_price
        .checked_mul(unit_off)
        .map_or(base_price, |discount| discount.min(base_price))
}

fn checked_sub(lhs: Decimal, rhs: Decimal) -> Result<Decimal> {
    lhs.checked_sub(rhs).ok_or(PricingError::ArithmeticOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    const TOLERANCE: Decimal = dec!(0.01);

    fn percent_voucher(percent_off: Decimal) -> Voucher {
        Voucher::percent(percent_off)
    }

    #[test]
    fn test_percent_example() {
        let voucher = percent_voucher(dec!(20));
        assert_eq!(calculate_price(dec!(100), &voucher, dec!(0)).unwrap(), dec!(80.00));
        assert_eq!(calculate_discount(dec!(100), &voucher, dec!(0)).unwrap(), dec!(20.00));
    }

    #[test]
    fn test_percent_rounding() {
        // 19.99 * 15% = 2.9985
        let voucher = percent_voucher(dec!(15));
        assert_eq!(calculate_discount(dec!(19.99), &voucher, dec!(0)).unwrap(), dec!(3.00));
        assert_eq!(calculate_price(dec!(19.99), &voucher, dec!(0)).unwrap(), dec!(16.99));

        // 10 * 33.333% = 3.3333
        let voucher = percent_voucher(dec!(33.333));
        assert_eq!(calculate_discount(dec!(10), &voucher, dec!(0)).unwrap(), dec!(3.33));
        assert_eq!(calculate_price(dec!(10), &voucher, dec!(0)).unwrap(), dec!(6.67));
    }

    #[test]
    fn test_percent_bounds() {
        assert_eq!(
            calculate_price(dec!(42.5), &percent_voucher(dec!(0)), dec!(0)).unwrap(),
            dec!(42.5)
        );
        assert_eq!(
            calculate_price(dec!(42.5), &percent_voucher(dec!(100)), dec!(0)).unwrap(),
            Decimal::ZERO
        );

        let err = calculate_price(dec!(100), &percent_voucher(dec!(150)), dec!(0)).unwrap_err();
        assert!(matches!(err, PricingError::InvalidVoucher(_)));
        let err = calculate_discount(dec!(100), &percent_voucher(dec!(-5)), dec!(0)).unwrap_err();
        assert!(matches!(err, PricingError::InvalidVoucher(_)));
    }

    #[test]
    fn test_percent_price_plus_discount_is_base() {
        let bases = [dec!(0), dec!(0.01), dec!(9.99), dec!(19.95), dec!(100), dec!(1234.56)];
        for base in bases {
            let mut percent = Decimal::ZERO;
            while percent <= Decimal::ONE_HUNDRED {
                let voucher = percent_voucher(percent);
                let price = calculate_price(base, &voucher, dec!(0)).unwrap();
                let discount = calculate_discount(base, &voucher, dec!(0)).unwrap();
                assert!(
                    (price + discount - base).abs() <= TOLERANCE,
                    "base {base} percent {percent}: {price} + {discount}"
                );
                percent += dec!(2.5);
            }
        }
    }

    #[test]
    fn test_amount_example_clamps() {
        let voucher = Voucher::amount(dec!(10000));
        assert_eq!(calculate_price(dec!(50), &voucher, dec!(0)).unwrap(), dec!(0.00));
        assert_eq!(calculate_discount(dec!(50), &voucher, dec!(0)).unwrap(), dec!(50.00));
    }

    #[test]
    fn test_amount_partial() {
        let voucher = Voucher::amount(dec!(1250));
        assert_eq!(calculate_price(dec!(50), &voucher, dec!(0)).unwrap(), dec!(37.50));
        assert_eq!(calculate_discount(dec!(50), &voucher, dec!(0)).unwrap(), dec!(12.50));
    }

    #[test]
    fn test_amount_equal_to_base_reports_base() {
        let voucher = Voucher::amount(dec!(5000));
        assert_eq!(calculate_price(dec!(50), &voucher, dec!(0)).unwrap(), Decimal::ZERO);
        assert_eq!(calculate_discount(dec!(50), &voucher, dec!(0)).unwrap(), dec!(50));
    }

    #[test]
    fn test_amount_negative_is_invalid() {
        let voucher = Voucher::amount(dec!(-100));
        assert!(matches!(
            calculate_price(dec!(50), &voucher, dec!(0)),
            Err(PricingError::InvalidVoucher(_))
        ));
        assert!(matches!(
            calculate_discount(dec!(50), &voucher, dec!(0)),
            Err(PricingError::InvalidVoucher(_))
        ));
    }

    #[test]
    fn test_unit_example() {
        let voucher = Voucher::unit(dec!(4));
        assert_eq!(calculate_price(dec!(30), &voucher, dec!(5)).unwrap(), dec!(10.00));
        assert_eq!(calculate_discount(dec!(30), &voucher, dec!(5)).unwrap(), dec!(20.00));
    }

    #[test]
    fn test_unit_clamps_to_base() {
        let voucher = Voucher::unit(dec!(10));
        assert_eq!(calculate_price(dec!(30), &voucher, dec!(5)).unwrap(), Decimal::ZERO);
        assert_eq!(calculate_discount(dec!(30), &voucher, dec!(5)).unwrap(), dec!(30));
    }

    #[test]
    fn test_unit_negative_is_invalid() {
        let err = calculate_discount(dec!(30), &Voucher::unit(dec!(-1)), dec!(5)).unwrap_err();
        assert!(matches!(err, PricingError::InvalidVoucher(_)));
    }

    #[test]
    fn test_unit_product_beyond_decimal_range_caps_at_base() {
        let voucher = Voucher::from_value(json!({
            "discount": {"type": "UNIT", "unit_off": "1000000000000000"}
        }))
        .unwrap();
        let unit_price = dec!(100000000000000000);

        assert_eq!(calculate_price(dec!(30), &voucher, unit_price).unwrap(), Decimal::ZERO);
        assert_eq!(calculate_discount(dec!(30), &voucher, unit_price).unwrap(), dec!(30));

        let voucher = Voucher::unit(Decimal::MAX);
        let result = quote(dec!(12.5), &voucher, Decimal::MAX).unwrap();
        assert_eq!(result.price, Decimal::ZERO);
        assert_eq!(result.discount, dec!(12.5));
    }

    #[test]
    fn test_extreme_amounts_do_not_panic() {
        let price = calculate_price(Decimal::MAX, &Voucher::amount(Decimal::MAX), dec!(0)).unwrap();
        assert!(price > Decimal::ZERO);
        assert_eq!(
            calculate_discount(Decimal::MAX, &percent_voucher(dec!(100)), dec!(0)).unwrap(),
            Decimal::MAX
        );
        assert!(calculate_price(Decimal::MAX, &Voucher::gift(u64::MAX), dec!(0)).is_ok());
    }

    #[test]
    fn test_gift_example() {
        let voucher = Voucher::gift(10_000);
        assert_eq!(calculate_price(dec!(40), &voucher, dec!(0)).unwrap(), dec!(0.00));
        assert_eq!(calculate_discount(dec!(40), &voucher, dec!(0)).unwrap(), dec!(40.00));
    }

    #[test]
    fn test_gift_partial_balance() {
        let voucher = Voucher::gift(1_599);
        assert_eq!(calculate_price(dec!(40), &voucher, dec!(0)).unwrap(), dec!(24.01));
        assert_eq!(calculate_discount(dec!(40), &voucher, dec!(0)).unwrap(), dec!(15.99));
    }

    #[test]
    fn test_never_negative() {
        let vouchers = [
            Voucher::gift(0),
            Voucher::gift(u64::from(u32::MAX)),
            percent_voucher(dec!(100)),
            Voucher::amount(dec!(999999)),
            Voucher::unit(dec!(1000)),
        ];
        for voucher in &vouchers {
            for base in [dec!(0), dec!(0.01), dec!(5), dec!(99.99)] {
                let price = calculate_price(base, voucher, dec!(3.5)).unwrap();
                let discount = calculate_discount(base, voucher, dec!(3.5)).unwrap();
                assert!(price >= Decimal::ZERO, "{voucher:?} base {base} price {price}");
                assert!(discount >= Decimal::ZERO, "{voucher:?} base {base} discount {discount}");
            }
        }
    }

    #[test]
    fn test_quote() {
        let result = quote(dec!(30), &Voucher::unit(dec!(4)), dec!(5)).unwrap();
        assert_eq!(
            result,
            Quote {
                price: dec!(10),
                discount: dec!(20)
            }
        );

        assert!(quote(dec!(30), &percent_voucher(dec!(101)), dec!(5)).is_err());
    }
}
