//! Voucher types
//!
//! Callers send vouchers as loosely shaped JSON objects, discriminated by the
//! presence of a `gift` or a `discount` field:
//!
//! ```json
//! { "gift": { "balance": 10000 } }
//! { "discount": { "type": "PERCENT", "percent_off": 20 } }
//! ```
//!
//! [`VoucherDescriptor`] mirrors that wire shape field for field. It is
//! converted into the strongly typed [`Voucher`] before any pricing happens,
//! which is where unsupported shapes and missing values are rejected.

use crate::error::{PricingError, Result};
use crate::validation::{
    AMOUNT_DISCOUNT_MESSAGE, GIFT_BALANCE_MESSAGE, PERCENT_DISCOUNT_MESSAGE, UNIT_DISCOUNT_MESSAGE,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A voucher attached to an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "VoucherDescriptor", into = "VoucherDescriptor")]
pub enum Voucher {
    /// Prepaid gift card
    Gift {
        /// Remaining balance in minor currency units
        balance: u64,
    },
    /// Price reduction
    Discount(Discount),
}

/// The three supported price reductions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discount {
    /// Percentage of the base price, expected within `[0, 100]`
    Percent { percent_off: Decimal },
    /// Fixed amount in minor currency units
    Amount { amount_off: Decimal },
    /// Number of units, each worth the unit price
    Unit { unit_off: Decimal },
}

/// Discount type tag as it appears on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscountType {
    Percent,
    Amount,
    Unit,
}

impl DiscountType {
    /// Wire representation of the tag
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Percent => "PERCENT",
            Self::Amount => "AMOUNT",
            Self::Unit => "UNIT",
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PERCENT" => Ok(Self::Percent),
            "AMOUNT" => Ok(Self::Amount),
            "UNIT" => Ok(Self::Unit),
            other => Err(PricingError::UnsupportedDiscountType(other.to_string())),
        }
    }
}

impl Discount {
    /// Tag of this discount
    #[must_use]
    pub const fn discount_type(&self) -> DiscountType {
        match self {
            Self::Percent { .. } => DiscountType::Percent,
            Self::Amount { .. } => DiscountType::Amount,
            Self::Unit { .. } => DiscountType::Unit,
        }
    }
}

impl Voucher {
    /// Gift card voucher with a balance in minor units
    #[must_use]
    pub const fn gift(balance: u64) -> Self {
        Self::Gift { balance }
    }

    /// Percentage discount voucher
    #[must_use]
    pub const fn percent(percent_off: Decimal) -> Self {
        Self::Discount(Discount::Percent { percent_off })
    }

    /// Fixed amount discount voucher, `amount_off` in minor units
    #[must_use]
    pub const fn amount(amount_off: Decimal) -> Self {
        Self::Discount(Discount::Amount { amount_off })
    }

    /// Per-unit discount voucher
    #[must_use]
    pub const fn unit(unit_off: Decimal) -> Self {
        Self::Discount(Discount::Unit { unit_off })
    }

    /// Parse a voucher from its JSON wire shape
    ///
    /// # Examples
    /// ```
    /// use rust_decimal_macros::dec;
    /// use voucher_sdk::Voucher;
    ///
    /// let json = r#"{"discount":{"type":"PERCENT","percent_off":20}}"#;
    /// let voucher = Voucher::from_json_str(json)?;
    /// assert_eq!(voucher, Voucher::percent(dec!(20)));
    /// # Ok::<(), voucher_sdk::PricingError>(())
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let descriptor: VoucherDescriptor = serde_json::from_str(json)?;
        Self::try_from(descriptor)
    }

    /// Parse a voucher from an already decoded JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let descriptor: VoucherDescriptor = serde_json::from_value(value)?;
        Self::try_from(descriptor)
    }

    /// Short human label, e.g. `GIFT` or `PERCENT`
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Gift { .. } => "GIFT",
            Self::Discount(discount) => discount.discount_type().as_str(),
        }
    }
}

/// Wire shape of a voucher
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gift: Option<GiftDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<DiscountDescriptor>,
}

/// Wire shape of a gift card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftDescriptor {
    #[serde(default)]
    pub balance: Option<i64>,
}

/// Wire shape of a discount
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountDescriptor {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_off: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_off: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_off: Option<Decimal>,
}

impl TryFrom<VoucherDescriptor> for Voucher {
    type Error = PricingError;

    fn try_from(descriptor: VoucherDescriptor) -> Result<Self> {
        // Gift wins when both are present
        if let Some(gift) = descriptor.gift {
            let balance = gift
                .balance
                .and_then(|balance| u64::try_from(balance).ok())
                .ok_or_else(|| PricingError::invalid_voucher(GIFT_BALANCE_MESSAGE))?;
            return Ok(Self::Gift { balance });
        }

        let discount = descriptor
            .discount
            .ok_or(PricingError::UnsupportedVoucherType)?;
        Ok(Self::Discount(Discount::try_from(discount)?))
    }
}

impl TryFrom<DiscountDescriptor> for Discount {
    type Error = PricingError;

    fn try_from(descriptor: DiscountDescriptor) -> Result<Self> {
        let kind: DiscountType = descriptor.kind.as_deref().unwrap_or_default().parse()?;

        match kind {
            DiscountType::Percent => descriptor
                .percent_off
                .map(|percent_off| Self::Percent { percent_off })
                .ok_or_else(|| PricingError::invalid_voucher(PERCENT_DISCOUNT_MESSAGE)),
            DiscountType::Amount => descriptor
                .amount_off
                .map(|amount_off| Self::Amount { amount_off })
                .ok_or_else(|| PricingError::invalid_voucher(AMOUNT_DISCOUNT_MESSAGE)),
            DiscountType::Unit => descriptor
                .unit_off
                .map(|unit_off| Self::Unit { unit_off })
                .ok_or_else(|| PricingError::invalid_voucher(UNIT_DISCOUNT_MESSAGE)),
        }
    }
}

impl From<Voucher> for VoucherDescriptor {
    fn from(voucher: Voucher) -> Self {
        match voucher {
            Voucher::Gift { balance } => Self {
                gift: Some(GiftDescriptor {
                    balance: Some(i64::try_from(balance).unwrap_or(i64::MAX)),
                }),
                discount: None,
            },
            Voucher::Discount(discount) => Self {
                gift: None,
                discount: Some(discount.into()),
            },
        }
    }
}

impl From<Discount> for DiscountDescriptor {
    fn from(discount: Discount) -> Self {
        let mut descriptor = Self {
            kind: Some(discount.discount_type().as_str().to_string()),
            ..Self::default()
        };
        match discount {
            Discount::Percent { percent_off } => descriptor.percent_off = Some(percent_off),
            Discount::Amount { amount_off } => descriptor.amount_off = Some(amount_off),
            Discount::Unit { unit_off } => descriptor.unit_off = Some(unit_off),
        }
        descriptor
    }
}
