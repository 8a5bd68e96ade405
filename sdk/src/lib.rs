//! Voucher SDK - pricing and webhook verification for voucher redemption
//!
//! This crate provides the business rules behind voucher redemption:
//!
//! - Parsing voucher descriptors (gift cards and PERCENT, AMOUNT, UNIT discounts)
//! - Computing the final price and the discount amount, rounded to cents
//! - Signing and verifying HMAC-SHA256 webhook signatures
//!
//! # Example Usage
//!
//! ```
//! use rust_decimal_macros::dec;
//! use voucher_sdk::{
//!     calculate_discount, calculate_price, sign_message, verify_signature, Voucher,
//! };
//!
//! # fn main() -> voucher_sdk::Result<()> {
//! let voucher = Voucher::from_json_str(r#"{"gift":{"balance":10000}}"#)?;
//!
//! assert_eq!(calculate_price(dec!(40), &voucher, dec!(0))?, dec!(0));
//! assert_eq!(calculate_discount(dec!(40), &voucher, dec!(0))?, dec!(40));
//!
//! let body = r#"{"event":"voucher.redeemed"}"#;
//! let signature = sign_message(body, "whsec_secret")?;
//! assert!(verify_signature(&signature, body, "whsec_secret"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod canonical;
pub mod error;
pub mod money;
pub mod pricing;
pub mod validation;
pub mod voucher;
pub mod webhook;

// Re-export commonly used items
pub use error::{PricingError, Result};
pub use money::{format_money, minor_to_major, round_money};
pub use pricing::{calculate_discount, calculate_price, quote, Quote};
pub use validation::{
    validate_amount_discount, validate_percent_discount, validate_unit_discount,
};
pub use voucher::{
    Discount, DiscountDescriptor, DiscountType, GiftDescriptor, Voucher, VoucherDescriptor,
};
pub use webhook::{sign_message, verify_signature, CanonicalMessage};

// Re-export commonly used external types
pub use rust_decimal::Decimal;
