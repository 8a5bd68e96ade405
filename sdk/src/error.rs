//! Error types for the voucher SDK
//!
//! Every pricing or signing call either fully succeeds or returns one of the
//! variants below. Callers are expected to translate them into user-facing
//! responses.
//!
//! # Example
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use voucher_sdk::{calculate_price, PricingError, Voucher};
//!
//! let outcome = Voucher::from_json_str(r#"{"discount":{"type":"FOO"}}"#)
//!     .and_then(|voucher| calculate_price(Decimal::ONE_HUNDRED, &voucher, Decimal::ZERO));
//!
//! match outcome {
//!     Ok(price) => println!("Final price: {price}"),
//!     Err(PricingError::UnsupportedDiscountType(kind)) => {
//!         println!("Discount type {kind:?} is not supported");
//!     }
//!     Err(other) => println!("Other error: {other}"),
//! }
//! ```

use thiserror::Error;

/// Result type for voucher SDK operations
pub type Result<T> = std::result::Result<T, PricingError>;

/// Error types that can occur when pricing a voucher or signing a webhook
#[derive(Error, Debug)]
pub enum PricingError {
    /// Discount value is missing or outside its valid range
    #[error("{0}")]
    InvalidVoucher(String),

    /// Voucher carries neither a gift nor a discount
    #[error("Unsupported voucher type.")]
    UnsupportedVoucherType,

    /// Discount type is not one of PERCENT, AMOUNT or UNIT
    #[error("Unsupported discount type. Got: {0:?}")]
    UnsupportedDiscountType(String),

    /// Decimal arithmetic would overflow
    #[error("Arithmetic operation would result in overflow or underflow.")]
    ArithmeticOverflow,

    /// Error from serde JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HMAC key was rejected
    #[error("Invalid webhook secret key: {0}")]
    InvalidKey(String),
}

impl PricingError {
    /// Build an `InvalidVoucher` error from a message
    #[must_use]
    pub fn invalid_voucher(msg: impl Into<String>) -> Self {
        Self::InvalidVoucher(msg.into())
    }

    /// Whether the error was caused by the voucher itself rather than I/O or keys
    #[must_use]
    pub const fn is_voucher_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidVoucher(_)
                | Self::UnsupportedVoucherType
                | Self::UnsupportedDiscountType(_)
        )
    }
}

impl From<hmac::digest::InvalidLength> for PricingError {
    fn from(error: hmac::digest::InvalidLength) -> Self {
        Self::InvalidKey(error.to_string())
    }
}
