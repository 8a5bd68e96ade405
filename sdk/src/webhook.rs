//! Webhook signature verification
//!
//! Webhook senders sign the message body with HMAC-SHA256 using a shared
//! secret and send the lowercase hex digest alongside it. Structured
//! messages are signed over their compact JSON serialization, with object
//! keys kept in the order they were received and numbers written as
//! [`to_canonical_json`] does.

#![forbid(unsafe_code)]

use crate::canonical::to_canonical_json;
use crate::error::Result;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::borrow::Cow;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// A message that can be reduced to the exact text that was signed
pub trait CanonicalMessage {
    /// Text form fed into the HMAC
    fn canonical_text(&self) -> Result<Cow<'_, str>>;
}

impl CanonicalMessage for str {
    fn canonical_text(&self) -> Result<Cow<'_, str>> {
        Ok(Cow::Borrowed(self))
    }
}

impl CanonicalMessage for String {
    fn canonical_text(&self) -> Result<Cow<'_, str>> {
        Ok(Cow::Borrowed(self.as_str()))
    }
}

impl CanonicalMessage for serde_json::Value {
    fn canonical_text(&self) -> Result<Cow<'_, str>> {
        match self {
            // Text payloads are signed as-is, not as a quoted JSON string
            Self::String(text) => Ok(Cow::Borrowed(text.as_str())),
            other => Ok(Cow::Owned(to_canonical_json(other)?)),
        }
    }
}

/// Compute the hex encoded HMAC-SHA256 signature of a message
///
/// # Examples
/// ```
/// use voucher_sdk::webhook::sign_message;
///
/// let signature = sign_message("Hello, World!", "It's a Secret to Everybody")?;
/// assert_eq!(
///     signature,
///     "757107ea0eb2509fc211221cce984b8a37570b6d7586c22c46f4379c8b043e17"
/// );
/// # Ok::<(), voucher_sdk::PricingError>(())
/// ```
///
/// # Errors
/// Returns an error if a structured message cannot be serialized
pub fn sign_message<M: CanonicalMessage + ?Sized>(
    message: &M,
    secret_key: &str,
) -> Result<String> {
    let text = message.canonical_text()?;
    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes())?;
    mac.update(text.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Check a webhook signature against a message
///
/// Returns true only when `signature` is exactly the lowercase hex digest of
/// the message. The comparison runs in constant time for equal lengths.
///
/// # Arguments
/// * `signature` - Signature received with the webhook
/// * `message` - Raw text body or decoded JSON payload
/// * `secret_key` - Shared webhook secret
pub fn verify_signature<M: CanonicalMessage + ?Sized>(
    signature: &str,
    message: &M,
    secret_key: &str,
) -> bool {
    let expected = match sign_message(message, secret_key) {
        Ok(expected) => expected,
        Err(e) => {
            tracing::debug!(
                service = "voucher-sdk",
                component = "webhook",
                event = "signature_error",
                error = %e,
                "Could not compute webhook signature"
            );
            return false;
        }
    };

    let valid = expected.len() == signature.len()
        && bool::from(expected.as_bytes().ct_eq(signature.as_bytes()));

    tracing::debug!(
        service = "voucher-sdk",
        component = "webhook",
        event = "signature_checked",
        signature_len = signature.len(),
        valid,
        "Webhook signature verification"
    );

    valid
}
