//! Compact JSON text for structured webhook messages
//!
//! Senders produce the signed body with a JavaScript style serializer, which
//! writes integral floats without a fraction (`15`, not `15.0`) and switches
//! to exponent notation outside `1e-7..1e21`. Numbers here are written the
//! same way so a decoded payload reproduces the exact bytes that were signed.

#![forbid(unsafe_code)]

use crate::error::Result;
use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter};
use std::io;

/// Largest decimal exponent written without exponent notation
const MAX_PLAIN_EXPONENT: i32 = 21;

/// Smallest decimal exponent written without exponent notation
const MIN_PLAIN_EXPONENT: i32 = -6;

/// Compact formatter that writes floats the way `JSON.stringify` does
#[derive(Debug, Clone, Copy, Default)]
pub struct JsNumberFormatter;

impl Formatter for JsNumberFormatter {
    fn write_f32<W>(&mut self, writer: &mut W, value: f32) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.write_f64(writer, f64::from(value))
    }

    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        match js_number_string(value) {
            Some(text) => writer.write_all(text.as_bytes()),
            None => CompactFormatter.write_f64(writer, value),
        }
    }
}

/// Serialize a value to compact JSON with JavaScript number formatting
///
/// # Examples
/// ```
/// use serde_json::json;
/// use voucher_sdk::canonical::to_canonical_json;
///
/// let text = to_canonical_json(&json!({"total": 15.0, "rate": 0.1}))?;
/// assert_eq!(text, r#"{"total":15,"rate":0.1}"#);
/// # Ok::<(), voucher_sdk::PricingError>(())
/// ```
pub fn to_canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, JsNumberFormatter);
    value.serialize(&mut serializer)?;
    // The serializer only ever writes UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Shortest round-trip text of a finite float, laid out like JavaScript
///
/// Returns `None` for non-finite values, which JSON cannot carry.
#[must_use]
pub fn js_number_string(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    if value == 0.0 {
        return Some("0".to_string());
    }

    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific.split_once('e')?;
    let exponent: i32 = exponent.parse().ok()?;
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    let digit_count = i32::try_from(digits.len()).ok()?;
    let point = exponent.saturating_add(1);

    let mut text = String::with_capacity(digits.len().saturating_add(8));
    if value.is_sign_negative() {
        text.push('-');
    }

    if digit_count <= point && point <= MAX_PLAIN_EXPONENT {
        text.push_str(&digits);
        text.push_str(&zeros(point.saturating_sub(digit_count))?);
    } else if 0 < point && point <= MAX_PLAIN_EXPONENT {
        let split = usize::try_from(point).ok()?;
        text.push_str(digits.get(..split)?);
        text.push('.');
        text.push_str(digits.get(split..)?);
    } else if MIN_PLAIN_EXPONENT < point && point <= 0 {
        text.push_str("0.");
        text.push_str(&zeros(point.saturating_neg())?);
        text.push_str(&digits);
    } else {
        text.push_str(digits.get(..1)?);
        if digits.len() > 1 {
            text.push('.');
            text.push_str(digits.get(1..)?);
        }
        text.push('e');
        text.push(if exponent < 0 { '-' } else { '+' });
        text.push_str(&exponent.unsigned_abs().to_string());
    }

    Some(text)
}

fn zeros(count: i32) -> Option<String> {
    Some("0".repeat(usize::try_from(count).ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integral_floats_drop_fraction() {
        assert_eq!(js_number_string(15.0).as_deref(), Some("15"));
        assert_eq!(js_number_string(-3.0).as_deref(), Some("-3"));
        assert_eq!(js_number_string(100.0).as_deref(), Some("100"));
        assert_eq!(js_number_string(-0.0).as_deref(), Some("0"));
    }

    #[test]
    fn test_fractions() {
        assert_eq!(js_number_string(1.5).as_deref(), Some("1.5"));
        assert_eq!(js_number_string(0.1).as_deref(), Some("0.1"));
        assert_eq!(js_number_string(19.99).as_deref(), Some("19.99"));
        assert_eq!(js_number_string(-0.25).as_deref(), Some("-0.25"));
        assert_eq!(js_number_string(0.000_001).as_deref(), Some("0.000001"));
    }

    #[test]
    fn test_exponent_thresholds() {
        assert_eq!(
            js_number_string(1.234_567_890_123_456_8e20).as_deref(),
            Some("123456789012345680000")
        );
        assert_eq!(js_number_string(1e21).as_deref(), Some("1e+21"));
        assert_eq!(js_number_string(1.5e300).as_deref(), Some("1.5e+300"));
        assert_eq!(js_number_string(1e-7).as_deref(), Some("1e-7"));
        assert_eq!(js_number_string(-2.5e-8).as_deref(), Some("-2.5e-8"));
    }

    #[test]
    fn test_non_finite_has_no_text() {
        assert!(js_number_string(f64::NAN).is_none());
        assert!(js_number_string(f64::INFINITY).is_none());
    }

    #[test]
    fn test_canonical_json_keeps_key_order_and_integers() {
        let value = json!({"z": 1, "a": [1.0, 2.5, -7], "n": null, "s": "x"});
        assert_eq!(
            to_canonical_json(&value).unwrap(),
            r#"{"z":1,"a":[1,2.5,-7],"n":null,"s":"x"}"#
        );
        assert_eq!(to_canonical_json(&json!(u64::MAX)).unwrap(), u64::MAX.to_string());
    }
}
