//! Verify webhook command implementation

use crate::commands::OutputFormat;
use crate::config::VoucherCliConfig;
use anyhow::{anyhow, Result};
use tracing::{info, warn};
use voucher_sdk::verify_signature;

/// Execute the verify command
///
/// # Errors
///
/// Returns an error if:
/// - No secret is configured
/// - The message is not valid JSON while `parse_json` is set
/// - The signature does not match the message
pub fn execute(
    signature: &str,
    message: &str,
    secret_flag: Option<&str>,
    parse_json: bool,
    output_format: OutputFormat,
    config: &VoucherCliConfig,
) -> Result<String> {
    info!("Verifying webhook signature");

    let secret = config.resolve_secret(secret_flag).ok_or_else(|| {
        anyhow!("No webhook secret provided. Pass --secret or set VOUCHER_WEBHOOK_SECRET")
    })?;

    let valid = if parse_json {
        let payload: serde_json::Value = serde_json::from_str(message)
            .map_err(|e| anyhow!("Message is not valid JSON: {e}"))?;
        verify_signature(signature, &payload, secret)
    } else {
        verify_signature(signature, message, secret)
    };

    if !valid {
        warn!("Webhook signature mismatch");
        return Err(anyhow!("Signature does not match message"));
    }

    match output_format {
        OutputFormat::Human => Ok("Signature is valid".to_string()),
        OutputFormat::Json => Ok(serde_json::json!({ "valid": true }).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voucher_sdk::sign_message;

    fn config() -> VoucherCliConfig {
        VoucherCliConfig {
            webhook_secret: Some("whsec_cli".to_string()),
            default_output_format: "human".to_string(),
            default_unit_price: rust_decimal::Decimal::ZERO,
            currency_symbol: String::new(),
        }
    }

    #[test]
    fn test_verify_valid() {
        let signature = sign_message("body", "whsec_cli").unwrap();
        let output =
            execute(&signature, "body", None, false, OutputFormat::Human, &config()).unwrap();
        assert_eq!(output, "Signature is valid");
    }

    #[test]
    fn test_verify_json_payload() {
        let signature = sign_message(r#"{"id":1}"#, "whsec_cli").unwrap();
        let payload = r#"{ "id": 1 }"#;
        let output =
            execute(&signature, payload, None, true, OutputFormat::Json, &config()).unwrap();
        assert_eq!(output, r#"{"valid":true}"#);
    }

    #[test]
    fn test_verify_json_payload_with_float_literal() {
        let signature = sign_message(r#"{"total":15,"rate":0.5}"#, "whsec_cli").unwrap();
        let payload = r#"{"total": 15.0, "rate": 0.50}"#;
        let output =
            execute(&signature, payload, None, true, OutputFormat::Human, &config()).unwrap();
        assert_eq!(output, "Signature is valid");
    }

    #[test]
    fn test_verify_mismatch_is_error() {
        let signature = sign_message("body", "other_secret").unwrap();
        assert!(execute(&signature, "body", None, false, OutputFormat::Human, &config()).is_err());
        let secret = Some("other_secret");
        assert!(execute(&signature, "body", secret, false, OutputFormat::Human, &config()).is_ok());
    }

    #[test]
    fn test_verify_invalid_json() {
        let err = execute("00", "{", None, true, OutputFormat::Human, &config()).unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }
}
