//! Sign webhook command implementation

use crate::commands::OutputFormat;
use crate::config::VoucherCliConfig;
use anyhow::{anyhow, Result};
use tracing::info;
use voucher_sdk::sign_message;

/// Execute the sign command
///
/// With `parse_json` the message is decoded as JSON and signed over its
/// compact serialization, otherwise the text is signed byte for byte.
///
/// # Errors
/// Returns an error if no secret is configured or the message is not valid JSON
pub fn execute(
    message: &str,
    secret_flag: Option<&str>,
    parse_json: bool,
    output_format: OutputFormat,
    config: &VoucherCliConfig,
) -> Result<String> {
    info!("Signing webhook message ({} bytes)", message.len());

    let secret = config.resolve_secret(secret_flag).ok_or_else(|| {
        anyhow!("No webhook secret provided. Pass --secret or set VOUCHER_WEBHOOK_SECRET")
    })?;

    let signature = if parse_json {
        let payload: serde_json::Value = serde_json::from_str(message)
            .map_err(|e| anyhow!("Message is not valid JSON: {e}"))?;
        sign_message(&payload, secret)?
    } else {
        sign_message(message, secret)?
    };

    match output_format {
        OutputFormat::Human => Ok(signature),
        OutputFormat::Json => Ok(serde_json::json!({ "signature": signature }).to_string()),
    }
}
