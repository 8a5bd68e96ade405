//! Voucher CLI - Command-line interface for voucher pricing and webhook checks
//!
//! Computes final prices and discounts for gift and discount vouchers, and
//! signs or verifies HMAC-SHA256 webhook signatures.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use voucher_cli::commands::{
    self,
    price::{PriceRequest, PricingMode},
    OutputFormat,
};
use voucher_cli::config::VoucherCliConfig;

#[derive(Parser, Debug)]
#[command(
    name = "voucher-cli",
    version,
    about = "Command-line interface for voucher pricing and webhook verification",
    author = "Voucher Team"
)]
struct Cli {
    /// Output format
    #[arg(long, value_enum)]
    output: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct PricingArgs {
    /// Price before the voucher, in major currency units (e.g. 19.99)
    #[arg(long)]
    base_price: String,

    /// Voucher descriptor as JSON, e.g. '{"discount":{"type":"PERCENT","percent_off":20}}'
    #[arg(long)]
    voucher: String,

    /// Price of a single unit, used by UNIT discounts
    #[arg(long)]
    unit_price: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculate the price left to pay after applying a voucher
    Price(PricingArgs),

    /// Calculate the discount granted by a voucher
    Discount(PricingArgs),

    /// Calculate both price and discount
    Quote(PricingArgs),

    /// Compute the HMAC-SHA256 signature of a webhook message
    Sign {
        /// Message body
        #[arg(long)]
        message: String,

        /// Webhook secret (defaults to VOUCHER_WEBHOOK_SECRET)
        #[arg(long)]
        secret: Option<String>,

        /// Treat the message as JSON and sign its compact form
        #[arg(long)]
        json: bool,
    },

    /// Verify the HMAC-SHA256 signature of a webhook message
    Verify {
        /// Hex encoded signature received with the webhook
        #[arg(long)]
        signature: String,

        /// Message body
        #[arg(long)]
        message: String,

        /// Webhook secret (defaults to VOUCHER_WEBHOOK_SECRET)
        #[arg(long)]
        secret: Option<String>,

        /// Treat the message as JSON and verify against its compact form
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = VoucherCliConfig::new();

    // Use configuration with CLI overrides
    let default_output_format: OutputFormat = config.default_output_format.parse()?;
    let output_format = cli.output.unwrap_or(default_output_format);

    // Execute command
    let result = execute_command(&cli, output_format, &config);

    // Handle output formatting
    match result {
        Ok(output) => match output_format {
            OutputFormat::Human => println!("{output}"),
            OutputFormat::Json => {
                let data = serde_json::from_str::<serde_json::Value>(&output)
                    .unwrap_or(serde_json::Value::String(output));
                let json_output = serde_json::json!({
                    "success": true,
                    "data": data
                });
                println!("{}", serde_json::to_string_pretty(&json_output)?);
            }
        },
        Err(e) => {
            match output_format {
                OutputFormat::Human => eprintln!("Error: {e}"),
                OutputFormat::Json => {
                    let json_output = serde_json::json!({
                        "success": false,
                        "error": e.to_string()
                    });
                    println!("{}", serde_json::to_string_pretty(&json_output)?);
                }
            }
            std::process::exit(1);
        }
    }

    Ok(())
}

fn execute_command(
    cli: &Cli,
    output_format: OutputFormat,
    config: &VoucherCliConfig,
) -> Result<String> {
    match &cli.command {
        Commands::Price(args) => run_pricing(args, PricingMode::Price, output_format, config),
        Commands::Discount(args) => {
            run_pricing(args, PricingMode::Discount, output_format, config)
        }
        Commands::Quote(args) => run_pricing(args, PricingMode::Quote, output_format, config),

        Commands::Sign {
            message,
            secret,
            json,
        } => commands::execute_sign(message, secret.as_deref(), *json, output_format, config),

        Commands::Verify {
            signature,
            message,
            secret,
            json,
        } => commands::execute_verify(
            signature,
            message,
            secret.as_deref(),
            *json,
            output_format,
            config,
        ),
    }
}

fn run_pricing(
    args: &PricingArgs,
    mode: PricingMode,
    output_format: OutputFormat,
    config: &VoucherCliConfig,
) -> Result<String> {
    let request = PriceRequest {
        base_price: &args.base_price,
        voucher_json: &args.voucher,
        unit_price: args.unit_price.as_deref(),
    };
    commands::execute_price(&request, mode, output_format, config)
}
