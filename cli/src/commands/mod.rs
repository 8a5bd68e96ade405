//! Command implementations for the voucher CLI
//!
//! This module contains the individual command implementations, each in their own file
//! for better organization and maintainability.

pub mod price;
pub mod sign;
pub mod verify;

// Re-export command execution functions for easy access
pub use price::execute as execute_price;
pub use sign::execute as execute_sign;
pub use verify::execute as execute_verify;

/// Output format shared by all commands
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(format_str: &str) -> anyhow::Result<Self> {
        match format_str.to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!("Invalid output format: {format_str}")),
        }
    }
}
