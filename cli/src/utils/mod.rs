//! Shared helpers for CLI commands

pub mod formatting;
