//! CLI Adapter
//!
//! Command-line interface for the pair scanner.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{CliApp, Command, ScanCmd, SearchCmd, ValidateCmd};

use anyhow::Result;

/// Execute the CLI command
pub async fn execute(app: CliApp) -> Result<()> {
    commands::execute(app).await
}
