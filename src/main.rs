//! # mirrorconf CLI
//!
//! This is the binary entry point for the `mirrorconf` command-line tool.
//!
//! Its responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging so parse diagnostics reach stderr.
//! - Dispatching to the selected command and reporting errors.
//!
//! All parsing lives in the `mirrorconf` library; the binary is a thin
//! wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
