//! # Check Command Implementation
//!
//! This module implements the `check` subcommand, which parses the
//! configuration without printing it and summarizes what was found.
//!
//! ## Functionality
//!
//! - **Summary**: repository and server counts
//! - **Diagnostics**: each problem is printed with its file and line
//! - **Strict Mode**: `--strict` turns any diagnostic into a failure
//! - **Limits**: the line length and include depth limits can be tuned
//!
//! This command is read-only.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use mirrorconf::config::{
    ParseOptions, ParseReport, Parser, DEFAULT_MAX_INCLUDE_DEPTH, DEFAULT_MAX_LINE_LENGTH,
};
use mirrorconf::output::{Marker, OutputConfig};

/// Parse the configuration and report problems
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Fail when any problem is found, not only when the root file is
    /// unreadable.
    #[arg(long)]
    pub strict: bool,

    /// Maximum nesting of Include directives below the root file.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_INCLUDE_DEPTH)]
    pub max_include_depth: usize,

    /// Maximum length of a single line, in bytes.
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_LINE_LENGTH)]
    pub max_line_length: usize,
}

/// Execute the `check` command.
pub fn execute(args: CheckArgs, config: &Path, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let options = ParseOptions {
        max_line_length: args.max_line_length,
        max_include_depth: args.max_include_depth,
    };

    let report = match Parser::new().options(options).parse(config) {
        Ok(report) => report,
        Err(e) => {
            println!("{} {}", out.marker(Marker::Err), e);
            return Err(anyhow::anyhow!("Configuration check failed: {}", e));
        }
    };

    print_summary(&out, config, &report);

    if args.strict && !report.is_clean() {
        anyhow::bail!(
            "Configuration check failed: {} problem(s) in strict mode",
            report.diagnostics.len()
        );
    }

    Ok(())
}

fn print_summary(out: &OutputConfig, config: &Path, report: &ParseReport) {
    println!("Checked {}", config.display());
    println!("   Repositories: {}", report.repositories.len());
    println!("   Servers: {}", report.server_count());

    let empty: Vec<&str> = report
        .repositories
        .iter()
        .filter(|r| r.servers().is_empty())
        .map(|r| r.name())
        .collect();
    if !empty.is_empty() {
        println!(
            "{} Repositories without servers: {}",
            out.marker(Marker::Warn),
            empty.join(", ")
        );
    }

    if report.is_clean() {
        println!("{} No problems found", out.marker(Marker::Ok));
        return;
    }

    println!(
        "{} {} problem(s) found:",
        out.marker(Marker::Err),
        report.diagnostics.len()
    );
    for diagnostic in &report.diagnostics {
        println!("   {}", diagnostic);
    }
}
