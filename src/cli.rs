//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Default root configuration file.
pub const DEFAULT_CONFIG: &str = "/etc/pacman.conf";

/// mirrorconf - Inspect repositories and mirrors in pacman-style configuration
#[derive(Parser, Debug)]
#[command(name = "mirrorconf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Root configuration file to parse
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        env = "MIRRORCONF_CONFIG",
        default_value = DEFAULT_CONFIG
    )]
    config: PathBuf,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List repositories and their servers
    List(commands::list::ListArgs),

    /// Parse the configuration and report problems
    Check(commands::check::CheckArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::List(args) => commands::list::execute(args, &self.config, &self.color),
            Commands::Check(args) => commands::check::execute(args, &self.config, &self.color),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Route `log` records to stderr. `RUST_LOG`, when set, wins over the flag.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .init();
}
