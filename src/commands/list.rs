//! # List Command Implementation
//!
//! This module implements the `list` subcommand, which parses the
//! configuration and prints every repository with its servers.
//!
//! ## Functionality
//!
//! - **Formats**: plain text, re-serialized configuration, or JSON
//! - **Filtering**: `--repo` restricts output to the named repositories
//! - **Expansion**: `--arch` substitutes `$repo` and `$arch` in servers
//!
//! Parse diagnostics go to stderr through the logger; they do not make the
//! command fail. Only an unreadable root file does.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use mirrorconf::config::Parser;
use mirrorconf::output::OutputConfig;
use mirrorconf::render;
use mirrorconf::repository::Repository;

/// List repositories and their servers
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show these repositories (repeatable).
    #[arg(short, long = "repo", value_name = "NAME")]
    pub repos: Vec<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ListFormat,

    /// Expand `$repo` and `$arch` in server URLs for this architecture.
    #[arg(long, value_name = "ARCH")]
    pub arch: Option<String>,
}

/// Output formats for `list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ListFormat {
    /// Repository names with indented servers
    #[default]
    Text,
    /// Configuration file syntax
    Conf,
    /// JSON array
    Json,
}

/// Execute the `list` command.
pub fn execute(args: ListArgs, config: &Path, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);

    let report = Parser::new()
        .parse(config)
        .with_context(|| format!("Failed to load config from {}", config.display()))?;

    let repositories = select(report.repositories, &args.repos)?;
    let repositories = match &args.arch {
        Some(arch) => expand(repositories, arch),
        None => repositories,
    };

    match args.format {
        ListFormat::Text => {
            for repo in &repositories {
                println!("{}", out.repo_name(repo.name()));
                for server in repo.servers() {
                    println!("    {}", server);
                }
            }
        }
        ListFormat::Conf => print!("{}", render::to_config(&repositories)),
        ListFormat::Json => println!("{}", render::to_json(&repositories)?),
    }

    Ok(())
}

/// Keep only the requested repositories, in configuration order. An empty
/// request keeps everything.
fn select(repositories: Vec<Repository>, wanted: &[String]) -> Result<Vec<Repository>> {
    if wanted.is_empty() {
        return Ok(repositories);
    }

    if let Some(missing) = wanted
        .iter()
        .find(|name| !repositories.iter().any(|r| r.name() == name.as_str()))
    {
        anyhow::bail!("Repository not found in configuration: {}", missing);
    }

    Ok(repositories
        .into_iter()
        .filter(|r| wanted.iter().any(|name| name == r.name()))
        .collect())
}

fn expand(repositories: Vec<Repository>, arch: &str) -> Vec<Repository> {
    repositories
        .iter()
        .map(|repo| {
            let mut expanded = Repository::new(repo.name());
            for server in repo.expand_servers(arch) {
                expanded.add_server(&server);
            }
            expanded.set_status(repo.status());
            expanded
        })
        .collect()
}
