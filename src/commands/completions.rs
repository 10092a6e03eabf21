//! # Completions Command Implementation
//!
//! Prints a shell completion script for `mirrorconf` to stdout, generated
//! by `clap_complete` from the CLI definition.
//!
//! ```bash
//! mirrorconf completions bash > ~/.local/share/bash-completion/completions/mirrorconf
//! mirrorconf completions zsh > ~/.zfunc/_mirrorconf
//! ```

use std::io;

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the `completions` command.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(args.shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
