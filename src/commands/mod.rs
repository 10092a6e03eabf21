//! # CLI Command Implementations
//!
//! Each subcommand of `mirrorconf` lives in its own file with:
//! - An `Args` struct deriving `clap::Args`.
//! - An `execute` function that runs the command on top of the
//!   `mirrorconf` library.

pub mod check;
pub mod completions;
pub mod list;
