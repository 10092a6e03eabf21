//! # mirrorconf
//!
//! This library parses pacman-style repository configuration: named
//! `[sections]`, each with an ordered list of `Server` mirrors, pulled
//! together from a root file and any files it brings in with
//! `Include = <glob>`. It is used by the `mirrorconf` command-line tool but
//! has no dependency on it.
//!
//! ## Quick Example
//!
//! ```
//! use mirrorconf::config::Parser;
//! use mirrorconf::filesystem::MemoryFS;
//!
//! let fs = MemoryFS::new()
//!     .with_file("pacman.conf", "[options]\nArchitecture = auto\n\n[core]\nInclude = mirrorlist\n")
//!     .with_file("mirrorlist", "Server = https://mirror.example.com/$repo/os/$arch\n");
//!
//! let report = Parser::with_source(fs).parse("pacman.conf").unwrap();
//! assert_eq!(report.repositories.len(), 1);
//! assert_eq!(report.repositories[0].name(), "core");
//! assert_eq!(
//!     report.repositories[0].expand_servers("x86_64"),
//!     ["https://mirror.example.com/core/os/x86_64"]
//! );
//! ```
//!
//! ## Modules
//!
//! - **`config`**: The line parser, include handling and parse limits.
//! - **`repository`**: The `Repository` record produced for each section.
//! - **`filesystem`**: The `ConfigSource` seam, with disk and in-memory
//!   implementations.
//! - **`render`**: Writing records back out as configuration text or JSON.
//! - **`error`**: The error type shared by all of the above.
//! - **`output`**: Terminal color settings for the CLI.

pub mod config;
pub mod error;
pub mod filesystem;
pub mod output;
pub mod render;
pub mod repository;

#[cfg(test)]
mod render_proptest;
