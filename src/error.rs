//! # Error Handling
//!
//! This module defines the centralized error type for `mirrorconf`. It uses
//! the `thiserror` library to build a single `Error` enum that covers every
//! anticipated failure mode of a parse, with messages that name the file and
//! line involved.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all failures. Only [`Error::FileOpen`] for the
//!   root file aborts a parse; every other variant is recoverable and is
//!   recorded as a diagnostic while parsing continues.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Recoverable conditions include:
//!
//! - Included files that cannot be opened or read.
//! - Invalid or unreadable `Include` glob patterns.
//! - `Server` directives outside a section or inside `[options]`.
//! - Empty section headers.
//! - Lines longer than the configured limit.
//! - Include cycles and overly deep include chains.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for mirrorconf operations
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration file could not be opened.
    ///
    /// Fatal when it is the root file, a diagnostic when it is included.
    #[error("failed to open {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from an already opened file failed part way through.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The value of an `Include` directive is not a valid glob pattern.
    #[error("globbing failed on '{pattern}': {source}")]
    GlobPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// A path matched by an `Include` pattern could not be inspected.
    #[error("globbing failed on '{pattern}': {source}")]
    GlobEntry {
        pattern: String,
        #[source]
        source: glob::GlobError,
    },

    /// A `Server` directive appeared before any section header.
    #[error(
        "failed to parse {} on line {line}: found 'Server' directive outside of a section",
        path.display()
    )]
    ServerOutsideSection { path: PathBuf, line: usize },

    /// A `Server` directive appeared inside the `[options]` section.
    #[error(
        "failed to parse {} on line {line}: found 'Server' directive in options section",
        path.display()
    )]
    ServerInOptions { path: PathBuf, line: usize },

    /// A section header with nothing between the brackets.
    #[error("failed to parse {} on line {line}: empty section name", path.display())]
    EmptySectionName { path: PathBuf, line: usize },

    /// A line exceeded the configured maximum length and was skipped.
    #[error(
        "failed to parse {} on line {line}: line exceeds {limit} bytes",
        path.display()
    )]
    LineTooLong {
        path: PathBuf,
        line: usize,
        limit: usize,
    },

    /// A file includes itself, directly or through other files.
    #[error("include cycle detected: {cycle}")]
    IncludeCycle { cycle: String },

    /// The include chain grew deeper than the configured limit.
    #[error("not including {}: include depth limit of {limit} reached", path.display())]
    IncludeDepthExceeded { path: PathBuf, limit: usize },
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
