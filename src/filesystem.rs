//! # Configuration Sources
//!
//! The parser never touches the filesystem directly. It goes through the
//! [`ConfigSource`] trait, which knows how to open a file for line reading
//! and how to expand an `Include` glob pattern into paths.
//!
//! - **`DiskFS`** reads real files and expands patterns with the `glob`
//!   crate. Relative paths resolve against the process working directory.
//! - **`MemoryFS`** keeps file contents in memory. Tests and benchmarks use it
//!   to build include trees without touching disk.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::error::{Error, Result};

/// Matching rules for `Include` patterns: `*` stays within one path
/// component and a leading `.` must be matched literally.
fn include_match_options() -> MatchOptions {
    MatchOptions {
        require_literal_separator: true,
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    }
}

/// Where configuration files come from.
pub trait ConfigSource {
    /// Open `path` for buffered reading.
    fn open(&self, path: &Path) -> io::Result<Box<dyn BufRead + '_>>;

    /// Expand a glob pattern.
    ///
    /// The outer error means the pattern itself is invalid. Individual
    /// entries may fail without affecting the others. An empty result means
    /// nothing matched.
    fn expand(&self, pattern: &str) -> Result<Vec<Result<PathBuf>>>;

    /// A stable identity for `path`, used to recognize the same file reached
    /// through different spellings.
    fn identity(&self, path: &Path) -> PathBuf {
        path.to_path_buf()
    }
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFS;

impl ConfigSource for DiskFS {
    fn open(&self, path: &Path) -> io::Result<Box<dyn BufRead + '_>> {
        let file = fs::File::open(path)?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn expand(&self, pattern: &str) -> Result<Vec<Result<PathBuf>>> {
        let paths = glob::glob_with(pattern, include_match_options()).map_err(|source| {
            Error::GlobPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;

        Ok(paths
            .map(|entry| {
                entry.map_err(|source| Error::GlobEntry {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect())
    }

    fn identity(&self, path: &Path) -> PathBuf {
        fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    }
}

/// In-memory files keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryFS {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryFS {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file
    pub fn add_file_string<P: AsRef<Path>>(&mut self, path: P, content: &str) {
        self.files
            .insert(path.as_ref().to_path_buf(), content.to_string());
    }

    /// Builder form of [`MemoryFS::add_file_string`].
    pub fn with_file<P: AsRef<Path>>(mut self, path: P, content: &str) -> Self {
        self.add_file_string(path, content);
        self
    }
}

impl ConfigSource for MemoryFS {
    fn open(&self, path: &Path) -> io::Result<Box<dyn BufRead + '_>> {
        match self.files.get(path) {
            Some(content) => Ok(Box::new(Cursor::new(content.as_bytes()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "No such file or directory",
            )),
        }
    }

    fn expand(&self, pattern: &str) -> Result<Vec<Result<PathBuf>>> {
        let compiled = Pattern::new(pattern).map_err(|source| Error::GlobPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        let options = include_match_options();

        Ok(self
            .files
            .keys()
            .filter(|path| compiled.matches_path_with(path, options))
            .cloned()
            .map(Ok)
            .collect())
    }
}
