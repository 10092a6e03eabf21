//! Rendering parsed repositories back out.
//!
//! [`to_config`] writes the same format the parser reads, so its output
//! parses back to identical records as long as names and servers contain no
//! `#`, no surrounding whitespace, and no repository is named `options`.

use std::fmt::{self, Write as _};

use crate::repository::Repository;

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.name())?;
        for server in self.servers() {
            writeln!(f, "Server = {}", server)?;
        }
        Ok(())
    }
}

/// Render repositories as configuration text, one blank line between
/// sections.
pub fn to_config(repositories: &[Repository]) -> String {
    let mut out = String::new();
    for (i, repo) in repositories.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        // Writing to a String cannot fail
        let _ = write!(out, "{}", repo);
    }
    out
}

/// Render repositories as a pretty-printed JSON array.
pub fn to_json(repositories: &[Repository]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(repositories)
}
