//! # Output Configuration
//!
//! Controls how the CLI decorates what it prints. Color is decided once from
//! the `--color` flag and the environment:
//!
//! - `--color=always|never|auto`
//! - `NO_COLOR` (any value) disables color in auto mode
//! - `CLICOLOR=0` disables color, `CLICOLOR_FORCE=1` forces it
//! - `TERM=dumb` disables color
//!
//! Otherwise the `console` crate decides based on whether stdout is a
//! terminal.

use std::env;

use console::style;

/// Status markers printed in front of summary lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Ok,
    Warn,
    Err,
}

/// Output configuration for the CLI.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Build from the `--color` flag value, falling back to environment
    /// detection for `auto` and unknown values.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// The marker text, colored when enabled.
    pub fn marker(&self, marker: Marker) -> String {
        let text = match marker {
            Marker::Ok => "[OK]",
            Marker::Warn => "[WARN]",
            Marker::Err => "[ERR]",
        };
        if !self.use_color {
            return text.to_string();
        }
        let styled = match marker {
            Marker::Ok => style(text).green(),
            Marker::Warn => style(text).yellow(),
            Marker::Err => style(text).red(),
        };
        styled.force_styling(true).to_string()
    }

    /// A repository name as shown in listings.
    pub fn repo_name(&self, name: &str) -> String {
        if self.use_color {
            style(name).bold().force_styling(true).to_string()
        } else {
            name.to_string()
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}
