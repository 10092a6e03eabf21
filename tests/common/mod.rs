//! Shared test utilities for integration and E2E tests.
//!
//! Add `mod common;` to a test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_config(configs::TWO_REPOS);
//!     fixture.command().arg("list").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    pub use super::TestFixture;
}

/// Common configuration snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// Two repositories, three servers.
    pub const TWO_REPOS: &str = "\
[options]
Architecture = auto

[core]
Server = http://a

[extra]
Server = http://b
Server = http://c
";

    /// A server line in the options section.
    pub const SERVER_IN_OPTIONS: &str = "\
[options]
Server = http://x
[core]
Server = http://a
";

    /// Repositories pulled in through a relative include.
    pub const WITH_INCLUDE: &str = "\
[core]
Server = http://core/$repo/os/$arch

Include = sub/*.conf
";

    /// Comments and padding only.
    pub const EMPTY: &str = "# nothing to see here\n\n   \n";
}

/// A temporary directory holding a root `pacman.conf` and any extra files.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write the root `pacman.conf`.
    pub fn with_config(self, content: &str) -> Self {
        self.with_file("pacman.conf", content)
    }

    /// Write a file relative to the fixture root, creating parent directories.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("pacman.conf")
    }

    /// A `mirrorconf` command running inside the fixture with `--config`
    /// pointing at its `pacman.conf` and no inherited overrides.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("mirrorconf");
        cmd.current_dir(self.path())
            .env_remove("MIRRORCONF_CONFIG")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .arg("--config")
            .arg(self.config_path());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
