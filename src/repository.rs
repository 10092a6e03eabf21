//! # Repository Records
//!
//! A [`Repository`] is the parsed form of one `[section]` of a mirror
//! configuration: a name and the ordered list of servers declared for it.
//! Server order is mirror priority, so it is preserved exactly as written and
//! never deduplicated.
//!
//! Records carry a [`RepoStatus`] that starts out as [`RepoStatus::Failed`].
//! The parser never touches it; it exists for consumers that go on to sync
//! against the mirrors and want to record the outcome on the record itself.

use serde::Serialize;

/// Outcome of the last operation a consumer performed against a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoStatus {
    /// Nothing has succeeded yet. Every new record starts here.
    #[default]
    Failed,
    /// A consumer completed its operation against this repository.
    Ok,
}

/// A named repository and its mirror servers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    name: String,
    servers: Vec<String>,
    status: RepoStatus,
}

impl Repository {
    /// Create a repository with no servers.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            servers: Vec::new(),
            status: RepoStatus::default(),
        }
    }

    /// Append a server, keeping declaration order.
    pub fn add_server(&mut self, server: &str) {
        self.servers.push(server.to_owned());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Servers in declaration order. May contain `$repo` and `$arch`
    /// placeholders.
    pub fn servers(&self) -> &[String] {
        &self.servers
    }

    pub fn status(&self) -> RepoStatus {
        self.status
    }

    pub fn set_status(&mut self, status: RepoStatus) {
        self.status = status;
    }

    /// Servers with `$repo` replaced by the repository name and `$arch` by
    /// `arch`.
    pub fn expand_servers(&self, arch: &str) -> Vec<String> {
        self.servers
            .iter()
            .map(|server| server.replace("$repo", &self.name).replace("$arch", arch))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_repository_is_empty_and_failed() {
        let repo = Repository::new("core");
        assert_eq!(repo.name(), "core");
        assert!(repo.servers().is_empty());
        assert_eq!(repo.status(), RepoStatus::Failed);
    }

    #[test]
    fn test_add_server_preserves_order_and_duplicates() {
        let mut repo = Repository::new("extra");
        repo.add_server("https://b.example.com");
        repo.add_server("https://a.example.com");
        repo.add_server("https://b.example.com");

        assert_eq!(
            repo.servers(),
            [
                "https://b.example.com",
                "https://a.example.com",
                "https://b.example.com"
            ]
        );
    }

    #[test]
    fn test_add_server_copies_value() {
        let mut repo = Repository::new("core");
        let mut url = String::from("https://mirror.example.com");
        repo.add_server(&url);
        url.push_str("/changed");

        assert_eq!(repo.servers(), ["https://mirror.example.com"]);
    }

    #[test]
    fn test_set_status() {
        let mut repo = Repository::new("core");
        repo.set_status(RepoStatus::Ok);
        assert_eq!(repo.status(), RepoStatus::Ok);
    }

    #[test]
    fn test_expand_servers() {
        let mut repo = Repository::new("community");
        repo.add_server("https://mirror.example.com/$repo/os/$arch");
        repo.add_server("file:///srv/static");

        assert_eq!(
            repo.expand_servers("x86_64"),
            [
                "https://mirror.example.com/community/os/x86_64",
                "file:///srv/static"
            ]
        );
        // Stored templates are untouched
        assert_eq!(
            repo.servers()[0],
            "https://mirror.example.com/$repo/os/$arch"
        );
    }

    #[test]
    fn test_serialize_json() {
        let mut repo = Repository::new("core");
        repo.add_server("http://a");
        let json = serde_json::to_value(&repo).unwrap();

        assert_eq!(json["name"], "core");
        assert_eq!(json["servers"][0], "http://a");
        assert_eq!(json["status"], "failed");
    }
}
