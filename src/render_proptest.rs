//! Property-based tests for rendering and re-parsing configuration.
//!
//! These tests use proptest to generate random repository lists and verify
//! that rendering them and parsing the result gives the same list back.

#[cfg(test)]
mod proptest_tests {
    use crate::config::{classify, Line, Parser, OPTIONS_SECTION};
    use crate::filesystem::MemoryFS;
    use crate::render::to_config;
    use crate::repository::Repository;
    use proptest::prelude::*;

    fn repo_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9._-]{0,15}".prop_filter("options never produces a repository", |name| {
            name != OPTIONS_SECTION
        })
    }

    fn server() -> impl Strategy<Value = String> {
        "https?://[a-z0-9.]{1,12}(/[a-zA-Z0-9$._=-]{1,10}){0,4}"
    }

    fn repository() -> impl Strategy<Value = Repository> {
        (repo_name(), prop::collection::vec(server(), 0..5)).prop_map(|(name, servers)| {
            let mut repo = Repository::new(name);
            for s in &servers {
                repo.add_server(s);
            }
            repo
        })
    }

    proptest! {
        /// Property: rendering then parsing preserves names, servers and order
        #[test]
        fn render_then_parse_round_trips(repos in prop::collection::vec(repository(), 0..8)) {
            let fs = MemoryFS::new().with_file("round.conf", &to_config(&repos));
            let report = Parser::with_source(fs).parse("round.conf").unwrap();

            prop_assert!(report.is_clean());
            prop_assert_eq!(report.repositories, repos);
        }

        /// Property: surrounding whitespace and trailing comments never change a line
        #[test]
        fn classify_ignores_padding_and_comments(
            key in "[A-Za-z]{1,10}",
            value in "[a-z0-9:/.$]{0,20}",
            left in "[ \t]{0,4}",
            right in "[ \t]{0,4}",
            comment in "[ -~]{0,20}",
        ) {
            let plain = format!("{}={}", key, value);
            let padded = format!("{left}{key}{right}={left}{value}{right}#{comment}");

            prop_assert_eq!(classify(&padded), classify(&plain));
            prop_assert_eq!(
                classify(&plain),
                Line::Directive { key: &key, value: &value }
            );
        }

        /// Property: classify never panics on arbitrary input
        #[test]
        fn classify_never_panics(input in ".*") {
            let _ = classify(&input);
        }
    }
}
