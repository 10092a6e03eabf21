//! # Mirror Configuration Parsing
//!
//! This module turns a pacman-style configuration file into an ordered list
//! of [`Repository`] records.
//!
//! ## Format
//!
//! ```text
//! [options]
//! Architecture = auto
//!
//! [core]
//! Server = https://mirror.example.com/$repo/os/$arch
//! Include = /etc/pacman.d/mirrorlist
//! ```
//!
//! - `#` starts a comment that runs to the end of the line.
//! - Lines are trimmed. Blank lines are skipped.
//! - `[name]` starts a section. Every section except `[options]` produces a
//!   repository, in the order the headers are read.
//! - `key = value` lines are split at the first `=`. Only `Server` and
//!   `Include` mean anything here; other keys are ignored.
//! - `Server` appends to the most recently created repository.
//! - `Include` expands a glob pattern and parses each match in place, as if
//!   its lines were written where the directive is. A pattern that matches
//!   nothing is tried as a literal path, so a missing include is reported
//!   rather than silently dropped.
//!
//! ## Parse State
//!
//! One [`ParseContext`] is threaded through the root file and every included
//! file. Section state therefore carries across file boundaries in both
//! directions: an included file starts inside the includer's section, and
//! the includer continues inside whatever section the included file ended
//! in.
//!
//! ## Errors
//!
//! Only failing to open the root file aborts a parse. Everything else is a
//! diagnostic: it is logged through the `log` facade, collected in the
//! [`ParseReport`], and parsing carries on with the next line or file.

use std::borrow::Cow;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use log::{debug, error, warn};

use crate::error::{Error, Result};
use crate::filesystem::{ConfigSource, DiskFS};
use crate::repository::Repository;

/// Default upper bound on a single line, in bytes.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 64 * 1024;

/// Default number of nested `Include` levels below the root file.
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 32;

/// Section whose directives never describe a repository.
pub const OPTIONS_SECTION: &str = "options";

const SERVER_KEY: &str = "Server";
const INCLUDE_KEY: &str = "Include";

/// Limits applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Lines longer than this many bytes are skipped with
    /// [`Error::LineTooLong`].
    pub max_line_length: usize,
    /// Includes nested deeper than this are refused with
    /// [`Error::IncludeDepthExceeded`].
    pub max_include_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }
}

/// Result of a parse whose root file could be opened.
#[derive(Debug)]
pub struct ParseReport {
    /// Repositories in the order their section headers were read.
    pub repositories: Vec<Repository>,
    /// Recoverable problems, in the order they were found.
    pub diagnostics: Vec<Error>,
}

impl ParseReport {
    /// True when nothing was reported.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Total servers across all repositories.
    pub fn server_count(&self) -> usize {
        self.repositories.iter().map(|r| r.servers().len()).sum()
    }
}

/// One line after comment removal and trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Nothing left once the comment and whitespace are gone.
    Blank,
    /// `[name]`
    Section(&'a str),
    /// `[]`
    EmptySection,
    /// `key = value`, both sides trimmed.
    Directive { key: &'a str, value: &'a str },
    /// Anything else. Ignored.
    Other,
}

/// Classify a raw line.
pub fn classify(raw: &str) -> Line<'_> {
    let uncommented = match raw.find('#') {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    let line = uncommented.trim();

    if line.is_empty() {
        return Line::Blank;
    }

    if line.starts_with('[') && line.ends_with(']') {
        let name = &line[1..line.len() - 1];
        return if name.is_empty() {
            Line::EmptySection
        } else {
            Line::Section(name)
        };
    }

    match line.split_once('=') {
        Some((key, value)) => Line::Directive {
            key: key.trim(),
            value: value.trim(),
        },
        None => Line::Other,
    }
}

/// State shared by the root file and every file it includes.
#[derive(Debug, Default)]
struct ParseContext {
    section: Option<String>,
    in_options: bool,
    /// Index into `repositories` of the record receiving `Server` lines.
    active: Option<usize>,
    repositories: Vec<Repository>,
    /// Identities of the files currently being read, root first.
    include_stack: Vec<PathBuf>,
    diagnostics: Vec<Error>,
}

impl ParseContext {
    fn enter_section(&mut self, name: &str) {
        self.section = Some(name.to_string());

        if name == OPTIONS_SECTION {
            self.in_options = true;
            self.active = None;
        } else {
            self.in_options = false;
            self.repositories.push(Repository::new(name));
            self.active = Some(self.repositories.len() - 1);
        }
    }

    fn add_server(&mut self, path: &Path, line: usize, server: &str) -> Result<()> {
        match self.active {
            Some(index) => {
                self.repositories[index].add_server(server);
                Ok(())
            }
            None if self.in_options => Err(Error::ServerInOptions {
                path: path.to_path_buf(),
                line,
            }),
            None => Err(Error::ServerOutsideSection {
                path: path.to_path_buf(),
                line,
            }),
        }
    }

    fn report(&mut self, diagnostic: Error) {
        match diagnostic {
            Error::GlobEntry { .. } => warn!("{}", diagnostic),
            _ => error!("{}", diagnostic),
        }
        self.diagnostics.push(diagnostic);
    }
}

/// Outcome of reading one line.
#[derive(Debug, PartialEq, Eq)]
enum LineRead {
    Line,
    TooLong,
    Eof,
}

/// Read one `\n`-terminated line into `buf`, without the terminator.
///
/// A line longer than `limit` bytes is consumed in full but not stored.
fn read_bounded_line<R: BufRead + ?Sized>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    limit: usize,
) -> io::Result<LineRead> {
    let mut read_any = false;
    let mut overflow = false;

    loop {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            break;
        }
        read_any = true;

        let (chunk, used, done) = match available.iter().position(|&b| b == b'\n') {
            Some(pos) => (&available[..pos], pos + 1, true),
            None => (available, available.len(), false),
        };

        if !overflow {
            if buf.len() + chunk.len() > limit {
                overflow = true;
                buf.clear();
            } else {
                buf.extend_from_slice(chunk);
            }
        }

        reader.consume(used);
        if done {
            break;
        }
    }

    Ok(match (read_any, overflow) {
        (false, _) => LineRead::Eof,
        (true, true) => LineRead::TooLong,
        (true, false) => LineRead::Line,
    })
}

/// Parses mirror configuration from a [`ConfigSource`].
#[derive(Debug, Clone)]
pub struct Parser<S = DiskFS> {
    source: S,
    options: ParseOptions,
}

impl Parser<DiskFS> {
    /// A parser reading from disk with default limits.
    pub fn new() -> Self {
        Self::with_source(DiskFS)
    }
}

impl Default for Parser<DiskFS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ConfigSource> Parser<S> {
    /// A parser reading from `source` with default limits.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            options: ParseOptions::default(),
        }
    }

    /// Replace the parse limits.
    pub fn options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse `root` and everything it includes.
    ///
    /// Fails only if `root` itself cannot be opened. The root is opened
    /// before any parse state exists, so a failure never leaves a partial
    /// result behind.
    pub fn parse<P: AsRef<Path>>(&self, root: P) -> Result<ParseReport> {
        let root = root.as_ref();
        let reader = self.source.open(root).map_err(|source| Error::FileOpen {
            path: root.to_path_buf(),
            source,
        })?;

        let mut ctx = ParseContext::default();
        ctx.include_stack.push(self.source.identity(root));
        self.parse_lines(root, reader, &mut ctx);

        debug!(
            "parsed {}: {} repositories, {} diagnostics",
            root.display(),
            ctx.repositories.len(),
            ctx.diagnostics.len()
        );

        Ok(ParseReport {
            repositories: ctx.repositories,
            diagnostics: ctx.diagnostics,
        })
    }

    /// Parse an included file into `ctx`. Problems are reported, never
    /// returned.
    fn parse_file(&self, path: &Path, ctx: &mut ParseContext) {
        let identity = self.source.identity(path);

        if ctx.include_stack.contains(&identity) {
            let cycle = ctx
                .include_stack
                .iter()
                .chain(std::iter::once(&identity))
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            ctx.report(Error::IncludeCycle { cycle });
            return;
        }

        if ctx.include_stack.len() > self.options.max_include_depth {
            ctx.report(Error::IncludeDepthExceeded {
                path: path.to_path_buf(),
                limit: self.options.max_include_depth,
            });
            return;
        }

        let reader = match self.source.open(path) {
            Ok(reader) => reader,
            Err(source) => {
                ctx.report(Error::FileOpen {
                    path: path.to_path_buf(),
                    source,
                });
                return;
            }
        };

        ctx.include_stack.push(identity);
        self.parse_lines(path, reader, ctx);
        ctx.include_stack.pop();
    }

    fn parse_lines(
        &self,
        path: &Path,
        mut reader: Box<dyn BufRead + '_>,
        ctx: &mut ParseContext,
    ) {
        let limit = self.options.max_line_length;
        let mut buf = Vec::new();
        let mut lineno = 0;

        loop {
            buf.clear();
            let read = match read_bounded_line(&mut reader, &mut buf, limit) {
                Ok(read) => read,
                Err(source) => {
                    ctx.report(Error::Read {
                        path: path.to_path_buf(),
                        source,
                    });
                    break;
                }
            };

            if read == LineRead::Eof {
                break;
            }
            lineno += 1;

            if read == LineRead::TooLong {
                ctx.report(Error::LineTooLong {
                    path: path.to_path_buf(),
                    line: lineno,
                    limit,
                });
                continue;
            }

            let text: Cow<'_, str> = String::from_utf8_lossy(&buf);
            self.parse_line(path, lineno, &text, ctx);
        }
    }

    fn parse_line(&self, path: &Path, lineno: usize, text: &str, ctx: &mut ParseContext) {
        match classify(text) {
            Line::Blank | Line::Other => {}
            Line::EmptySection => ctx.report(Error::EmptySectionName {
                path: path.to_path_buf(),
                line: lineno,
            }),
            Line::Section(name) => ctx.enter_section(name),
            Line::Directive {
                key: SERVER_KEY,
                value,
            } => {
                if let Err(e) = ctx.add_server(path, lineno, value) {
                    ctx.report(e);
                }
            }
            Line::Directive {
                key: INCLUDE_KEY,
                value,
            } => self.include(value, ctx),
            Line::Directive { key, .. } => {
                debug!(
                    "{} line {}: ignoring directive '{}' in section {:?}",
                    path.display(),
                    lineno,
                    key,
                    ctx.section
                );
            }
        }
    }

    fn include(&self, pattern: &str, ctx: &mut ParseContext) {
        let entries = match self.source.expand(pattern) {
            Ok(entries) => entries,
            // Not a valid pattern, so it can only name a file literally
            Err(e @ Error::GlobPattern { .. }) => {
                debug!("{}, trying it as a literal path", e);
                Vec::new()
            }
            Err(e) => {
                ctx.report(e);
                return;
            }
        };

        if entries.is_empty() {
            self.parse_file(Path::new(pattern), ctx);
            return;
        }

        for entry in entries {
            match entry {
                Ok(path) => self.parse_file(&path, ctx),
                Err(e) => ctx.report(e),
            }
        }
    }
}

/// Parse a configuration file from disk with default limits.
///
/// Diagnostics are logged and otherwise discarded; use [`Parser::parse`] to
/// inspect them.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Repository>> {
    Parser::new().parse(path).map(|report| report.repositories)
}
