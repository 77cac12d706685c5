//! Parsing of `#include_code` macro lines
//!
//! Grammar (one line, whitespace separated):
//!
//! ```text
//! #include_code <identifier> <filePath> <language> [options]
//! ```
//!
//! `options` is a single token scanned for the substrings `noTitle`, `noLineNumbers` and
//! `noSourceLink`, so `noTitle,noSourceLink` and `noTitlenoSourceLink` mean the same thing.

use once_cell::sync::Lazy;
use regex::Regex;

static INVOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#include_code\s+(\S+)\s+(\S+)\s+(\S+)(?:\s+(\S+))?$")
        .expect("invocation pattern is a valid regex")
});

/// Language token that requests the bare snippet instead of a code block.
pub const RAW_LANGUAGE: &str = "raw";

/// Presentation flags parsed from the optional fourth token.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IncludeOptions {
    pub no_title: bool,
    pub no_line_numbers: bool,
    pub no_source_link: bool,
}

impl IncludeOptions {
    fn from_token(token: &str) -> Self {
        IncludeOptions {
            no_title: token.contains("noTitle"),
            no_line_numbers: token.contains("noLineNumbers"),
            no_source_link: token.contains("noSourceLink"),
        }
    }
}

/// A parsed `#include_code` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub identifier: String,
    /// The file path exactly as written in the document.
    pub file_path: String,
    pub language: String,
    pub options: IncludeOptions,
}

impl Invocation {
    /// Parse a macro line. Returns `None` when the text is not a well-formed invocation.
    pub fn parse(text: &str) -> Option<Invocation> {
        let caps = INVOCATION_RE.captures(text.trim())?;
        let options = caps
            .get(4)
            .map(|m| IncludeOptions::from_token(m.as_str()))
            .unwrap_or_default();

        Some(Invocation {
            identifier: caps.get(1)?.as_str().to_string(),
            file_path: caps.get(2)?.as_str().to_string(),
            language: caps.get(3)?.as_str().to_string(),
            options,
        })
    }

    /// The file path with a leading `/` enforced.
    pub fn rooted_path(&self) -> String {
        if self.file_path.starts_with('/') {
            self.file_path.clone()
        } else {
            format!("/{}", self.file_path)
        }
    }

    pub fn is_raw(&self) -> bool {
        self.language == RAW_LANGUAGE
    }
}
