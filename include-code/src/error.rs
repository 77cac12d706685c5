//! Error types for snippet extraction and document rendering

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which side of a marker pair an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Start,
    End,
}

impl MarkerKind {
    /// The marker keyword as it appears in source files (`docs:start` / `docs:end`).
    pub fn keyword(self) -> &'static str {
        match self {
            MarkerKind::Start => "docs:start",
            MarkerKind::End => "docs:end",
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerKind::Start => write!(f, "start"),
            MarkerKind::End => write!(f, "end"),
        }
    }
}

/// Errors raised while extracting a snippet from a source file.
///
/// The extractor never recovers from these: each one aborts the extraction
/// call that produced it. Callers that process many invocations (see
/// [`crate::resolver::Resolver`]) turn them into diagnostics instead.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Neither marker of the pair names the identifier
    #[error("Identifier \"{identifier}\" not found in file \"{path}\"")]
    NotFound { identifier: String, path: String },

    /// An end marker exists but no start marker
    #[error("Start marker \"docs:start:{identifier}\" not found in file \"{path}\"")]
    MissingStart { identifier: String, path: String },

    /// A start marker exists but no end marker
    #[error("End marker \"docs:end:{identifier}\" not found in file \"{path}\"")]
    MissingEnd { identifier: String, path: String },

    /// More than one marker of the same kind names the identifier
    #[error("Duplicate {kind} marker for identifier \"{identifier}\" in file \"{path}\"")]
    DuplicateMarker {
        identifier: String,
        path: String,
        kind: MarkerKind,
    },

    /// The source file could not be read
    #[error("Failed to read \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while rendering a processed document
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
}
