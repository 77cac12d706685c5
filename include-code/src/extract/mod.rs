//! Snippet extraction
//!
//!     Source files carry named regions delimited by line-comment markers:
//!
//!         // docs:start:setup
//!         let client = Client::new(); // highlight-next-line:setup
//!         // docs:end:setup
//!
//!     A marker may name several identifiers (`docs:start:a:b`), so regions can overlap and nest.
//!     Extracting one identifier scrubs the markers of every other identifier found inside its
//!     bounds, rewrites or drops highlighting directives (see [`highlight`]), and dedents the
//!     remaining body.
//!
//!     Line numbers in the returned [`Snippet`] always refer to the untouched file, since they
//!     are used to link back to the source.

pub mod highlight;
pub mod markers;

use crate::error::{ExtractError, MarkerKind};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// An extracted snippet and the 1-based lines of its markers in the original file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub code: String,
    pub start_line: usize,
    pub end_line: usize,
}

/// Read `path` and extract the region named `identifier`.
pub fn extract_snippet(path: impl AsRef<Path>, identifier: &str) -> Result<Snippet, ExtractError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    extract_from_str(&content, identifier, &path.display().to_string())
}

/// Extract the region named `identifier` from already-loaded text.
///
/// `origin` only names the file in error messages.
pub fn extract_from_str(
    content: &str,
    identifier: &str,
    origin: &str,
) -> Result<Snippet, ExtractError> {
    let lines: Vec<&str> = content.split('\n').collect();
    let scan = markers::scan_markers(&lines, identifier);

    for (kind, found) in [(MarkerKind::Start, &scan.starts), (MarkerKind::End, &scan.ends)] {
        if found.len() > 1 {
            return Err(ExtractError::DuplicateMarker {
                identifier: identifier.to_string(),
                path: origin.to_string(),
                kind,
            });
        }
    }

    let (start_line, end_line) = match (scan.starts.first(), scan.ends.first()) {
        (Some(start), Some(end)) => (*start, *end),
        (None, None) => {
            return Err(ExtractError::NotFound {
                identifier: identifier.to_string(),
                path: origin.to_string(),
            })
        }
        (None, Some(_)) => {
            return Err(ExtractError::MissingStart {
                identifier: identifier.to_string(),
                path: origin.to_string(),
            })
        }
        (Some(_), None) => {
            return Err(ExtractError::MissingEnd {
                identifier: identifier.to_string(),
                path: origin.to_string(),
            })
        }
    };

    let plan = markers::plan_removals(&scan, start_line, end_line);
    let body = markers::apply_removals(&lines, &plan, start_line, end_line);
    let code = highlight::process_directives(&body, identifier);

    debug!(
        identifier,
        origin,
        start_line,
        end_line,
        removed = plan.removed_count(),
        "extracted snippet"
    );

    Ok(Snippet {
        code,
        start_line,
        end_line,
    })
}
