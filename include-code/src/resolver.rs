//! Resolution of `#include_code` invocations inside a host document
//!
//!     The resolver knows nothing about tree traversal. A host document exposes the blocks
//!     that could hold an invocation ([`HostDocument::invocation_candidates`]) and a way to
//!     replace one of them ([`HostDocument::splice`]).
//!
//!     Resolution scans every candidate first and only then applies the replacements, in
//!     reverse document order, so that positional handles collected during the scan stay valid.
//!     A failing invocation never aborts the pass: it becomes a [`Diagnostic`] and its block is
//!     left as written.

use crate::error::ExtractError;
use crate::extract::extract_snippet;
use crate::invocation::Invocation;
use crate::nodes::{code_meta, ReplacementNode};
use crate::source_link::{attribution_label, SourceLink, DEFAULT_REPOSITORY, DEFAULT_TAG};
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Origin attached to every diagnostic this crate emits.
pub const DIAGNOSTIC_SOURCE: &str = "include-code";

/// 1-based line/column of a block in the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// A non-fatal problem found while resolving a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub position: Option<Position>,
    pub source: &'static str,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, position: Option<Position>) -> Self {
        Diagnostic {
            message: message.into(),
            position,
            source: DIAGNOSTIC_SOURCE,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(Position { line, column }) => write!(f, "{line}:{column}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// A block whose entire content is plain text.
#[derive(Debug, Clone)]
pub struct Candidate<H> {
    pub handle: H,
    pub text: String,
    pub position: Option<Position>,
}

/// The document model the resolver operates on.
pub trait HostDocument {
    /// Identifies a block for later splicing.
    type Handle;

    /// Blocks that consist of plain text only, in document order.
    fn invocation_candidates(&self) -> Vec<Candidate<Self::Handle>>;

    /// Replace the block at `at` with `nodes`, in order.
    fn splice(&mut self, at: &Self::Handle, nodes: Vec<ReplacementNode>);
}

/// Settings shared by every invocation in a resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Directory invocation paths are resolved against
    pub root_dir: PathBuf,
    /// Repository URL used for source links
    pub repository: String,
    /// Revision used when `commit_tag` is absent
    pub default_tag: String,
    pub commit_tag: Option<String>,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        ResolverOptions {
            root_dir: PathBuf::from("."),
            repository: DEFAULT_REPOSITORY.to_string(),
            default_tag: DEFAULT_TAG.to_string(),
            commit_tag: None,
        }
    }
}

/// Turns invocations into replacement nodes.
#[derive(Debug, Clone)]
pub struct Resolver {
    root_dir: PathBuf,
    link: SourceLink,
}

impl Resolver {
    pub fn new(options: ResolverOptions) -> Self {
        let link = SourceLink::new(
            &options.repository,
            options.commit_tag.as_deref(),
            &options.default_tag,
        );
        Resolver {
            root_dir: options.root_dir,
            link,
        }
    }

    /// Absolute location of an invocation's file.
    ///
    /// The rooted path's leading `/` is stripped before joining, otherwise
    /// [`std::path::Path::join`] would discard the root directory.
    pub fn resolve_path(&self, invocation: &Invocation) -> PathBuf {
        let rooted = invocation.rooted_path();
        self.root_dir.join(rooted.trim_start_matches('/'))
    }

    /// Extract the invocation's snippet and build its replacement nodes.
    pub fn resolve_invocation(
        &self,
        invocation: &Invocation,
    ) -> Result<Vec<ReplacementNode>, ExtractError> {
        let path = self.resolve_path(invocation);
        let snippet = extract_snippet(&path, &invocation.identifier)?;
        let href = self.link.href(
            &invocation.rooted_path(),
            snippet.start_line,
            snippet.end_line,
        );

        debug!(
            identifier = %invocation.identifier,
            path = %path.display(),
            %href,
            "resolved invocation"
        );

        if invocation.is_raw() {
            return Ok(vec![ReplacementNode::Raw(snippet.code)]);
        }

        let options = invocation.options;
        let mut nodes = vec![ReplacementNode::Code {
            language: invocation.language.clone(),
            meta: code_meta(
                &invocation.identifier,
                !options.no_title,
                !options.no_line_numbers,
            ),
            value: snippet.code,
        }];

        if !options.no_source_link {
            nodes.push(ReplacementNode::SourceLink {
                href,
                label: attribution_label(&invocation.file_path, &invocation.identifier),
            });
        }

        Ok(nodes)
    }

    /// Resolve every invocation in `doc`, returning the diagnostics of those that failed.
    pub fn resolve<D: HostDocument>(&self, doc: &mut D) -> Vec<Diagnostic> {
        let mut pending = Vec::new();
        let mut diagnostics = Vec::new();

        for candidate in doc.invocation_candidates() {
            let Some(invocation) = Invocation::parse(&candidate.text) else {
                continue;
            };
            match self.resolve_invocation(&invocation) {
                Ok(nodes) => pending.push((candidate.handle, nodes)),
                Err(err) => {
                    debug!(error = %err, "invocation left unresolved");
                    diagnostics.push(Diagnostic::new(
                        format!("Error processing #include_code macro: {err}"),
                        candidate.position,
                    ));
                }
            }
        }

        for (handle, nodes) in pending.into_iter().rev() {
            doc.splice(&handle, nodes);
        }

        diagnostics
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Resolver::new(ResolverOptions::default())
    }
}
