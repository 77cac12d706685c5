//! Host-agnostic nodes produced for a resolved invocation
//!
//! Host documents translate these into their own node types when splicing (see
//! [`crate::formats::markdown`] for the comrak mapping).

use crate::source_link::attribution_html;

/// One node that replaces an `#include_code` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplacementNode {
    /// A fenced code block with a language and optional metadata string
    Code {
        language: String,
        meta: Option<String>,
        value: String,
    },
    /// The snippet body without any code-block metadata (`raw` language)
    Raw(String),
    /// Attribution link back to the snippet's source lines
    SourceLink { href: String, label: String },
}

impl ReplacementNode {
    /// Code-block info string: the language followed by the metadata, if any.
    ///
    /// Returns `None` for non-code nodes.
    pub fn info_string(&self) -> Option<String> {
        match self {
            ReplacementNode::Code {
                language,
                meta: Some(meta),
                ..
            } => Some(format!("{language} {meta}")),
            ReplacementNode::Code { language, .. } => Some(language.clone()),
            ReplacementNode::Raw(_) => Some(String::new()),
            ReplacementNode::SourceLink { .. } => None,
        }
    }

    /// Inline HTML for attribution nodes.
    pub fn html(&self) -> Option<String> {
        match self {
            ReplacementNode::SourceLink { href, label } => Some(attribution_html(href, label)),
            _ => None,
        }
    }
}

/// Metadata string for a code block: `title="<identifier>"` and/or `showLineNumbers`.
pub fn code_meta(identifier: &str, title: bool, line_numbers: bool) -> Option<String> {
    let mut meta = Vec::new();
    if title {
        meta.push(format!("title=\"{identifier}\""));
    }
    if line_numbers {
        meta.push("showLineNumbers".to_string());
    }
    if meta.is_empty() {
        None
    } else {
        Some(meta.join(" "))
    }
}
