//! Markdown processing
//!
//! Pipeline: Markdown string → comrak AST → resolved AST → output string
//!
//! # Library Choice
//!
//! We use the `comrak` crate for Markdown parsing and HTML rendering:
//! - CommonMark compliant, with GFM extensions
//! - Arena-allocated tree that can be spliced in place
//! - Source positions on every block
//!
//! # Markdown Output
//!
//! Markdown output is not re-serialized from the tree. comrak's CommonMark writer escapes
//! text (`snake_case` becomes `snake\_case`), so a round trip would rewrite every page it
//! touches. Instead each resolved paragraph's source lines are replaced in the original text
//! and everything else, unresolved invocations included, is copied byte for byte.
//!
//! # Node Mapping
//!
//! | Replacement node | comrak node                                  | Markdown text                 |
//! |------------------|----------------------------------------------|-------------------------------|
//! | Code             | Fenced `CodeBlock`, info = `<lang> <meta>`   | ```` ```<lang> <meta> ````    |
//! | Raw              | Fenced `CodeBlock` with an empty info string | ```` ``` ```` without info    |
//! | SourceLink       | `Paragraph` holding one `HtmlInline`         | the anchor on its own line    |
//!
//! Unresolved invocations stay in the document as written; their problems are reported through
//! [`Rendered::diagnostics`].

pub mod document;

pub use document::MarkdownDocument;

use crate::error::FormatError;
use crate::format::Format;
use crate::resolver::{Diagnostic, Resolver};
use comrak::{Arena, ComrakOptions};

/// Options used both to parse the input and to render the output.
///
/// Autolinking stays off: it would split bare URLs out of macro lines. Front matter is not
/// extracted, so source positions always count lines from the top of the file.
pub(crate) fn comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options.extension.superscript = true;
    // Source links are inline HTML
    options.render.unsafe_ = true;
    options
}

/// Output of a processed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub output: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl Rendered {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Resolve every `#include_code` invocation in `source` and render the result with `format`.
pub fn include_code_markdown(
    source: &str,
    resolver: &Resolver,
    format: &dyn Format,
) -> Result<Rendered, FormatError> {
    let arena = Arena::new();
    let options = comrak_options();
    let mut doc = MarkdownDocument::parse(&arena, source, &options);

    let diagnostics = resolver.resolve(&mut doc);
    let output = format.render(&doc, &options)?;

    Ok(Rendered {
        output,
        diagnostics,
    })
}

/// Markdown output: the input text with resolved invocations replaced
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Markdown with resolved invocations spliced into the source text"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown", "mdx"]
    }

    fn render(
        &self,
        doc: &MarkdownDocument<'_>,
        _options: &ComrakOptions,
    ) -> Result<String, FormatError> {
        Ok(doc.to_markdown())
    }
}
