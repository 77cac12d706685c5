//! HTML output
//!
//! Renders the resolved tree with comrak's HTML renderer. Code blocks carry their language as a
//! `language-*` class; the title/line-number metadata is dropped, since those are instructions
//! for the documentation site's own highlighter.

use crate::error::FormatError;
use crate::format::{into_text, Format};
use crate::formats::markdown::MarkdownDocument;
use comrak::{format_html, ComrakOptions};

/// HTML fragment output (no `<html>` wrapper)
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML fragment rendered by comrak"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn render(
        &self,
        doc: &MarkdownDocument<'_>,
        options: &ComrakOptions,
    ) -> Result<String, FormatError> {
        let mut output = Vec::new();
        format_html(doc.root(), options, &mut output).map_err(|e| {
            FormatError::SerializationError(format!("Comrak HTML rendering failed: {e}"))
        })?;
        into_text(self.name(), output)
    }
}
