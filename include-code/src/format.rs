//! Format trait definition
//!
//! Once invocations are resolved, the document is handed to a [`Format`] which turns it into
//! the final text. Formats never parse: input is always Markdown. A format may read the
//! resolved comrak tree ([`MarkdownDocument::root`]) or the source text with the recorded
//! splices applied ([`MarkdownDocument::to_markdown`]).

use crate::error::FormatError;
use crate::formats::markdown::MarkdownDocument;
use comrak::ComrakOptions;

/// Trait for output formats
///
/// # Examples
///
/// ```ignore
/// struct PlainText;
///
/// impl Format for PlainText {
///     fn name(&self) -> &str {
///         "text"
///     }
///
///     fn render(
///         &self,
///         doc: &MarkdownDocument<'_>,
///         options: &ComrakOptions,
///     ) -> Result<String, FormatError> {
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown", "html")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format (e.g., ["md", "markdown"])
    ///
    /// Returns a slice of file extensions without the leading dot.
    /// Used for automatic format detection from output filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Render a resolved document
    fn render(
        &self,
        doc: &MarkdownDocument<'_>,
        options: &ComrakOptions,
    ) -> Result<String, FormatError>;
}

/// Collect a comrak formatter's byte output into a `String`.
pub(crate) fn into_text(format: &str, output: Vec<u8>) -> Result<String, FormatError> {
    String::from_utf8(output).map_err(|e| {
        FormatError::SerializationError(format!("{format} output is not valid UTF-8: {e}"))
    })
}
