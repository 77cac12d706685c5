//! Format implementations
//!
//! Markdown is both the input (parsed with comrak into a host document the resolver splices
//! into) and the default output. HTML output is comrak's renderer over the same tree, useful
//! for previewing a page without the site generator.

pub mod html;
pub mod markdown;

pub use html::HtmlFormat;
pub use markdown::{include_code_markdown, MarkdownDocument, MarkdownFormat, Rendered};
