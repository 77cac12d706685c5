//! Markdown pipeline tests
//!
//! Full runs from a Markdown page with `#include_code` lines to rendered output.

mod html;
mod render;
