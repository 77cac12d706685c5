//! Highlighting directives and indentation normalization
//!
//! Directives are scoped to identifiers (`highlight-next-line:foo:bar`). When extracting `foo`
//! the directive is rewritten to its bare name so downstream renderers see a generic
//! instruction; for any other identifier it is deleted from the line.

use super::markers::ids_contain;
use once_cell::sync::Lazy;
use regex::Regex;

/// Directive names, in the order they are applied to each line.
pub const DIRECTIVES: [&str; 4] = [
    "highlight-next-line",
    "highlight-start",
    "highlight-end",
    "this-will-error",
];

static DIRECTIVE_RES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    DIRECTIVES
        .iter()
        .map(|name| {
            let pattern = format!(r"{}:([a-zA-Z0-9\-._:]+)", regex::escape(name));
            let regex = Regex::new(&pattern).expect("directive pattern is a valid regex");
            (*name, regex)
        })
        .collect()
});

/// Rewrite every directive on one line. Returns the new line and whether anything matched.
fn rewrite_directives(line: &str, identifier: &str) -> (String, bool) {
    let mut line = line.to_string();
    let mut mutated = false;

    for (name, regex) in DIRECTIVE_RES.iter() {
        let Some(caps) = regex.captures(&line) else {
            continue;
        };
        let (Some(whole), Some(ids)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        let replacement = if ids_contain(ids.as_str(), identifier) {
            *name
        } else {
            ""
        };
        let range = whole.range();
        line.replace_range(range, replacement);
        mutated = true;
    }

    (line, mutated)
}

fn leading_spaces(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b' ').count()
}

/// Apply directive rewriting to a snippet body, then dedent and trim it.
pub fn process_directives<S: AsRef<str>>(lines: &[S], identifier: &str) -> String {
    let mut kept = Vec::with_capacity(lines.len());

    for line in lines {
        let (line, mutated) = rewrite_directives(line.as_ref(), identifier);
        let trimmed = line.trim();
        let emptied = trimmed.is_empty() && mutated;
        let bare_comment = trimmed == "//" || trimmed == "#";
        if !emptied && !bare_comment {
            kept.push(line);
        }
    }

    let indent = kept
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| leading_spaces(line))
        .min()
        .unwrap_or(0);

    let mut result = String::new();
    for line in &kept {
        // Every non-empty line has at least `indent` leading spaces, so the slice is on a
        // char boundary.
        let dedented = if line.len() > indent {
            &line[indent..]
        } else {
            line.as_str()
        };
        result.push_str(dedented.trim_end());
        result.push('\n');
    }

    result.trim_end().to_string()
}
