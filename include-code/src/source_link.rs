//! Links from rendered snippets back to their source on GitHub

/// Repository used when no other is configured.
pub const DEFAULT_REPOSITORY: &str = "https://github.com/AztecProtocol/aztec-packages";

/// Revision used when the caller supplies no commit tag.
pub const DEFAULT_TAG: &str = "master";

/// Builds `blob` URLs for a repository at a fixed revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLink {
    repository: String,
    tag: String,
}

impl SourceLink {
    /// `tag` falls back to `default_tag` when absent or empty.
    pub fn new(repository: &str, tag: Option<&str>, default_tag: &str) -> Self {
        let tag = tag.filter(|t| !t.is_empty()).unwrap_or(default_tag);
        SourceLink {
            repository: repository.trim_end_matches('/').to_string(),
            tag: tag.to_string(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// `<repository>/blob/<tag>/<path>#L<start>-L<end>`
    pub fn href(&self, rooted_path: &str, start_line: usize, end_line: usize) -> String {
        format!(
            "{}/blob/{}/{}#L{}-L{}",
            self.repository,
            self.tag,
            rooted_path.trim_start_matches('/'),
            start_line,
            end_line
        )
    }
}

impl Default for SourceLink {
    fn default() -> Self {
        SourceLink::new(DEFAULT_REPOSITORY, None, DEFAULT_TAG)
    }
}

/// Visible label of the attribution link: the path as written plus `#L<identifier>`.
pub fn attribution_label(file_path: &str, identifier: &str) -> String {
    format!("{file_path}#L{identifier}")
}

/// The attribution anchor. Site styles target this exact wrapper structure.
pub fn attribution_html(href: &str, label: &str) -> String {
    format!(
        "<sup><sub><a href=\"{href}\" target=\"_blank\" rel=\"noopener noreferrer\">Source code: {label}</a></sub></sup>"
    )
}
