//! comrak-backed host document
//!
//! Candidates are paragraphs made only of plain text. comrak merges adjacent text runs, so a
//! macro line normally arrives as a single text child; a paragraph with emphasis, links or soft
//! breaks is never a candidate, which keeps prose that merely mentions the macro untouched.
//!
//! Every splice is applied to the tree and also recorded against the paragraph's source lines,
//! so the document can be written back either from the tree (HTML) or as the original text with
//! only the spliced lines replaced (Markdown).

use crate::nodes::ReplacementNode;
use crate::resolver::{Candidate, HostDocument, Position};
use comrak::nodes::{Ast, AstNode, NodeCodeBlock, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// A parsed Markdown document whose nodes live in `arena`.
pub struct MarkdownDocument<'a> {
    arena: &'a Arena<AstNode<'a>>,
    root: &'a AstNode<'a>,
    source: String,
    splices: Vec<SourceSplice>,
}

/// Replacement of a paragraph's source lines.
#[derive(Debug, Clone)]
struct SourceSplice {
    start_line: usize,
    end_line: usize,
    /// 1-based column where the paragraph content starts on its first line
    column: usize,
    nodes: Vec<ReplacementNode>,
}

impl<'a> MarkdownDocument<'a> {
    pub fn parse(arena: &'a Arena<AstNode<'a>>, source: &str, options: &ComrakOptions) -> Self {
        let root = parse_document(arena, source, options);
        MarkdownDocument {
            arena,
            root,
            source: source.to_string(),
            splices: Vec::new(),
        }
    }

    pub fn root(&self) -> &'a AstNode<'a> {
        self.root
    }

    /// The source text with every spliced paragraph replaced by Markdown for its nodes.
    ///
    /// Lines outside spliced paragraphs are copied unchanged, line endings included.
    pub fn to_markdown(&self) -> String {
        let by_start: BTreeMap<usize, &SourceSplice> = self
            .splices
            .iter()
            .map(|splice| (splice.start_line, splice))
            .collect();
        let lines: Vec<&str> = self.source.split_inclusive('\n').collect();

        let mut output = String::with_capacity(self.source.len());
        let mut index = 0;
        while index < lines.len() {
            let line_number = index + 1;
            match by_start.get(&line_number) {
                Some(splice) if (line_number..=lines.len()).contains(&splice.end_line) => {
                    let mut end = splice.end_line;
                    while end > line_number && lines[end - 1].trim().is_empty() {
                        end -= 1;
                    }
                    output.push_str(&splice.render(lines[index]));
                    output.push_str(line_ending(lines[end - 1]));
                    index = end;
                }
                _ => {
                    output.push_str(lines[index]);
                    index += 1;
                }
            }
        }
        output
    }

    fn alloc(&self, value: NodeValue) -> &'a AstNode<'a> {
        self.arena
            .alloc(AstNode::new(RefCell::new(Ast::new(value, (0, 0).into()))))
    }

    fn build(&self, node: ReplacementNode) -> &'a AstNode<'a> {
        let info = node.info_string();
        let html = node.html();
        match node {
            ReplacementNode::Code { value, .. } | ReplacementNode::Raw(value) => {
                self.alloc(NodeValue::CodeBlock(NodeCodeBlock {
                    fenced: true,
                    fence_char: b'`',
                    fence_length: 3,
                    fence_offset: 0,
                    info: info.unwrap_or_default(),
                    literal: code_literal(value),
                }))
            }
            ReplacementNode::SourceLink { .. } => {
                let paragraph = self.alloc(NodeValue::Paragraph);
                paragraph.append(self.alloc(NodeValue::HtmlInline(html.unwrap_or_default())));
                paragraph
            }
        }
    }
}

impl SourceSplice {
    /// Markdown for the nodes, laid out under the container prefix of `first_line`.
    ///
    /// The prefix is whatever precedes the paragraph on its first line (`- `, `> `, indent).
    /// Following lines keep blockquote markers and turn everything else into spaces.
    fn render(&self, first_line: &str) -> String {
        let content = first_line.trim_end_matches(['\n', '\r']);
        let prefix = content.get(..self.column.saturating_sub(1)).unwrap_or("");
        let continuation: String = prefix
            .chars()
            .map(|c| if c == '>' { '>' } else { ' ' })
            .collect();

        let body = self
            .nodes
            .iter()
            .map(markdown_block)
            .collect::<Vec<_>>()
            .join("\n");

        let mut output = String::new();
        for (i, line) in body.split('\n').enumerate() {
            let lead = if i == 0 {
                prefix
            } else {
                output.push('\n');
                continuation.as_str()
            };
            if line.is_empty() {
                output.push_str(lead.trim_end());
            } else {
                output.push_str(lead);
                output.push_str(line);
            }
        }
        output
    }
}

/// Markdown text of one replacement node, without a trailing newline.
fn markdown_block(node: &ReplacementNode) -> String {
    match node {
        ReplacementNode::Code { value, .. } | ReplacementNode::Raw(value) => {
            let fence = code_fence(value);
            let info = node.info_string().unwrap_or_default();
            if value.is_empty() {
                format!("{fence}{info}\n{fence}")
            } else {
                format!("{fence}{info}\n{value}\n{fence}")
            }
        }
        ReplacementNode::SourceLink { .. } => node.html().unwrap_or_default(),
    }
}

/// A backtick fence longer than any backtick run opening a line of `value`.
fn code_fence(value: &str) -> String {
    let longest = value
        .lines()
        .map(|line| line.trim_start().bytes().take_while(|b| *b == b'`').count())
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

fn line_ending(line: &str) -> &str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

/// comrak expects code block literals to end with a newline.
fn code_literal(mut value: String) -> String {
    if !value.is_empty() && !value.ends_with('\n') {
        value.push('\n');
    }
    value
}

/// Concatenated text of a paragraph, if every child is plain text.
fn plain_text<'a>(paragraph: &'a AstNode<'a>) -> Option<String> {
    let mut text = String::new();
    let mut children = 0;
    for child in paragraph.children() {
        match &child.data.borrow().value {
            NodeValue::Text(value) => text.push_str(value),
            _ => return None,
        }
        children += 1;
    }
    (children > 0).then_some(text)
}

impl<'a> HostDocument for MarkdownDocument<'a> {
    type Handle = &'a AstNode<'a>;

    fn invocation_candidates(&self) -> Vec<Candidate<Self::Handle>> {
        self.root
            .descendants()
            .filter(|node| matches!(node.data.borrow().value, NodeValue::Paragraph))
            .filter_map(|node| {
                let text = plain_text(node)?;
                let start = node.data.borrow().sourcepos.start;
                Some(Candidate {
                    handle: node,
                    text,
                    position: Some(Position {
                        line: start.line,
                        column: start.column,
                    }),
                })
            })
            .collect()
    }

    fn splice(&mut self, at: &Self::Handle, nodes: Vec<ReplacementNode>) {
        let sourcepos = at.data.borrow().sourcepos;
        self.splices.push(SourceSplice {
            start_line: sourcepos.start.line,
            end_line: sourcepos.end.line,
            column: sourcepos.start.column,
            nodes: nodes.clone(),
        });

        for node in nodes {
            at.insert_before(self.build(node));
        }
        at.detach();
    }
}
