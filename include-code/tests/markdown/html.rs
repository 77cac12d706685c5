use crate::common::Repo;
use include_code::formats::HtmlFormat;
use include_code::include_code_markdown;

#[test]
fn code_block_carries_language_class_and_escaped_body() {
    let repo = Repo::new();
    let rendered = include_code_markdown(
        "#include_code increment src/counter.rs rust\n",
        &repo.resolver(),
        &HtmlFormat,
    )
    .unwrap();

    assert!(rendered.is_clean());
    let html = &rendered.output;
    assert!(html.contains("<pre><code class=\"language-rust\">"));
    assert!(html.contains("assert!(self.value &gt; 0);"));
    assert!(!html.contains("title="));
    assert!(html.contains(
        "<a href=\"https://github.com/AztecProtocol/aztec-packages/blob/master/src/counter.rs#L6-L14\" target=\"_blank\" rel=\"noopener noreferrer\">"
    ));
}

#[test]
fn unresolved_invocation_stays_as_paragraph() {
    let repo = Repo::new();
    let rendered = include_code_markdown(
        "#include_code missing src/counter.rs rust\n",
        &repo.resolver(),
        &HtmlFormat,
    )
    .unwrap();

    assert_eq!(rendered.diagnostics.len(), 1);
    assert!(rendered.output.starts_with("<p>#include_code missing"));
    assert!(!rendered.output.contains("<pre>"));
}
