use crate::common::Repo;
use include_code::formats::MarkdownFormat;
use include_code::{include_code_markdown, Rendered};

fn render(repo: &Repo, page: &str) -> Rendered {
    include_code_markdown(page, &repo.resolver(), &MarkdownFormat).expect("markdown renders")
}

const INCREMENT_LINK: &str = "<sup><sub><a href=\"https://github.com/AztecProtocol/aztec-packages/blob/master/src/counter.rs#L6-L14\" target=\"_blank\" rel=\"noopener noreferrer\">Source code: src/counter.rs#Lincrement</a></sub></sup>";

#[test]
fn replaces_invocation_with_code_block_and_link() {
    let repo = Repo::new();
    let page = "# Counter\n\nIncrementing:\n\n#include_code increment src/counter.rs rust\n\nThat's it.\n";

    let rendered = render(&repo, page);

    assert!(rendered.is_clean(), "{:?}", rendered.diagnostics);
    let output = &rendered.output;
    assert!(!output.contains("#include_code"));
    assert!(output.contains("```rust"));
    assert!(output.contains("showLineNumbers"));
    assert!(output.contains("title="));
    assert!(output.contains("    // highlight-next-line\n"));
    assert!(output.contains("    self.value += 1;\n"));
    assert!(output.contains(INCREMENT_LINK));

    let intro = output.find("Incrementing:").unwrap();
    let code = output.find("```rust").unwrap();
    let outro = output.find("That's it.").unwrap();
    assert!(intro < code && code < outro);
}

#[test]
fn raw_language_emits_only_the_snippet() {
    let repo = Repo::new();
    let rendered = render(&repo, "#include_code deploy scripts/deploy.py raw\n");

    assert!(rendered.is_clean());
    assert!(rendered.output.contains("client = connect()"));
    assert!(!rendered.output.contains("Source code:"));
    assert!(!rendered.output.contains("showLineNumbers"));
}

#[test]
fn flags_suppress_metadata_and_link() {
    let repo = Repo::new();
    let rendered = render(
        &repo,
        "#include_code deploy-full /scripts/deploy.py python noTitle,noLineNumbers,noSourceLink\n",
    );

    assert!(rendered.is_clean());
    assert!(rendered.output.contains("```python\n"));
    assert!(rendered.output.contains("client = connect()\nclient.deploy()\n"));
    assert!(!rendered.output.contains("title="));
    assert!(!rendered.output.contains("Source code:"));
}

#[test]
fn commit_tag_changes_link_revision() {
    let repo = Repo::new();
    let rendered = include_code_markdown(
        "#include_code deploy /scripts/deploy.py python\n",
        &repo.resolver_with_tag(Some("v2.0.0")),
        &MarkdownFormat,
    )
    .unwrap();

    assert!(rendered
        .output
        .contains("href=\"https://github.com/AztecProtocol/aztec-packages/blob/v2.0.0/scripts/deploy.py#L1-L3\""));
    assert!(rendered
        .output
        .contains("Source code: /scripts/deploy.py#Ldeploy</a>"));
}

#[test]
fn broken_invocation_is_reported_and_others_still_resolve() {
    let repo = Repo::new();
    let page = concat!(
        "#include_code nope src/counter.rs rust\n",
        "\n",
        "#include_code overflow src/counter.rs rust\n",
        "\n",
        "#include_code increment src/missing.rs rust\n",
    );

    let rendered = render(&repo, page);

    assert_eq!(rendered.diagnostics.len(), 2);
    let first = &rendered.diagnostics[0];
    assert_eq!(first.position.map(|p| p.line), Some(1));
    assert!(first.message.starts_with("Error processing #include_code macro:"));
    assert!(first.message.contains("\"nope\""));
    assert!(first.message.contains("counter.rs"));

    let second = &rendered.diagnostics[1];
    assert_eq!(second.position.map(|p| p.line), Some(5));
    assert!(second.message.contains("missing.rs"));

    assert!(rendered
        .output
        .contains("assert!(self.value > 0); // this-will-error"));
    assert_eq!(rendered.output.matches("```rust").count(), 1);
}

#[test]
fn repeated_invocations_each_resolve() {
    let repo = Repo::new();
    let page = "#include_code deploy scripts/deploy.py python\n\n#include_code deploy scripts/deploy.py python\n";

    let rendered = render(&repo, page);

    assert!(rendered.is_clean());
    assert_eq!(rendered.output.matches("```python").count(), 2);
    assert_eq!(rendered.output.matches("Source code:").count(), 2);
}

#[test]
fn macro_inside_prose_is_left_alone() {
    let repo = Repo::new();
    let page = "Use `#include_code` like so: #include_code deploy scripts/deploy.py python\n";

    let rendered = render(&repo, page);

    assert!(rendered.is_clean());
    assert!(!rendered.output.contains("```python"));
}

#[test]
fn unresolved_invocation_and_prose_are_left_as_written() {
    let repo = Repo::new();
    let page = "Keep snake_case and *emphasis* as is.\n\n#include_code missing src/_my_file.ts ts\n";

    let rendered = render(&repo, page);

    assert_eq!(rendered.diagnostics.len(), 1);
    assert_eq!(rendered.output, page);
}

#[test]
fn only_resolved_lines_change() {
    let repo = Repo::new();
    let page = concat!(
        "---\n",
        "title: Deploy_guide\n",
        "---\n",
        "\n",
        "Run *this*:\n",
        "\n",
        "#include_code deploy scripts/deploy.py python noTitle,noLineNumbers,noSourceLink\n",
        "\n",
        "Done_now.\n",
    );

    let rendered = render(&repo, page);

    assert!(rendered.is_clean());
    assert_eq!(
        rendered.output,
        concat!(
            "---\n",
            "title: Deploy_guide\n",
            "---\n",
            "\n",
            "Run *this*:\n",
            "\n",
            "```python\n",
            "client = connect()\n",
            "```\n",
            "\n",
            "Done_now.\n",
        )
    );
}
