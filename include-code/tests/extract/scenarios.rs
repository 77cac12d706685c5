use crate::common::Repo;
use include_code::{extract_snippet, ExtractError, MarkerKind};
use insta::assert_snapshot;

#[test]
fn outer_snippet_scrubs_nested_markers_and_foreign_directives() {
    let repo = Repo::new();
    let snippet = extract_snippet(repo.root().join("src/counter.rs"), "increment").unwrap();

    assert_eq!(snippet.start_line, 6);
    assert_eq!(snippet.end_line, 14);
    assert_snapshot!(snippet.code, @r"
    pub fn increment(&mut self) {
        // highlight-next-line
        self.value += 1;
        assert!(self.value > 0); //
    }
    ");
}

#[test]
fn nested_snippet_keeps_its_own_directive() {
    let repo = Repo::new();
    let snippet = extract_snippet(repo.root().join("src/counter.rs"), "overflow").unwrap();

    assert_eq!((snippet.start_line, snippet.end_line), (10, 12));
    assert_eq!(snippet.code, "assert!(self.value > 0); // this-will-error");
}

#[test]
fn shared_start_marker_serves_both_identifiers() {
    let repo = Repo::new();
    let path = repo.root().join("scripts/deploy.py");

    let short = extract_snippet(&path, "deploy").unwrap();
    assert_eq!(short.code, "client = connect()");
    assert_eq!((short.start_line, short.end_line), (1, 3));

    let full = extract_snippet(&path, "deploy-full").unwrap();
    assert_eq!(full.code, "client = connect()\nclient.deploy()");
    assert_eq!((full.start_line, full.end_line), (1, 5));
}

#[test]
fn identifier_prefix_does_not_match() {
    let repo = Repo::new();
    let err = extract_snippet(repo.root().join("scripts/deploy.py"), "dep").unwrap_err();
    assert!(matches!(err, ExtractError::NotFound { .. }));
    assert!(err.to_string().contains("Identifier \"dep\" not found"));
}

#[test]
fn identifier_only_inside_other_markers_is_not_found() {
    let repo = Repo::new();
    repo.write(
        "src/only_foreign.ts",
        "// docs:start:outer\n// docs:start:inner:other\nx();\n// docs:end:inner:other\n// docs:end:outer\n",
    );
    let err = extract_snippet(repo.root().join("src/only_foreign.ts"), "missing").unwrap_err();
    assert!(matches!(err, ExtractError::NotFound { .. }));
}

#[test]
fn duplicate_start_is_reported_with_path() {
    let repo = Repo::new();
    repo.write(
        "src/dup.ts",
        "// docs:start:a\none();\n// docs:start:a\ntwo();\n// docs:end:a\n",
    );
    let err = extract_snippet(repo.root().join("src/dup.ts"), "a").unwrap_err();
    assert!(matches!(
        err,
        ExtractError::DuplicateMarker {
            kind: MarkerKind::Start,
            ..
        }
    ));
    assert!(err.to_string().contains("dup.ts"));
}

#[test]
fn unbalanced_markers_name_the_missing_side() {
    let repo = Repo::new();
    repo.write("src/open.ts", "// docs:start:a\none();\n");
    repo.write("src/close.ts", "one();\n// docs:end:a\n");

    let open = extract_snippet(repo.root().join("src/open.ts"), "a").unwrap_err();
    assert!(matches!(open, ExtractError::MissingEnd { .. }));

    let close = extract_snippet(repo.root().join("src/close.ts"), "a").unwrap_err();
    assert!(matches!(close, ExtractError::MissingStart { .. }));
    assert!(close
        .to_string()
        .starts_with("Start marker \"docs:start:a\" not found"));
}

#[test]
fn highlight_ranges_follow_identifier_membership() {
    let repo = Repo::new();
    repo.write(
        "src/ranges.ts",
        concat!(
            "// docs:start:a:b\n",
            "    // highlight-start:a\n",
            "    first();\n",
            "    // highlight-end:a\n",
            "    second(); // highlight-next-line:b:c\n",
            "// docs:end:a:b\n",
        ),
    );
    let path = repo.root().join("src/ranges.ts");

    let a = extract_snippet(&path, "a").unwrap();
    assert_eq!(
        a.code,
        "// highlight-start\nfirst();\n// highlight-end\nsecond(); //"
    );

    let b = extract_snippet(&path, "b").unwrap();
    assert_eq!(b.code, "first();\nsecond(); // highlight-next-line");
}

#[test]
fn trailing_blank_lines_are_trimmed() {
    let repo = Repo::new();
    repo.write("src/blank.ts", "// docs:start:a\n\n  x();\n\n\n// docs:end:a\n");
    let snippet = extract_snippet(repo.root().join("src/blank.ts"), "a").unwrap();
    assert_eq!(snippet.code, "\nx();");
}
