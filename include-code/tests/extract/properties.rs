use include_code::extract_from_str;
use proptest::prelude::*;

fn body_line() -> impl Strategy<Value = (usize, String)> {
    (0usize..4, "[a-z][a-z0-9_]{0,8}( = [0-9]{1,3};)?")
}

fn wrap(identifier: &str, body: &[String]) -> String {
    let mut file = format!("fn main() {{\n    // docs:start:{identifier}\n");
    for line in body {
        file.push_str(line);
        file.push('\n');
    }
    file.push_str(&format!("    // docs:end:{identifier}\n}}\n"));
    file
}

proptest! {
    #[test]
    fn common_indent_is_removed(
        common in 0usize..12,
        lines in prop::collection::vec(body_line(), 1..12),
    ) {
        let min_extra = lines.iter().map(|(extra, _)| *extra).min().unwrap_or(0);
        let body: Vec<String> = lines
            .iter()
            .map(|(extra, text)| format!("{}{}", " ".repeat(common + extra), text))
            .collect();
        let expected: Vec<String> = lines
            .iter()
            .map(|(extra, text)| format!("{}{}", " ".repeat(extra - min_extra), text))
            .collect();

        let snippet = extract_from_str(&wrap("prop", &body), "prop", "prop.rs").unwrap();

        prop_assert_eq!(snippet.code, expected.join("\n"));
        prop_assert_eq!(snippet.start_line, 2);
        prop_assert_eq!(snippet.end_line, body.len() + 3);
    }

    #[test]
    fn extraction_is_deterministic(
        lines in prop::collection::vec(body_line(), 0..10),
    ) {
        let body: Vec<String> = lines
            .iter()
            .map(|(extra, text)| format!("{}{}", " ".repeat(*extra), text))
            .collect();
        let file = wrap("again", &body);

        let first = extract_from_str(&file, "again", "again.rs").unwrap();
        let second = extract_from_str(&file, "again", "again.rs").unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn foreign_directives_never_leak(
        lines in prop::collection::vec(body_line(), 1..8),
        other in "[a-z]{1,6}",
    ) {
        prop_assume!(other != "mine");
        let body: Vec<String> = lines
            .iter()
            .map(|(_, text)| format!("{text} // highlight-next-line:{other}"))
            .collect();

        let snippet = extract_from_str(&wrap("mine", &body), "mine", "mine.rs").unwrap();

        prop_assert!(!snippet.code.contains("highlight-next-line"));
        prop_assert_eq!(snippet.code.lines().count(), lines.len());
    }
}
