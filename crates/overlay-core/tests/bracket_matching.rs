use overlay_core::scanner::{find_match, is_bracket};

// A realistic snippet with nesting, strings, chars, and both comment forms.
const SNIPPET: &str = r#"int main(int argc, char* argv[]) {
    // entry point (see main below
    printf("hello (world)\n");
    char c = '(';
    /* block ( comment ) */
    if (argc > 1) { return f(argv[1], (argc)); }
    return 0;
}"#;

#[test]
fn test_every_code_bracket_in_snippet_matches_symmetrically() {
    let chars: Vec<char> = SNIPPET.chars().collect();
    let mut checked = 0;
    for (i, &c) in chars.iter().enumerate() {
        if !is_bracket(c) {
            continue;
        }
        // Brackets inside strings, chars, or comments carry no guarantee;
        // restrict the sweep to code positions.
        if in_literal_or_comment(i) {
            continue;
        }
        let m = find_match(SNIPPET, i).unwrap_or_else(|| panic!("no match for {:?} at {}", c, i));
        assert_eq!(
            find_match(SNIPPET, m),
            Some(i),
            "asymmetric pair {} <-> {}",
            i,
            m
        );
        checked += 1;
    }
    assert_eq!(checked, 18);
}

// Hand-maintained forward lexer over SNIPPET: true for offsets inside a
// string, char literal, or comment.
fn in_literal_or_comment(pos: usize) -> bool {
    let mut in_string = false;
    let mut in_char = false;
    let mut in_line = false;
    let mut in_block = false;
    let mut prev = '\0';
    for (i, c) in SNIPPET.chars().enumerate() {
        let inside = in_string || in_char || in_line || in_block;
        if i == pos {
            return inside;
        }
        if in_string {
            if c == '"' && prev != '\\' {
                in_string = false;
            }
        } else if in_char {
            if c == '\'' && prev != '\\' {
                in_char = false;
            }
        } else if in_line {
            if c == '\n' {
                in_line = false;
            }
        } else if in_block {
            if prev == '*' && c == '/' {
                in_block = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if c == '\'' {
            in_char = true;
        } else if prev == '/' && c == '/' {
            in_line = true;
        } else if prev == '/' && c == '*' {
            in_block = true;
        }
        prev = c;
    }
    false
}

#[test]
fn test_brackets_inside_strings_and_chars_never_count() {
    // Each decoy closer would break the match if it counted; both scan
    // directions handle quoted literals.
    let cases = [("(\")\")", 0usize, 4usize), ("(')')", 0, 4)];
    for (text, open, close) in cases {
        assert_eq!(find_match(text, open), Some(close), "forward in {:?}", text);
        assert_eq!(find_match(text, close), Some(open), "backward in {:?}", text);
    }
}

#[test]
fn test_brackets_inside_comments_are_skipped_scanning_forward() {
    assert_eq!(find_match("(// )\n)", 0), Some(6));
    assert_eq!(find_match("(/* ) */)", 0), Some(8));
}

#[test]
fn test_block_comments_are_skipped_scanning_backward() {
    // Backward, the scanner enters comment state at */ and leaves at /*,
    // so block-comment interiors stay inert in both directions.
    assert_eq!(find_match("(/* ) */)", 8), Some(0));
}

#[test]
fn test_line_comment_asymmetry_scanning_backward() {
    // Scanning backward, the comment's ) is seen before the // marker, so
    // it is counted as a nested closer and the opener is then consumed in
    // comment state: the backward scan finds nothing even though the
    // forward scan succeeds. Local comment detection without a forward
    // lexer cannot resolve this; the behavior is pinned here.
    let text = "(// )\n)";
    assert_eq!(find_match(text, 0), Some(6));
    assert_eq!(find_match(text, 6), None);
}

#[test]
fn test_nested_same_type_pairs() {
    let text = "(()())";
    assert_eq!(find_match(text, 0), Some(5));
    assert_eq!(find_match(text, 5), Some(0));
}

#[test]
fn test_quote_escape_rule() {
    // One backslash blocks termination: the string swallows the decoy
    // closer and the match lands past it.
    assert_eq!(find_match("(\"\\\" )\"x)", 0), Some(8));
    // No backslash terminates normally.
    assert_eq!(find_match("(\"\" )", 0), Some(4));
}

#[test]
fn test_unmatched_bracket_scans_to_boundary() {
    assert_eq!(find_match("((((((", 0), None);
    assert_eq!(find_match("))))))", 5), None);
}
