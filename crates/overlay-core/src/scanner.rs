//! Directional bracket matching with lexical-state tracking.
//!
//! Given a document snapshot and the character offset of a bracket, the
//! scanner walks outward (forward from an opener, backward from a closer)
//! and returns the offset of the matching delimiter, skipping brackets that
//! sit inside string literals, character literals, or `//` / `/* ... */`
//! comments.
//!
//! All offsets are **character offsets** (Unicode scalar values), not bytes.
//!
//! # Lexical tracking
//!
//! The scanner carries a small state machine (`Normal`, in-string, in-char,
//! in-line-comment, in-block-comment) that is rebuilt from scratch on every
//! call; nothing is cached across edits or across scan directions. Depth
//! counting only happens in the `Normal` state, so delimiters consumed in
//! any other state never affect the result.
//!
//! Two deliberate approximations are part of the contract:
//!
//! - Quote termination looks back exactly one character (in text order): a
//!   quote preceded by a single backslash does not close the literal. An
//!   escaped backslash immediately before a quote (`\\"`) therefore also
//!   leaves the quote blocked, even though a full escape lexer would close
//!   there.
//! - When scanning backward, comment and string detection is a local
//!   approximation evaluated in scan order; it does not reconstruct the
//!   state a forward lexer would have at that offset. A backward scan enters
//!   block-comment state at `*/` and leaves it at `/*`.

/// Lexical state carried while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexicalState {
    /// Ordinary code; delimiters count.
    Normal,
    /// Inside a `"..."` string literal.
    InString,
    /// Inside a `'...'` character literal.
    InChar,
    /// Inside a `//` comment (until end of line).
    InLineComment,
    /// Inside a `/* ... */` comment.
    InBlockComment,
}

/// Returns `true` if `ch` is one of the six structural bracket characters
/// the scanner can start from: `( ) { } [ ]`.
pub fn is_bracket(ch: char) -> bool {
    matches!(ch, '(' | ')' | '{' | '}' | '[' | ']')
}

/// Map a bracket to its counterpart and scan direction.
///
/// Openers scan forward (+1), closers scan backward (-1).
fn classify(ch: char) -> Option<(char, isize)> {
    match ch {
        '(' => Some((')', 1)),
        ')' => Some(('(', -1)),
        '{' => Some(('}', 1)),
        '}' => Some(('{', -1)),
        '[' => Some((']', 1)),
        ']' => Some(('[', -1)),
        _ => None,
    }
}

/// Find the offset of the delimiter matching the bracket at `pos`.
///
/// Returns `None` when the character at `pos` is not a bracket, when `pos`
/// is out of range, or when the scan runs off either end of the text
/// without finding the match at depth zero. An unterminated string or
/// comment simply consumes the remainder of the scan in that state and
/// yields `None`; none of these cases are errors.
///
/// # Example
///
/// ```rust
/// use overlay_core::scanner::find_match;
///
/// let text = "int main(){ return 0; }";
/// assert_eq!(find_match(text, 8), Some(9));   // ( after main
/// assert_eq!(find_match(text, 10), Some(22)); // { matches trailing }
/// assert_eq!(find_match(text, 22), Some(10)); // and backward
/// ```
pub fn find_match(text: &str, pos: usize) -> Option<usize> {
    let chars: Vec<char> = text.chars().collect();
    let origin = *chars.get(pos)?;
    let (target, direction) = classify(origin)?;

    let len = chars.len() as isize;
    let in_bounds = |i: isize| i >= 0 && i < len;

    let mut depth: usize = 0;
    let mut state = LexicalState::Normal;
    let mut quote = '"';

    let mut i = pos as isize + direction;
    while in_bounds(i) {
        let c = chars[i as usize];

        match state {
            LexicalState::Normal => {
                if c == '"' || c == '\'' {
                    state = if c == '"' {
                        LexicalState::InString
                    } else {
                        LexicalState::InChar
                    };
                    quote = c;
                } else if c == '/' && in_bounds(i + direction) {
                    // Comment openers are recognized in scan order, so a
                    // backward scan sees them mirrored.
                    let next = chars[(i + direction) as usize];
                    if next == '/' {
                        state = LexicalState::InLineComment;
                        i += direction;
                    } else if next == '*' {
                        state = LexicalState::InBlockComment;
                        i += direction;
                    }
                } else if c == origin {
                    // Nested bracket of the same type.
                    depth += 1;
                } else if c == target {
                    if depth == 0 {
                        return Some(i as usize);
                    }
                    depth -= 1;
                }
            }
            LexicalState::InString | LexicalState::InChar => {
                // The lookback is in text order even while scanning backward.
                if c == quote && (i == 0 || chars[(i - 1) as usize] != '\\') {
                    state = LexicalState::Normal;
                }
            }
            LexicalState::InLineComment => {
                if c == '\n' {
                    state = LexicalState::Normal;
                }
            }
            LexicalState::InBlockComment => {
                if c == '*' && in_bounds(i + direction) && chars[(i + direction) as usize] == '/' {
                    state = LexicalState::Normal;
                    i += direction;
                }
            }
        }

        i += direction;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_pairs() {
        assert_eq!(find_match("()", 0), Some(1));
        assert_eq!(find_match("()", 1), Some(0));
        assert_eq!(find_match("{}", 0), Some(1));
        assert_eq!(find_match("[]", 1), Some(0));
    }

    #[test]
    fn test_nested_same_type() {
        let text = "(()())";
        assert_eq!(find_match(text, 0), Some(5));
        assert_eq!(find_match(text, 5), Some(0));
        assert_eq!(find_match(text, 1), Some(2));
        assert_eq!(find_match(text, 3), Some(4));
    }

    #[test]
    fn test_main_scenario() {
        let text = "int main(){ return 0; }";
        let open_paren = text.find('(').unwrap();
        assert_eq!(find_match(text, open_paren), Some(open_paren + 1));
        let open_brace = text.find('{').unwrap();
        let close_brace = text.rfind('}').unwrap();
        assert_eq!(find_match(text, open_brace), Some(close_brace));
        assert_eq!(find_match(text, close_brace), Some(open_brace));
    }

    #[test]
    fn test_symmetry() {
        let text = "fn f(a: &[u8]) { g(a[0], (1 + 2)); }";
        for (i, c) in text.chars().enumerate() {
            if !is_bracket(c) {
                continue;
            }
            let m = find_match(text, i).unwrap();
            assert_eq!(find_match(text, m), Some(i), "asymmetric at {}", i);
        }
    }

    #[test]
    fn test_not_a_bracket() {
        assert_eq!(find_match("abc", 1), None);
        assert_eq!(find_match("", 0), None);
        assert_eq!(find_match("()", 2), None);
    }

    #[test]
    fn test_unmatched_runs_off_the_end() {
        assert_eq!(find_match("(((", 0), None);
        assert_eq!(find_match(")))", 2), None);
        assert_eq!(find_match("(]", 0), None);
    }

    #[test]
    fn test_bracket_in_string_ignored() {
        // The ) inside the string must not match the opener.
        let text = r#"f(")")"#;
        assert_eq!(find_match(text, 1), Some(5));
        assert_eq!(find_match(text, 5), Some(1));
    }

    #[test]
    fn test_bracket_in_char_literal_ignored() {
        let text = "f(')')";
        assert_eq!(find_match(text, 1), Some(5));
    }

    #[test]
    fn test_bracket_in_line_comment_ignored() {
        let text = "( // )\n)";
        assert_eq!(find_match(text, 0), Some(7));
    }

    #[test]
    fn test_line_comment_ends_at_newline() {
        let text = "( // x\n) y";
        assert_eq!(find_match(text, 0), Some(7));
    }

    #[test]
    fn test_bracket_in_block_comment_ignored() {
        let text = "( /* ) */ )";
        assert_eq!(find_match(text, 0), Some(10));
        assert_eq!(find_match(text, 10), Some(0));
    }

    #[test]
    fn test_depth_only_counts_outside_literals() {
        // The nested ( inside the string must not bump the depth.
        let text = r#"("(" )"#;
        assert_eq!(find_match(text, 0), Some(5));
    }

    #[test]
    fn test_escaped_quote_does_not_terminate() {
        // "a\"b": the escaped quote keeps the string open, so the ) inside
        // it is skipped.
        let text = "(\"a\\\"b\" )";
        assert_eq!(find_match(text, 0), Some(8));
    }

    #[test]
    fn test_unescaped_quote_terminates() {
        let text = "(\"ab\" )";
        assert_eq!(find_match(text, 0), Some(6));
    }

    #[test]
    fn test_double_backslash_keeps_quote_blocked() {
        // Single-character lookback: the quote after `\\` still looks
        // escaped, the string never closes, and the scan consumes the rest
        // of the text without finding the match.
        let text = "(\"a\\\\\" )";
        assert_eq!(find_match(text, 0), None);
    }

    #[test]
    fn test_unterminated_string_consumes_scan() {
        let text = "(\"abc";
        assert_eq!(find_match(text, 0), None);
    }

    #[test]
    fn test_unterminated_block_comment_consumes_scan() {
        let text = "( /* abc";
        assert_eq!(find_match(text, 0), None);
    }

    #[test]
    fn test_backward_scan_through_block_comment() {
        // Scanning backward from the closer crosses the comment, entering
        // at */ and leaving at /*.
        let text = "( /* ( */ )";
        assert_eq!(find_match(text, 10), Some(0));
    }

    #[test]
    fn test_mixed_bracket_kinds_do_not_interact() {
        let text = "([{}])";
        assert_eq!(find_match(text, 0), Some(5));
        assert_eq!(find_match(text, 1), Some(4));
        assert_eq!(find_match(text, 2), Some(3));
    }

    #[test]
    fn test_non_ascii_text_uses_char_offsets() {
        let text = "f(\"héllo\", 世界)";
        let open = text.chars().position(|c| c == '(').unwrap();
        let close = text.chars().position(|c| c == ')').unwrap();
        assert_eq!(find_match(text, open), Some(close));
        assert_eq!(find_match(text, close), Some(open));
    }

    #[test]
    fn test_is_bracket() {
        for c in ['(', ')', '{', '}', '[', ']'] {
            assert!(is_bracket(c));
        }
        for c in ['<', '>', '"', 'a', ' '] {
            assert!(!is_bracket(c));
        }
    }
}
