//! Trailing comment stripping for the incompleteness guard.
//!
//! Interpreters in the REPL tradition classify input that ends in a
//! comment as incomplete (the parser is still waiting for more). The
//! session compensates: when a code segment comes back incomplete, the
//! trailing comment-only and blank suffix is stripped and, if that made
//! the text shorter, the segment is re-submitted. Stripping must respect
//! string literals and nested block comments, and an unterminated block
//! comment strips nothing (the incompleteness is real).

/// Returns `code` truncated after its last significant character: the
/// last character that is neither whitespace nor inside a comment.
/// Returns `code` unchanged when a block comment or string literal is
/// still open at the end of input.
pub(crate) fn strip_trailing_comments(code: &str) -> &str {
    let mut iter = code.char_indices().peekable();
    let mut end = 0usize;
    let mut depth = 0usize;
    let mut in_string = false;

    while let Some((i, c)) = iter.next() {
        if depth > 0 {
            if c == '*' && matches!(iter.peek(), Some(&(_, '/'))) {
                iter.next();
                depth -= 1;
            } else if c == '/' && matches!(iter.peek(), Some(&(_, '*'))) {
                iter.next();
                depth += 1;
            }
            continue;
        }
        if in_string {
            match c {
                '"' => {
                    in_string = false;
                    end = i + 1;
                }
                // String literals are single-line.
                '\n' => in_string = false,
                '\\' => {
                    end = i + 1;
                    if let Some((j, e)) = iter.next() {
                        end = j + e.len_utf8();
                    }
                }
                _ => end = i + c.len_utf8(),
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                end = i + 1;
            }
            '/' if matches!(iter.peek(), Some(&(_, '/'))) => {
                iter.next();
                while let Some(&(_, next)) = iter.peek() {
                    if next == '\n' {
                        break;
                    }
                    iter.next();
                }
            }
            '/' if matches!(iter.peek(), Some(&(_, '*'))) => {
                iter.next();
                depth += 1;
            }
            c if c.is_whitespace() => {}
            _ => end = i + c.len_utf8(),
        }
    }

    if depth > 0 || in_string {
        return code;
    }
    &code[..end]
}
