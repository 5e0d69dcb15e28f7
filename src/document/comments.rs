//! Trailing comment recovery.
//!
//! The YAML event stream carries no comments, so they are read back from the
//! source line a node occupies.

/// Byte offset where the trailing comment of `line` starts.
///
/// A `#` starts a comment at the beginning of the line or after whitespace,
/// unless it sits inside a quoted token. Quotes only open a token at the
/// start of the line, after whitespace, or after one of `[{,:`; an apostrophe
/// inside a plain word (`it's`) does not.
pub fn find_comment_start(line: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut prev: Option<char> = None;
    let mut chars = line.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match quote {
            Some('"') => match c {
                '\\' => {
                    chars.next();
                }
                '"' => quote = None,
                _ => {}
            },
            Some(q) => {
                if c == q {
                    if chars.peek().map(|&(_, next)| next) == Some(q) {
                        chars.next();
                    } else {
                        quote = None;
                    }
                }
            }
            None => match c {
                '#' if prev.is_none_or(char::is_whitespace) => return Some(i),
                '"' | '\'' if opens_token(prev) => quote = Some(c),
                _ => {}
            },
        }
        prev = Some(c);
    }
    None
}

fn opens_token(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(c) => c.is_whitespace() || matches!(c, '[' | '{' | ',' | ':'),
    }
}

/// Trailing comment of `line`, trimmed, or `None` if it has none.
pub fn trailing_comment(line: &str) -> Option<&str> {
    let start = find_comment_start(line)?;
    Some(line[start..].trim_end())
}

/// Replace (or remove, when `comment` is empty) the trailing comment of a line.
///
/// `line` must not contain its line terminator.
pub fn rewrite_line(line: &str, comment: &str) -> String {
    let code = match find_comment_start(line) {
        Some(start) => &line[..start],
        None => line,
    }
    .trim_end();

    if comment.is_empty() {
        code.to_string()
    } else if code.is_empty() {
        comment.to_string()
    } else {
        format!("{} {}", code, comment)
    }
}
