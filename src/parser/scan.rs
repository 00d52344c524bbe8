//
//  scan.rs
//  Routescope
//
//  Created by hak (tharun)
//

//! Byte-level scanning helpers shared by the extractor and the resolver.
//!
//! Every delimiter we care about is ASCII, so walking bytes and slicing at
//! those offsets always lands on UTF-8 char boundaries.

use super::types::Position;

/// Tracks whether the scanner is inside a string literal.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct QuoteState {
    quote: Option<u8>,
    escaped: bool,
}

impl QuoteState {
    pub(crate) fn is_active(&self) -> bool {
        self.quote.is_some() || self.escaped
    }

    /// Feed one byte. Returns true when the byte belongs to a string literal
    /// (delimiters included) or to a backslash escape.
    pub(crate) fn consume(&mut self, b: u8) -> bool {
        if self.escaped {
            self.escaped = false;
            return true;
        }
        if b == b'\\' {
            self.escaped = true;
            return true;
        }
        if let Some(q) = self.quote {
            if b == q {
                self.quote = None;
            }
            return true;
        }
        if matches!(b, b'"' | b'\'' | b'`') {
            self.quote = Some(b);
            return true;
        }
        false
    }
}

fn is_open(b: u8) -> bool {
    matches!(b, b'(' | b'[' | b'{')
}

fn is_close(b: u8) -> bool {
    matches!(b, b')' | b']' | b'}')
}

/// One call argument read by [`extract_first_argument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// Trimmed argument text.
    pub expr: String,
    /// Offset of the terminating `,` / `)` (or end of text).
    pub end: usize,
    /// The terminator byte, `None` at end of text.
    pub terminator: Option<u8>,
}

/// Read the first argument starting right after an opening parenthesis.
///
/// Stops at the first `,` or `)` at nesting depth zero outside strings.
/// Returns `None` only when the text ends before anything was read.
pub fn extract_first_argument(text: &str, start: usize) -> Option<Argument> {
    let bytes = text.as_bytes();
    let mut state = QuoteState::default();
    let mut depth = 0usize;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if state.consume(b) {
            continue;
        }
        if is_open(b) {
            depth += 1;
        } else if is_close(b) && depth > 0 {
            depth -= 1;
        } else if (b == b',' || b == b')') && depth == 0 {
            return Some(Argument {
                expr: text[start..i].trim().to_string(),
                end: i,
                terminator: Some(b),
            });
        }
    }

    let rest = text.get(start..).unwrap_or("").trim();
    if rest.is_empty() {
        None
    } else {
        Some(Argument {
            expr: rest.to_string(),
            end: text.len(),
            terminator: None,
        })
    }
}

/// Read every argument of a call whose `(` is at `open`.
pub fn extract_arguments(text: &str, open: usize) -> Vec<String> {
    let mut args = Vec::new();
    let mut pos = open + 1;
    while let Some(arg) = extract_first_argument(text, pos) {
        if !arg.expr.is_empty() {
            args.push(arg.expr);
        }
        match arg.terminator {
            Some(b',') => pos = arg.end + 1,
            _ => break,
        }
    }
    args
}

/// Offset just past the `)` matching the `(` at `open`.
///
/// Balances parentheses only, respecting string state.
pub fn find_call_close(text: &str, open: usize) -> Option<usize> {
    let mut state = QuoteState::default();
    let mut depth = 0i64;

    for (i, &b) in text.as_bytes().iter().enumerate().skip(open) {
        if state.consume(b) {
            continue;
        }
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Strip balanced outer parentheses: `((x))` -> `x`.
pub fn unwrap_parens(expr: &str) -> &str {
    let mut trimmed = expr.trim();
    while trimmed.starts_with('(') && find_call_close(trimmed, 0) == Some(trimmed.len()) {
        let inner = trimmed[1..trimmed.len() - 1].trim();
        if inner.is_empty() {
            break;
        }
        trimmed = inner;
    }
    trimmed
}

/// Split on any of `separators` at nesting depth zero, outside strings.
/// Pieces are trimmed; a text without separators yields one piece.
pub fn split_top_level<'a>(expr: &'a str, separators: &[&str]) -> Vec<&'a str> {
    let bytes = expr.as_bytes();
    let mut state = QuoteState::default();
    let mut depth = 0usize;
    let mut pieces = Vec::new();
    let mut piece_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if state.consume(b) {
            i += 1;
            continue;
        }
        if is_open(b) {
            depth += 1;
        } else if is_close(b) {
            depth = depth.saturating_sub(1);
        } else if depth == 0 {
            if let Some(sep) = separators
                .iter()
                .find(|sep| bytes[i..].starts_with(sep.as_bytes()))
            {
                pieces.push(expr[piece_start..i].trim());
                i += sep.len();
                piece_start = i;
                continue;
            }
        }
        i += 1;
    }
    pieces.push(expr[piece_start..].trim());
    pieces
}

/// Split an array-literal path argument into its element expressions.
///
/// `['/a', "/b"]` -> `["'/a'", "\"/b\""]`; anything else is returned whole.
pub fn split_route_path_expressions(expr: &str) -> Vec<String> {
    let trimmed = expr.trim();
    if !(trimmed.len() >= 2 && trimmed.starts_with('[') && trimmed.ends_with(']')) {
        return vec![trimmed.to_string()];
    }

    let parts: Vec<String> = split_top_level(&trimmed[1..trimmed.len() - 1], &[","])
        .into_iter()
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    if parts.is_empty() {
        vec![trimmed.to_string()]
    } else {
        parts
    }
}

/// If `expr` is exactly one string literal, return its quote and body.
pub fn quoted_literal(expr: &str) -> Option<(u8, &str)> {
    let bytes = expr.as_bytes();
    let quote = *bytes.first()?;
    if !matches!(quote, b'"' | b'\'' | b'`') || bytes.len() < 2 {
        return None;
    }
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate().skip(1) {
        if escaped {
            escaped = false;
        } else if b == b'\\' {
            escaped = true;
        } else if b == quote {
            return (i == bytes.len() - 1).then(|| (quote, &expr[1..i]));
        }
    }
    None
}

/// `[A-Za-z0-9_$]+`
pub fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'$')
}

/// Cut a trailing `//` comment that sits outside any string.
pub fn strip_line_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut state = QuoteState::default();
    for (i, &b) in bytes.iter().enumerate() {
        if state.consume(b) {
            continue;
        }
        if b == b'/' && bytes.get(i + 1) == Some(&b'/') {
            return line[..i].trim_end();
        }
    }
    line
}

/// Largest char boundary `<= idx`.
pub fn floor_char_boundary(text: &str, idx: usize) -> usize {
    let mut idx = idx.min(text.len());
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// Maps byte offsets to zero-based line/column positions.
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { text, line_starts }
    }

    /// Column counts characters from the start of the line.
    pub fn position(&self, offset: usize) -> Position {
        let offset = floor_char_boundary(self.text, offset);
        let line = self.line_starts.partition_point(|&s| s <= offset) - 1;
        let column = self.text[self.line_starts[line]..offset].chars().count();
        Position { line, column }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_first_argument_simple() {
        let text = "app.get('/users', handler)";
        let arg = extract_first_argument(text, 8).unwrap();
        assert_eq!(arg.expr, "'/users'");
        assert_eq!(arg.terminator, Some(b','));
        assert_eq!(&text[arg.end..arg.end + 1], ",");
    }

    #[test]
    fn test_extract_first_argument_nested_and_strings() {
        let text = r#"r.get(path.join(BASE, "a,b"), h)"#;
        let arg = extract_first_argument(text, 6).unwrap();
        assert_eq!(arg.expr, r#"path.join(BASE, "a,b")"#);

        let text = r#"r.get(['/a', '/b'], h)"#;
        assert_eq!(extract_first_argument(text, 6).unwrap().expr, "['/a', '/b']");

        let text = r#"r.get('/it\'s,here', h)"#;
        assert_eq!(
            extract_first_argument(text, 6).unwrap().expr,
            r#"'/it\'s,here'"#
        );
    }

    #[test]
    fn test_extract_first_argument_eof() {
        assert_eq!(extract_first_argument("x('/a", 2).unwrap().terminator, None);
        assert!(extract_first_argument("x(   ", 2).is_none());
    }

    #[test]
    fn test_extract_arguments() {
        let text = "app.use('/api', auth({ a: 1, b: 2 }), users);";
        let open = text.find('(').unwrap();
        assert_eq!(
            extract_arguments(text, open),
            vec!["'/api'", "auth({ a: 1, b: 2 })", "users"]
        );
        assert!(extract_arguments("app.use()", 7).is_empty());
    }

    #[test]
    fn test_find_call_close() {
        let text = "router.route('/a(b)').get(h)";
        let open = text.find('(').unwrap();
        assert_eq!(find_call_close(text, open), Some(21));
        assert_eq!(&text[21..], ".get(h)");
        assert_eq!(find_call_close("f(('x'", 1), None);
    }

    #[test]
    fn test_unwrap_parens() {
        assert_eq!(unwrap_parens("(('/a'))"), "'/a'");
        assert_eq!(unwrap_parens("(a) + (b)"), "(a) + (b)");
        assert_eq!(unwrap_parens("()"), "()");
    }

    #[test]
    fn test_split_top_level() {
        assert_eq!(split_top_level("A || 'x||y' ?? B", &["||", "??"]), vec!["A", "'x||y'", "B"]);
        assert_eq!(split_top_level("f(a + b) + 'c'", &["+"]), vec!["f(a + b)", "'c'"]);
        assert_eq!(split_top_level("plain", &["+"]), vec!["plain"]);
    }

    #[test]
    fn test_split_route_path_expressions() {
        assert_eq!(
            split_route_path_expressions("[ '/a', \"/b\", ]"),
            vec!["'/a'", "\"/b\""]
        );
        assert_eq!(split_route_path_expressions("'/a'"), vec!["'/a'"]);
        assert_eq!(split_route_path_expressions("[]"), vec!["[]"]);
    }

    #[test]
    fn test_quoted_literal() {
        assert_eq!(quoted_literal("'/a'"), Some((b'\'', "/a")));
        assert_eq!(quoted_literal("`/${X}/b`"), Some((b'`', "/${X}/b")));
        assert_eq!(quoted_literal("'/a' + '/b'"), None);
        assert_eq!(quoted_literal("'"), None);
        assert_eq!(quoted_literal("x"), None);
    }

    #[test]
    fn test_strip_line_comment() {
        assert_eq!(strip_line_comment("'/api' // mount"), "'/api'");
        assert_eq!(strip_line_comment("'http://x'"), "'http://x'");
    }

    #[test]
    fn test_line_index() {
        let text = "a\nbé c\nd";
        let index = LineIndex::new(text);
        assert_eq!(index.position(0), Position { line: 0, column: 0 });
        assert_eq!(index.position(2), Position { line: 1, column: 0 });
        // 'c' sits after a two-byte char
        let c = text.find('c').unwrap();
        assert_eq!(index.position(c), Position { line: 1, column: 3 });
        assert_eq!(index.position(text.len()), Position { line: 2, column: 1 });
    }
}
