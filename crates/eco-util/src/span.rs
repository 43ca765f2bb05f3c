//! Source location tracking.
//!
//! A [`Span`] is a half-open byte range `[lo, hi)` into a single source
//! file, plus the 1-based line/column of `lo`. Every token and AST node in
//! the toolchain carries one; it is the only thing the lexer and parser
//! need to turn a downstream error back into `line L, column C`.

use std::fmt;

/// A byte range into a source string, with the line/column of its start.
///
/// Columns are counted in bytes, not grapheme clusters — matching the
/// byte-index contract the lexer uses everywhere else (`Token::position`,
/// `get_until`, `revert`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub lo: usize,
    pub hi: usize,
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub const DUMMY: Span = Span { lo: 0, hi: 0, line: 1, column: 1 };

    pub fn new(lo: usize, hi: usize, line: u32, column: u32) -> Self {
        Self { lo, hi, line, column }
    }

    /// A zero-width span at a single position, with no known line/column.
    pub fn at(pos: usize) -> Self {
        Self { lo: pos, hi: pos, line: 1, column: 1 }
    }

    /// The smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span {
            lo: self.lo.min(other.lo),
            hi: self.hi.max(other.hi),
            line: self.line,
            column: self.column,
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}..{}", self.line, self.lo, self.hi)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Scans `input` up to (not including) byte offset `pos`, counting newlines,
/// and returns the 1-based `(line, column)` of that position.
///
/// This is the authoritative implementation backing `Lexer::get_line_and_column`
/// (spec §4.1); the lexer's own running `line`/`column` counters are a cache
/// of the same computation kept incrementally for performance.
pub fn line_and_column(input: &str, pos: usize) -> (u32, u32) {
    let pos = pos.min(input.len());
    let mut line = 1u32;
    let mut last_newline = None;
    for (i, b) in input.as_bytes()[..pos].iter().enumerate() {
        if *b == b'\n' {
            line += 1;
            last_newline = Some(i);
        }
    }
    let column = match last_newline {
        Some(nl) => (pos - nl) as u32,
        None => pos as u32 + 1,
    };
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_first_column() {
        assert_eq!(line_and_column("abc", 0), (1, 1));
    }

    #[test]
    fn counts_newlines() {
        let src = "a\nbb\nccc";
        assert_eq!(line_and_column(src, 0), (1, 1));
        assert_eq!(line_and_column(src, 2), (2, 1));
        assert_eq!(line_and_column(src, 5), (3, 1));
        assert_eq!(line_and_column(src, 7), (3, 3));
    }

    #[test]
    fn span_to_covers_both() {
        let a = Span::new(0, 3, 1, 1);
        let b = Span::new(5, 8, 1, 6);
        let merged = a.to(b);
        assert_eq!((merged.lo, merged.hi), (0, 8));
    }
}
