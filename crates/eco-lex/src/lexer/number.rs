//! Decimal numeric literals: `123` or `123.456`.
//!
//! No hex/octal/binary bases, no exponent notation, no digit separators —
//! the grammar only ever needed plain decimal constants.

use crate::cursor::Cursor;
use crate::token::TokenKind;

/// Assumes `cursor.current_char()` is an ASCII digit.
pub fn scan_number(cursor: &mut Cursor<'_>) -> TokenKind {
    let start = cursor.position();
    while cursor.current_char().map_or(false, |c| c.is_ascii_digit()) {
        cursor.advance();
    }
    if cursor.current_char() == Some('.') && cursor.peek_char(1).map_or(false, |c| c.is_ascii_digit()) {
        cursor.advance(); // the '.'
        while cursor.current_char().map_or(false, |c| c.is_ascii_digit()) {
            cursor.advance();
        }
    }
    let text = cursor.slice_from(start);
    // `text` is built entirely from ASCII digits and at most one '.', so it
    // always parses; a malformed literal here would be a scanner bug.
    TokenKind::Number(text.parse().expect("number scanner produced invalid float text"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_integer() {
        let mut c = Cursor::new("42;");
        assert_eq!(scan_number(&mut c), TokenKind::Number(42.0));
        assert_eq!(c.current_char(), Some(';'));
    }

    #[test]
    fn scans_float() {
        let mut c = Cursor::new("3.5 ");
        assert_eq!(scan_number(&mut c), TokenKind::Number(3.5));
    }

    #[test]
    fn dot_without_trailing_digit_is_not_consumed() {
        // `1.` with nothing after the dot: the '.' belongs to the next token
        // (e.g. a member access), not to this number.
        let mut c = Cursor::new("1.toString");
        assert_eq!(scan_number(&mut c), TokenKind::Number(1.0));
        assert_eq!(c.current_char(), Some('.'));
    }
}
