//! `[A-Za-z_][A-Za-z0-9_]*`, then a keyword-table lookup.

use crate::cursor::Cursor;
use crate::token::TokenKind;
use eco_util::Symbol;

pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Assumes `cursor.current_char()` satisfies [`is_identifier_start`].
pub fn scan_identifier_or_keyword(cursor: &mut Cursor<'_>) -> TokenKind {
    let start = cursor.position();
    while cursor.current_char().map_or(false, is_identifier_continue) {
        cursor.advance();
    }
    let word = cursor.slice_from(start);
    TokenKind::keyword_from_str(word).unwrap_or_else(|| TokenKind::Identifier(Symbol::intern(word)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_plain_identifier() {
        let mut c = Cursor::new("foo_bar2 rest");
        let tok = scan_identifier_or_keyword(&mut c);
        assert_eq!(tok, TokenKind::Identifier(Symbol::intern("foo_bar2")));
    }

    #[test]
    fn recognizes_keywords() {
        let mut c = Cursor::new("return");
        assert_eq!(scan_identifier_or_keyword(&mut c), TokenKind::Return);
    }

    #[test]
    fn recognizes_keyword_literals() {
        let mut c = Cursor::new("undefined");
        assert_eq!(scan_identifier_or_keyword(&mut c), TokenKind::Undefined);
    }
}
