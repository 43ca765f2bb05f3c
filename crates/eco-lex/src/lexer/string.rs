//! Single- or double-quoted string literals.
//!
//! Escape sequences are not interpreted: a backslash is just a character.
//! `'it\'s'` does **not** escape the quote — it terminates the string at
//! the `'` right after `\`, leaving a dangling `s'` for the parser to choke
//! on. This mirrors the surface grammar as specified; it is a known
//! limitation, not a bug to paper over.

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::TokenKind;
use eco_util::{Span, Symbol};

/// Assumes `cursor.current_char()` is `'` or `"`.
pub fn scan_string(cursor: &mut Cursor<'_>) -> Result<TokenKind, LexError> {
    let start = cursor.position();
    let quote = cursor.advance().expect("caller checked a quote char is present");
    let content_start = cursor.position();
    loop {
        match cursor.current_char() {
            Some(c) if c == quote => {
                let content = cursor.slice_from(content_start);
                cursor.advance();
                return Ok(TokenKind::String(Symbol::intern(content)));
            }
            Some(_) => {
                cursor.advance();
            }
            None => return Err(LexError::UnterminatedString { span: Span::at(start) }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_double_quoted() {
        let mut c = Cursor::new("\"hello\" rest");
        let tok = scan_string(&mut c).unwrap();
        assert_eq!(tok, TokenKind::String(Symbol::intern("hello")));
    }

    #[test]
    fn scans_single_quoted() {
        let mut c = Cursor::new("'hi'");
        assert_eq!(scan_string(&mut c).unwrap(), TokenKind::String(Symbol::intern("hi")));
    }

    #[test]
    fn backslash_does_not_escape_the_closing_quote() {
        let mut c = Cursor::new(r"'it\'s'");
        let tok = scan_string(&mut c).unwrap();
        // Terminates at the quote right after the backslash.
        assert_eq!(tok, TokenKind::String(Symbol::intern(r"it\")));
    }

    #[test]
    fn unterminated_string_errors() {
        let mut c = Cursor::new("\"never closes");
        assert!(scan_string(&mut c).is_err());
    }
}
