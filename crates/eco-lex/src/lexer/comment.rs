//! Whitespace and comment skipping, interleaved since both are silently
//! dropped before the next real token starts.

use crate::cursor::Cursor;
use crate::error::LexError;
use eco_util::Span;

/// Advances past any run of whitespace and `//`/`/* */` comments.
/// Comments are never turned into tokens; callers only see what's left.
pub fn skip_trivia(cursor: &mut Cursor<'_>) -> Result<(), LexError> {
    loop {
        match cursor.current_char() {
            Some(c) if c.is_whitespace() => {
                cursor.advance();
            }
            Some('/') if cursor.peek_char(1) == Some('/') => {
                while cursor.current_char().map_or(false, |c| c != '\n') {
                    cursor.advance();
                }
            }
            Some('/') if cursor.peek_char(1) == Some('*') => {
                let start = cursor.position();
                cursor.advance_n(2);
                loop {
                    if cursor.starts_with("*/") {
                        cursor.advance_n(2);
                        break;
                    }
                    if cursor.is_at_end() {
                        return Err(LexError::UnterminatedComment { span: Span::at(start) });
                    }
                    cursor.advance();
                }
            }
            _ => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_whitespace_and_line_comments() {
        let mut c = Cursor::new("   // hi\n  x");
        skip_trivia(&mut c).unwrap();
        assert_eq!(c.current_char(), Some('x'));
    }

    #[test]
    fn skips_block_comments() {
        let mut c = Cursor::new("/* a\nb */x");
        skip_trivia(&mut c).unwrap();
        assert_eq!(c.current_char(), Some('x'));
    }

    #[test]
    fn unterminated_block_comment_errors() {
        let mut c = Cursor::new("/* never closes");
        assert!(skip_trivia(&mut c).is_err());
    }
}
