//! Longest-match scanning for symbols and operators.
//!
//! Several symbols and operators share a leading character (`=` alone is
//! the prefix of `=>`, `==`, `===`, and stays `=`), so each branch below
//! looks ahead as far as it needs to before deciding. The one genuine
//! special case is `=`: `=>` always wins over `==`/`=` when the next char
//! is `>`, there's no actual ambiguity since the character after `=`
//! fully determines which token it is.

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{Operator, TokenKind};
use eco_util::Span;

/// Assumes `cursor.current_char()` is one of the symbol/operator leaders.
pub fn scan_symbol_or_operator(cursor: &mut Cursor<'_>) -> Result<TokenKind, LexError> {
    let start = cursor.position();
    let c = cursor.current_char().expect("caller checked a char is present");
    cursor.advance();

    Ok(match c {
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        '[' => TokenKind::LBracket,
        ']' => TokenKind::RBracket,
        '{' => TokenKind::LBrace,
        '}' => TokenKind::RBrace,
        ',' => TokenKind::Comma,
        ';' => TokenKind::Semicolon,
        '?' => TokenKind::Question,
        ':' => TokenKind::Colon,
        '`' => TokenKind::Backtick,

        '.' => {
            if cursor.starts_with("..") {
                cursor.advance_n(2);
                TokenKind::Ellipsis
            } else {
                TokenKind::Dot
            }
        }

        '$' => {
            if cursor.match_char('{') {
                TokenKind::DollarBrace
            } else {
                return Err(LexError::UnexpectedChar { ch: '$', span: Span::at(start) });
            }
        }

        '<' => {
            if cursor.match_char('=') {
                TokenKind::Operator(Operator::Lte)
            } else if cursor.match_char('/') {
                TokenKind::CloseTagStart
            } else {
                TokenKind::Lt
            }
        }

        '>' => {
            if cursor.match_char('=') {
                TokenKind::Operator(Operator::Gte)
            } else {
                TokenKind::Gt
            }
        }

        '=' => {
            if cursor.match_char('>') {
                TokenKind::Arrow
            } else if cursor.starts_with("==") {
                cursor.advance_n(2);
                TokenKind::Operator(Operator::EqEqEq)
            } else if cursor.match_char('=') {
                TokenKind::Operator(Operator::EqEq)
            } else {
                TokenKind::Operator(Operator::Eq)
            }
        }

        '!' => {
            if cursor.starts_with("==") {
                cursor.advance_n(2);
                TokenKind::Operator(Operator::NotEqEq)
            } else if cursor.match_char('=') {
                TokenKind::Operator(Operator::NotEq)
            } else {
                TokenKind::Operator(Operator::Bang)
            }
        }

        '+' => {
            if cursor.match_char('+') {
                TokenKind::Operator(Operator::PlusPlus)
            } else if cursor.match_char('=') {
                TokenKind::Operator(Operator::PlusEq)
            } else {
                TokenKind::Operator(Operator::Plus)
            }
        }

        '-' => {
            if cursor.match_char('-') {
                TokenKind::Operator(Operator::MinusMinus)
            } else if cursor.match_char('=') {
                TokenKind::Operator(Operator::MinusEq)
            } else {
                TokenKind::Operator(Operator::Minus)
            }
        }

        '*' => {
            if cursor.match_char('=') {
                TokenKind::Operator(Operator::StarEq)
            } else {
                TokenKind::Operator(Operator::Star)
            }
        }

        '/' => {
            if cursor.match_char('=') {
                TokenKind::Operator(Operator::SlashEq)
            } else if cursor.match_char('>') {
                TokenKind::SelfClose
            } else {
                TokenKind::Operator(Operator::Slash)
            }
        }

        '&' => {
            if cursor.match_char('&') {
                TokenKind::Operator(Operator::AndAnd)
            } else {
                return Err(LexError::UnexpectedChar { ch: '&', span: Span::at(start) });
            }
        }

        '|' => {
            if cursor.match_char('|') {
                TokenKind::Operator(Operator::OrOr)
            } else {
                return Err(LexError::UnexpectedChar { ch: '|', span: Span::at(start) });
            }
        }

        other => return Err(LexError::UnexpectedChar { ch: other, span: Span::at(start) }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(src: &str) -> TokenKind {
        let mut c = Cursor::new(src);
        scan_symbol_or_operator(&mut c).unwrap()
    }

    #[test]
    fn longest_match_prefers_arrow_over_eq() {
        assert_eq!(scan("=>"), TokenKind::Arrow);
        assert_eq!(scan("==="), TokenKind::Operator(Operator::EqEqEq));
        assert_eq!(scan("=="), TokenKind::Operator(Operator::EqEq));
        assert_eq!(scan("="), TokenKind::Operator(Operator::Eq));
    }

    #[test]
    fn lt_gt_are_symbols_not_operators() {
        assert_eq!(scan("<"), TokenKind::Lt);
        assert_eq!(scan(">"), TokenKind::Gt);
        assert_eq!(scan("<="), TokenKind::Operator(Operator::Lte));
        assert_eq!(scan(">="), TokenKind::Operator(Operator::Gte));
    }

    #[test]
    fn close_tag_and_self_close() {
        assert_eq!(scan("</"), TokenKind::CloseTagStart);
        assert_eq!(scan("/>"), TokenKind::SelfClose);
    }

    #[test]
    fn ellipsis_over_dot() {
        assert_eq!(scan("..."), TokenKind::Ellipsis);
        assert_eq!(scan("."), TokenKind::Dot);
    }

    #[test]
    fn bang_family() {
        assert_eq!(scan("!=="), TokenKind::Operator(Operator::NotEqEq));
        assert_eq!(scan("!="), TokenKind::Operator(Operator::NotEq));
        assert_eq!(scan("!"), TokenKind::Operator(Operator::Bang));
    }

    #[test]
    fn bare_ampersand_is_an_error() {
        let mut c = Cursor::new("&x");
        assert!(scan_symbol_or_operator(&mut c).is_err());
    }
}
