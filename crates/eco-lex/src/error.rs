use eco_util::Span;
use thiserror::Error;

use crate::token::TokenKind;

#[derive(Debug, Error)]
pub enum LexError {
    #[error("unexpected character '{ch}'")]
    UnexpectedChar { ch: char, span: Span },

    #[error("unterminated string literal")]
    UnterminatedString { span: Span },

    #[error("unterminated comment")]
    UnterminatedComment { span: Span },

    #[error("unexpected end of input while scanning for a terminator")]
    UnterminatedScan { span: Span },

    #[error("unexpected end of input")]
    UnexpectedEof { span: Span },

    #[error("expected {expected}, found {found:?}")]
    UnexpectedToken { expected: &'static str, found: TokenKind, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. }
            | LexError::UnterminatedString { span, .. }
            | LexError::UnterminatedComment { span, .. }
            | LexError::UnterminatedScan { span, .. }
            | LexError::UnexpectedEof { span, .. }
            | LexError::UnexpectedToken { span, .. } => *span,
        }
    }
}
