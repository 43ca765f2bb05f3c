use std::fmt;

use eco_lex::LexError;
use eco_util::Span;
use thiserror::Error;

/// The closed set of parse-time failures (spec §7). Every variant carries
/// the [`Span`] it was raised at; [`ParserError::line_and_column`] and the
/// `Display` impl produce the exact surface form `Error at line L, column
/// C: <reason>` that bundlers/CLIs show the user.
#[derive(Debug, Error)]
pub enum ParserError {
    #[error("unexpected token")]
    UnexpectedToken { span: Span },

    #[error("unrecognised token")]
    UnrecognisedToken { span: Span },

    #[error("unexpected end of string")]
    UnexpectedEndOfString { span: Span },

    #[error("unclosed comment")]
    UnclosedComment { span: Span },

    #[error("invalid character '{ch}'")]
    InvalidCharacter { ch: char, span: Span },

    #[error("expected {expected}, got {found}")]
    ExpectedGot { expected: String, found: String, span: Span },

    #[error("cannot destructure more values after rest")]
    DestructureAfterRest { span: Span },

    #[error("imports must be top level")]
    ImportsMustBeTopLevel { span: Span },

    #[error("exports must be top level")]
    ExportsMustBeTopLevel { span: Span },
}

impl ParserError {
    pub fn span(&self) -> Span {
        match self {
            ParserError::UnexpectedToken { span }
            | ParserError::UnrecognisedToken { span }
            | ParserError::UnexpectedEndOfString { span }
            | ParserError::UnclosedComment { span }
            | ParserError::InvalidCharacter { span, .. }
            | ParserError::ExpectedGot { span, .. }
            | ParserError::DestructureAfterRest { span }
            | ParserError::ImportsMustBeTopLevel { span }
            | ParserError::ExportsMustBeTopLevel { span } => *span,
        }
    }
}

impl From<LexError> for ParserError {
    fn from(err: LexError) -> Self {
        let span = err.span();
        match err {
            LexError::UnexpectedChar { ch, .. } => ParserError::InvalidCharacter { ch, span },
            LexError::UnterminatedString { .. } => ParserError::UnexpectedEndOfString { span },
            LexError::UnterminatedComment { .. } => ParserError::UnclosedComment { span },
            LexError::UnterminatedScan { .. } => ParserError::UnexpectedEndOfString { span },
            LexError::UnexpectedEof { .. } => ParserError::UnexpectedToken { span },
            LexError::UnexpectedToken { expected, found, .. } => ParserError::ExpectedGot {
                expected: expected.to_string(),
                found: format!("{found:?}"),
                span,
            },
        }
    }
}

/// Wraps a [`ParserError`] with the line/column surface form from spec §6.
pub struct Diagnostic<'a>(pub &'a ParserError);

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let span = self.0.span();
        write!(f, "Error at line {}, column {}: {}", span.line, span.column, self.0)
    }
}
