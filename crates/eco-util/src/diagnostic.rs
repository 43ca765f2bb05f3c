//! Error and warning reporting infrastructure.
//!
//! Both `eco-lex` and `eco-par` report through a shared [`Handler`]: the
//! lexer and parser never panic or bail out on the first bad token, they
//! push a [`Diagnostic`] and return a best-effort result, letting the
//! caller decide whether to keep going. This matches spec §7's "parse-time
//! errors are fatal to the current parse" contract at the driver level
//! while keeping the low-level scanning code infallible to call.

use std::cell::RefCell;
use std::fmt;

use crate::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {}, column {}: {}",
            self.level, self.span.line, self.span.column, self.message
        )
    }
}

/// Fluent builder for a single [`Diagnostic`].
pub struct DiagnosticBuilder {
    level: Level,
    message: String,
    span: Span,
}

impl DiagnosticBuilder {
    pub fn error(message: impl Into<String>) -> Self {
        Self { level: Level::Error, message: message.into(), span: Span::DUMMY }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: Level::Warning, message: message.into(), span: Span::DUMMY }
    }

    pub fn span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn build(self) -> Diagnostic {
        Diagnostic { level: self.level, message: self.message, span: self.span }
    }

    pub fn emit(self, handler: &mut Handler) {
        handler.push(self.build());
    }
}

/// Accumulates diagnostics for one lex/parse run.
#[derive(Default)]
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diag: Diagnostic) {
        self.diagnostics.get_mut().push(diag);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.borrow().iter().any(|d| d.level == Level::Error)
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn first_error(&self) -> Option<Diagnostic> {
        self.diagnostics.borrow().iter().find(|d| d.level == Level::Error).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_emits_into_handler() {
        let mut h = Handler::new();
        DiagnosticBuilder::error("oops").span(Span::new(0, 1, 3, 4)).emit(&mut h);
        assert!(h.has_errors());
        let d = h.first_error().unwrap();
        assert_eq!(d.span.line, 3);
        assert_eq!(format!("{d}"), "error at line 3, column 4: oops");
    }

    #[test]
    fn warnings_do_not_count_as_errors() {
        let mut h = Handler::new();
        DiagnosticBuilder::warning("heads up").emit(&mut h);
        assert!(!h.has_errors());
    }
}
