//! The `Parser` struct and the small helpers every parsing submodule
//! shares: token expectation, the primary-level backtrack, and the
//! top-level-only depth check for imports/exports.

use eco_lex::{Lexer, Operator, Token, TokenKind};
use eco_util::{Span, Symbol};

use crate::ast::Stmt;
use crate::error::ParserError;

pub struct Parser<'a> {
    pub(crate) lexer: Lexer<'a>,
    /// Block nesting depth; 0 at the top level of the program. Imports and
    /// exports are only legal at depth 0.
    pub(crate) depth: u32,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { lexer: Lexer::new(source), depth: 0 }
    }

    pub fn parse_program(&mut self) -> Result<Vec<Stmt>, ParserError> {
        let mut stmts = Vec::new();
        while self.lexer.peek()?.is_some() {
            stmts.push(crate::parser::stmt::parse_stmt(self)?);
        }
        Ok(stmts)
    }

    /// Parses a single expression and nothing else. Used for re-parsing an
    /// isolated expression fragment (e.g. the inside of a `#{…}` string
    /// interpolation at evaluation time) rather than a whole program.
    pub fn parse_single_expression(&mut self) -> Result<crate::ast::Expr, ParserError> {
        crate::parser::expr::parse_expression(self)
    }

    pub(crate) fn span_at(&self, position: usize) -> Span {
        self.lexer.span_at(position)
    }

    pub(crate) fn here(&mut self) -> Result<Span, ParserError> {
        let pos = self.lexer.get_position()?;
        Ok(self.span_at(pos))
    }

    pub(crate) fn peek(&mut self) -> Result<Option<Token>, ParserError> {
        Ok(self.lexer.peek()?)
    }

    pub(crate) fn peek_kind(&mut self) -> Result<Option<TokenKind>, ParserError> {
        Ok(self.peek()?.map(|t| t.kind))
    }

    pub(crate) fn consume(&mut self) -> Result<Token, ParserError> {
        Ok(self.lexer.consume()?)
    }

    pub(crate) fn check(&mut self, kind: &TokenKind) -> Result<bool, ParserError> {
        Ok(matches!(self.peek()?, Some(t) if std::mem::discriminant(&t.kind) == std::mem::discriminant(kind)))
    }

    /// Consumes the next token if its kind matches `kind` (by discriminant),
    /// else raises `expected X got Y` at the current position.
    pub(crate) fn expect(&mut self, kind: TokenKind, desc: &'static str) -> Result<Token, ParserError> {
        match self.peek()? {
            Some(tok) if std::mem::discriminant(&tok.kind) == std::mem::discriminant(&kind) => {
                self.consume()
            }
            Some(tok) => Err(ParserError::ExpectedGot {
                expected: desc.to_string(),
                found: format!("{:?}", tok.kind),
                span: self.span_at(tok.position),
            }),
            None => Err(ParserError::UnexpectedToken { span: self.here()? }),
        }
    }

    pub(crate) fn expect_operator(&mut self, op: Operator, desc: &'static str) -> Result<Token, ParserError> {
        match self.peek()? {
            Some(Token { kind: TokenKind::Operator(found), .. }) if found == op => self.consume(),
            Some(tok) => Err(ParserError::ExpectedGot {
                expected: desc.to_string(),
                found: format!("{:?}", tok.kind),
                span: self.span_at(tok.position),
            }),
            None => Err(ParserError::UnexpectedToken { span: self.here()? }),
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<Symbol, ParserError> {
        match self.peek()? {
            Some(Token { kind: TokenKind::Identifier(sym), .. }) => {
                self.consume()?;
                Ok(sym)
            }
            Some(tok) => Err(ParserError::ExpectedGot {
                expected: "identifier".to_string(),
                found: format!("{:?}", tok.kind),
                span: self.span_at(tok.position),
            }),
            None => Err(ParserError::UnexpectedToken { span: self.here()? }),
        }
    }

    /// Consumes the next token only if it is exactly `kind`; returns
    /// whether it matched, consuming on success and leaving the stream
    /// untouched on failure.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> Result<bool, ParserError> {
        if self.check(kind)? {
            self.consume()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn eat_operator(&mut self, op: Operator) -> Result<bool, ParserError> {
        Ok(if self.lexer.peek_operator(op)? {
            self.consume()?;
            true
        } else {
            false
        })
    }
}
