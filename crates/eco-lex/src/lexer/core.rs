//! The stateful token scanner the parser drives directly (spec §4.1).
//!
//! Unlike a pre-tokenized `Vec<Token>` with an index, `Lexer` re-scans from
//! a byte position on demand. That's what makes `revert` cheap to reason
//! about: rewinding just means "scan from here again," which is exactly
//! what parsing the same prefix twice (e.g. backtracking out of a failed
//! arrow-function parameter list) needs.

use eco_util::{line_and_column, Span};

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::lexer::{comment, identifier, number, operator, string};
use crate::token::{Operator, Token, TokenKind};

pub struct Lexer<'a> {
    source: &'a str,
    /// Byte offset to resume scanning from once `lookahead` is consumed.
    resume_pos: usize,
    /// The next token, scanned but not yet consumed, paired with the byte
    /// offset scanning should resume from after it.
    lookahead: Option<(Token, usize)>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, resume_pos: 0, lookahead: None }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Scans one token starting at `start`, returning it along with the
    /// byte offset immediately after it (trivia before `start` must already
    /// be skipped by the caller).
    fn scan_one(&self, start: usize) -> Result<(Token, usize), LexError> {
        let mut cursor = Cursor::new(self.source);
        cursor.jump_to(start);
        comment::skip_trivia(&mut cursor)?;
        let token_start = cursor.position();

        if cursor.is_at_end() {
            return Ok((Token::new(TokenKind::Eof, token_start), cursor.position()));
        }

        let c = cursor.current_char().unwrap();
        let kind = if identifier::is_identifier_start(c) {
            identifier::scan_identifier_or_keyword(&mut cursor)
        } else if c.is_ascii_digit() {
            number::scan_number(&mut cursor)
        } else if c == '"' || c == '\'' {
            string::scan_string(&mut cursor)?
        } else {
            operator::scan_symbol_or_operator(&mut cursor)?
        };

        Ok((Token::new(kind, token_start), cursor.position()))
    }

    fn fill(&mut self) -> Result<&Token, LexError> {
        if self.lookahead.is_none() {
            let (tok, after) = self.scan_one(self.resume_pos)?;
            self.lookahead = Some((tok, after));
        }
        Ok(&self.lookahead.as_ref().unwrap().0)
    }

    /// Returns the next token without consuming it, or `None` at end of input.
    pub fn peek(&mut self) -> Result<Option<Token>, LexError> {
        let tok = self.fill()?.clone();
        Ok(if tok.kind == TokenKind::Eof { None } else { Some(tok) })
    }

    /// Consumes and returns the next token, failing at end of input.
    pub fn consume(&mut self) -> Result<Token, LexError> {
        self.fill()?;
        let (tok, after) = self.lookahead.take().unwrap();
        self.resume_pos = after;
        if tok.kind == TokenKind::Eof {
            return Err(LexError::UnexpectedEof { span: Span::at(tok.position) });
        }
        Ok(tok)
    }

    /// True if the next token is the given operator, without consuming.
    pub fn peek_operator(&mut self, op: Operator) -> Result<bool, LexError> {
        Ok(matches!(self.peek()?, Some(Token { kind: TokenKind::Operator(o), .. }) if o == op))
    }

    /// Consumes the next token only if it is the given operator.
    pub fn consume_operator(&mut self, op: Operator) -> Result<Token, LexError> {
        match self.peek()? {
            Some(Token { kind: TokenKind::Operator(o), .. }) if o == op => self.consume(),
            other => Err(self.unexpected(op.lexeme(), other)),
        }
    }

    /// Consumes the next token only if it is the identifier `name`.
    pub fn consume_identifier(&mut self, name: &str) -> Result<Token, LexError> {
        match self.peek()? {
            Some(Token { kind: TokenKind::Identifier(sym), .. }) if sym.as_str() == name => {
                self.consume()
            }
            other => Err(self.unexpected("identifier", other)),
        }
    }

    /// Consumes the next token only if its kind matches `expected` (compared
    /// by discriminant, ignoring payload — used for fixed-lexeme kinds like
    /// `TokenKind::LParen`).
    pub fn expect(&mut self, expected: TokenKind, desc: &'static str) -> Result<Token, LexError> {
        match self.peek()? {
            Some(ref tok) if std::mem::discriminant(&tok.kind) == std::mem::discriminant(&expected) => {
                self.consume()
            }
            other => Err(self.unexpected(desc, other)),
        }
    }

    fn unexpected(&self, expected: &'static str, found: Option<Token>) -> LexError {
        match found {
            Some(tok) => {
                LexError::UnexpectedToken { expected, found: tok.kind, span: Span::at(tok.position) }
            }
            None => LexError::UnexpectedEof { span: Span::at(self.source.len()) },
        }
    }

    /// Scans a raw run of text up to (not including) the first occurrence
    /// of any string in `terminators`, bypassing normal tokenization —
    /// whitespace and comment syntax inside the run are just characters.
    /// Used for HTML text children and template-string segments.
    ///
    /// `start_pos`, if given, scans from there instead of the current
    /// position (the parser uses this right after consuming the opening
    /// delimiter, whose own scan already moved `resume_pos` past it).
    pub fn get_until(
        &mut self,
        terminators: &[&str],
        start_pos: Option<usize>,
    ) -> Result<Token, LexError> {
        self.lookahead = None;
        let start = start_pos.unwrap_or(self.resume_pos);
        let mut cursor = Cursor::new(self.source);
        cursor.jump_to(start);
        loop {
            if terminators.iter().any(|t| cursor.starts_with(t)) {
                let text = cursor.slice_from(start);
                self.resume_pos = cursor.position();
                return Ok(Token::new(
                    TokenKind::Text(eco_util::Symbol::intern(text)),
                    start,
                ));
            }
            if cursor.is_at_end() {
                return Err(LexError::UnterminatedScan { span: Span::at(start) });
            }
            cursor.advance();
        }
    }

    /// The byte position of the next not-yet-consumed token.
    pub fn get_position(&mut self) -> Result<usize, LexError> {
        Ok(self.fill()?.position)
    }

    /// The byte position immediately after the last consumed token (before
    /// any trivia that follows it has been skipped).
    pub fn get_last_position(&self) -> usize {
        self.resume_pos
    }

    /// Rewinds the stream to `position` and invalidates any cached lookahead.
    pub fn revert(&mut self, position: usize) {
        self.resume_pos = position;
        self.lookahead = None;
    }

    pub fn get_line_and_column(&self, position: usize) -> (u32, u32) {
        line_and_column(self.source, position)
    }

    pub fn span_at(&self, position: usize) -> Span {
        let (line, column) = self.get_line_and_column(position);
        Span::new(position, position, line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let mut lex = Lexer::new(src);
        let mut out = Vec::new();
        while let Some(tok) = lex.peek().unwrap() {
            out.push(tok.kind);
            lex.consume().unwrap();
        }
        out
    }

    #[test]
    fn lexes_let_statement() {
        let toks = kinds("let x = 1;");
        assert_eq!(
            toks,
            vec![
                TokenKind::Let,
                TokenKind::Identifier(eco_util::Symbol::intern("x")),
                TokenKind::Operator(Operator::Eq),
                TokenKind::Number(1.0),
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn consume_fails_past_end() {
        let mut lex = Lexer::new("");
        assert!(lex.consume().is_err());
    }

    #[test]
    fn peek_does_not_advance() {
        let mut lex = Lexer::new("x y");
        let first = lex.peek().unwrap().unwrap();
        let second = lex.peek().unwrap().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn revert_rewinds_and_reparses() {
        let mut lex = Lexer::new("a + b");
        let start = lex.get_position().unwrap();
        lex.consume().unwrap(); // 'a'
        lex.consume().unwrap(); // '+'
        lex.revert(start);
        let tok = lex.consume().unwrap();
        assert_eq!(tok.kind, TokenKind::Identifier(eco_util::Symbol::intern("a")));
    }

    #[test]
    fn get_until_stops_at_terminator_without_consuming_it() {
        let mut lex = Lexer::new("hello world`done");
        let tok = lex.get_until(&["`"], Some(0)).unwrap();
        match tok.kind {
            TokenKind::Text(sym) => assert_eq!(sym.as_str(), "hello world"),
            other => panic!("expected Text, got {other:?}"),
        }
        let next = lex.consume().unwrap();
        assert_eq!(next.kind, TokenKind::Backtick);
    }

    #[test]
    fn get_until_matches_longest_available_terminator_set() {
        let mut lex = Lexer::new("pre${x}");
        let tok = lex.get_until(&["`", "${"], Some(0)).unwrap();
        match tok.kind {
            TokenKind::Text(sym) => assert_eq!(sym.as_str(), "pre"),
            other => panic!("expected Text, got {other:?}"),
        }
        let next = lex.consume().unwrap();
        assert_eq!(next.kind, TokenKind::DollarBrace);
    }

    #[test]
    fn get_until_without_terminator_errors() {
        let mut lex = Lexer::new("no terminator here");
        assert!(lex.get_until(&["`"], Some(0)).is_err());
    }

    #[test]
    fn comments_are_skipped_between_tokens() {
        let toks = kinds("let /* c */ x = 1; // trailing\n");
        assert!(matches!(toks[0], TokenKind::Let));
    }
}
