//! eco-lex — the hand-written scanner for Eco source text.
//!
//! [`Lexer`] is a stateful, position-addressable scanner: `peek`/`consume`
//! drive normal tokenization, `revert` rewinds to an earlier byte position
//! for backtracking (arrow-function parameter lists look like parenthesized
//! expressions until the `=>` shows up), and `get_until` switches into a
//! raw-text scanning mode for HTML children and template-string segments.
//!
//! Submodules split by what they scan, mirroring the shape of the grammar's
//! own token families: [`cursor`] is the raw byte cursor every scan runs
//! on top of, `lexer::{identifier, number, string, operator, comment}` each
//! own one token family, and `lexer::core` assembles them into the public
//! `Lexer`.

mod cursor;
mod error;
mod lexer;
mod token;

pub use cursor::Cursor;
pub use error::LexError;
pub use lexer::Lexer;
pub use token::{Operator, Token, TokenKind};
