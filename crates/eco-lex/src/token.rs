//! The closed token vocabulary.
//!
//! Three disjoint families, matching the source grammar's own three kinds
//! of fixed lexeme:
//!
//! - **Symbols** carry no payload; the variant itself is the lexeme
//!   (`LParen`, `Arrow`, `Ellipsis`, ...). This includes `<` and `>`, which
//!   double as relational operators in the parser's precedence table but
//!   are lexed as symbols, not operators — see [`Operator`] below.
//! - **Operators** are the closed arithmetic/comparison/assignment set.
//!   `<` and `>` are deliberately absent here even though `<=`/`>=` are
//!   present: the grammar treats bare `<`/`>` as symbols, so the parser's
//!   relational level reads both `TokenKind::Lt`/`Gt` and
//!   `TokenKind::Operator(Lte|Gte)` at the same precedence slot.
//! - **Keywords** and **keyword-literals** are fixed words; keyword-literals
//!   (`true`, `false`, `null`, `undefined`) are split out because the
//!   parser turns them directly into literal expression nodes, whereas
//!   plain keywords start statements or sub-expressions.
use eco_util::Symbol;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PlusPlus,
    MinusMinus,
    AndAnd,
    OrOr,
    EqEqEq,
    EqEq,
    Eq,
    NotEqEq,
    NotEq,
    Gte,
    Lte,
    Plus,
    Minus,
    Star,
    Slash,
    Bang,
}

impl Operator {
    pub fn lexeme(self) -> &'static str {
        use Operator::*;
        match self {
            PlusEq => "+=",
            MinusEq => "-=",
            StarEq => "*=",
            SlashEq => "/=",
            PlusPlus => "++",
            MinusMinus => "--",
            AndAnd => "&&",
            OrOr => "||",
            EqEqEq => "===",
            EqEq => "==",
            Eq => "=",
            NotEqEq => "!==",
            NotEq => "!=",
            Gte => ">=",
            Lte => "<=",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Bang => "!",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // --- symbols ---
    Arrow,      // =>
    Ellipsis,   // ...
    Backtick,   // `
    DollarBrace, // ${
    CloseTagStart, // </
    SelfClose,  // />
    Lt,         // <
    Gt,         // >
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Dot,
    Question,
    Colon,
    Semicolon,

    // --- keywords ---
    Const,
    Let,
    Return,
    New,
    If,
    Else,
    While,
    Try,
    Catch,
    Finally,
    Throw,
    Typeof,
    Export,
    Default,
    Expose,
    Import,
    From,
    As,

    // --- keyword-literals ---
    True,
    False,
    Null,
    Undefined,

    Identifier(Symbol),
    Number(f64),
    String(Symbol),
    Operator(Operator),

    /// A raw text run produced by `Lexer::get_until`: HTML text children and
    /// template-string segments. Not produced by normal `next_token` scanning.
    Text(Symbol),

    Eof,
}

impl TokenKind {
    pub fn keyword_from_str(word: &str) -> Option<TokenKind> {
        use TokenKind::*;
        Some(match word {
            "const" => Const,
            "let" => Let,
            "return" => Return,
            "new" => New,
            "if" => If,
            "else" => Else,
            "while" => While,
            "try" => Try,
            "catch" => Catch,
            "finally" => Finally,
            "throw" => Throw,
            "typeof" => Typeof,
            "export" => Export,
            "default" => Default,
            "expose" => Expose,
            "import" => Import,
            "from" => From,
            "as" => As,
            "true" => True,
            "false" => False,
            "null" => Null,
            "undefined" => Undefined,
            _ => return None,
        })
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self, TokenKind::Identifier(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first character of this token in the source.
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, position: usize) -> Self {
        Self { kind, position }
    }
}
