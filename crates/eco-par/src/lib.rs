//! eco-par — the Pratt-style recursive-descent parser and its AST.
//!
//! [`parse`] is the entry point: source text in, a program (`Vec<Stmt>`)
//! or a [`ParserError`] out. The precedence chain in `parser::expr` is
//! non-associative at every level except assignment and the access/call
//! chain — see that module's doc comment for why `a + b + c` is not the
//! same as `(a + b) + c` here. `eco-eval` implements an `Evaluate` trait
//! over [`ast::Stmt`]/[`ast::Expr`] and `eco-bundle` implements `ToSource`
//! over the same types, both from downstream crates, which is what keeps
//! the AST itself free of any evaluation or source-emission logic.

pub mod ast;
mod error;
mod parser;

pub use error::{Diagnostic, ParserError};
pub use parser::Parser;

/// Parses a full program: the same loop `Parser::parse_program` runs, as
/// a free function for callers that don't need a long-lived `Parser`.
pub fn parse(source: &str) -> Result<Vec<ast::Stmt>, ParserError> {
    let _span = tracing::debug_span!("parse", bytes = source.len()).entered();
    tracing::trace!("lex+parse start");
    let result = Parser::new(source).parse_program();
    match &result {
        Ok(stmts) => tracing::trace!(statements = stmts.len(), "lex+parse end"),
        Err(err) => tracing::debug!(%err, "parse failed"),
    }
    result
}

/// Parses a single expression fragment, e.g. the inside of a `#{…}`
/// string interpolation, re-parsed on demand at evaluation time rather
/// than as part of the enclosing program's own parse.
pub fn parse_expression(source: &str) -> Result<ast::Expr, ParserError> {
    Parser::new(source).parse_single_expression()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Stmt;

    #[test]
    fn end_to_end_scenario_one() {
        // const x = 1 + 2 * 3; return x;
        let program = parse("const x = 1 + 2 * 3; return x;").unwrap();
        assert_eq!(program.len(), 2);
        assert!(matches!(program[0], Stmt::VarDecl { .. }));
        assert!(matches!(program[1], Stmt::Return(Some(_))));
    }

    #[test]
    fn end_to_end_scenario_two_destructure() {
        let program = parse("const [a, , ...b] = [1,2,3,4]; return a + b.length;").unwrap();
        assert_eq!(program.len(), 2);
    }

    #[test]
    fn end_to_end_scenario_five_try_catch_finally() {
        let program =
            parse("let r = ''; try { throw 'oops'; } catch (e) { r = e; } finally { r = r + '!'; } return r;")
                .unwrap();
        assert_eq!(program.len(), 3);
    }

    #[test]
    fn reports_line_and_column_on_error() {
        let err = parse("const x = ;\n").unwrap_err();
        let diag = format!("{}", Diagnostic(&err));
        assert!(diag.starts_with("Error at line 1, column"));
    }
}
