//! Arrow-function parsing, entered only via the primary-level backtrack in
//! `expr::parse_primary_or_arrow` (spec §4.2, §9 "Arrow-function ambiguity").

use eco_lex::TokenKind;

use crate::ast::{Expr, FunctionBody, FunctionExpr, Variable, VariableLeft};
use crate::error::ParserError;
use crate::parser::core::Parser;
use crate::parser::{expr, pattern, stmt};

pub fn parse_arrow_function(p: &mut Parser) -> Result<Expr, ParserError> {
    let parameters = if p.check(&TokenKind::LParen)? {
        parse_paren_param_list(p)?
    } else {
        let name = p.expect_identifier()?;
        vec![Variable { left: VariableLeft::Identifier(name), default_value: None }]
    };
    p.expect(TokenKind::Arrow, "'=>'")?;
    let body = if p.check(&TokenKind::LBrace)? {
        FunctionBody::Block(stmt::parse_block_stmts(p)?)
    } else {
        FunctionBody::Expr(Box::new(expr::parse_expression(p)?))
    };
    Ok(Expr::Function(FunctionExpr { parameters, body }))
}

fn parse_paren_param_list(p: &mut Parser) -> Result<Vec<Variable>, ParserError> {
    p.expect(TokenKind::LParen, "'('")?;
    let mut params = Vec::new();
    if !p.check(&TokenKind::RParen)? {
        loop {
            params.push(pattern::parse_variable(p)?);
            if !p.eat(&TokenKind::Comma)? {
                break;
            }
        }
    }
    p.expect(TokenKind::RParen, "')'")?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_identifier_param() {
        let mut p = Parser::new("x => x + 1");
        let expr = parse_arrow_function(&mut p).unwrap();
        match expr {
            Expr::Function(f) => {
                assert_eq!(f.parameters.len(), 1);
                assert!(matches!(f.body, FunctionBody::Expr(_)));
            }
            other => panic!("expected Function, got {other:?}"),
        }
    }

    #[test]
    fn parenthesized_params_with_default_and_block_body() {
        let mut p = Parser::new("(x, y = 10) => { return x + y; }");
        let expr = parse_arrow_function(&mut p).unwrap();
        match expr {
            Expr::Function(f) => {
                assert_eq!(f.parameters.len(), 2);
                assert!(f.parameters[1].default_value.is_some());
                assert!(matches!(f.body, FunctionBody::Block(_)));
            }
            other => panic!("expected Function, got {other:?}"),
        }
    }

    #[test]
    fn zero_params() {
        let mut p = Parser::new("() => 42");
        let expr = parse_arrow_function(&mut p).unwrap();
        match expr {
            Expr::Function(f) => assert!(f.parameters.is_empty()),
            other => panic!("expected Function, got {other:?}"),
        }
    }
}
