//! Parsing of `Variable`: a bare identifier or a destructuring pattern,
//! each optionally carrying a whole-pattern default. Shared by `let`/`const`
//! declarations and function parameter lists.

use eco_lex::{Operator, TokenKind};

use crate::ast::{DestructuredValue, Variable, VariableLeft};
use crate::error::ParserError;
use crate::parser::core::Parser;
use crate::parser::expr::parse_assignment;

pub fn parse_variable(p: &mut Parser) -> Result<Variable, ParserError> {
    let left = if p.check(&TokenKind::LBracket)? {
        VariableLeft::DestructureArray(parse_array_pattern(p)?)
    } else if p.check(&TokenKind::LBrace)? {
        VariableLeft::DestructureObject(parse_object_pattern(p)?)
    } else {
        VariableLeft::Identifier(p.expect_identifier()?)
    };

    let default_value = if p.eat_operator(Operator::Eq)? {
        Some(Box::new(parse_assignment(p)?))
    } else {
        None
    };

    Ok(Variable { left, default_value })
}

fn parse_array_pattern(p: &mut Parser) -> Result<Vec<Option<DestructuredValue>>, ParserError> {
    p.expect(TokenKind::LBracket, "'['")?;
    let mut elements = Vec::new();
    let mut seen_rest = false;
    if !p.check(&TokenKind::RBracket)? {
        loop {
            if p.check(&TokenKind::Comma)? {
                // `, ,` — a hole.
                elements.push(None);
            } else {
                if seen_rest {
                    return Err(ParserError::DestructureAfterRest { span: p.here()? });
                }
                let value = parse_destructured_value(p)?;
                seen_rest = value.is_rest;
                elements.push(Some(value));
            }
            if !p.eat(&TokenKind::Comma)? {
                break;
            }
        }
    }
    p.expect(TokenKind::RBracket, "']'")?;
    Ok(elements)
}

fn parse_object_pattern(p: &mut Parser) -> Result<Vec<DestructuredValue>, ParserError> {
    p.expect(TokenKind::LBrace, "'{'")?;
    let mut elements = Vec::new();
    let mut seen_rest = false;
    if !p.check(&TokenKind::RBrace)? {
        loop {
            if seen_rest {
                return Err(ParserError::DestructureAfterRest { span: p.here()? });
            }
            let value = parse_destructured_value(p)?;
            seen_rest = value.is_rest;
            elements.push(value);
            if !p.eat(&TokenKind::Comma)? {
                break;
            }
        }
    }
    p.expect(TokenKind::RBrace, "'}'")?;
    Ok(elements)
}

fn parse_destructured_value(p: &mut Parser) -> Result<DestructuredValue, ParserError> {
    let is_rest = p.eat(&TokenKind::Ellipsis)?;
    let name = p.expect_identifier()?;
    let default = if !is_rest && p.eat_operator(Operator::Eq)? {
        Some(Box::new(parse_assignment(p)?))
    } else {
        None
    };
    Ok(DestructuredValue { name, default, is_rest })
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_util::Symbol;

    #[test]
    fn plain_identifier() {
        let mut p = Parser::new("x");
        let v = parse_variable(&mut p).unwrap();
        assert_eq!(v.left, VariableLeft::Identifier(Symbol::intern("x")));
        assert!(v.default_value.is_none());
    }

    #[test]
    fn identifier_with_default() {
        let mut p = Parser::new("x = 10");
        let v = parse_variable(&mut p).unwrap();
        assert!(v.default_value.is_some());
    }

    #[test]
    fn array_destructure_with_hole_and_rest() {
        let mut p = Parser::new("[a, , ...b]");
        let v = parse_variable(&mut p).unwrap();
        match v.left {
            VariableLeft::DestructureArray(elems) => {
                assert_eq!(elems.len(), 3);
                assert!(elems[1].is_none());
                assert!(elems[2].as_ref().unwrap().is_rest);
            }
            other => panic!("expected DestructureArray, got {other:?}"),
        }
    }

    #[test]
    fn rest_must_be_last() {
        let mut p = Parser::new("[...a, b]");
        assert!(parse_variable(&mut p).is_err());
    }

    #[test]
    fn object_destructure() {
        let mut p = Parser::new("{a, b = 1}");
        let v = parse_variable(&mut p).unwrap();
        match v.left {
            VariableLeft::DestructureObject(elems) => assert_eq!(elems.len(), 2),
            other => panic!("expected DestructureObject, got {other:?}"),
        }
    }
}
