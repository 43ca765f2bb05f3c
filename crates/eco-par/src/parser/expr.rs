//! The precedence chain (spec §4.2).
//!
//! Lowest to highest: assignment (right-assoc) → ternary → logical
//! (`|| &&`, one level) → equality/relational (one level) → additive →
//! multiplicative → unary prefix → postfix → access/call chain (the one
//! left-associative, iterated level) → primary.
//!
//! Every level except assignment and the access/call chain is
//! **non-associative at its own level**: it reads a left operand, and if
//! the next token matches, consumes one operator and ONE right operand at
//! the sub-level, then returns — it does not loop to absorb a second
//! operator at the same level. `a + b + c` therefore parses as `a + b`,
//! leaving `+ c` for whatever follows to choke on. This is intentional;
//! see the module-level note in `lib.rs`.

use eco_lex::{Operator, TokenKind};

use crate::ast::{AssignOp, BinaryOp, Expr, IncDecOp, LiteralValue, UnaryOp};
use crate::error::ParserError;
use crate::parser::core::Parser;
use crate::parser::{html, template};

pub fn parse_expression(p: &mut Parser) -> Result<Expr, ParserError> {
    parse_assignment(p)
}

fn parse_assignment(p: &mut Parser) -> Result<Expr, ParserError> {
    let left = parse_ternary(p)?;
    let op = match p.peek_kind()? {
        Some(TokenKind::Operator(Operator::Eq)) => Some(AssignOp::Assign),
        Some(TokenKind::Operator(Operator::PlusEq)) => Some(AssignOp::AddAssign),
        Some(TokenKind::Operator(Operator::MinusEq)) => Some(AssignOp::SubAssign),
        Some(TokenKind::Operator(Operator::StarEq)) => Some(AssignOp::MulAssign),
        Some(TokenKind::Operator(Operator::SlashEq)) => Some(AssignOp::DivAssign),
        _ => None,
    };
    let Some(op) = op else { return Ok(left) };
    p.consume()?;
    // Right-associative: the RHS may itself be another assignment.
    let value = parse_assignment(p)?;
    Ok(Expr::Assignment { target: Box::new(left), op, value: Box::new(value) })
}

fn parse_ternary(p: &mut Parser) -> Result<Expr, ParserError> {
    let cond = parse_logical(p)?;
    if !p.eat(&TokenKind::Question)? {
        return Ok(cond);
    }
    let then_branch = parse_assignment(p)?;
    p.expect(TokenKind::Colon, "':'")?;
    let else_branch = parse_ternary(p)?;
    Ok(Expr::Ternary {
        cond: Box::new(cond),
        then_branch: Box::new(then_branch),
        else_branch: Box::new(else_branch),
    })
}

fn parse_logical(p: &mut Parser) -> Result<Expr, ParserError> {
    let left = parse_equality(p)?;
    let op = match p.peek_kind()? {
        Some(TokenKind::Operator(Operator::OrOr)) => Some(BinaryOp::OrOr),
        Some(TokenKind::Operator(Operator::AndAnd)) => Some(BinaryOp::AndAnd),
        _ => None,
    };
    let Some(op) = op else { return Ok(left) };
    p.consume()?;
    let right = parse_equality(p)?;
    Ok(Expr::Binary { left: Box::new(left), op, right: Box::new(right) })
}

fn parse_equality(p: &mut Parser) -> Result<Expr, ParserError> {
    let left = parse_additive(p)?;
    let op = match p.peek_kind()? {
        Some(TokenKind::Operator(Operator::EqEqEq)) => Some(BinaryOp::EqEqEq),
        Some(TokenKind::Operator(Operator::EqEq)) => Some(BinaryOp::EqEq),
        Some(TokenKind::Operator(Operator::NotEqEq)) => Some(BinaryOp::NotEqEq),
        Some(TokenKind::Operator(Operator::NotEq)) => Some(BinaryOp::NotEq),
        Some(TokenKind::Operator(Operator::Gte)) => Some(BinaryOp::Gte),
        Some(TokenKind::Operator(Operator::Lte)) => Some(BinaryOp::Lte),
        Some(TokenKind::Lt) => Some(BinaryOp::Lt),
        Some(TokenKind::Gt) => Some(BinaryOp::Gt),
        _ => None,
    };
    let Some(op) = op else { return Ok(left) };
    p.consume()?;
    let right = parse_additive(p)?;
    Ok(Expr::Binary { left: Box::new(left), op, right: Box::new(right) })
}

fn parse_additive(p: &mut Parser) -> Result<Expr, ParserError> {
    let left = parse_multiplicative(p)?;
    let op = match p.peek_kind()? {
        Some(TokenKind::Operator(Operator::Plus)) => Some(BinaryOp::Add),
        Some(TokenKind::Operator(Operator::Minus)) => Some(BinaryOp::Sub),
        _ => None,
    };
    let Some(op) = op else { return Ok(left) };
    p.consume()?;
    let right = parse_multiplicative(p)?;
    Ok(Expr::Binary { left: Box::new(left), op, right: Box::new(right) })
}

fn parse_multiplicative(p: &mut Parser) -> Result<Expr, ParserError> {
    let left = parse_unary(p)?;
    let op = match p.peek_kind()? {
        Some(TokenKind::Operator(Operator::Star)) => Some(BinaryOp::Mul),
        Some(TokenKind::Operator(Operator::Slash)) => Some(BinaryOp::Div),
        _ => None,
    };
    let Some(op) = op else { return Ok(left) };
    p.consume()?;
    let right = parse_unary(p)?;
    Ok(Expr::Binary { left: Box::new(left), op, right: Box::new(right) })
}

fn parse_unary(p: &mut Parser) -> Result<Expr, ParserError> {
    match p.peek_kind()? {
        Some(TokenKind::Operator(Operator::Minus)) => {
            p.consume()?;
            Ok(Expr::Unary { op: UnaryOp::Neg, expr: Box::new(parse_unary(p)?) })
        }
        Some(TokenKind::Operator(Operator::Bang)) => {
            p.consume()?;
            Ok(Expr::Unary { op: UnaryOp::Not, expr: Box::new(parse_unary(p)?) })
        }
        Some(TokenKind::Operator(Operator::PlusPlus)) => {
            p.consume()?;
            Ok(Expr::IncOrDec { is_prefix: true, op: IncDecOp::Inc, expr: Box::new(parse_unary(p)?) })
        }
        Some(TokenKind::Operator(Operator::MinusMinus)) => {
            p.consume()?;
            Ok(Expr::IncOrDec { is_prefix: true, op: IncDecOp::Dec, expr: Box::new(parse_unary(p)?) })
        }
        _ => parse_postfix(p),
    }
}

fn parse_postfix(p: &mut Parser) -> Result<Expr, ParserError> {
    let expr = parse_call_chain(p)?;
    match p.peek_kind()? {
        Some(TokenKind::Operator(Operator::PlusPlus)) => {
            p.consume()?;
            Ok(Expr::IncOrDec { is_prefix: false, op: IncDecOp::Inc, expr: Box::new(expr) })
        }
        Some(TokenKind::Operator(Operator::MinusMinus)) => {
            p.consume()?;
            Ok(Expr::IncOrDec { is_prefix: false, op: IncDecOp::Dec, expr: Box::new(expr) })
        }
        _ => Ok(expr),
    }
}

/// The one left-associative, iterated level: `. [ ] ( )` chain off a
/// primary expression (`a.b[c](d).e`).
fn parse_call_chain(p: &mut Parser) -> Result<Expr, ParserError> {
    let mut expr = parse_primary_or_arrow(p)?;
    loop {
        match p.peek_kind()? {
            Some(TokenKind::Dot) => {
                p.consume()?;
                let field = p.expect_identifier()?;
                if p.check(&TokenKind::LParen)? {
                    let args = parse_call_args(p)?;
                    expr = Expr::MethodCall { object: Box::new(expr), field_name: field, args };
                } else {
                    expr = Expr::FieldAccess { object: Box::new(expr), field };
                }
            }
            Some(TokenKind::LBracket) => {
                p.consume()?;
                let index = parse_expression(p)?;
                p.expect(TokenKind::RBracket, "']'")?;
                expr = Expr::ArrayAccess { object: Box::new(expr), index: Box::new(index) };
            }
            Some(TokenKind::LParen) => {
                let args = parse_call_args(p)?;
                expr = Expr::FuncCall { callee: Box::new(expr), args };
            }
            _ => break,
        }
    }
    Ok(expr)
}

fn parse_call_args(p: &mut Parser) -> Result<Vec<Expr>, ParserError> {
    p.expect(TokenKind::LParen, "'('")?;
    let mut args = Vec::new();
    if !p.check(&TokenKind::RParen)? {
        loop {
            args.push(parse_assignment(p)?);
            if !p.eat(&TokenKind::Comma)? {
                break;
            }
        }
    }
    p.expect(TokenKind::RParen, "')'")?;
    Ok(args)
}

/// Parses a primary expression, backtracking into an arrow-function parse
/// if the primary turns out to be followed by `=>`, or if the primary
/// dispatch itself fails outright.
fn parse_primary_or_arrow(p: &mut Parser) -> Result<Expr, ParserError> {
    let start = p.lexer.get_position()?;
    match parse_primary(p) {
        Ok(expr) => {
            if p.check(&TokenKind::Arrow)? {
                p.lexer.revert(start);
                crate::parser::arrow::parse_arrow_function(p)
            } else {
                Ok(expr)
            }
        }
        Err(_) => {
            p.lexer.revert(start);
            crate::parser::arrow::parse_arrow_function(p)
        }
    }
}

fn parse_primary(p: &mut Parser) -> Result<Expr, ParserError> {
    let Some(tok) = p.peek()? else {
        return Err(ParserError::UnexpectedToken { span: p.here()? });
    };
    match tok.kind {
        TokenKind::True => {
            p.consume()?;
            Ok(Expr::Literal(LiteralValue::Bool(true)))
        }
        TokenKind::False => {
            p.consume()?;
            Ok(Expr::Literal(LiteralValue::Bool(false)))
        }
        TokenKind::Null => {
            p.consume()?;
            Ok(Expr::Literal(LiteralValue::Null))
        }
        TokenKind::Undefined => {
            p.consume()?;
            Ok(Expr::Literal(LiteralValue::Undefined))
        }
        TokenKind::Number(n) => {
            p.consume()?;
            Ok(Expr::Literal(LiteralValue::Number(n)))
        }
        TokenKind::String(s) => {
            p.consume()?;
            Ok(Expr::Literal(LiteralValue::String(s)))
        }
        TokenKind::LParen => {
            p.consume()?;
            let inner = parse_expression(p)?;
            p.expect(TokenKind::RParen, "')'")?;
            Ok(Expr::Parens(Box::new(inner)))
        }
        TokenKind::LBracket => parse_array(p),
        TokenKind::LBrace => parse_object(p),
        TokenKind::Lt => html::parse_html(p),
        TokenKind::Backtick => template::parse_template_string(p),
        TokenKind::New => {
            p.consume()?;
            let class_name = p.expect_identifier()?;
            let args = parse_call_args(p)?;
            Ok(Expr::New { class_name, args })
        }
        TokenKind::Typeof => {
            p.consume()?;
            Ok(Expr::Typeof(Box::new(parse_unary(p)?)))
        }
        TokenKind::Ellipsis => {
            p.consume()?;
            Ok(Expr::Spread(Box::new(parse_assignment(p)?)))
        }
        TokenKind::Identifier(name) => {
            p.consume()?;
            Ok(Expr::Load(name))
        }
        _ => Err(ParserError::UnexpectedToken { span: p.span_at(tok.position) }),
    }
}

fn parse_array(p: &mut Parser) -> Result<Expr, ParserError> {
    p.expect(TokenKind::LBracket, "'['")?;
    let mut elements = Vec::new();
    if !p.check(&TokenKind::RBracket)? {
        loop {
            elements.push(parse_assignment(p)?);
            if !p.eat(&TokenKind::Comma)? {
                break;
            }
        }
    }
    p.expect(TokenKind::RBracket, "']'")?;
    Ok(Expr::Array(elements))
}

fn parse_object(p: &mut Parser) -> Result<Expr, ParserError> {
    use crate::ast::ObjectField;

    p.expect(TokenKind::LBrace, "'{'")?;
    let mut fields = Vec::new();
    if !p.check(&TokenKind::RBrace)? {
        loop {
            if p.eat(&TokenKind::Ellipsis)? {
                fields.push(ObjectField::Spread { value: parse_assignment(p)? });
            } else if p.eat(&TokenKind::LBracket)? {
                let key = parse_assignment(p)?;
                p.expect(TokenKind::RBracket, "']'")?;
                p.expect(TokenKind::Colon, "':'")?;
                let value = parse_assignment(p)?;
                fields.push(ObjectField::Dynamic { key, value });
            } else {
                let key = match p.peek_kind()? {
                    Some(TokenKind::String(s)) => {
                        p.consume()?;
                        s
                    }
                    _ => p.expect_identifier()?,
                };
                if p.eat(&TokenKind::Colon)? {
                    let value = parse_assignment(p)?;
                    fields.push(ObjectField::Regular { key, value: Some(value) });
                } else {
                    fields.push(ObjectField::Regular { key, value: None });
                }
            }
            if !p.eat(&TokenKind::Comma)? {
                break;
            }
        }
    }
    p.expect(TokenKind::RBrace, "'}'")?;
    Ok(Expr::Object(fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOp;

    fn parse(src: &str) -> Expr {
        let mut p = Parser::new(src);
        parse_expression(&mut p).unwrap()
    }

    #[test]
    fn literals() {
        assert_eq!(parse("42"), Expr::Literal(LiteralValue::Number(42.0)));
        assert_eq!(parse("true"), Expr::Literal(LiteralValue::Bool(true)));
        assert_eq!(parse("null"), Expr::Literal(LiteralValue::Null));
    }

    #[test]
    fn same_precedence_does_not_chain() {
        // a + b + c parses as (a + b), leaving `+ c` unconsumed.
        let mut p = Parser::new("a + b + c");
        let expr = parse_expression(&mut p).unwrap();
        match expr {
            Expr::Binary { op: BinaryOp::Add, left, right } => {
                assert_eq!(*left, Expr::Load(eco_util::Symbol::intern("a")));
                assert_eq!(*right, Expr::Load(eco_util::Symbol::intern("b")));
            }
            other => panic!("expected Binary(a + b), got {other:?}"),
        }
        // The trailing `+ c` is still there for the caller to deal with.
        assert!(p.peek().unwrap().is_some());
    }

    #[test]
    fn different_levels_compose_normally() {
        // 1 + 2 * 3 => 1 + (2 * 3), each level applying exactly once.
        let expr = parse("1 + 2 * 3");
        match expr {
            Expr::Binary { op: BinaryOp::Add, left, right } => {
                assert_eq!(*left, Expr::Literal(LiteralValue::Number(1.0)));
                assert_eq!(
                    *right,
                    Expr::Binary {
                        op: BinaryOp::Mul,
                        left: Box::new(Expr::Literal(LiteralValue::Number(2.0))),
                        right: Box::new(Expr::Literal(LiteralValue::Number(3.0))),
                    }
                );
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn assignment_is_right_associative() {
        let expr = parse("a = b = 1");
        match expr {
            Expr::Assignment { value, .. } => {
                assert!(matches!(*value, Expr::Assignment { .. }));
            }
            other => panic!("expected nested Assignment, got {other:?}"),
        }
    }

    #[test]
    fn call_chain_is_iterated_left_assoc() {
        let expr = parse("a.b.c(1)[0]");
        assert!(matches!(expr, Expr::ArrayAccess { .. }));
    }

    #[test]
    fn parenthesized_primary_does_not_backtrack_into_arrow() {
        let expr = parse("(1 + 2)");
        assert!(matches!(expr, Expr::Parens(_)));
    }
}
