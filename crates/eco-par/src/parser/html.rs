//! HTML-like expression literals (spec §4.2 "HTML").
//!
//! `<tag attrs>children</tag>`, self-closing `<tag attrs/>`, or tagless
//! `<>…</>` fragments. Attribute values are a bare string, a braced
//! expression, or absent (meaning `true`). Children are text runs, nested
//! elements, or braced expressions.
//!
//! Text runs are scanned via `get_until` with terminators `<` and `{`: the
//! spec's own terminator list for child text (`['<', '</']`) only covers
//! where a nested/closing tag starts, but braced-expression children
//! (`<div>hi {name}</div>`) would be unreachable if `{` weren't also a
//! stop character, so it's added here. `</` needs no separate entry since
//! it shares the `<` prefix — the stop position is identical either way,
//! and ordinary tokenization right after the stop disambiguates `<` from
//! `</`.

use eco_lex::TokenKind;

use crate::ast::{Expr, HtmlAttr, HtmlAttrValue, HtmlExpr};
use crate::error::ParserError;
use crate::parser::core::Parser;
use crate::parser::expr::parse_expression;

pub fn parse_html(p: &mut Parser) -> Result<Expr, ParserError> {
    p.expect(TokenKind::Lt, "'<'")?;

    let tag_name = match p.peek_kind()? {
        Some(TokenKind::Identifier(name)) => {
            p.consume()?;
            Some(name)
        }
        _ => None,
    };

    let mut attributes = Vec::new();
    if tag_name.is_some() {
        while let Some(TokenKind::Identifier(attr_name)) = p.peek_kind()? {
            p.consume()?;
            let value = if p.eat_operator(eco_lex::Operator::Eq)? {
                match p.peek_kind()? {
                    Some(TokenKind::String(s)) => {
                        p.consume()?;
                        HtmlAttrValue::StringLit(s)
                    }
                    Some(TokenKind::LBrace) => {
                        p.consume()?;
                        let e = parse_expression(p)?;
                        p.expect(TokenKind::RBrace, "'}'")?;
                        HtmlAttrValue::Expr(Box::new(e))
                    }
                    _ => {
                        return Err(ParserError::ExpectedGot {
                            expected: "attribute value".to_string(),
                            found: format!("{:?}", p.peek_kind()?),
                            span: p.here()?,
                        })
                    }
                }
            } else {
                HtmlAttrValue::Present
            };
            attributes.push(HtmlAttr { name: attr_name, value });
        }
    }

    if p.check(&TokenKind::SelfClose)? {
        p.consume()?;
        return Ok(Expr::Html(HtmlExpr { tag_name, attributes, children: Vec::new() }));
    }

    p.expect(TokenKind::Gt, "'>'")?;

    let mut children = Vec::new();
    loop {
        let text_tok = p.lexer.get_until(&["<", "{"], None)?;
        if let TokenKind::Text(sym) = text_tok.kind {
            if !sym.as_str().is_empty() {
                children.push(Expr::HtmlText(sym));
            }
        }
        match p.peek_kind()? {
            Some(TokenKind::CloseTagStart) => break,
            Some(TokenKind::Lt) => children.push(parse_html(p)?),
            Some(TokenKind::LBrace) => {
                p.consume()?;
                let e = parse_expression(p)?;
                p.expect(TokenKind::RBrace, "'}'")?;
                children.push(Expr::HtmlBraced(Box::new(e)));
            }
            _ => return Err(ParserError::UnexpectedToken { span: p.here()? }),
        }
    }

    p.expect(TokenKind::CloseTagStart, "'</'")?;
    if let Some(name) = tag_name {
        let close_name = p.expect_identifier()?;
        if close_name != name {
            return Err(ParserError::ExpectedGot {
                expected: format!("closing tag '{}'", name.as_str()),
                found: close_name.as_str().to_string(),
                span: p.here()?,
            });
        }
    }
    p.expect(TokenKind::Gt, "'>'")?;

    Ok(Expr::Html(HtmlExpr { tag_name, attributes, children }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Expr {
        let mut p = Parser::new(src);
        parse_html(&mut p).unwrap()
    }

    #[test]
    fn self_closing_with_attrs() {
        let expr = parse("<input disabled value=\"x\"/>");
        match expr {
            Expr::Html(h) => {
                assert_eq!(h.tag_name.unwrap().as_str(), "input");
                assert_eq!(h.attributes.len(), 2);
                assert!(matches!(h.attributes[0].value, HtmlAttrValue::Present));
            }
            other => panic!("expected Html, got {other:?}"),
        }
    }

    #[test]
    fn text_and_nested_children() {
        let expr = parse("<div>hello <span>world</span>!</div>");
        match expr {
            Expr::Html(h) => {
                assert_eq!(h.children.len(), 3);
                assert!(matches!(h.children[0], Expr::HtmlText(_)));
                assert!(matches!(h.children[1], Expr::Html(_)));
                assert!(matches!(h.children[2], Expr::HtmlText(_)));
            }
            other => panic!("expected Html, got {other:?}"),
        }
    }

    #[test]
    fn braced_expression_child() {
        let expr = parse("<div>hi {name}</div>");
        match expr {
            Expr::Html(h) => {
                assert_eq!(h.children.len(), 2);
                assert!(matches!(h.children[1], Expr::HtmlBraced(_)));
            }
            other => panic!("expected Html, got {other:?}"),
        }
    }

    #[test]
    fn tagless_fragment() {
        let expr = parse("<>text</>");
        match expr {
            Expr::Html(h) => assert!(h.tag_name.is_none()),
            other => panic!("expected Html, got {other:?}"),
        }
    }

    #[test]
    fn mismatched_closing_tag_errors() {
        let mut p = Parser::new("<div>x</span>");
        assert!(parse_html(&mut p).is_err());
    }
}
