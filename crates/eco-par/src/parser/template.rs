//! Template strings (spec §4.2 "Template strings"): between two `` ` ``,
//! alternating literal segments and `${ expr }` interpolations.

use eco_lex::TokenKind;

use crate::ast::{Expr, TemplatePart};
use crate::error::ParserError;
use crate::parser::core::Parser;
use crate::parser::expr::parse_expression;

pub fn parse_template_string(p: &mut Parser) -> Result<Expr, ParserError> {
    p.expect(TokenKind::Backtick, "'`'")?;
    let mut parts = Vec::new();
    loop {
        let text_tok = p.lexer.get_until(&["`", "${"], None)?;
        if let TokenKind::Text(sym) = text_tok.kind {
            if !sym.as_str().is_empty() {
                parts.push(TemplatePart::Content(sym));
            }
        }
        match p.peek_kind()? {
            Some(TokenKind::Backtick) => {
                p.consume()?;
                break;
            }
            Some(TokenKind::DollarBrace) => {
                p.consume()?;
                let e = parse_expression(p)?;
                p.expect(TokenKind::RBrace, "'}'")?;
                parts.push(TemplatePart::Interpolation(Box::new(e)));
            }
            _ => return Err(ParserError::UnexpectedToken { span: p.here()? }),
        }
    }
    Ok(Expr::TemplateString(parts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_only() {
        let mut p = Parser::new("`hello`");
        let expr = parse_template_string(&mut p).unwrap();
        match expr {
            Expr::TemplateString(parts) => assert_eq!(parts.len(), 1),
            other => panic!("expected TemplateString, got {other:?}"),
        }
    }

    #[test]
    fn interpolated_parts() {
        let mut p = Parser::new("`a ${1 + 1} b`");
        let expr = parse_template_string(&mut p).unwrap();
        match expr {
            Expr::TemplateString(parts) => {
                assert_eq!(parts.len(), 3);
                assert!(matches!(parts[0], TemplatePart::Content(_)));
                assert!(matches!(parts[1], TemplatePart::Interpolation(_)));
                assert!(matches!(parts[2], TemplatePart::Content(_)));
            }
            other => panic!("expected TemplateString, got {other:?}"),
        }
    }

    #[test]
    fn empty_template() {
        let mut p = Parser::new("``");
        let expr = parse_template_string(&mut p).unwrap();
        assert_eq!(expr, Expr::TemplateString(Vec::new()));
    }
}
