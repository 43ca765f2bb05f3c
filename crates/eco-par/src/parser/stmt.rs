//! Statement dispatch and the statement forms (spec §4.2 "Statement
//! dispatch", "Imports", "Exports").

use eco_lex::{Operator, TokenKind};
use eco_util::Symbol;

use crate::ast::{ExportBinding, ExportStmt, ImportBinding, ImportStmt, Stmt};
use crate::error::ParserError;
use crate::parser::core::Parser;
use crate::parser::expr::parse_expression;
use crate::parser::pattern::parse_variable;

pub fn parse_stmt(p: &mut Parser) -> Result<Stmt, ParserError> {
    match p.peek_kind()? {
        Some(TokenKind::Semicolon) => {
            p.consume()?;
            Ok(Stmt::Noop)
        }
        Some(TokenKind::Const) | Some(TokenKind::Let) => parse_var_decl(p),
        Some(TokenKind::LBrace) => Ok(Stmt::Block(parse_block_stmts(p)?)),
        Some(TokenKind::If) => parse_if(p),
        Some(TokenKind::While) => parse_while(p),
        Some(TokenKind::Return) => parse_return(p),
        Some(TokenKind::Throw) => parse_throw(p),
        Some(TokenKind::Try) => parse_try(p),
        Some(TokenKind::Import) => {
            if p.depth != 0 {
                return Err(ParserError::ImportsMustBeTopLevel { span: p.here()? });
            }
            parse_import(p)
        }
        Some(TokenKind::Export) => {
            if p.depth != 0 {
                return Err(ParserError::ExportsMustBeTopLevel { span: p.here()? });
            }
            parse_export(p)
        }
        _ => {
            let expr = parse_expression(p)?;
            p.expect(TokenKind::Semicolon, "';'")?;
            Ok(Stmt::Expr(expr))
        }
    }
}

/// Parses `{ stmt* }`, tracking block depth for the top-level-only checks
/// on import/export.
pub fn parse_block_stmts(p: &mut Parser) -> Result<Vec<Stmt>, ParserError> {
    p.expect(TokenKind::LBrace, "'{'")?;
    p.depth += 1;
    let mut stmts = Vec::new();
    while !p.check(&TokenKind::RBrace)? {
        stmts.push(parse_stmt(p)?);
    }
    p.depth -= 1;
    p.expect(TokenKind::RBrace, "'}'")?;
    Ok(stmts)
}

fn parse_var_decl(p: &mut Parser) -> Result<Stmt, ParserError> {
    let is_const = p.check(&TokenKind::Const)?;
    p.consume()?; // `const` or `let`
    let variable = parse_variable(p)?;
    p.expect(TokenKind::Semicolon, "';'")?;
    Ok(Stmt::VarDecl { is_const, variable })
}

fn parse_if(p: &mut Parser) -> Result<Stmt, ParserError> {
    p.expect(TokenKind::If, "'if'")?;
    p.expect(TokenKind::LParen, "'('")?;
    let cond = parse_expression(p)?;
    p.expect(TokenKind::RParen, "')'")?;
    let then_branch = Box::new(parse_stmt(p)?);
    let else_branch = if p.eat(&TokenKind::Else)? { Some(Box::new(parse_stmt(p)?)) } else { None };
    Ok(Stmt::If { cond, then_branch, else_branch })
}

fn parse_while(p: &mut Parser) -> Result<Stmt, ParserError> {
    p.expect(TokenKind::While, "'while'")?;
    p.expect(TokenKind::LParen, "'('")?;
    let cond = parse_expression(p)?;
    p.expect(TokenKind::RParen, "')'")?;
    let body = Box::new(parse_stmt(p)?);
    Ok(Stmt::While { cond, body })
}

fn parse_return(p: &mut Parser) -> Result<Stmt, ParserError> {
    p.expect(TokenKind::Return, "'return'")?;
    let value = if p.check(&TokenKind::Semicolon)? { None } else { Some(parse_expression(p)?) };
    p.expect(TokenKind::Semicolon, "';'")?;
    Ok(Stmt::Return(value))
}

fn parse_throw(p: &mut Parser) -> Result<Stmt, ParserError> {
    p.expect(TokenKind::Throw, "'throw'")?;
    let value = parse_expression(p)?;
    p.expect(TokenKind::Semicolon, "';'")?;
    Ok(Stmt::Throw(value))
}

fn parse_try(p: &mut Parser) -> Result<Stmt, ParserError> {
    p.expect(TokenKind::Try, "'try'")?;
    let try_block = Box::new(Stmt::Block(parse_block_stmts(p)?));

    let mut catch_block = None;
    let mut catch_name = None;
    if p.eat(&TokenKind::Catch)? {
        if p.eat(&TokenKind::LParen)? {
            catch_name = Some(p.expect_identifier()?);
            p.expect(TokenKind::RParen, "')'")?;
        }
        catch_block = Some(Box::new(Stmt::Block(parse_block_stmts(p)?)));
    }

    let finally_block = if p.eat(&TokenKind::Finally)? {
        Some(Box::new(Stmt::Block(parse_block_stmts(p)?)))
    } else {
        None
    };

    Ok(Stmt::TryCatch { try_block, catch_block, catch_name, finally_block })
}

fn expect_string_literal(p: &mut Parser) -> Result<Symbol, ParserError> {
    match p.peek_kind()? {
        Some(TokenKind::String(s)) => {
            p.consume()?;
            Ok(s)
        }
        Some(found) => Err(ParserError::ExpectedGot {
            expected: "string literal".to_string(),
            found: format!("{found:?}"),
            span: p.here()?,
        }),
        None => Err(ParserError::UnexpectedToken { span: p.here()? }),
    }
}

/// A name in a named import/export list: a plain identifier, or the
/// keyword `default` used as a name (`export { default as d } from ...`).
fn parse_binding_name(p: &mut Parser) -> Result<Symbol, ParserError> {
    match p.peek_kind()? {
        Some(TokenKind::Identifier(name)) => {
            p.consume()?;
            Ok(name)
        }
        Some(TokenKind::Default) => {
            p.consume()?;
            Ok(Symbol::intern("default"))
        }
        Some(found) => Err(ParserError::ExpectedGot {
            expected: "binding name".to_string(),
            found: format!("{found:?}"),
            span: p.here()?,
        }),
        None => Err(ParserError::UnexpectedToken { span: p.here()? }),
    }
}

fn parse_alias(p: &mut Parser) -> Result<Option<Symbol>, ParserError> {
    if p.eat(&TokenKind::As)? {
        Ok(Some(parse_binding_name(p)?))
    } else {
        Ok(None)
    }
}

fn parse_import(p: &mut Parser) -> Result<Stmt, ParserError> {
    p.expect(TokenKind::Import, "'import'")?;

    // `import 'file';`
    if let Some(TokenKind::String(_)) = p.peek_kind()? {
        let from_file = expect_string_literal(p)?;
        p.expect(TokenKind::Semicolon, "';'")?;
        return Ok(Stmt::Import(ImportStmt {
            default_name: None,
            namespace_name: None,
            objects: None,
            from_file,
        }));
    }

    let mut default_name = None;
    let mut namespace_name = None;
    let mut objects = None;

    if p.eat_operator(Operator::Star)? {
        // `import * as ns from 'file';`
        p.expect(TokenKind::As, "'as'")?;
        namespace_name = Some(p.expect_identifier()?);
    } else if p.check(&TokenKind::LBrace)? {
        // `import { a, b as c } from 'file';`
        objects = Some(parse_named_bindings_import(p)?);
    } else {
        // `import x from 'file';`
        default_name = Some(p.expect_identifier()?);
    }

    p.expect(TokenKind::From, "'from'")?;
    let from_file = expect_string_literal(p)?;
    p.expect(TokenKind::Semicolon, "';'")?;

    Ok(Stmt::Import(ImportStmt { default_name, namespace_name, objects, from_file }))
}

fn parse_named_bindings_import(p: &mut Parser) -> Result<Vec<ImportBinding>, ParserError> {
    p.expect(TokenKind::LBrace, "'{'")?;
    let mut out = Vec::new();
    if !p.check(&TokenKind::RBrace)? {
        loop {
            let name = parse_binding_name(p)?;
            let alias = parse_alias(p)?;
            out.push(ImportBinding { name, alias });
            if !p.eat(&TokenKind::Comma)? {
                break;
            }
        }
    }
    p.expect(TokenKind::RBrace, "'}'")?;
    Ok(out)
}

fn parse_export(p: &mut Parser) -> Result<Stmt, ParserError> {
    p.expect(TokenKind::Export, "'export'")?;

    if p.eat(&TokenKind::Default)? {
        let value = parse_expression(p)?;
        p.expect(TokenKind::Semicolon, "';'")?;
        return Ok(Stmt::Export(ExportStmt::Default(value)));
    }

    if let Some(TokenKind::Const) | Some(TokenKind::Let) = p.peek_kind()? {
        let is_const = p.check(&TokenKind::Const)?;
        p.consume()?;
        let variable = parse_variable(p)?;
        p.expect(TokenKind::Semicolon, "';'")?;
        return Ok(Stmt::Export(ExportStmt::VarDecl { is_const, variable }));
    }

    if p.eat_operator(Operator::Star)? {
        p.expect(TokenKind::From, "'from'")?;
        let file = expect_string_literal(p)?;
        p.expect(TokenKind::Semicolon, "';'")?;
        return Ok(Stmt::Export(ExportStmt::From { file, all: true, named: Vec::new() }));
    }

    p.expect(TokenKind::LBrace, "'{'")?;
    let mut named = Vec::new();
    if !p.check(&TokenKind::RBrace)? {
        loop {
            let name = parse_binding_name(p)?;
            let alias = parse_alias(p)?;
            named.push(ExportBinding { name, alias });
            if !p.eat(&TokenKind::Comma)? {
                break;
            }
        }
    }
    p.expect(TokenKind::RBrace, "'}'")?;
    p.expect(TokenKind::From, "'from'")?;
    let file = expect_string_literal(p)?;
    p.expect(TokenKind::Semicolon, "';'")?;
    Ok(Stmt::Export(ExportStmt::From { file, all: false, named }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_all(src: &str) -> Vec<Stmt> {
        let mut p = Parser::new(src);
        p.parse_program().unwrap()
    }

    #[test]
    fn var_decl_and_return() {
        let stmts = parse_all("const x = 1 + 2 * 3; return x;");
        assert_eq!(stmts.len(), 2);
        assert!(matches!(stmts[0], Stmt::VarDecl { is_const: true, .. }));
        assert!(matches!(stmts[1], Stmt::Return(Some(_))));
    }

    #[test]
    fn if_else_chain() {
        let stmts = parse_all("if (x) { return 1; } else if (y) { return 2; } else { return 3; }");
        assert_eq!(stmts.len(), 1);
        match &stmts[0] {
            Stmt::If { else_branch: Some(b), .. } => assert!(matches!(**b, Stmt::If { .. })),
            other => panic!("expected If with else-if, got {other:?}"),
        }
    }

    #[test]
    fn try_catch_finally() {
        let stmts =
            parse_all("let r = ''; try { throw 'oops'; } catch (e) { r = e; } finally { r = r; }");
        assert!(matches!(stmts[1], Stmt::TryCatch { .. }));
    }

    #[test]
    fn try_without_catch_binding() {
        let stmts = parse_all("try { f(); } catch { g(); }");
        match &stmts[0] {
            Stmt::TryCatch { catch_name, catch_block, .. } => {
                assert!(catch_name.is_none());
                assert!(catch_block.is_some());
            }
            other => panic!("expected TryCatch, got {other:?}"),
        }
    }

    #[test]
    fn import_forms() {
        assert!(matches!(
            &parse_all("import 'file.eco';")[0],
            Stmt::Import(ImportStmt { from_file: _, default_name: None, namespace_name: None, objects: None })
        ));
        assert!(matches!(
            &parse_all("import x from 'file.eco';")[0],
            Stmt::Import(ImportStmt { default_name: Some(_), .. })
        ));
        assert!(matches!(
            &parse_all("import * as ns from 'file.eco';")[0],
            Stmt::Import(ImportStmt { namespace_name: Some(_), .. })
        ));
        assert!(matches!(
            &parse_all("import { a, b as c } from 'file.eco';")[0],
            Stmt::Import(ImportStmt { objects: Some(_), .. })
        ));
    }

    #[test]
    fn import_nested_in_block_is_rejected() {
        let mut p = Parser::new("if (x) { import 'y'; }");
        assert!(p.parse_program().is_err());
    }

    #[test]
    fn export_forms() {
        assert!(matches!(&parse_all("export default 1;")[0], Stmt::Export(ExportStmt::Default(_))));
        assert!(matches!(
            &parse_all("export const x = 1;")[0],
            Stmt::Export(ExportStmt::VarDecl { is_const: true, .. })
        ));
        assert!(matches!(
            &parse_all("export * from 'b.eco';")[0],
            Stmt::Export(ExportStmt::From { all: true, .. })
        ));
        assert!(matches!(
            &parse_all("export { a, default as d } from 'b.eco';")[0],
            Stmt::Export(ExportStmt::From { all: false, .. })
        ));
    }
}
