//! `Evaluate` for `Stmt` (spec §4.3). Every statement evaluates to
//! `Value::Undefined` on normal completion; `Return`/`Throw` unwind via
//! `Err(RuntimeError::Return|Thrown)` rather than a return value, so
//! `Block`/`If`/`While`/`TryCatch` just propagate with `?`.

use eco_par::ast::{ExportStmt, ImportStmt, Stmt};
use eco_rt::{Runtime, RuntimeError, Value};

use crate::pattern::bind_var_decl;
use crate::Evaluate;

impl Evaluate for Stmt {
    fn evaluate(&self, rt: &Runtime) -> Result<Value, RuntimeError> {
        match self {
            Stmt::Noop => Ok(Value::Undefined),
            Stmt::VarDecl { variable, .. } => {
                bind_var_decl(rt, variable)?;
                Ok(Value::Undefined)
            }
            Stmt::Block(stmts) => evaluate_block(rt, stmts),
            Stmt::If { cond, then_branch, else_branch } => {
                if cond.evaluate(rt)?.is_truthy() {
                    then_branch.evaluate(rt)
                } else if let Some(else_branch) = else_branch {
                    else_branch.evaluate(rt)
                } else {
                    Ok(Value::Undefined)
                }
            }
            Stmt::While { cond, body } => {
                while cond.evaluate(rt)?.is_truthy() {
                    body.evaluate(rt)?;
                }
                Ok(Value::Undefined)
            }
            Stmt::Return(value) => {
                let v = match value {
                    Some(expr) => expr.evaluate(rt)?,
                    None => Value::Undefined,
                };
                Err(RuntimeError::Return(v))
            }
            Stmt::Throw(expr) => {
                let v = expr.evaluate(rt)?;
                Err(RuntimeError::Thrown(v))
            }
            Stmt::TryCatch { try_block, catch_block, catch_name, finally_block } => {
                evaluate_try_catch(rt, try_block, catch_block.as_deref(), *catch_name, finally_block.as_deref())
            }
            Stmt::Import(import) => evaluate_import(rt, import),
            Stmt::Export(export) => evaluate_export(rt, export),
            Stmt::Expr(expr) => expr.evaluate(rt),
        }
    }
}

fn evaluate_block(rt: &Runtime, stmts: &[Stmt]) -> Result<Value, RuntimeError> {
    rt.push_scope(None);
    let mut result = Ok(Value::Undefined);
    for stmt in stmts {
        match stmt.evaluate(rt) {
            Ok(_) => {}
            Err(e) => {
                result = Err(e);
                break;
            }
        }
    }
    rt.pop_scope();
    result
}

fn evaluate_try_catch(
    rt: &Runtime,
    try_block: &Stmt,
    catch_block: Option<&Stmt>,
    catch_name: Option<eco_util::Symbol>,
    finally_block: Option<&Stmt>,
) -> Result<Value, RuntimeError> {
    let try_result = try_block.evaluate(rt);

    let after_catch = match try_result {
        // Every failure kind is catchable except the non-local-return
        // signal, which isn't really an error and must keep unwinding past
        // any enclosing try/catch untouched.
        Err(e) if !matches!(e, RuntimeError::Return(_)) => match catch_block {
            Some(catch) => {
                let thrown = match e {
                    RuntimeError::Thrown(value) => value,
                    other => Value::string(other.to_string()),
                };
                rt.push_scope(None);
                if let Some(name) = catch_name {
                    rt.declare_local(name, thrown);
                }
                let r = catch.evaluate(rt);
                rt.pop_scope();
                r
            }
            None => Err(e),
        },
        other => other,
    };

    if let Some(finally) = finally_block {
        let finally_result = finally.evaluate(rt);
        if finally_result.is_err() {
            return finally_result;
        }
    }

    after_catch
}

/// Host-resolved imports/exports are out of scope for evaluation here
/// (resolving and linking modules is `eco-bundle`'s job); evaluating an
/// `Import`/`Export` statement standalone is a no-op, matching "bindings
/// come from the bundler's own module-cache wiring, not from running the
/// statement through the tree-walker directly."
fn evaluate_import(_rt: &Runtime, _import: &ImportStmt) -> Result<Value, RuntimeError> {
    Ok(Value::Undefined)
}

fn evaluate_export(rt: &Runtime, export: &ExportStmt) -> Result<Value, RuntimeError> {
    match export {
        ExportStmt::Default(expr) => {
            expr.evaluate(rt)?;
            Ok(Value::Undefined)
        }
        ExportStmt::VarDecl { variable, .. } => {
            bind_var_decl(rt, variable)?;
            Ok(Value::Undefined)
        }
        ExportStmt::From { .. } => Ok(Value::Undefined),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_par::ast::{BinaryOp, Expr, LiteralValue};
    use eco_util::Symbol;

    #[test]
    fn block_pushes_and_pops_one_frame() {
        let rt = Runtime::new();
        let before = rt.get_scope().len();
        evaluate_block(&rt, &[]).unwrap();
        assert_eq!(rt.get_scope().len(), before);
    }

    #[test]
    fn while_loop_accumulates() {
        let rt = Runtime::new();
        let i = Symbol::intern("i");
        rt.declare_local(i, Value::Number(0.0));
        let cond = Expr::Binary {
            left: Box::new(Expr::Load(i)),
            op: BinaryOp::Lt,
            right: Box::new(Expr::Literal(LiteralValue::Number(3.0))),
        };
        let body = Stmt::Expr(Expr::Assignment {
            target: Box::new(Expr::Load(i)),
            op: eco_par::ast::AssignOp::AddAssign,
            value: Box::new(Expr::Literal(LiteralValue::Number(1.0))),
        });
        Stmt::While { cond, body: Box::new(body) }.evaluate(&rt).unwrap();
        assert_eq!(rt.get_local(i).as_number(), 3.0);
    }

    #[test]
    fn try_catch_binds_thrown_value_and_runs_finally() {
        let rt = Runtime::new();
        let e = Symbol::intern("e");
        let r = Symbol::intern("r");
        rt.declare_local(r, Value::string(""));
        let stmt = Stmt::TryCatch {
            try_block: Box::new(Stmt::Throw(Expr::Literal(LiteralValue::String(Symbol::intern("oops"))))),
            catch_block: Some(Box::new(Stmt::Expr(Expr::Assignment {
                target: Box::new(Expr::Load(r)),
                op: eco_par::ast::AssignOp::Assign,
                value: Box::new(Expr::Load(e)),
            }))),
            catch_name: Some(e),
            finally_block: Some(Box::new(Stmt::Expr(Expr::Assignment {
                target: Box::new(Expr::Load(r)),
                op: eco_par::ast::AssignOp::AddAssign,
                value: Box::new(Expr::Literal(LiteralValue::String(Symbol::intern("!")))),
            }))),
        };
        stmt.evaluate(&rt).unwrap();
        assert_eq!(rt.get_local(r).to_display_string(), "oops!");
    }

    #[test]
    fn try_catch_catches_runtime_errors_not_just_user_throws() {
        let rt = Runtime::new();
        // `1++` isn't an lvalue: reads through `read_lvalue` and raises
        // `RuntimeError::IllegalAssignment`, not a `Thrown` value.
        let stmt = Stmt::TryCatch {
            try_block: Box::new(Stmt::Expr(Expr::IncOrDec {
                is_prefix: false,
                op: eco_par::ast::IncDecOp::Inc,
                expr: Box::new(Expr::Literal(LiteralValue::Number(1.0))),
            })),
            catch_block: Some(Box::new(Stmt::Return(Some(Expr::Literal(LiteralValue::Number(1.0)))))),
            catch_name: Some(Symbol::intern("e")),
            finally_block: None,
        };
        let result = stmt.evaluate(&rt);
        assert!(matches!(result, Err(RuntimeError::Return(Value::Number(n))) if n == 1.0));
    }

    #[test]
    fn return_unwinds_as_an_error_variant() {
        let rt = Runtime::new();
        let err = Stmt::Return(Some(Expr::Literal(LiteralValue::Number(1.0)))).evaluate(&rt).unwrap_err();
        assert!(matches!(err, RuntimeError::Return(_)));
    }
}
