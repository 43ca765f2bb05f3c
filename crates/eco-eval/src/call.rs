//! Invoking a closure (spec §4.3 "Function"): push the closure, push the
//! captured-scope frame, push a parameter frame, bind arguments, run the
//! body, always pop both frames and the closure on the way out —
//! including when the body unwinds via `return` or a propagating
//! exception.

use std::rc::Rc;

use eco_par::ast::FunctionBody;
use eco_rt::{Closure, ObjectRecord, Runtime, RuntimeError, Value};
use eco_util::Symbol;

use crate::pattern::bind_parameter;
use crate::Evaluate;

pub fn call_closure(
    rt: &Runtime,
    closure: &Rc<Closure>,
    args: Vec<Value>,
    this: Value,
) -> Result<Value, RuntimeError> {
    let saved_this = rt.get_this();
    rt.set_this(this);
    rt.push_stack(closure.clone());
    rt.push_scope(Some(closure.captured_scope.clone()));
    rt.push_scope(None);

    let result = bind_params_and_run(rt, closure, args);

    rt.pop_scope();
    rt.pop_scope();
    rt.pop_stack();
    rt.set_this(saved_this);
    result
}

fn bind_params_and_run(
    rt: &Runtime,
    closure: &Rc<Closure>,
    mut args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    for parameter in &closure.function.parameters {
        let arg = if args.is_empty() { Value::Undefined } else { args.remove(0) };
        bind_parameter(rt, parameter, arg)?;
    }

    match &closure.function.body {
        FunctionBody::Expr(expr) => expr.evaluate(rt),
        FunctionBody::Block(stmts) => {
            for stmt in stmts {
                match stmt.evaluate(rt) {
                    Err(RuntimeError::Return(v)) => return Ok(v),
                    Err(e) => return Err(e),
                    Ok(_) => {}
                }
            }
            Ok(Value::Undefined)
        }
    }
}

/// `New{class_name, args}` (spec §4.3: "`runtime.instantiate(class_name,
/// args)` — constructs via `global[class_name]` with positional args").
/// Lives here rather than as a `Runtime` method since constructing means
/// evaluating the constructor's body — see the crate doc for why.
///
/// A fresh empty object is `this` for the call; if the constructor body
/// itself returns an object, that object is used instead (mirrors the
/// source language's own `new` semantics), otherwise the fresh object is
/// returned.
pub fn instantiate(rt: &Runtime, class_name: Symbol, args: Vec<Value>) -> Result<Value, RuntimeError> {
    match rt.get_global(class_name) {
        Value::Function(closure) => {
            let this_obj = Value::object(ObjectRecord::default());
            match call_closure(rt, &closure, args, this_obj.clone())? {
                Value::Object(obj) => Ok(Value::Object(obj)),
                _ => Ok(this_obj),
            }
        }
        Value::Host(host) => host.call(args, Value::Undefined),
        _ => Err(RuntimeError::NotConstructible { name: class_name.as_str().to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_par::ast::{BinaryOp, Expr, FunctionExpr, LiteralValue, Variable, VariableLeft};
    use eco_util::Symbol;

    #[test]
    fn calling_a_closure_binds_params_and_evaluates_body() {
        let rt = Runtime::new();
        let n = Symbol::intern("n");
        let function = Rc::new(FunctionExpr {
            parameters: vec![Variable { left: VariableLeft::Identifier(n), default_value: None }],
            body: FunctionBody::Expr(Box::new(Expr::Binary {
                left: Box::new(Expr::Load(n)),
                op: BinaryOp::Add,
                right: Box::new(Expr::Literal(LiteralValue::Number(1.0))),
            })),
        });
        let closure = Rc::new(Closure::new(function, Default::default(), None));
        let result = call_closure(&rt, &closure, vec![Value::Number(4.0)], Value::Undefined).unwrap();
        assert_eq!(result.as_number(), 5.0);
        assert!(rt.stack_top().is_none());
    }
}
