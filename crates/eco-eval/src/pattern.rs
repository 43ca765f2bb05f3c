//! Binding a `Variable` (spec §3 "Variable sub-structure") into the
//! current scope frame: plain identifiers, array/object destructuring
//! with holes and rest elements, and the default-value fallback that
//! applies whenever the incoming value is `undefined` (spec: "missing
//! argument ≡ `undefined` → default expression evaluated in the
//! parameter frame" — the same rule covers destructured element
//! defaults, not just whole-parameter defaults).

use eco_par::ast::{DestructuredValue, Expr, Variable, VariableLeft};
use eco_rt::{ObjectRecord, Runtime, RuntimeError, Value};

use crate::expr::evaluate_function;
use crate::Evaluate;

/// `const`/`let` binding: `variable.default_value` *is* the initializer
/// expression, evaluated unconditionally (no value arrives from
/// elsewhere the way a call argument does).
///
/// `const f = () => ...` is special-cased to thread the bound name into
/// the closure so it can refer to itself recursively (see `Runtime::
/// get_local`'s closure self-reference fallback) — a flattened
/// scope-chain snapshot taken before `f` exists can't otherwise see `f`.
pub fn bind_var_decl(rt: &Runtime, variable: &Variable) -> Result<(), RuntimeError> {
    let value = match (&variable.default_value, &variable.left) {
        (Some(expr), VariableLeft::Identifier(name)) => {
            if let Expr::Function(func) = expr.as_ref() {
                evaluate_function(rt, func, Some(*name))?
            } else {
                expr.evaluate(rt)?
            }
        }
        (Some(expr), _) => expr.evaluate(rt)?,
        (None, _) => Value::Undefined,
    };
    destructure_bind(rt, &variable.left, value)
}

/// Parameter binding: `arg` is the caller-supplied value (or
/// `Value::Undefined` if the call passed fewer arguments than
/// parameters); falls back to `variable.default_value` when `arg` is
/// `undefined`.
pub fn bind_parameter(rt: &Runtime, variable: &Variable, arg: Value) -> Result<(), RuntimeError> {
    let value = apply_default(rt, arg, &variable.default_value)?;
    destructure_bind(rt, &variable.left, value)
}

fn apply_default(
    rt: &Runtime,
    value: Value,
    default: &Option<Box<eco_par::ast::Expr>>,
) -> Result<Value, RuntimeError> {
    if matches!(value, Value::Undefined) {
        match default {
            Some(expr) => expr.evaluate(rt),
            None => Ok(Value::Undefined),
        }
    } else {
        Ok(value)
    }
}

fn destructure_bind(rt: &Runtime, left: &VariableLeft, value: Value) -> Result<(), RuntimeError> {
    match left {
        VariableLeft::Identifier(name) => {
            rt.declare_local(*name, value);
            Ok(())
        }
        VariableLeft::DestructureArray(elements) => {
            let items: Vec<Value> = match &value {
                Value::Array(items) => items.borrow().clone(),
                _ => Vec::new(),
            };
            for (i, element) in elements.iter().enumerate() {
                let Some(el) = element else { continue };
                if el.is_rest {
                    let rest = items.get(i..).map(<[Value]>::to_vec).unwrap_or_default();
                    rt.declare_local(el.name, Value::array(rest));
                    break;
                }
                let raw = items.get(i).cloned().unwrap_or(Value::Undefined);
                bind_destructured_value(rt, el, raw)?;
            }
            Ok(())
        }
        VariableLeft::DestructureObject(elements) => {
            let record: ObjectRecord = match &value {
                Value::Object(fields) => fields.borrow().clone(),
                _ => ObjectRecord::default(),
            };
            let named: Vec<&str> =
                elements.iter().filter(|e| !e.is_rest).map(|e| e.name.as_str()).collect();
            for el in elements {
                if el.is_rest {
                    let mut rest = ObjectRecord::default();
                    for (k, v) in record.iter() {
                        if !named.contains(&k.as_str()) {
                            rest.insert(*k, v.clone());
                        }
                    }
                    rt.declare_local(el.name, Value::object(rest));
                    continue;
                }
                let raw = record.get(&el.name).cloned().unwrap_or(Value::Undefined);
                bind_destructured_value(rt, el, raw)?;
            }
            Ok(())
        }
    }
}

fn bind_destructured_value(
    rt: &Runtime,
    el: &DestructuredValue,
    raw: Value,
) -> Result<(), RuntimeError> {
    let value = apply_default(rt, raw, &el.default)?;
    rt.declare_local(el.name, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_par::ast::Expr;
    use eco_util::Symbol;

    #[test]
    fn array_destructure_with_hole_and_rest() {
        let rt = Runtime::new();
        let a = Symbol::intern("a");
        let b = Symbol::intern("b");
        let left = VariableLeft::DestructureArray(vec![
            Some(DestructuredValue { name: a, default: None, is_rest: false }),
            None,
            Some(DestructuredValue { name: b, default: None, is_rest: true }),
        ]);
        let variable = Variable { left, default_value: None };
        let value = Value::array(vec![
            Value::Number(1.0),
            Value::Number(2.0),
            Value::Number(3.0),
            Value::Number(4.0),
        ]);
        destructure_bind(&rt, &variable.left, value).unwrap();
        assert_eq!(rt.get_local(a).as_number(), 1.0);
        if let Value::Array(items) = rt.get_local(b) {
            assert_eq!(items.borrow().len(), 2);
        } else {
            panic!("expected array");
        }
    }

    #[test]
    fn parameter_default_applies_only_when_undefined() {
        let rt = Runtime::new();
        let n = Symbol::intern("n");
        let variable = Variable {
            left: VariableLeft::Identifier(n),
            default_value: Some(Box::new(Expr::Literal(eco_par::ast::LiteralValue::Number(9.0)))),
        };
        bind_parameter(&rt, &variable, Value::Undefined).unwrap();
        assert_eq!(rt.get_local(n).as_number(), 9.0);

        bind_parameter(&rt, &variable, Value::Number(3.0)).unwrap();
        assert_eq!(rt.get_local(n).as_number(), 3.0);
    }
}
