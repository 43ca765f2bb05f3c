//! `Evaluate` for `Expr` (spec §4.3).

use std::rc::Rc;

use eco_par::ast::{
    AssignOp, BinaryOp, Expr, HtmlAttrValue, IncDecOp, LiteralValue, ObjectField, TemplatePart,
    UnaryOp,
};
use eco_rt::{Closure, HtmlElement, ObjectRecord, Runtime, RuntimeError, Value};
use eco_util::Symbol;

use crate::call::{call_closure, instantiate};
use crate::Evaluate;

impl Evaluate for Expr {
    fn evaluate(&self, rt: &Runtime) -> Result<Value, RuntimeError> {
        match self {
            Expr::Literal(lit) => evaluate_literal(rt, lit),
            Expr::Load(name) => Ok(rt.get_local(*name)),
            Expr::Parens(inner) => inner.evaluate(rt),
            // Semantically transparent outside of array/object literals,
            // where `Array`/`Object` evaluation special-cases it instead.
            Expr::Spread(inner) => inner.evaluate(rt),
            Expr::Array(elements) => evaluate_array(rt, elements),
            Expr::Object(fields) => evaluate_object(rt, fields),
            Expr::Function(func) => evaluate_function(rt, func, None),
            Expr::Unary { op, expr } => evaluate_unary(rt, *op, expr),
            Expr::IncOrDec { is_prefix, op, expr } => evaluate_inc_or_dec(rt, *is_prefix, *op, expr),
            Expr::Binary { left, op, right } => evaluate_binary(rt, left, *op, right),
            Expr::Assignment { target, op, value } => evaluate_assignment(rt, target, *op, value),
            Expr::Ternary { cond, then_branch, else_branch } => {
                if cond.evaluate(rt)?.is_truthy() {
                    then_branch.evaluate(rt)
                } else {
                    else_branch.evaluate(rt)
                }
            }
            Expr::ArrayAccess { object, index } => {
                let obj = object.evaluate(rt)?;
                let idx = index.evaluate(rt)?;
                Ok(index_get(&obj, &idx))
            }
            Expr::FieldAccess { object, field } => {
                let obj = object.evaluate(rt)?;
                Ok(get_property(&obj, *field))
            }
            Expr::FuncCall { callee, args } => {
                let callee_val = callee.evaluate(rt)?;
                let arg_values = evaluate_args(rt, args)?;
                invoke(rt, &callee_val, arg_values, rt.global_as_value())
            }
            Expr::MethodCall { object, field_name, args } => {
                let obj = object.evaluate(rt)?;
                let method = get_property(&obj, *field_name);
                let arg_values = evaluate_args(rt, args)?;
                invoke(rt, &method, arg_values, obj)
            }
            Expr::New { class_name, args } => {
                let arg_values = evaluate_args(rt, args)?;
                instantiate(rt, *class_name, arg_values)
            }
            Expr::Typeof(inner) => {
                let v = inner.evaluate(rt)?;
                Ok(Value::string(v.type_tag()))
            }
            Expr::Html(html) => evaluate_html(rt, html),
            Expr::HtmlBraced(inner) => inner.evaluate(rt),
            Expr::HtmlText(text) => Ok(Value::string(text.as_str())),
            Expr::TemplateString(parts) => evaluate_template(rt, parts),
        }
    }
}

fn evaluate_literal(rt: &Runtime, lit: &LiteralValue) -> Result<Value, RuntimeError> {
    match lit {
        LiteralValue::Number(n) => Ok(Value::Number(*n)),
        LiteralValue::Bool(b) => Ok(Value::Bool(*b)),
        LiteralValue::Null => Ok(Value::Null),
        LiteralValue::Undefined => Ok(Value::Undefined),
        LiteralValue::String(sym) => interpolate_hash_brace(rt, sym.as_str()),
    }
}

/// `'text #{expr} more'`: non-greedy, no nesting — the first `}` after a
/// `#{` closes it, re-parsed via `eco_par::parse_expression` and
/// evaluated in the current scope.
fn interpolate_hash_brace(rt: &Runtime, text: &str) -> Result<Value, RuntimeError> {
    if !text.contains("#{") {
        return Ok(Value::string(text));
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("#{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let fragment = &after[..end];
                let value = match eco_par::parse_expression(fragment) {
                    Ok(expr) => expr.evaluate(rt)?,
                    Err(_) => Value::Undefined,
                };
                out.push_str(&value.to_display_string());
                rest = &after[end + 1..];
            }
            None => {
                out.push_str("#{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Ok(Value::string(out))
}

fn evaluate_args(rt: &Runtime, args: &[Expr]) -> Result<Vec<Value>, RuntimeError> {
    args.iter().map(|a| a.evaluate(rt)).collect()
}

fn evaluate_array(rt: &Runtime, elements: &[Expr]) -> Result<Value, RuntimeError> {
    let mut items = Vec::with_capacity(elements.len());
    for el in elements {
        if let Expr::Spread(inner) = el {
            let v = inner.evaluate(rt)?;
            if let Value::Array(source) = v {
                items.extend(source.borrow().iter().cloned());
            } else {
                items.push(v);
            }
        } else {
            items.push(el.evaluate(rt)?);
        }
    }
    Ok(Value::array(items))
}

fn evaluate_object(rt: &Runtime, fields: &[ObjectField]) -> Result<Value, RuntimeError> {
    let mut record = ObjectRecord::default();
    for field in fields {
        match field {
            ObjectField::Regular { key, value } => {
                let v = match value {
                    Some(expr) => expr.evaluate(rt)?,
                    None => rt.get_local(*key),
                };
                record.insert(*key, v);
            }
            ObjectField::Dynamic { key, value } => {
                let key_val = key.evaluate(rt)?;
                let key_sym = Symbol::intern(&key_val.to_display_string());
                record.insert(key_sym, value.evaluate(rt)?);
            }
            ObjectField::Spread { value } => {
                if let Value::Object(source) = value.evaluate(rt)? {
                    for (k, v) in source.borrow().iter() {
                        record.insert(*k, v.clone());
                    }
                }
            }
        }
    }
    Ok(Value::object(record))
}

pub(crate) fn evaluate_function(
    rt: &Runtime,
    func: &eco_par::ast::FunctionExpr,
    name: Option<Symbol>,
) -> Result<Value, RuntimeError> {
    let captured = rt.get_full_scope();
    let closure = Closure::new(Rc::new(func.clone()), captured, name);
    Ok(Value::Function(Rc::new(closure)))
}

fn evaluate_unary(rt: &Runtime, op: UnaryOp, expr: &Expr) -> Result<Value, RuntimeError> {
    let v = expr.evaluate(rt)?;
    Ok(match op {
        UnaryOp::Neg => Value::Number(-v.as_number()),
        UnaryOp::Not => Value::Bool(!v.is_truthy()),
    })
}

fn evaluate_inc_or_dec(
    rt: &Runtime,
    is_prefix: bool,
    op: IncDecOp,
    target: &Expr,
) -> Result<Value, RuntimeError> {
    let old = read_lvalue(rt, target)?;
    let delta = match op {
        IncDecOp::Inc => 1.0,
        IncDecOp::Dec => -1.0,
    };
    let new_value = Value::Number(old.as_number() + delta);
    write_lvalue(rt, target, new_value.clone())?;
    Ok(if is_prefix { new_value } else { old })
}

fn evaluate_binary(rt: &Runtime, left: &Expr, op: BinaryOp, right: &Expr) -> Result<Value, RuntimeError> {
    // Short-circuit before evaluating the right operand.
    match op {
        BinaryOp::OrOr => {
            let l = left.evaluate(rt)?;
            return if l.is_truthy() { Ok(l) } else { right.evaluate(rt) };
        }
        BinaryOp::AndAnd => {
            let l = left.evaluate(rt)?;
            return if l.is_truthy() { right.evaluate(rt) } else { Ok(l) };
        }
        _ => {}
    }
    let l = left.evaluate(rt)?;
    let r = right.evaluate(rt)?;
    Ok(apply_binary(op, &l, &r))
}

fn apply_binary(op: BinaryOp, l: &Value, r: &Value) -> Value {
    match op {
        BinaryOp::EqEqEq => Value::Bool(l.strict_eq(r)),
        BinaryOp::NotEqEq => Value::Bool(!l.strict_eq(r)),
        BinaryOp::EqEq => Value::Bool(l.loose_eq(r)),
        BinaryOp::NotEq => Value::Bool(!l.loose_eq(r)),
        BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Lte | BinaryOp::Gte => {
            let ordering = match (l, r) {
                (Value::String(a), Value::String(b)) => a.as_ref().cmp(b.as_ref()),
                _ => l.as_number().partial_cmp(&r.as_number()).unwrap_or(std::cmp::Ordering::Greater),
            };
            Value::Bool(match op {
                BinaryOp::Lt => ordering.is_lt(),
                BinaryOp::Gt => ordering.is_gt(),
                BinaryOp::Lte => ordering.is_le(),
                BinaryOp::Gte => ordering.is_ge(),
                _ => unreachable!(),
            })
        }
        BinaryOp::Add => {
            if matches!(l, Value::String(_)) || matches!(r, Value::String(_)) {
                Value::string(format!("{}{}", l.to_display_string(), r.to_display_string()))
            } else {
                Value::Number(l.as_number() + r.as_number())
            }
        }
        BinaryOp::Sub => Value::Number(l.as_number() - r.as_number()),
        BinaryOp::Mul => Value::Number(l.as_number() * r.as_number()),
        BinaryOp::Div => Value::Number(l.as_number() / r.as_number()),
    }
}

fn evaluate_assignment(
    rt: &Runtime,
    target: &Expr,
    op: AssignOp,
    value: &Expr,
) -> Result<Value, RuntimeError> {
    let rhs = value.evaluate(rt)?;
    let new_value = match op {
        AssignOp::Assign => rhs,
        AssignOp::AddAssign => apply_binary(BinaryOp::Add, &read_lvalue(rt, target)?, &rhs),
        AssignOp::SubAssign => apply_binary(BinaryOp::Sub, &read_lvalue(rt, target)?, &rhs),
        AssignOp::MulAssign => apply_binary(BinaryOp::Mul, &read_lvalue(rt, target)?, &rhs),
        AssignOp::DivAssign => apply_binary(BinaryOp::Div, &read_lvalue(rt, target)?, &rhs),
    };
    write_lvalue(rt, target, new_value.clone())?;
    Ok(new_value)
}

fn read_lvalue(rt: &Runtime, target: &Expr) -> Result<Value, RuntimeError> {
    match target {
        Expr::Load(_) | Expr::ArrayAccess { .. } | Expr::FieldAccess { .. } => target.evaluate(rt),
        _ => Err(RuntimeError::IllegalAssignment { span: None }),
    }
}

fn write_lvalue(rt: &Runtime, target: &Expr, value: Value) -> Result<(), RuntimeError> {
    match target {
        Expr::Load(name) => {
            rt.set_local(*name, value);
            Ok(())
        }
        Expr::ArrayAccess { object, index } => {
            let obj = object.evaluate(rt)?;
            let idx = index.evaluate(rt)?;
            index_set(&obj, &idx, value)
        }
        Expr::FieldAccess { object, field } => {
            let obj = object.evaluate(rt)?;
            match obj {
                Value::Object(record) => {
                    record.borrow_mut().insert(*field, value);
                    Ok(())
                }
                _ => Err(RuntimeError::AssignmentFailed { span: None }),
            }
        }
        _ => Err(RuntimeError::IllegalAssignment { span: None }),
    }
}

fn index_get(object: &Value, index: &Value) -> Value {
    match object {
        Value::Array(items) => {
            let idx = index.as_number();
            if idx.is_finite() && idx >= 0.0 {
                items.borrow().get(idx as usize).cloned().unwrap_or(Value::Undefined)
            } else {
                Value::Undefined
            }
        }
        Value::Object(record) => {
            let key = Symbol::intern(&index.to_display_string());
            record.borrow().get(&key).cloned().unwrap_or(Value::Undefined)
        }
        _ => Value::Undefined,
    }
}

fn index_set(object: &Value, index: &Value, value: Value) -> Result<(), RuntimeError> {
    match object {
        Value::Array(items) => {
            let idx = index.as_number();
            if !idx.is_finite() || idx < 0.0 {
                return Err(RuntimeError::AssignmentFailed { span: None });
            }
            let idx = idx as usize;
            let mut items = items.borrow_mut();
            if idx >= items.len() {
                items.resize(idx + 1, Value::Undefined);
            }
            items[idx] = value;
            Ok(())
        }
        Value::Object(record) => {
            let key = Symbol::intern(&index.to_display_string());
            record.borrow_mut().insert(key, value);
            Ok(())
        }
        _ => Err(RuntimeError::AssignmentFailed { span: None }),
    }
}

/// Property read shared by `FieldAccess` and the callee-lookup half of
/// `MethodCall`. No prototype chain (non-goal): arrays only expose
/// `length`, HTML elements only their own tag name.
fn get_property(object: &Value, field: Symbol) -> Value {
    match object {
        Value::Object(record) => record.borrow().get(&field).cloned().unwrap_or(Value::Undefined),
        Value::Array(items) => {
            if field.as_str() == "length" {
                Value::Number(items.borrow().len() as f64)
            } else {
                Value::Undefined
            }
        }
        Value::HtmlElement(el) => {
            if field.as_str() == "tag_name" {
                el.tag_name.map(|s| Value::string(s.as_str())).unwrap_or(Value::Undefined)
            } else {
                Value::Undefined
            }
        }
        _ => Value::Undefined,
    }
}

fn invoke(rt: &Runtime, callee: &Value, args: Vec<Value>, this: Value) -> Result<Value, RuntimeError> {
    tracing::trace!(arity = args.len(), "FuncCall enter");
    let result = match callee {
        Value::Function(closure) => call_closure(rt, closure, args, this),
        Value::Host(host) => host.call(args, this),
        _ => Err(RuntimeError::NotCallable { span: None }),
    };
    tracing::trace!(ok = result.is_ok(), "FuncCall exit");
    result
}

fn evaluate_html(rt: &Runtime, html: &eco_par::ast::HtmlExpr) -> Result<Value, RuntimeError> {
    let mut attributes = Vec::with_capacity(html.attributes.len());
    for attr in &html.attributes {
        let value = match &attr.value {
            HtmlAttrValue::StringLit(s) => Value::string(s.as_str()),
            HtmlAttrValue::Expr(e) => e.evaluate(rt)?,
            HtmlAttrValue::Present => Value::Bool(true),
        };
        attributes.push((attr.name, value));
    }
    let mut children = Vec::with_capacity(html.children.len());
    for child in &html.children {
        children.push(child.evaluate(rt)?);
    }

    if let Some(tag_name) = html.tag_name {
        let bound = rt.get_local(tag_name);
        if let Value::Function(closure) = bound {
            let mut props = ObjectRecord::default();
            for (name, value) in &attributes {
                props.insert(*name, value.clone());
            }
            props.insert(Symbol::intern("children"), Value::array(children));
            return call_closure(rt, &closure, vec![Value::object(props)], Value::Undefined);
        }
    }

    Ok(Value::HtmlElement(Rc::new(HtmlElement { tag_name: html.tag_name, attributes, children })))
}

fn evaluate_template(rt: &Runtime, parts: &[TemplatePart]) -> Result<Value, RuntimeError> {
    let mut out = String::new();
    for part in parts {
        match part {
            TemplatePart::Content(sym) => out.push_str(sym.as_str()),
            TemplatePart::Interpolation(expr) => out.push_str(&expr.evaluate(rt)?.to_display_string()),
        }
    }
    Ok(Value::string(out))
}
