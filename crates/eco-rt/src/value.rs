//! The run-time value type (spec §9): undefined, null, bool, number,
//! string, array, object, function (closure), an opaque HTML-element
//! collaborator, and an opaque host value for bindings the embedder
//! supplies rather than the program itself.
//!
//! Arrays and objects are `Rc<RefCell<_>>` so that two `Value::Array`
//! handles referring to the "same" array alias each other's mutations,
//! matching reference-type semantics; everything else is cheap to clone.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use eco_util::Symbol;
use indexmap::IndexMap;

use crate::closure::Closure;
use crate::error::RuntimeError;

pub type ObjectRecord = IndexMap<Symbol, Value>;

/// A constructor or function supplied by the embedding host rather than
/// defined in the program, reachable through `global`. Kept deliberately
/// thin: one call surface, no property bag, no prototype.
pub trait HostValue: fmt::Debug {
    fn call(&self, args: Vec<Value>, this: Value) -> Result<Value, RuntimeError>;
}

/// An HTML-literal value. Opaque by design (spec: "no further contract
/// required" beyond being constructible and passable around) — it just
/// remembers its own shape for display/debugging.
#[derive(Debug, Clone)]
pub struct HtmlElement {
    pub tag_name: Option<Symbol>,
    pub attributes: Vec<(Symbol, Value)>,
    pub children: Vec<Value>,
}

#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    Array(Rc<RefCell<Vec<Value>>>),
    Object(Rc<RefCell<ObjectRecord>>),
    Function(Rc<Closure>),
    HtmlElement(Rc<HtmlElement>),
    Host(Rc<dyn HostValue>),
}

impl Value {
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::String(s.into())
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    pub fn object(fields: ObjectRecord) -> Self {
        Value::Object(Rc::new(RefCell::new(fields)))
    }

    /// The `typeof` type tag (spec §9 Open Question, pinned here). Mirrors
    /// the source language's own well-known quirk of reporting `null` as
    /// `"object"` rather than inventing a `"null"` tag — see DESIGN.md.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "object",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "object",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
            Value::HtmlElement(_) => "object",
            Value::Host(_) => "object",
        }
    }

    /// Truthiness for `if`/`while`/`&&`/`||`/ternary conditions: `false`,
    /// `0`, `NaN`, `""`, `null`, and `undefined` are falsy; everything
    /// else, including empty arrays/objects, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// `===`: no coercion, reference identity for the container/callable
    /// variants.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::HtmlElement(a), Value::HtmlElement(b)) => Rc::ptr_eq(a, b),
            (Value::Host(a), Value::Host(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// `==`: pinned to a deliberately narrow coercion (spec §9 Open
    /// Question) rather than full abstract equality, which is explicitly
    /// out of scope. Number/String pairs compare by parsing the string as
    /// a float; every other mismatched pair falls back to `strict_eq`
    /// (so e.g. `null == undefined` is `false` here, unlike real ECMA
    /// semantics) — see DESIGN.md.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
                s.parse::<f64>().map(|parsed| parsed == *n).unwrap_or(false)
            }
            _ => self.strict_eq(other),
        }
    }

    /// String coercion used by `+` when either operand is a string, and
    /// by template-string interpolation.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::String(s) => s.to_string(),
            Value::Array(items) => items
                .borrow()
                .iter()
                .map(Value::to_display_string)
                .collect::<Vec<_>>()
                .join(","),
            Value::Object(_) => "[object Object]".to_string(),
            Value::Function(_) => "[function]".to_string(),
            Value::HtmlElement(el) => match el.tag_name {
                Some(tag) => format!("[html element <{tag}>]"),
                None => "[html element]".to_string(),
            },
            Value::Host(_) => "[host value]".to_string(),
        }
    }

    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::String(s) => s.parse::<f64>().unwrap_or(f64::NAN),
            Value::Null => 0.0,
            _ => f64::NAN,
        }
    }
}

fn format_number(n: f64) -> String {
    if n == n.trunc() && n.is_finite() {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}
