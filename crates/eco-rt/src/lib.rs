//! eco-rt — the interpreter's run-time state: `Value`, `Closure`, and
//! `Runtime`.
//!
//! `Runtime` exposes the state primitives from spec §4.4 — scope stack,
//! global record, `this` register, closure stack. Two operations listed
//! there, `instantiate(class_name, args)` and `evaluate(node)`, both
//! require evaluating AST nodes, which would make `Runtime` depend on
//! `eco-eval`'s `Evaluate` trait; since `eco-eval` already depends on
//! `eco-rt` for `Value`/`Runtime`, that would be a cycle. Both are instead
//! realized one layer up: `eco-eval` implements `New` evaluation and its
//! own program-entry `evaluate` function by composing `Runtime`'s
//! `get_global`/`push_scope`/`set_this`/etc. primitives directly. See
//! DESIGN.md.

mod closure;
mod error;
mod runtime;
mod value;

pub use closure::Closure;
pub use error::RuntimeError;
pub use runtime::{Runtime, ScopeFrame};
pub use value::{HostValue, HtmlElement, ObjectRecord, Value};
