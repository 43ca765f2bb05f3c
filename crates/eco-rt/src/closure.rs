//! Closures (spec §4.4/§9): a function value is its AST plus a frozen
//! snapshot of the scope chain active when the `Function` expression was
//! evaluated — not a live reference to that chain, since the defining
//! call may long since have returned by the time the closure is invoked.

use eco_par::ast::FunctionExpr;
use eco_util::Symbol;
use rustc_hash::FxHashMap;

use crate::value::Value;

#[derive(Debug)]
pub struct Closure {
    /// Name bound at creation, if the `Function` expr sits directly in a
    /// `const`/`let` declarator; used only for diagnostics/`to_display_string`.
    pub name: Option<Symbol>,
    pub function: std::rc::Rc<FunctionExpr>,
    /// Flattened `get_full_scope()` snapshot taken at creation time:
    /// outer frames merged in, inner frames overriding.
    pub captured_scope: FxHashMap<Symbol, Value>,
}

impl Closure {
    pub fn new(
        function: std::rc::Rc<FunctionExpr>,
        captured_scope: FxHashMap<Symbol, Value>,
        name: Option<Symbol>,
    ) -> Self {
        Self { name, function, captured_scope }
    }
}
