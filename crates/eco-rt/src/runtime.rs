//! The interpreter's mutable state (spec §4.4): a global record, a scope
//! stack, a `this`-value register, and a stack of currently-executing
//! closures. `eco-eval` drives all of this through the primitives below
//! rather than `Runtime` walking the AST itself — see the crate doc for
//! why `instantiate`/`evaluate` from the spec's operation list aren't
//! literal `Runtime` methods here.

use std::rc::Rc;

use eco_util::Symbol;
use rustc_hash::FxHashMap;

use crate::closure::Closure;
use crate::value::Value;

pub type ScopeFrame = FxHashMap<Symbol, Value>;

pub struct Runtime {
    global: std::cell::RefCell<ScopeFrame>,
    scopes: std::cell::RefCell<Vec<ScopeFrame>>,
    this_value: std::cell::RefCell<Value>,
    closure_stack: std::cell::RefCell<Vec<Rc<Closure>>>,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            global: std::cell::RefCell::new(ScopeFrame::default()),
            // The scope stack is never empty during evaluation of any AST
            // node below the program root, so seed one top-level frame.
            scopes: std::cell::RefCell::new(vec![ScopeFrame::default()]),
            this_value: std::cell::RefCell::new(Value::Undefined),
            closure_stack: std::cell::RefCell::new(Vec::new()),
        }
    }

    pub fn push_scope(&self, frame: Option<ScopeFrame>) {
        self.scopes.borrow_mut().push(frame.unwrap_or_default());
    }

    pub fn pop_scope(&self) -> Option<ScopeFrame> {
        self.scopes.borrow_mut().pop()
    }

    /// The innermost scope frame, cloned out (an owned snapshot, not a
    /// live view — `RefCell` makes returning a borrow across the API
    /// awkward and nothing here needs it).
    pub fn get_scope(&self) -> ScopeFrame {
        self.scopes.borrow().last().cloned().unwrap_or_default()
    }

    /// All frames flattened outer-first, inner overriding — the snapshot
    /// a `Function` expression captures into its closure.
    pub fn get_full_scope(&self) -> ScopeFrame {
        let mut merged = ScopeFrame::default();
        for frame in self.scopes.borrow().iter() {
            merged.extend(frame.iter().map(|(k, v)| (*k, v.clone())));
        }
        merged
    }

    /// Chain lookup innermost-to-outermost. Falls back first to the
    /// currently-executing closure's own name (so a named `const f = ()
    /// => f()` can call itself even though its captured-scope snapshot
    /// predates its own binding — the same self-reference a named
    /// function expression gets in the source language), then to
    /// `global[name]`, but only when that binding is truthy — a falsy
    /// global entry (`0`, `""`, absent) still reads as `undefined` here.
    pub fn get_local(&self, name: Symbol) -> Value {
        for frame in self.scopes.borrow().iter().rev() {
            if let Some(v) = frame.get(&name) {
                return v.clone();
            }
        }
        if let Some(closure) = self.closure_stack.borrow().last() {
            if closure.name == Some(name) {
                return Value::Function(closure.clone());
            }
        }
        match self.global.borrow().get(&name) {
            Some(v) if v.is_truthy() => v.clone(),
            _ => Value::Undefined,
        }
    }

    /// Writes to the innermost scope frame that already declares `name`,
    /// walking outward; if no frame declares it, the write is silently
    /// dropped. Known limitation, not a bug: there is no implicit-global
    /// write the way assigning to an undeclared name works in the source
    /// language, and `global` itself is never a write target here.
    pub fn set_local(&self, name: Symbol, value: Value) {
        for frame in self.scopes.borrow_mut().iter_mut().rev() {
            if frame.contains_key(&name) {
                frame.insert(name, value);
                return;
            }
        }
    }

    pub fn get_global(&self, name: Symbol) -> Value {
        self.global.borrow().get(&name).cloned().unwrap_or(Value::Undefined)
    }

    /// A snapshot of `global` as an object `Value`, used as the `this` a
    /// plain (non-method) `FuncCall` is invoked with.
    pub fn global_as_value(&self) -> Value {
        let record: crate::ObjectRecord = self.global.borrow().iter().map(|(k, v)| (*k, v.clone())).collect();
        Value::object(record)
    }

    pub fn set_global(&self, name: Symbol, value: Value) {
        self.global.borrow_mut().insert(name, value);
    }

    /// Declares `name` in the innermost frame, shadowing any outer
    /// binding. Used for `let`/`const`/parameter binding, which always
    /// introduce a fresh name in the current frame rather than writing
    /// through to an outer one.
    pub fn declare_local(&self, name: Symbol, value: Value) {
        if let Some(frame) = self.scopes.borrow_mut().last_mut() {
            frame.insert(name, value);
        }
    }

    pub fn push_stack(&self, closure: Rc<Closure>) {
        self.closure_stack.borrow_mut().push(closure);
    }

    pub fn pop_stack(&self) -> Option<Rc<Closure>> {
        self.closure_stack.borrow_mut().pop()
    }

    pub fn stack_top(&self) -> Option<Rc<Closure>> {
        self.closure_stack.borrow().last().cloned()
    }

    pub fn get_this(&self) -> Value {
        self.this_value.borrow().clone()
    }

    pub fn set_this(&self, value: Value) {
        *self.this_value.borrow_mut() = value;
    }

    /// `{global, scope}` seeding used before running a module/program: the
    /// global record and the single outermost scope frame are replaced
    /// wholesale rather than merged.
    pub fn set_args(&self, global: ScopeFrame, scope: ScopeFrame) {
        *self.global.borrow_mut() = global;
        *self.scopes.borrow_mut() = vec![scope];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_lookup_falls_back_to_global() {
        let rt = Runtime::new();
        let name = Symbol::intern("x");
        rt.set_global(name, Value::Number(1.0));
        assert_eq!(rt.get_local(name).as_number(), 1.0);
    }

    #[test]
    fn set_local_writes_innermost_declaring_frame() {
        let rt = Runtime::new();
        let name = Symbol::intern("x");
        rt.declare_local(name, Value::Number(1.0));
        rt.push_scope(None);
        rt.set_local(name, Value::Number(2.0));
        rt.pop_scope();
        assert_eq!(rt.get_local(name).as_number(), 2.0);
    }

    #[test]
    fn set_local_on_undeclared_name_is_silently_dropped() {
        let rt = Runtime::new();
        let name = Symbol::intern("never_declared");
        rt.set_local(name, Value::Number(5.0));
        assert!(matches!(rt.get_local(name), Value::Undefined));
    }

    #[test]
    fn full_scope_snapshot_has_inner_overriding_outer() {
        let rt = Runtime::new();
        let name = Symbol::intern("x");
        rt.declare_local(name, Value::Number(1.0));
        rt.push_scope(None);
        rt.declare_local(name, Value::Number(2.0));
        let snap = rt.get_full_scope();
        assert_eq!(snap.get(&name).unwrap().as_number(), 2.0);
    }

    #[test]
    fn closure_stack_push_pop() {
        let rt = Runtime::new();
        assert!(rt.stack_top().is_none());
        let function = Rc::new(eco_par::ast::FunctionExpr {
            parameters: Vec::new(),
            body: eco_par::ast::FunctionBody::Block(Vec::new()),
        });
        let closure = Rc::new(Closure::new(function, ScopeFrame::default(), None));
        rt.push_stack(closure);
        assert!(rt.stack_top().is_some());
        rt.pop_stack();
        assert!(rt.stack_top().is_none());
    }
}
