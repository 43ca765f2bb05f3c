//! eco-eval — the tree-walking evaluator (spec §4.3).
//!
//! `Evaluate` is defined here rather than in `eco-par` so the AST can stay
//! inert data: implementing it over `eco_par::ast::{Stmt, Expr}` from this
//! downstream crate needs no trait-ownership workaround since the trait
//! itself lives here (`eco-bundle`'s `ToSource` mirrors the same shape for
//! source re-emission instead of evaluation).
//!
//! `run_program` is this crate's realization of the two spec §4.4
//! `Runtime` operations that can't be literal `Runtime` methods —
//! `evaluate(node)` and (via [`call::instantiate`]) `instantiate` — see
//! `eco-rt`'s crate doc for why.

mod call;
mod expr;
mod pattern;
mod stmt;

pub use call::{call_closure, instantiate};
use eco_par::ast::Stmt;
use eco_rt::{Runtime, RuntimeError, Value};

pub trait Evaluate {
    fn evaluate(&self, runtime: &Runtime) -> Result<Value, RuntimeError>;
}

/// Runs a full program's top-level statements against `runtime`. A
/// top-level `return` ends the program early with that value (used by
/// the test-scenario convention of `return expr;` as the program's
/// result); an uncaught `throw` propagates to the caller unchanged.
pub fn run_program(stmts: &[Stmt], runtime: &Runtime) -> Result<Value, RuntimeError> {
    for stmt in stmts {
        match stmt.evaluate(runtime) {
            Ok(_) => {}
            Err(RuntimeError::Return(v)) => return Ok(v),
            Err(e) => return Err(e),
        }
    }
    Ok(Value::Undefined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> Value {
        let program = eco_par::parse(source).unwrap();
        let runtime = Runtime::new();
        run_program(&program, &runtime).unwrap()
    }

    #[test]
    fn scenario_one_precedence() {
        assert_eq!(run("const x = 1 + 2 * 3; return x;").as_number(), 7.0);
    }

    #[test]
    fn scenario_two_array_destructure_with_rest() {
        assert_eq!(run("const [a, , ...b] = [1,2,3,4]; return a + b.length;").as_number(), 4.0);
    }

    #[test]
    fn scenario_recursive_closure() {
        assert_eq!(
            run("const g = n => n <= 1 ? 1 : n * g(n - 1); return g(5);").as_number(),
            120.0
        );
    }

    #[test]
    fn scenario_string_interpolation() {
        assert_eq!(run("const s = 'hi #{1+2}'; return s;").to_display_string(), "hi 3");
    }

    #[test]
    fn scenario_try_catch_finally() {
        let result = run(
            "let r = ''; try { throw 'oops'; } catch (e) { r = e; } finally { r = r + '!'; } return r;",
        );
        assert_eq!(result.to_display_string(), "oops!");
    }

    #[test]
    fn set_local_on_undeclared_name_is_silently_dropped() {
        // `y` is never declared; the assignment is a silent no-op and `y`
        // itself still reads back as `undefined` from the global fallback.
        let result = run("y = 5; return typeof y;");
        assert_eq!(result.to_display_string(), "undefined");
    }

    #[test]
    fn try_catch_catches_a_runtime_error_not_just_a_user_throw() {
        // `1++` isn't an lvalue and raises `RuntimeError::IllegalAssignment`,
        // never `Thrown` — the catch block still has to run.
        let result = run("try { 1++; } catch (e) { return 1; } return 2;");
        assert_eq!(result.as_number(), 1.0);
    }

    #[test]
    fn closures_share_mutable_captured_array() {
        let result = run(
            "const counts = []; const push = x => counts[counts.length] = x; push(1); push(2); return counts.length;",
        );
        assert_eq!(result.as_number(), 2.0);
    }
}
