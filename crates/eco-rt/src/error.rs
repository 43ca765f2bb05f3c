//! Run-time failure kinds (spec §7), plus the non-local-return unwind
//! signal (spec §3/§9) modeled as a distinguished variant rather than a
//! separate control-flow type: `eco-eval`'s statement evaluation threads
//! `Result<_, RuntimeError>` throughout, so piggybacking `Return`/`Thrown`
//! on the same error channel lets `?` do the unwinding for free.

use eco_util::Span;

use crate::value::Value;

#[derive(Debug, Clone, thiserror::Error)]
pub enum RuntimeError {
    /// Assignment target isn't an lvalue this runtime can write to (e.g.
    /// assigning to a literal or a call result).
    #[error("illegal assignment")]
    IllegalAssignment { span: Option<Span> },

    /// The lvalue was legal in shape but the write itself failed (e.g.
    /// indexing into a non-array with `[]=`).
    #[error("assignment failed")]
    AssignmentFailed { span: Option<Span> },

    /// `new`-ing a global binding that isn't a callable constructor, or
    /// doesn't exist at all. Not one of the named run-time failure kinds,
    /// but `new Undefined()` has to surface *something* — see DESIGN.md.
    #[error("'{name}' is not constructible")]
    NotConstructible { name: String },

    /// A value was called that isn't a function.
    #[error("value is not callable")]
    NotCallable { span: Option<Span> },

    /// `user_throw` carries a thrown `Value` unchanged up to the nearest
    /// `catch`; `host_raised` is the same shape for host-originated
    /// exceptions (spec: "host-raised and user-thrown exceptions both
    /// propagate unchanged").
    #[error("uncaught exception")]
    Thrown(Value),

    /// Non-local return in flight: unwinds statement evaluation up to the
    /// enclosing function call, not a real error.
    #[error("return outside of a call")]
    Return(Value),
}

impl RuntimeError {
    pub fn span(&self) -> Option<Span> {
        match self {
            RuntimeError::IllegalAssignment { span } => *span,
            RuntimeError::AssignmentFailed { span } => *span,
            RuntimeError::NotCallable { span } => *span,
            RuntimeError::NotConstructible { .. } => None,
            RuntimeError::Thrown(_) => None,
            RuntimeError::Return(_) => None,
        }
    }
}
