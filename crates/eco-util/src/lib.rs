//! eco-util — shared foundation types for the Eco toolchain.
//!
//! Everything in this crate is a leaf dependency: [`Span`] for source
//! locations, [`Symbol`] for interned identifiers, and [`Handler`] /
//! [`Diagnostic`] for error reporting. Every other crate in the workspace
//! (`eco-lex`, `eco-par`, `eco-rt`, `eco-eval`, `eco-bundle`) depends on
//! this one and nothing depends back on them.

mod diagnostic;
mod span;
mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, Handler, Level};
pub use span::{line_and_column, Span};
pub use symbol::Symbol;
