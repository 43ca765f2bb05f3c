//! eco-bundle — the CommonJS-style module bundler (spec §4.5).
//!
//! `Bundler::bundle` walks a module graph starting from an entry point,
//! re-emitting each module's top-level statements as source text via
//! [`ToSource`] (implemented over `eco_par::ast` the same way
//! `eco_eval::Evaluate` is — a downstream trait, so the AST stays inert),
//! and wraps the result in the `require`/`cached` skeleton every emitted
//! bundle shares. Only two things here are more than string assembly:
//! cycle-safe canonical caching (a module is never parsed or emitted
//! twice, even if it imports itself transitively) and export aggregation
//! (one `module.exports = ...` per module, combining `export default`,
//! `export const`, and `export … from`).
//!
//! Resolution is pluggable via [`FilenameResolver`]/[`ImportResolver`];
//! [`memory::MemoryResolver`] is a fixed in-memory table of the two,
//! enough to exercise the bundler without a real filesystem.

mod bundler;
mod error;
pub mod memory;
mod resolver;
mod source;

pub use bundler::{Bundler, BundlerContext};
pub use error::BundleError;
pub use resolver::{FilenameResolver, ImportResolver};
pub use source::ToSource;
