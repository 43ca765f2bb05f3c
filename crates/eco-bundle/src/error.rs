//! Bundler failures (spec §4.5/§7). Neither the parser nor the resolvers
//! recover from an error; a `BundleError` just carries the inner failure
//! unchanged one layer up, the same "surface synchronously, don't retry"
//! policy the interpreter and parser follow.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BundleError {
    #[error(transparent)]
    Parse(#[from] eco_par::ParserError),

    #[error(transparent)]
    Runtime(#[from] eco_rt::RuntimeError),

    #[error("failed to resolve '{specifier}' from '{current_dir}': {reason}")]
    ResolveFilename { current_dir: String, specifier: String, reason: String },

    #[error("failed to read module '{canonical_name}': {reason}")]
    ResolveImport { canonical_name: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
