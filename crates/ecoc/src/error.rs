//! Top-level error type for the ecoc CLI, wrapping every phase's own
//! error one layer up the same way `FaxtError` wraps its phases.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EcocError {
    #[error("{0}")]
    Parse(#[from] eco_par::ParserError),

    #[error("{0}")]
    Runtime(#[from] eco_rt::RuntimeError),

    #[error("{0}")]
    Bundle(#[from] eco_bundle::BundleError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration file: {0}")]
    TomlParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, EcocError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = EcocError::Config("missing entry file".to_string());
        assert_eq!(err.to_string(), "configuration error: missing entry file");
    }
}
