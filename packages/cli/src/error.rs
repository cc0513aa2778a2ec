//! Command line error type

use std::path::PathBuf;
use uplynk_jwt::JwtError;

/// Failures surfaced by the command line
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The token pipeline rejected the request
    #[error(transparent)]
    Jwt(#[from] JwtError),
    /// Reading or writing the field store failed
    #[error("Field store {path}: {source}")]
    Store {
        /// Store file
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },
    /// The field store exists but is not valid JSON
    #[error("Field store {path} is corrupt: {source}")]
    CorruptStore {
        /// Store file
        path: PathBuf,
        /// Parse failure
        source: serde_json::Error,
    },
    /// Fields could not be encoded for the store
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// No OS configuration directory and no explicit `--store`
    #[error("Could not determine a configuration directory; pass --store")]
    NoConfigDir,
    /// A `--scope` value outside the catalog
    #[error("Unknown scope \"{0}\" (see --list-scopes, or pass --allow-unknown-scope)")]
    UnknownScope(String),
    /// Writing the token to stdout failed
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Result alias for command line operations
pub type CliResult<T> = Result<T, CliError>;
