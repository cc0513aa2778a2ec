//! Token minting error types

use thiserror::Error;

/// Token minting result type
pub type JwtResult<T> = Result<T, JwtError>;

/// Errors surfaced by the signing pipeline.
///
/// Every failure terminates the operation; no partial token is ever returned
/// alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// Encoded key is not valid base64 or not a PKCS#8 private key
    #[error("Key import failed: {0}")]
    KeyImport(String),
    /// Key type cannot be used with the requested algorithm
    #[error("Algorithm/key mismatch: {0}")]
    AlgorithmKeyMismatch(String),
    /// Expiration text is not a recognized duration or instant
    #[error("Invalid expiration: {0}")]
    ExpirationParse(String),
    /// Signature computation was rejected
    #[error("Signing error: {0}")]
    Signing(String),
    /// Algorithm tag is not one the signer knows
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    /// Request is missing a required field
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// Header or claims could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Fieldless view of [`JwtError`] for callers that dispatch on the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JwtErrorKind {
    /// See [`JwtError::KeyImport`]
    KeyImport,
    /// See [`JwtError::AlgorithmKeyMismatch`]
    AlgorithmKeyMismatch,
    /// See [`JwtError::ExpirationParse`]
    ExpirationParse,
    /// See [`JwtError::Signing`]
    Signing,
    /// See [`JwtError::UnsupportedAlgorithm`]
    UnsupportedAlgorithm,
    /// See [`JwtError::InvalidRequest`]
    InvalidRequest,
    /// See [`JwtError::Serialization`]
    Serialization,
    /// See [`JwtError::Internal`]
    Internal,
}

impl JwtError {
    /// Failure class of this error
    #[must_use]
    pub fn kind(&self) -> JwtErrorKind {
        match self {
            JwtError::KeyImport(_) => JwtErrorKind::KeyImport,
            JwtError::AlgorithmKeyMismatch(_) => JwtErrorKind::AlgorithmKeyMismatch,
            JwtError::ExpirationParse(_) => JwtErrorKind::ExpirationParse,
            JwtError::Signing(_) => JwtErrorKind::Signing,
            JwtError::UnsupportedAlgorithm(_) => JwtErrorKind::UnsupportedAlgorithm,
            JwtError::InvalidRequest(_) => JwtErrorKind::InvalidRequest,
            JwtError::Serialization(_) => JwtErrorKind::Serialization,
            JwtError::Internal(_) => JwtErrorKind::Internal,
        }
    }

    /// Create a key import error
    #[inline]
    #[must_use]
    pub fn key_import(msg: &str) -> Self {
        JwtError::KeyImport(msg.to_string())
    }

    /// Create an algorithm/key mismatch error
    #[inline]
    #[must_use]
    pub fn algorithm_key_mismatch(msg: &str) -> Self {
        JwtError::AlgorithmKeyMismatch(msg.to_string())
    }

    /// Create an expiration parse error
    #[inline]
    #[must_use]
    pub fn expiration_parse(msg: &str) -> Self {
        JwtError::ExpirationParse(msg.to_string())
    }

    /// Create a signing error
    #[inline]
    #[must_use]
    pub fn signing(msg: &str) -> Self {
        JwtError::Signing(msg.to_string())
    }

    /// Create an unsupported algorithm error
    #[inline]
    #[must_use]
    pub fn unsupported_algorithm(alg: &str) -> Self {
        JwtError::UnsupportedAlgorithm(alg.to_string())
    }

    /// Create an invalid request error
    #[inline]
    #[must_use]
    pub fn invalid_request(msg: &str) -> Self {
        JwtError::InvalidRequest(msg.to_string())
    }

    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(msg: &str) -> Self {
        JwtError::Serialization(msg.to_string())
    }

    /// Create an internal error
    #[inline]
    #[must_use]
    pub fn internal(msg: &str) -> Self {
        JwtError::Internal(msg.to_string())
    }
}

impl From<serde_json::Error> for JwtError {
    fn from(err: serde_json::Error) -> Self {
        JwtError::Serialization(err.to_string())
    }
}
