//! Signing request builder types
//!
//! `JwtBuilder` collects the operator's form fields. `build()` validates them
//! into a [`SigningRequest`], which is what the signing pipeline consumes.

use super::claims::ScopeSet;
use super::validation::AsyncJwtResult;
use crate::error::{JwtError, JwtResult};
use crate::types::SignedToken;
use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

/// Master builder for JWT operations
pub struct JwtMasterBuilder;

impl JwtMasterBuilder {
    /// Create new JWT builder
    #[must_use]
    pub fn builder() -> JwtBuilder {
        JwtBuilder::new()
    }

    /// Start a builder with the signing algorithm already set
    #[inline]
    #[must_use]
    pub fn with_algorithm(self, algorithm: &str) -> JwtBuilder {
        JwtBuilder::new().with_algorithm(algorithm)
    }
}

/// Direct builder entry point
pub struct Jwt;

impl Jwt {
    /// Create new JWT builder
    #[must_use]
    pub fn builder() -> JwtBuilder {
        JwtBuilder::new()
    }

    /// Master builder, for callers that configure the algorithm first
    #[must_use]
    pub fn master() -> JwtMasterBuilder {
        JwtMasterBuilder
    }
}

/// Collects the inputs for one token.
#[derive(Default, Clone)]
pub struct JwtBuilder {
    pub(crate) subject: Option<String>,
    pub(crate) key_id: Option<String>,
    pub(crate) encoded_key: Option<Zeroizing<String>>,
    pub(crate) algorithm: Option<String>,
    pub(crate) scopes: ScopeSet,
    pub(crate) expiration: Option<String>,
    pub(crate) issued_at: Option<DateTime<Utc>>,
}

/// JWT builder with a result handler attached
pub struct JwtBuilderWithHandler<F> {
    pub(crate) builder: JwtBuilder,
    pub(crate) handler: F,
}

impl JwtBuilder {
    /// Create new JWT builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `sub` claim
    #[inline]
    #[must_use]
    pub fn with_subject(mut self, subject: &str) -> Self {
        self.subject = Some(subject.to_string());
        self
    }

    /// Set the `kid` header
    #[inline]
    #[must_use]
    pub fn with_key_id(mut self, key_id: &str) -> Self {
        self.key_id = Some(key_id.to_string());
        self
    }

    /// Set the base64-encoded PKCS#8 private key
    #[inline]
    #[must_use]
    pub fn with_encoded_key(mut self, encoded_key: &str) -> Self {
        self.encoded_key = Some(Zeroizing::new(encoded_key.to_string()));
        self
    }

    /// Set the signing algorithm tag, e.g. `ES256`
    #[inline]
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: &str) -> Self {
        self.algorithm = Some(algorithm.to_string());
        self
    }

    /// Toggle one scope: selects it if absent, deselects it if present
    #[inline]
    #[must_use]
    pub fn with_scope(mut self, scope: &str) -> Self {
        self.scopes.toggle(scope);
        self
    }

    /// Replace the whole scope selection
    #[must_use]
    pub fn with_scopes(mut self, scopes: ScopeSet) -> Self {
        self.scopes = scopes;
        self
    }

    /// Set the expiration expression. Empty text means the token never expires.
    #[must_use]
    pub fn with_expiration(mut self, expiration: &str) -> Self {
        let expiration = expiration.trim();
        self.expiration = (!expiration.is_empty()).then(|| expiration.to_string());
        self
    }

    /// Clear the expiration so the token carries `net: true`
    #[must_use]
    pub fn without_expiration(mut self) -> Self {
        self.expiration = None;
        self
    }

    /// Pin `iat` instead of reading the clock at signing time
    #[must_use]
    pub fn with_issued_at(mut self, issued_at: DateTime<Utc>) -> Self {
        self.issued_at = Some(issued_at);
        self
    }

    /// Validate the collected fields.
    ///
    /// # Errors
    /// Returns `InvalidRequest` if the subject, key id, key or algorithm is
    /// missing or blank.
    pub fn build(self) -> JwtResult<SigningRequest> {
        let subject = required(self.subject, "subject")?;
        let key_id = required(self.key_id, "key id")?;
        let algorithm = required(self.algorithm, "algorithm")?;
        let encoded_key = match self.encoded_key {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Err(JwtError::invalid_request("private key is required")),
        };

        Ok(SigningRequest {
            subject,
            key_id,
            encoded_key,
            algorithm,
            scopes: self.scopes,
            expiration: self.expiration,
            issued_at: self.issued_at,
        })
    }

    /// Validate and sign on a spawned task.
    ///
    /// Validation failures resolve immediately without spawning.
    #[must_use]
    pub fn sign(self) -> AsyncJwtResult<SignedToken> {
        match self.build() {
            Ok(request) => request.sign(),
            Err(e) => AsyncJwtResult::ready(Err(e)),
        }
    }

    /// Attach a handler that receives the signing result
    pub fn on_result<F, T>(self, handler: F) -> JwtBuilderWithHandler<F>
    where
        F: FnOnce(JwtResult<SignedToken>) -> T,
    {
        JwtBuilderWithHandler {
            builder: self,
            handler,
        }
    }
}

impl std::fmt::Debug for JwtBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtBuilder")
            .field("subject", &self.subject)
            .field("key_id", &self.key_id)
            .field("encoded_key", &self.encoded_key.as_ref().map(|_| "<redacted>"))
            .field("algorithm", &self.algorithm)
            .field("scopes", &self.scopes)
            .field("expiration", &self.expiration)
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

fn required(value: Option<String>, field: &str) -> JwtResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(JwtError::InvalidRequest(format!("{field} is required"))),
    }
}

/// A validated set of inputs for one signing operation.
#[derive(Clone)]
pub struct SigningRequest {
    pub(crate) subject: String,
    pub(crate) key_id: String,
    pub(crate) encoded_key: Zeroizing<String>,
    pub(crate) algorithm: String,
    pub(crate) scopes: ScopeSet,
    pub(crate) expiration: Option<String>,
    pub(crate) issued_at: Option<DateTime<Utc>>,
}

impl SigningRequest {
    /// Subject (`sub`)
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Key identity (`kid`)
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Algorithm tag as entered
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Selected scopes in selection order
    #[must_use]
    pub fn scopes(&self) -> &ScopeSet {
        &self.scopes
    }

    /// Expiration expression, `None` for a non-expiring token
    #[must_use]
    pub fn expiration(&self) -> Option<&str> {
        self.expiration.as_deref()
    }

    /// Pinned signing instant, if any
    #[must_use]
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.issued_at
    }
}

impl std::fmt::Debug for SigningRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningRequest")
            .field("subject", &self.subject)
            .field("key_id", &self.key_id)
            .field("algorithm", &self.algorithm)
            .field("scopes", &self.scopes)
            .field("expiration", &self.expiration)
            .field("issued_at", &self.issued_at)
            .finish_non_exhaustive()
    }
}
