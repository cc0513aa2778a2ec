//! Signing pipeline
//!
//! Key import, header and claims assembly, then signature computation. Only
//! the algorithm, key id and scope count are ever logged.

use super::algorithms::sign_token;
use super::builders::{JwtBuilderWithHandler, SigningRequest};
use super::claims::ClaimsBuilder;
use super::keys::import_signing_key;
use super::validation::AsyncJwtResult;
use crate::error::JwtResult;
use crate::types::{JwtHeader, SignedToken};
use tokio::sync::oneshot;

/// Run the full signing pipeline for `request`.
///
/// # Errors
/// - `UnsupportedAlgorithm` if the algorithm tag is not registered
/// - `KeyImport` or `AlgorithmKeyMismatch` if the key cannot be used
/// - `ExpirationParse` if the expiration is unrecognized or not in the future
/// - `Signing` if signature computation fails
pub async fn sign_request(request: &SigningRequest) -> JwtResult<SignedToken> {
    let key = import_signing_key(&request.encoded_key, &request.algorithm).await?;

    let header = JwtHeader::new(&request.algorithm, &request.key_id);
    let mut claims =
        ClaimsBuilder::new(request.subject.as_str()).with_scopes(request.scopes.clone());
    if let Some(issued_at) = request.issued_at {
        claims = claims.issued_at(issued_at);
    }
    let claims = claims.build(request.expiration.as_deref())?;

    let token = sign_token(&header, &claims, &key)?;
    tracing::debug!(
        alg = %request.algorithm,
        kid = %request.key_id,
        scopes = request.scopes.len(),
        expiring = claims.is_expiring(),
        "signed token"
    );
    Ok(token)
}

impl SigningRequest {
    /// Sign on a spawned task.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn sign(self) -> AsyncJwtResult<SignedToken> {
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let result = sign_request(&self).await;
            if let Err(e) = &result {
                tracing::warn!(kind = ?e.kind(), "token signing failed");
            }
            let _ = tx.send(result);
        });

        AsyncJwtResult::new(rx)
    }

    /// Sign in place and pass the result through `handler`
    pub async fn sign_with_handler<F, T>(self, handler: F) -> T
    where
        F: FnOnce(JwtResult<SignedToken>) -> T,
    {
        handler(sign_request(&self).await)
    }
}

impl<F, T> JwtBuilderWithHandler<F>
where
    F: FnOnce(JwtResult<SignedToken>) -> T,
{
    /// Validate, sign, and return whatever the handler makes of the result
    pub async fn sign(self) -> T {
        match self.builder.build() {
            Ok(request) => request.sign_with_handler(self.handler).await,
            Err(e) => (self.handler)(Err(e)),
        }
    }
}
