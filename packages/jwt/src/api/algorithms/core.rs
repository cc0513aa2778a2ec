//! Token signing - encoding, signature computation and algorithm dispatch

use super::ecdsa::{sign_es256, sign_es384};
use super::utils::base64_url_encode;
use crate::algorithms::Algorithm;
use crate::api::keys::{KeyMaterial, SigningKey};
use crate::error::{JwtError, JwtResult};
use crate::types::{JwtHeader, SignedToken};
use serde::Serialize;

/// Produce the compact serialization `header.payload.signature`.
///
/// The algorithm is re-read from the header and must be the one the key was
/// imported for.
///
/// # Errors
/// Returns `Signing` if the header names an algorithm the key cannot sign
/// with or the backend rejects the operation, and `Serialization` if the
/// header or claims cannot be encoded.
pub fn sign_token<C: Serialize>(
    header: &JwtHeader,
    claims: &C,
    key: &SigningKey,
) -> JwtResult<SignedToken> {
    let algorithm: Algorithm = header.alg.parse().map_err(|_| {
        JwtError::Signing(format!("Header names unsupported algorithm {}", header.alg))
    })?;
    if algorithm != key.algorithm() {
        return Err(JwtError::Signing(format!(
            "{algorithm} cannot be computed with a key imported for {}",
            key.algorithm()
        )));
    }

    let header_b64 = base64_url_encode(&serde_json::to_vec(header)?);
    let payload_b64 = base64_url_encode(&serde_json::to_vec(claims)?);

    let mut signing_input = String::with_capacity(header_b64.len() + 1 + payload_b64.len());
    signing_input.push_str(&header_b64);
    signing_input.push('.');
    signing_input.push_str(&payload_b64);

    let signature = match key.material() {
        KeyMaterial::EcP256(ec) => sign_es256(signing_input.as_bytes(), ec)?,
        KeyMaterial::EcP384(ec) => sign_es384(signing_input.as_bytes(), ec)?,
        KeyMaterial::Rsa(rsa) => rsa.sign(signing_input.as_bytes())?,
    };

    Ok(SignedToken::from_segments(
        signing_input,
        &base64_url_encode(&signature),
    ))
}
