//! ECDSA signing (ES256, ES384)
//!
//! Signatures are emitted in the fixed-width JOSE form `r || s`
//! (RFC 7518 §3.4), not ASN.1 DER.

use crate::error::{JwtError, JwtResult};
use p256::ecdsa::signature::Signer;

/// Sign with ECDSA P-256 (ES256)
#[inline]
pub(crate) fn sign_es256(message: &[u8], key: &p256::ecdsa::SigningKey) -> JwtResult<Vec<u8>> {
    let signature: p256::ecdsa::Signature = key
        .try_sign(message)
        .map_err(|e| JwtError::Signing(format!("ES256 signing failed: {e}")))?;
    Ok(signature.to_bytes().to_vec())
}

/// Sign with ECDSA P-384 (ES384)
#[inline]
pub(crate) fn sign_es384(message: &[u8], key: &p384::ecdsa::SigningKey) -> JwtResult<Vec<u8>> {
    let signature: p384::ecdsa::Signature = key
        .try_sign(message)
        .map_err(|e| JwtError::Signing(format!("ES384 signing failed: {e}")))?;
    Ok(signature.to_bytes().to_vec())
}
