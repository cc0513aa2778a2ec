//! Private key import
//!
//! Turns the operator's base64 text into an algorithm-bound signing key. The
//! text may wrap either a PEM `PRIVATE KEY` block or raw PKCS#8 DER. Decoded
//! buffers are zeroized when this step returns.

use super::algorithms::RsaSigningKey;
use super::algorithms::utils::base64_standard_decode;
use crate::algorithms::{Algorithm, KeyFamily};
use crate::error::{JwtError, JwtResult};
use p256::pkcs8::{DecodePrivateKey, ObjectIdentifier, PrivateKeyInfo};
use rsa::RsaPrivateKey;
use zeroize::Zeroizing;

const RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");
const EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
const SECP256R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
const SECP384R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");

const PEM_PREFIX: &[u8] = b"-----BEGIN";
const PKCS8_PEM_LABEL: &str = "PRIVATE KEY";

/// Private key bound to the algorithm it was imported for.
pub struct SigningKey {
    algorithm: Algorithm,
    material: KeyMaterial,
}

pub(crate) enum KeyMaterial {
    EcP256(p256::ecdsa::SigningKey),
    EcP384(p384::ecdsa::SigningKey),
    Rsa(Box<RsaSigningKey>),
}

impl KeyMaterial {
    pub(crate) fn family(&self) -> KeyFamily {
        match self {
            KeyMaterial::EcP256(_) => KeyFamily::EcP256,
            KeyMaterial::EcP384(_) => KeyFamily::EcP384,
            KeyMaterial::Rsa(_) => KeyFamily::Rsa,
        }
    }
}

impl SigningKey {
    /// Algorithm the key was imported for
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Family of the underlying key
    #[must_use]
    pub fn family(&self) -> KeyFamily {
        self.material.family()
    }

    pub(crate) fn material(&self) -> &KeyMaterial {
        &self.material
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("algorithm", &self.algorithm)
            .field("family", &self.family())
            .finish_non_exhaustive()
    }
}

/// Import a base64-encoded PKCS#8 private key for `algorithm`.
///
/// # Errors
/// - `UnsupportedAlgorithm` if `algorithm` is not a registered tag
/// - `KeyImport` if the text is not base64 or does not hold a PKCS#8 key
/// - `AlgorithmKeyMismatch` if the key's type cannot sign with `algorithm`
pub async fn import_signing_key(encoded_key: &str, algorithm: &str) -> JwtResult<SigningKey> {
    // Yield for cooperative multitasking
    tokio::task::yield_now().await;

    let algorithm: Algorithm = algorithm.parse()?;
    let der = decode_pkcs8_der(encoded_key)?;
    let material = parse_key_material(&der, algorithm)?;

    tracing::debug!(%algorithm, family = %material.family(), "imported signing key");
    Ok(SigningKey {
        algorithm,
        material,
    })
}

/// Base64 text → PKCS#8 DER, unwrapping a PEM block when present
fn decode_pkcs8_der(encoded_key: &str) -> JwtResult<Zeroizing<Vec<u8>>> {
    let decoded = Zeroizing::new(
        base64_standard_decode(encoded_key)
            .map_err(|e| JwtError::KeyImport(format!("Key is not valid base64: {e}")))?,
    );

    if !decoded.trim_ascii_start().starts_with(PEM_PREFIX) {
        return Ok(decoded);
    }

    let pem = std::str::from_utf8(&decoded)
        .map_err(|_| JwtError::key_import("PEM key text is not valid UTF-8"))?;
    let body = pem_body(pem)?;
    let der = base64_standard_decode(body)
        .map_err(|e| JwtError::KeyImport(format!("Invalid PEM private key body: {e}")))?;
    Ok(Zeroizing::new(der))
}

/// Body of a `PRIVATE KEY` block. Any line width is accepted, including none.
fn pem_body(pem: &str) -> JwtResult<&str> {
    let rest = pem
        .trim()
        .strip_prefix("-----BEGIN ")
        .ok_or_else(|| JwtError::key_import("Malformed PEM header"))?;
    let (label, rest) = rest
        .split_once("-----")
        .ok_or_else(|| JwtError::key_import("Malformed PEM header"))?;
    if label != PKCS8_PEM_LABEL {
        return Err(JwtError::KeyImport(format!(
            "Expected a PKCS#8 \"{PKCS8_PEM_LABEL}\" block, found \"{label}\""
        )));
    }

    let (body, footer) = rest
        .rsplit_once("-----END ")
        .ok_or_else(|| JwtError::key_import("PEM block has no END line"))?;
    if footer.strip_suffix("-----") != Some(label) {
        return Err(JwtError::key_import("PEM END line does not match BEGIN line"));
    }
    Ok(body)
}

/// Classify the PKCS#8 algorithm identifier, then parse for the matching family
fn parse_key_material(der: &[u8], algorithm: Algorithm) -> JwtResult<KeyMaterial> {
    let info = PrivateKeyInfo::try_from(der)
        .map_err(|e| JwtError::KeyImport(format!("Not a PKCS#8 private key: {e}")))?;

    let family = key_family_of(&info).ok_or_else(|| {
        JwtError::AlgorithmKeyMismatch(format!(
            "Key type {} cannot sign with {algorithm}",
            info.algorithm.oid
        ))
    })?;

    let expected = algorithm.key_family();
    if family != expected {
        tracing::warn!(%algorithm, key = %family, "key type does not match algorithm");
        return Err(JwtError::AlgorithmKeyMismatch(format!(
            "{algorithm} requires an {expected} key, got an {family} key"
        )));
    }

    match family {
        KeyFamily::EcP256 => p256::ecdsa::SigningKey::from_pkcs8_der(der)
            .map(KeyMaterial::EcP256)
            .map_err(|e| invalid_ec_key(algorithm, &e)),
        KeyFamily::EcP384 => p384::ecdsa::SigningKey::from_pkcs8_der(der)
            .map(KeyMaterial::EcP384)
            .map_err(|e| invalid_ec_key(algorithm, &e)),
        KeyFamily::Rsa => {
            let key = RsaPrivateKey::from_pkcs8_der(der)
                .map_err(|e| JwtError::KeyImport(format!("Invalid RSA private key: {e}")))?;
            Ok(KeyMaterial::Rsa(Box::new(RsaSigningKey::new(algorithm, key)?)))
        }
    }
}

fn invalid_ec_key(algorithm: Algorithm, err: &p256::pkcs8::Error) -> JwtError {
    JwtError::KeyImport(format!("Invalid EC private key for {algorithm}: {err}"))
}

fn key_family_of(info: &PrivateKeyInfo<'_>) -> Option<KeyFamily> {
    if info.algorithm.oid == RSA_ENCRYPTION {
        return Some(KeyFamily::Rsa);
    }
    if info.algorithm.oid != EC_PUBLIC_KEY {
        return None;
    }
    let curve = info.algorithm.parameters_oid().ok()?;
    if curve == SECP256R1 {
        Some(KeyFamily::EcP256)
    } else if curve == SECP384R1 {
        Some(KeyFamily::EcP384)
    } else {
        None
    }
}

/// Get recommended key size for algorithm
///
/// # Errors
/// Returns `UnsupportedAlgorithm` if the algorithm is not registered
pub fn get_recommended_key_size(algorithm: &str) -> Result<usize, JwtError> {
    let algorithm: Algorithm = algorithm.parse()?;
    Ok(match algorithm.key_family() {
        KeyFamily::EcP256 => 32, // P-256 curve
        KeyFamily::EcP384 => 48, // P-384 curve
        KeyFamily::Rsa => 256,   // 2048 bits RSA minimum
    })
}
