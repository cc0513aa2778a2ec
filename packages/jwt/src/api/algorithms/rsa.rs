//! RSA signing (RS256/384/512 with PKCS#1 v1.5, PS256/384/512 with PSS)

use crate::algorithms::Algorithm;
use crate::api::keys::get_recommended_key_size;
use crate::error::{JwtError, JwtResult};
use p256::elliptic_curve::rand_core::OsRng;
use rsa::RsaPrivateKey;
use rsa::pkcs1v15::SigningKey as Pkcs1v15SigningKey;
use rsa::pss::BlindedSigningKey;
use rsa::signature::{RandomizedSigner, SignatureEncoding, Signer};
use rsa::traits::PublicKeyParts;
use sha2::{Sha256, Sha384, Sha512};

/// RSA private key prepared for exactly one RS*/PS* algorithm
pub(crate) struct RsaSigningKey {
    modulus_bytes: usize,
    scheme: RsaScheme,
}

enum RsaScheme {
    Rs256(Pkcs1v15SigningKey<Sha256>),
    Rs384(Pkcs1v15SigningKey<Sha384>),
    Rs512(Pkcs1v15SigningKey<Sha512>),
    Ps256(BlindedSigningKey<Sha256>),
    Ps384(BlindedSigningKey<Sha384>),
    Ps512(BlindedSigningKey<Sha512>),
}

impl RsaSigningKey {
    /// Bind `key` to `algorithm`.
    ///
    /// # Errors
    /// Returns `AlgorithmKeyMismatch` for the ES* algorithms.
    pub(crate) fn new(algorithm: Algorithm, key: RsaPrivateKey) -> JwtResult<Self> {
        let modulus_bytes = key.size();
        let scheme = match algorithm {
            Algorithm::RS256 => RsaScheme::Rs256(Pkcs1v15SigningKey::new(key)),
            Algorithm::RS384 => RsaScheme::Rs384(Pkcs1v15SigningKey::new(key)),
            Algorithm::RS512 => RsaScheme::Rs512(Pkcs1v15SigningKey::new(key)),
            Algorithm::PS256 => RsaScheme::Ps256(BlindedSigningKey::new(key)),
            Algorithm::PS384 => RsaScheme::Ps384(BlindedSigningKey::new(key)),
            Algorithm::PS512 => RsaScheme::Ps512(BlindedSigningKey::new(key)),
            Algorithm::ES256 | Algorithm::ES384 => {
                return Err(JwtError::AlgorithmKeyMismatch(format!(
                    "{algorithm} cannot be used with an RSA key"
                )));
            }
        };
        Ok(Self {
            modulus_bytes,
            scheme,
        })
    }

    /// Algorithm this key signs with
    pub(crate) fn algorithm(&self) -> Algorithm {
        match self.scheme {
            RsaScheme::Rs256(_) => Algorithm::RS256,
            RsaScheme::Rs384(_) => Algorithm::RS384,
            RsaScheme::Rs512(_) => Algorithm::RS512,
            RsaScheme::Ps256(_) => Algorithm::PS256,
            RsaScheme::Ps384(_) => Algorithm::PS384,
            RsaScheme::Ps512(_) => Algorithm::PS512,
        }
    }

    /// Sign `message`, refusing moduli under 2048 bits.
    ///
    /// # Errors
    /// Returns `Signing` if the modulus is too short or the backend fails.
    pub(crate) fn sign(&self, message: &[u8]) -> JwtResult<Vec<u8>> {
        let algorithm = self.algorithm();
        let minimum = get_recommended_key_size(algorithm.as_str())?;
        if self.modulus_bytes < minimum {
            return Err(JwtError::Signing(format!(
                "{algorithm} requires an RSA modulus of at least {} bits, got {}",
                minimum * 8,
                self.modulus_bytes * 8
            )));
        }

        let signature = match &self.scheme {
            RsaScheme::Rs256(key) => key.try_sign(message).map(|sig| sig.to_bytes().into_vec()),
            RsaScheme::Rs384(key) => key.try_sign(message).map(|sig| sig.to_bytes().into_vec()),
            RsaScheme::Rs512(key) => key.try_sign(message).map(|sig| sig.to_bytes().into_vec()),
            RsaScheme::Ps256(key) => key
                .try_sign_with_rng(&mut OsRng, message)
                .map(|sig| sig.to_bytes().into_vec()),
            RsaScheme::Ps384(key) => key
                .try_sign_with_rng(&mut OsRng, message)
                .map(|sig| sig.to_bytes().into_vec()),
            RsaScheme::Ps512(key) => key
                .try_sign_with_rng(&mut OsRng, message)
                .map(|sig| sig.to_bytes().into_vec()),
        };

        signature.map_err(|e| JwtError::Signing(format!("{algorithm} signing failed: {e}")))
    }
}
