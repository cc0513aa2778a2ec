//! Token type definitions

use serde::{Deserialize, Serialize};

/// Protected header of a signed token.
///
/// Serialized keys appear in the order `alg`, `kid`, `typ`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtHeader {
    /// Signature algorithm tag
    pub alg: String,
    /// Key identity
    pub kid: String,
    /// Token type, always `JWT`
    pub typ: String,
}

impl JwtHeader {
    /// Build the header for an algorithm tag and key id.
    ///
    /// The tag is taken verbatim; whether it names a usable algorithm is
    /// decided when the key is imported and again when the token is signed.
    #[must_use]
    pub fn new(alg: &str, kid: &str) -> Self {
        Self {
            alg: alg.to_string(),
            kid: kid.to_string(),
            typ: "JWT".to_string(),
        }
    }
}

/// Compact serialized token: `header.payload.signature`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedToken(String);

impl SignedToken {
    pub(crate) fn from_segments(signing_input: String, signature_b64: &str) -> Self {
        let mut token = signing_input;
        token.reserve(1 + signature_b64.len());
        token.push('.');
        token.push_str(signature_b64);
        Self(token)
    }

    /// Token text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the token text
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Base64url header segment
    #[must_use]
    pub fn header_segment(&self) -> &str {
        self.0.split('.').next().unwrap_or_default()
    }

    /// Base64url payload segment
    #[must_use]
    pub fn payload_segment(&self) -> &str {
        self.0.split('.').nth(1).unwrap_or_default()
    }

    /// Base64url signature segment
    #[must_use]
    pub fn signature_segment(&self) -> &str {
        self.0.split('.').nth(2).unwrap_or_default()
    }

    /// The bytes the signature was computed over (`header.payload`)
    #[must_use]
    pub fn signing_input(&self) -> &str {
        self.0.rsplit_once('.').map_or("", |(input, _)| input)
    }
}

impl AsRef<str> for SignedToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<SignedToken> for String {
    fn from(token: SignedToken) -> Self {
        token.0
    }
}

impl std::fmt::Display for SignedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
