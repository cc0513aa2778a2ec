//! Claims assembly
//!
//! A token carries either an `exp` claim or the `net` (no expiration) marker,
//! never both and never neither. The two shapes are separate variants of
//! [`ClaimsSet`] so no code path can produce a mixed payload.

use super::expiration::resolve_expiration;
use super::scopes::ScopeSet;
use crate::error::JwtResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// The `net: true` marker carried by non-expiring tokens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoExpiry;

impl Serialize for NoExpiry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(true)
    }
}

impl<'de> Deserialize<'de> for NoExpiry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if bool::deserialize(deserializer)? {
            Ok(NoExpiry)
        } else {
            Err(de::Error::custom("net marker must be true"))
        }
    }
}

/// Claims of a token that expires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpiringClaims {
    /// Subject
    pub sub: String,
    /// Scopes, in selection order
    pub scp: Vec<String>,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds), always after `iat`
    pub exp: i64,
}

/// Claims of a token that never expires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NonExpiringClaims {
    /// Subject
    pub sub: String,
    /// Scopes, in selection order
    pub scp: Vec<String>,
    /// No-expiration marker
    pub net: NoExpiry,
    /// Issued-at (unix seconds)
    pub iat: i64,
}

/// Payload of a minted token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimsSet {
    /// Carries `exp`
    Expiring(ExpiringClaims),
    /// Carries `net: true`
    NonExpiring(NonExpiringClaims),
}

impl ClaimsSet {
    /// Subject
    #[must_use]
    pub fn sub(&self) -> &str {
        match self {
            ClaimsSet::Expiring(c) => &c.sub,
            ClaimsSet::NonExpiring(c) => &c.sub,
        }
    }

    /// Scopes in selection order
    #[must_use]
    pub fn scp(&self) -> &[String] {
        match self {
            ClaimsSet::Expiring(c) => &c.scp,
            ClaimsSet::NonExpiring(c) => &c.scp,
        }
    }

    /// Issued-at (unix seconds)
    #[must_use]
    pub fn iat(&self) -> i64 {
        match self {
            ClaimsSet::Expiring(c) => c.iat,
            ClaimsSet::NonExpiring(c) => c.iat,
        }
    }

    /// Expiry, if the token expires
    #[must_use]
    pub fn exp(&self) -> Option<i64> {
        match self {
            ClaimsSet::Expiring(c) => Some(c.exp),
            ClaimsSet::NonExpiring(_) => None,
        }
    }

    /// Whether this is the expiring shape
    #[must_use]
    pub fn is_expiring(&self) -> bool {
        matches!(self, ClaimsSet::Expiring(_))
    }
}

/// Builder for [`ClaimsSet`]
#[derive(Debug, Clone)]
pub struct ClaimsBuilder {
    subject: String,
    scopes: ScopeSet,
    issued_at: Option<DateTime<Utc>>,
}

impl ClaimsBuilder {
    /// Start claims for `subject`
    #[must_use]
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            scopes: ScopeSet::new(),
            issued_at: None,
        }
    }

    /// Set the selected scopes
    #[must_use]
    pub fn with_scopes(mut self, scopes: ScopeSet) -> Self {
        self.scopes = scopes;
        self
    }

    /// Pin the signing instant instead of reading the clock
    #[must_use]
    pub fn issued_at(mut self, at: DateTime<Utc>) -> Self {
        self.issued_at = Some(at);
        self
    }

    /// Build the claims, choosing the shape from `expiration`.
    ///
    /// # Errors
    /// Returns `ExpirationParse` if `expiration` is present but not a
    /// recognized expression, or does not lie after the signing instant.
    pub fn build(self, expiration: Option<&str>) -> JwtResult<ClaimsSet> {
        match expiration {
            Some(text) => self.expiring(text),
            None => Ok(self.non_expiring()),
        }
    }

    /// Claims with `exp` resolved from `expiration`.
    ///
    /// # Errors
    /// Returns `ExpirationParse` as for [`ClaimsBuilder::build`].
    pub fn expiring(self, expiration: &str) -> JwtResult<ClaimsSet> {
        let iat = self.issued_at_seconds();
        let exp = resolve_expiration(expiration, iat)?;
        Ok(ClaimsSet::Expiring(ExpiringClaims {
            sub: self.subject,
            scp: self.scopes.into_vec(),
            iat,
            exp,
        }))
    }

    /// Claims with the `net: true` marker
    #[must_use]
    pub fn non_expiring(self) -> ClaimsSet {
        let iat = self.issued_at_seconds();
        ClaimsSet::NonExpiring(NonExpiringClaims {
            sub: self.subject,
            scp: self.scopes.into_vec(),
            net: NoExpiry,
            iat,
        })
    }

    fn issued_at_seconds(&self) -> i64 {
        self.issued_at.unwrap_or_else(Utc::now).timestamp()
    }
}
