//! Claims assembly, scope selection and expiration parsing

pub mod builder;
pub mod catalog;
pub mod expiration;
pub mod scopes;

pub use builder::{ClaimsBuilder, ClaimsSet, ExpiringClaims, NoExpiry, NonExpiringClaims};
pub use catalog::ScopeCatalog;
pub use expiration::{Expiration, resolve_expiration};
pub use scopes::ScopeSet;
