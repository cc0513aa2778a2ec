//! Minting of signed access tokens for the Uplynk video platform
//!
//! This crate provides:
//! - PKCS#8 private key import for ES256/ES384 and RSA algorithms
//! - Claims with either an `exp` claim or the `net: true` marker
//! - Insertion-ordered scope selection with toggle semantics
//! - Async signing on spawned tasks with channel-backed results
//!
//! ```no_run
//! # async fn demo(key_b64: &str) -> uplynk_jwt::JwtResult<()> {
//! let token = uplynk_jwt::Jwt::builder()
//!     .with_subject("owner-guid")
//!     .with_key_id("key-id")
//!     .with_encoded_key(key_b64)
//!     .with_algorithm("ES256")
//!     .with_scope("video.services.assets:read")
//!     .with_expiration("3m")
//!     .sign()
//!     .await?;
//! println!("{token}");
//! # Ok(())
//! # }
//! ```

mod algorithms;
pub mod api;
mod error;
mod types;

pub use algorithms::{Algorithm, KeyFamily};
pub use api::algorithms::sign_token;
pub use api::claims::{ClaimsBuilder, ClaimsSet, Expiration, ScopeCatalog, ScopeSet};
pub use api::operations::sign_request;
pub use api::{
    AsyncJwtResult, Jwt, JwtBuilder, JwtBuilderWithHandler, JwtMasterBuilder, SigningKey,
    SigningRequest, get_recommended_key_size, import_signing_key,
};
pub use error::*;
pub use types::*;
