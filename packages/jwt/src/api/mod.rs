//! Token minting API
//!
//! Builders collect the request, `keys` imports the private key, `claims`
//! assembles the payload, and `algorithms` produces the signature.

pub mod algorithms;
pub mod builders;
pub mod claims;
pub mod keys;
pub mod operations;
pub mod validation;

pub use builders::{Jwt, JwtBuilder, JwtBuilderWithHandler, JwtMasterBuilder, SigningRequest};
pub use validation::AsyncJwtResult;

pub use keys::{SigningKey, get_recommended_key_size, import_signing_key};
