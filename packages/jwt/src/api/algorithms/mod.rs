//! Signing algorithms
//!
//! Encoding helpers plus the per-family signature implementations the
//! signer dispatches to.

mod core;
mod ecdsa;
mod rsa;
pub(crate) mod utils;

pub use self::core::sign_token;
pub(crate) use self::rsa::RsaSigningKey;
