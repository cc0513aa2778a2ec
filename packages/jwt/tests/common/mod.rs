//! Shared key fixtures and token decoding helpers

#![allow(dead_code)]

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use p256::elliptic_curve::rand_core::OsRng;
use p256::pkcs8::{EncodePrivateKey, LineEnding};
use rsa::RsaPrivateKey;
use serde_json::Value;

/// Generated once per test binary; 2048-bit generation is the slow part
pub static RSA_KEY: Lazy<RsaPrivateKey> =
    Lazy::new(|| RsaPrivateKey::new(&mut OsRng, 2048).expect("RSA key generation"));

/// Below the 2048-bit floor; imports fine but must not sign
pub static SHORT_RSA_KEY: Lazy<RsaPrivateKey> =
    Lazy::new(|| RsaPrivateKey::new(&mut OsRng, 1024).expect("RSA key generation"));

pub static P256_KEY: Lazy<p256::ecdsa::SigningKey> =
    Lazy::new(|| p256::ecdsa::SigningKey::random(&mut OsRng));

pub static P384_KEY: Lazy<p384::ecdsa::SigningKey> =
    Lazy::new(|| p384::ecdsa::SigningKey::random(&mut OsRng));

/// The form operators paste: base64 of the whole PEM file
pub fn encode_pem(pem: &str) -> String {
    STANDARD.encode(pem.as_bytes())
}

pub fn p256_key_b64() -> String {
    encode_pem(&P256_KEY.to_pkcs8_pem(LineEnding::LF).expect("P-256 PEM"))
}

pub fn p384_key_b64() -> String {
    encode_pem(&P384_KEY.to_pkcs8_pem(LineEnding::LF).expect("P-384 PEM"))
}

pub fn rsa_key_b64() -> String {
    encode_pem(&RSA_KEY.to_pkcs8_pem(LineEnding::LF).expect("RSA PEM"))
}

pub fn short_rsa_key_b64() -> String {
    encode_pem(&SHORT_RSA_KEY.to_pkcs8_pem(LineEnding::LF).expect("RSA PEM"))
}

pub fn fixed_instant() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
}

fn decode_segment(segment: &str) -> Value {
    let bytes = URL_SAFE_NO_PAD.decode(segment).expect("base64url segment");
    serde_json::from_slice(&bytes).expect("JSON segment")
}

pub fn decode_header(token: &str) -> Value {
    decode_segment(token.split('.').next().expect("header segment"))
}

pub fn decode_payload(token: &str) -> Value {
    decode_segment(token.split('.').nth(1).expect("payload segment"))
}

pub fn decode_signature(token: &str) -> Vec<u8> {
    let segment = token.split('.').nth(2).expect("signature segment");
    URL_SAFE_NO_PAD.decode(segment).expect("base64url signature")
}
