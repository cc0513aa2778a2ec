//! End-to-end signing tests: claim shapes, headers, signature round-trips
//! and the error taxonomy

mod common;

use common::*;
use serde_json::json;
use uplynk_jwt::{
    ClaimsBuilder, Jwt, JwtBuilder, JwtError, JwtErrorKind, JwtHeader, ScopeSet,
    import_signing_key, sign_token,
};

const READ_ASSETS: &str = "video.services.assets:read";

fn es256_request(key_b64: &str) -> JwtBuilder {
    Jwt::builder()
        .with_subject("user-1")
        .with_key_id("k1")
        .with_encoded_key(key_b64)
        .with_algorithm("ES256")
        .with_scope(READ_ASSETS)
}

#[tokio::test]
async fn test_non_expiring_token_payload() {
    let token = es256_request(&p256_key_b64())
        .with_issued_at(fixed_instant())
        .sign()
        .await
        .unwrap();

    assert_eq!(
        decode_payload(token.as_str()),
        json!({
            "sub": "user-1",
            "scp": [READ_ASSETS],
            "net": true,
            "iat": 1_700_000_000,
        })
    );
}

#[tokio::test]
async fn test_expiring_token_payload() {
    let token = es256_request(&p256_key_b64())
        .with_issued_at(fixed_instant())
        .with_expiration("3m")
        .sign()
        .await
        .unwrap();

    let payload = decode_payload(token.as_str());
    assert_eq!(payload["exp"], json!(1_700_000_180));
    assert_eq!(payload["iat"], json!(1_700_000_000));
    assert!(payload.get("net").is_none());
}

#[tokio::test]
async fn test_clock_driven_expiry_is_after_iat() {
    let token = es256_request(&p256_key_b64())
        .with_expiration("1h")
        .sign()
        .await
        .unwrap();

    let payload = decode_payload(token.as_str());
    let iat = payload["iat"].as_i64().unwrap();
    let exp = payload["exp"].as_i64().unwrap();
    assert_eq!(exp - iat, 3600);
}

#[tokio::test]
async fn test_header_is_exactly_alg_kid_typ() {
    let token = es256_request(&p256_key_b64()).sign().await.unwrap();
    assert_eq!(
        decode_header(token.as_str()),
        json!({"alg": "ES256", "kid": "k1", "typ": "JWT"})
    );
}

#[tokio::test]
async fn test_scope_order_follows_selection() {
    let token = es256_request(&p256_key_b64())
        .with_scope("video.services.libraries:write")
        .with_scope("video.services.channels:read")
        .with_scope(READ_ASSETS)
        .with_scope(READ_ASSETS)
        .sign()
        .await
        .unwrap();

    assert_eq!(
        decode_payload(token.as_str())["scp"],
        json!([
            "video.services.libraries:write",
            "video.services.channels:read",
            READ_ASSETS,
        ])
    );
}

#[tokio::test]
async fn test_es256_signature_verifies() {
    use p256::ecdsa::{Signature, VerifyingKey, signature::Verifier};

    let token = es256_request(&p256_key_b64()).sign().await.unwrap();
    let signature_bytes = decode_signature(token.as_str());
    assert_eq!(signature_bytes.len(), 64);

    let signature = Signature::from_slice(&signature_bytes).unwrap();
    let verifying_key = VerifyingKey::from(&*P256_KEY);
    verifying_key
        .verify(token.signing_input().as_bytes(), &signature)
        .unwrap();
}

#[tokio::test]
async fn test_es384_signature_verifies() {
    use p384::ecdsa::{Signature, VerifyingKey, signature::Verifier};

    let token = Jwt::builder()
        .with_subject("user-1")
        .with_key_id("k384")
        .with_encoded_key(&p384_key_b64())
        .with_algorithm("ES384")
        .sign()
        .await
        .unwrap();
    let signature_bytes = decode_signature(token.as_str());
    assert_eq!(signature_bytes.len(), 96);

    let signature = Signature::from_slice(&signature_bytes).unwrap();
    VerifyingKey::from(&*P384_KEY)
        .verify(token.signing_input().as_bytes(), &signature)
        .unwrap();
}

fn rsa_request(algorithm: &str) -> JwtBuilder {
    Jwt::builder()
        .with_subject("user-1")
        .with_key_id("rsa-1")
        .with_encoded_key(&rsa_key_b64())
        .with_algorithm(algorithm)
        .with_scope(READ_ASSETS)
}

/// Verify `token` against the shared RSA key with the scheme its `alg` names
fn verify_rsa(token: &str, signing_input: &[u8], algorithm: &str) {
    use rsa::sha2::{Sha256, Sha384, Sha512};
    use rsa::signature::Verifier;
    use rsa::{pkcs1v15, pss};

    let public = RSA_KEY.to_public_key();
    let raw = decode_signature(token);
    assert_eq!(raw.len(), 256, "{algorithm}");

    let verified = match algorithm {
        "RS256" => pkcs1v15::VerifyingKey::<Sha256>::new(public)
            .verify(signing_input, &pkcs1v15::Signature::try_from(raw.as_slice()).unwrap()),
        "RS384" => pkcs1v15::VerifyingKey::<Sha384>::new(public)
            .verify(signing_input, &pkcs1v15::Signature::try_from(raw.as_slice()).unwrap()),
        "RS512" => pkcs1v15::VerifyingKey::<Sha512>::new(public)
            .verify(signing_input, &pkcs1v15::Signature::try_from(raw.as_slice()).unwrap()),
        "PS256" => pss::VerifyingKey::<Sha256>::new(public)
            .verify(signing_input, &pss::Signature::try_from(raw.as_slice()).unwrap()),
        "PS384" => pss::VerifyingKey::<Sha384>::new(public)
            .verify(signing_input, &pss::Signature::try_from(raw.as_slice()).unwrap()),
        "PS512" => pss::VerifyingKey::<Sha512>::new(public)
            .verify(signing_input, &pss::Signature::try_from(raw.as_slice()).unwrap()),
        other => panic!("not an RSA algorithm: {other}"),
    };
    assert!(verified.is_ok(), "{algorithm}: {verified:?}");
}

#[tokio::test]
async fn test_every_rsa_algorithm_verifies() {
    for algorithm in ["RS256", "RS384", "RS512", "PS256", "PS384", "PS512"] {
        let token = rsa_request(algorithm).sign().await.unwrap();
        assert_eq!(decode_header(token.as_str())["alg"], json!(algorithm));
        verify_rsa(token.as_str(), token.signing_input().as_bytes(), algorithm);
    }
}

#[tokio::test]
async fn test_pss_uses_the_hash_its_tag_names() {
    use rsa::pss::{Signature, VerifyingKey};
    use rsa::sha2::Sha256;
    use rsa::signature::Verifier;

    let token = rsa_request("PS384").sign().await.unwrap();
    let signature = Signature::try_from(decode_signature(token.as_str()).as_slice()).unwrap();
    let wrong_hash = VerifyingKey::<Sha256>::new(RSA_KEY.to_public_key())
        .verify(token.signing_input().as_bytes(), &signature);
    assert!(wrong_hash.is_err());
}

#[tokio::test]
async fn test_short_rsa_key_is_refused() {
    for algorithm in ["RS256", "PS256"] {
        let err = Jwt::builder()
            .with_subject("user-1")
            .with_key_id("rsa-1024")
            .with_encoded_key(&short_rsa_key_b64())
            .with_algorithm(algorithm)
            .sign()
            .await
            .unwrap_err();
        assert!(matches!(err, JwtError::Signing(_)), "{algorithm}: {err:?}");
        assert!(err.to_string().contains("1024"), "{err}");
    }
}

#[tokio::test]
async fn test_rs256_is_deterministic() {
    let first = rsa_request("RS256")
        .with_issued_at(fixed_instant())
        .sign()
        .await
        .unwrap();
    let second = rsa_request("RS256")
        .with_issued_at(fixed_instant())
        .sign()
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_randomized_signatures_keep_header_and_payload_stable() {
    // ECDSA signatures differ per run; only the signature segment may change
    let key = p256_key_b64();
    let first = es256_request(&key)
        .with_issued_at(fixed_instant())
        .with_expiration("3m")
        .sign()
        .await
        .unwrap();
    let second = es256_request(&key)
        .with_issued_at(fixed_instant())
        .with_expiration("3m")
        .sign()
        .await
        .unwrap();

    assert_eq!(first.header_segment(), second.header_segment());
    assert_eq!(first.payload_segment(), second.payload_segment());
}

#[tokio::test]
async fn test_malformed_key_is_key_import_error() {
    for bad_key in ["***not base64***", "bm90IGEga2V5"] {
        let err = es256_request(bad_key).sign().await.unwrap_err();
        assert_eq!(err.kind(), JwtErrorKind::KeyImport, "{bad_key}");
    }
}

#[tokio::test]
async fn test_rsa_key_under_es256_is_mismatch() {
    let err = es256_request(&rsa_key_b64()).sign().await.unwrap_err();
    assert!(matches!(err, JwtError::AlgorithmKeyMismatch(_)));
}

#[tokio::test]
async fn test_ec_key_under_rs256_is_mismatch() {
    let err = es256_request(&p256_key_b64())
        .with_algorithm("RS256")
        .sign()
        .await
        .unwrap_err();
    assert!(matches!(err, JwtError::AlgorithmKeyMismatch(_)));
}

#[tokio::test]
async fn test_unknown_algorithm_is_rejected() {
    let err = es256_request(&p256_key_b64())
        .with_algorithm("HS256")
        .sign()
        .await
        .unwrap_err();
    assert!(matches!(err, JwtError::UnsupportedAlgorithm(_)));
}

#[tokio::test]
async fn test_unparseable_expiration_is_rejected() {
    let err = es256_request(&p256_key_b64())
        .with_expiration("next tuesday")
        .sign()
        .await
        .unwrap_err();
    assert!(matches!(err, JwtError::ExpirationParse(_)));
}

#[tokio::test]
async fn test_empty_expiration_means_net() {
    let token = es256_request(&p256_key_b64())
        .with_expiration("")
        .sign()
        .await
        .unwrap();
    let payload = decode_payload(token.as_str());
    assert_eq!(payload["net"], json!(true));
    assert!(payload.get("exp").is_none());
}

#[tokio::test]
async fn test_missing_subject_is_invalid_request() {
    let err = es256_request(&p256_key_b64())
        .with_subject("")
        .sign()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), JwtErrorKind::InvalidRequest);
}

#[tokio::test]
async fn test_signer_rechecks_header_algorithm() {
    // A key imported for ES256 cannot sign a header that names RS256
    let key = import_signing_key(&p256_key_b64(), "ES256").await.unwrap();
    let claims = ClaimsBuilder::new("user-1")
        .with_scopes(ScopeSet::new())
        .non_expiring();

    let err = sign_token(&JwtHeader::new("RS256", "k1"), &claims, &key).unwrap_err();
    assert!(matches!(err, JwtError::Signing(_)));

    let err = sign_token(&JwtHeader::new("XX1", "k1"), &claims, &key).unwrap_err();
    assert!(matches!(err, JwtError::Signing(_)));
}

#[tokio::test]
async fn test_rsa_key_signs_only_its_imported_scheme() {
    // Same family, different padding: the header must name the imported algorithm
    let key = import_signing_key(&rsa_key_b64(), "RS256").await.unwrap();
    let claims = ClaimsBuilder::new("user-1")
        .with_scopes(ScopeSet::new())
        .non_expiring();

    let err = sign_token(&JwtHeader::new("PS256", "k1"), &claims, &key).unwrap_err();
    assert!(matches!(err, JwtError::Signing(_)));
    assert!(sign_token(&JwtHeader::new("RS256", "k1"), &claims, &key).is_ok());
}

#[tokio::test]
async fn test_result_handler_receives_outcome() {
    let rendered = es256_request(&p256_key_b64())
        .on_result(|result| match result {
            Ok(token) => token.into_string(),
            Err(e) => format!("error: {e}"),
        })
        .sign()
        .await;
    assert_eq!(rendered.split('.').count(), 3);

    let rendered = es256_request("")
        .on_result(|result| result.map(|t| t.into_string()).unwrap_or_default())
        .sign()
        .await;
    assert!(rendered.is_empty());
}

#[tokio::test]
async fn test_built_request_can_be_signed_repeatedly() {
    let request = es256_request(&p256_key_b64())
        .with_issued_at(fixed_instant())
        .build()
        .unwrap();

    let first = request.clone().sign().await.unwrap();
    let second = request.sign_with_handler(|r| r).await.unwrap();
    assert_eq!(first.payload_segment(), second.payload_segment());
}
