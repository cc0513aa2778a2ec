//! Base64 helpers shared by the signing path

use base64::{
    Engine as _,
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
};
use zeroize::Zeroizing;

/// Base64 URL-safe encoding without padding (RFC 7515)
#[inline]
pub(crate) fn base64_url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Standard-alphabet decoding of operator-supplied key text.
///
/// Whitespace (including line breaks from wrapped copies) is dropped first.
#[inline]
pub(crate) fn base64_standard_decode(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: Zeroizing<String> = Zeroizing::new(input.split_whitespace().collect());
    STANDARD.decode(compact.as_bytes())
}
