//! HMAC-SHA256 authentication of authorization requests.
//!
//! A client and the authorization service share a key. The client sends the
//! raw request body together with the hex tag of `HMAC-SHA256(key, body)`.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::CryptoError;

type HmacSha256 = Hmac<Sha256>;

/// Uppercase hex tag for `body`.
pub fn compute_request_mac(key: &[u8], body: &[u8]) -> Result<String, CryptoError> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| CryptoError::MacKey(e.to_string()))?;
    mac.update(body);
    Ok(hex::encode_upper(mac.finalize().into_bytes()))
}

/// Constant-time check of a hex tag (either case) against `body`.
pub fn verify_request_mac(key: &[u8], body: &[u8], tag_hex: &str) -> bool {
    let Ok(tag) = hex::decode(tag_hex.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&tag).is_ok()
}
