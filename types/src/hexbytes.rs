//! Serde adapter encoding fixed-size byte arrays as lowercase hex strings.

use serde::{Deserialize, Deserializer, Serializer};

use crate::error::ParseError;

pub(crate) fn serialize<S: Serializer, const N: usize>(
    bytes: &[u8; N],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

pub(crate) fn deserialize<'de, D: Deserializer<'de>, const N: usize>(
    deserializer: D,
) -> Result<[u8; N], D::Error> {
    let s = String::deserialize(deserializer)?;
    decode_fixed(&s).map_err(serde::de::Error::custom)
}

/// Decode a hex string (optionally `0x`-prefixed) into exactly `N` bytes.
pub(crate) fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], ParseError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    if digits.len() != N * 2 {
        return Err(ParseError::Length {
            expected: N,
            actual: digits.len() / 2,
        });
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(digits, &mut out).map_err(|e| ParseError::Hex(e.to_string()))?;
    Ok(out)
}
