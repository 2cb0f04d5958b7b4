//! Checksummed text encoding for account addresses.
//!
//! Format: `cdrp_` + base32(address, 52 chars) + base32(checksum, 8 chars).
//! The checksum is the first 5 bytes of Blake2b-256(address). The alphabet
//! `13456789abcdefghijkmnopqrstuwxyz` leaves out look-alike characters.
//! Configuration files may also carry plain 64-digit hex; [`parse_address`]
//! accepts both.

use claimdrop_types::Address;

const ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";

/// ASCII byte to 5-bit value, 0xFF for characters outside the alphabet.
const REVERSE: [u8; 128] = {
    let mut table = [0xFFu8; 128];
    let mut i = 0;
    while i < 32 {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

pub const PREFIX: &str = "cdrp_";
const BODY_CHARS: usize = 52;
const CHECKSUM_CHARS: usize = 8;

fn to_base32(bytes: &[u8]) -> String {
    let mut out = String::with_capacity((bytes.len() * 8).div_ceil(5));
    let mut acc: u64 = 0;
    let mut bits = 0;
    for &byte in bytes {
        acc = (acc << 8) | byte as u64;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[((acc >> bits) & 0x1F) as usize] as char);
        }
    }
    if bits > 0 {
        out.push(ALPHABET[((acc << (5 - bits)) & 0x1F) as usize] as char);
    }
    out
}

fn from_base32<const N: usize>(s: &str) -> Option<[u8; N]> {
    let mut out = [0u8; N];
    let mut acc: u64 = 0;
    let mut bits = 0;
    let mut written = 0;
    for c in s.bytes() {
        let val = *REVERSE.get(c as usize)?;
        if val == 0xFF {
            return None;
        }
        acc = (acc << 5) | val as u64;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            if written < N {
                out[written] = (acc >> bits) as u8;
                written += 1;
            }
        }
    }
    (written == N).then_some(out)
}

fn checksum(address: &[u8; 32]) -> [u8; 5] {
    let hash = crate::blake2b_256(address);
    let mut sum = [0u8; 5];
    sum.copy_from_slice(&hash[..5]);
    sum
}

/// Encode an address in `cdrp_` form.
pub fn encode_address(address: &Address) -> String {
    format!(
        "{}{}{}",
        PREFIX,
        to_base32(address.as_bytes()),
        to_base32(&checksum(address.as_bytes()))
    )
}

/// Decode a `cdrp_` address. `None` if malformed or the checksum is wrong.
pub fn decode_address(text: &str) -> Option<Address> {
    let body = text.strip_prefix(PREFIX)?;
    if body.len() != BODY_CHARS + CHECKSUM_CHARS || !body.is_ascii() {
        return None;
    }
    let (key_part, sum_part) = body.split_at(BODY_CHARS);
    let bytes: [u8; 32] = from_base32(key_part)?;
    let sum: [u8; 5] = from_base32(sum_part)?;
    (sum == checksum(&bytes)).then(|| Address::new(bytes))
}

/// Accept either the `cdrp_` form or 64 hex digits.
pub fn parse_address(text: &str) -> Option<Address> {
    let text = text.trim();
    if text.starts_with(PREFIX) {
        decode_address(text)
    } else {
        text.parse().ok()
    }
}

pub fn validate_address(text: &str) -> bool {
    decode_address(text).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::keypair_from_seed;

    fn sample() -> Address {
        Address::from_public_key(&keypair_from_seed(&[7u8; 32]).public)
    }

    #[test]
    fn encode_and_validate() {
        let text = encode_address(&sample());
        assert!(text.starts_with("cdrp_"));
        assert_eq!(text.len(), 65);
        assert!(validate_address(&text));
    }

    #[test]
    fn decode_roundtrip() {
        let addr = sample();
        assert_eq!(decode_address(&encode_address(&addr)), Some(addr));
    }

    #[test]
    fn invalid_checksum_rejected() {
        let mut bad = encode_address(&sample());
        let last = bad.pop().unwrap();
        bad.push(if last == '1' { '3' } else { '1' });
        assert!(!validate_address(&bad));
    }

    #[test]
    fn wrong_prefix_or_length_rejected() {
        assert!(!validate_address("brst_tooshort"));
        assert!(!validate_address("cdrp_"));
        assert!(!validate_address("cdrp_tooshort"));
    }

    #[test]
    fn parse_accepts_hex_form() {
        let addr = sample();
        assert_eq!(parse_address(&addr.to_string()), Some(addr));
        assert_eq!(parse_address(&encode_address(&addr)), Some(addr));
        assert_eq!(parse_address("nonsense"), None);
    }

    #[test]
    fn non_ascii_rejected() {
        let text = format!("cdrp_{}", "é".repeat(30));
        assert_eq!(decode_address(&text), None);
    }
}
