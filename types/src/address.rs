//! Account identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::keys::PublicKey;

/// A 32-byte account identifier on the host ledger.
///
/// The all-zero address is the "unset" sentinel: it never owns tokens and a
/// delegation to it clears the delegation. Textual form is lowercase hex; the
/// checksummed `cdrp_` form lives in `claimdrop-crypto`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(#[serde(with = "crate::hexbytes")] [u8; 32]);

impl Address {
    pub const ZERO: Self = Self([0u8; 32]);

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The account controlled by `public_key`.
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        Self(public_key.0)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::hexbytes::decode_fixed(s).map(Self)
    }
}
