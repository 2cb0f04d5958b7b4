//! 32-byte hash types used by the Merkle commitment and claim authorization.
//!
//! Each role gets its own newtype so a leaf can never be passed where a root
//! or a signed message hash is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

macro_rules! hash_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(#[serde(with = "crate::hexbytes")] [u8; 32]);

        impl $name {
            pub const ZERO: Self = Self([0u8; 32]);

            pub const fn new(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; 32]
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), hex::encode(&self.0[..4]))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", hex::encode(self.0))
            }
        }

        impl FromStr for $name {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                crate::hexbytes::decode_fixed(s).map(Self)
            }
        }
    };
}

hash_type!(
    /// Hash of one distribution entry, the unit proven against the root.
    LeafHash
);

hash_type!(
    /// An interior or sibling node of the Merkle tree.
    NodeHash
);

hash_type!(
    /// The commitment over the whole distribution list.
    MerkleRoot
);

hash_type!(
    /// Hash of the canonical claim payload; this is what the signer signs.
    MessageHash
);

impl From<LeafHash> for NodeHash {
    fn from(leaf: LeafHash) -> Self {
        Self(leaf.0)
    }
}

impl From<NodeHash> for MerkleRoot {
    fn from(node: NodeHash) -> Self {
        Self(node.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_full_hex() {
        let h = LeafHash::new([0xab; 32]);
        assert_eq!(h.to_string(), "ab".repeat(32));
    }

    #[test]
    fn debug_is_abbreviated() {
        let h = MerkleRoot::new([0x01; 32]);
        assert_eq!(format!("{h:?}"), "MerkleRoot(01010101)");
    }

    #[test]
    fn parse_accepts_0x_prefix() {
        let text = format!("0x{}", "11".repeat(32));
        let h: MessageHash = text.parse().unwrap();
        assert_eq!(h.as_bytes(), &[0x11; 32]);
    }

    #[test]
    fn parse_rejects_short_input() {
        let err = "abcd".parse::<NodeHash>().unwrap_err();
        assert_eq!(
            err,
            ParseError::Length {
                expected: 32,
                actual: 2
            }
        );
    }

    #[test]
    fn json_uses_hex_string() {
        let h = LeafHash::new([0x22; 32]);
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, format!("\"{}\"", "22".repeat(32)));
        let back: LeafHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, h);
    }

    #[test]
    fn leaf_converts_into_node() {
        let leaf = LeafHash::new([7; 32]);
        let node: NodeHash = leaf.into();
        assert_eq!(node.as_bytes(), leaf.as_bytes());
    }
}
