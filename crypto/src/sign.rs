//! Ed25519 signing and verification.

use claimdrop_types::{MessageHash, PrivateKey, PublicKey, Signature};
use ed25519_dalek::{Signer, SigningKey, VerifyingKey};

/// Sign a message with a private key, returning the signature.
pub fn sign_message(message: &[u8], private_key: &PrivateKey) -> Signature {
    let signing_key = SigningKey::from_bytes(&private_key.0);
    Signature(signing_key.sign(message).to_bytes())
}

/// Verify a signature against a message and public key.
///
/// Uses strict verification, so non-canonical signatures and small-order
/// keys are rejected along with plain forgeries.
pub fn verify_signature(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(&public_key.0) else {
        return false;
    };
    let dalek_sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    verifying_key.verify_strict(message, &dalek_sig).is_ok()
}

/// Sign a claim message hash.
pub fn sign_claim(message_hash: &MessageHash, private_key: &PrivateKey) -> Signature {
    sign_message(message_hash.as_bytes(), private_key)
}

/// Verify a claim signature against the designated signer.
pub fn verify_claim_signature(
    message_hash: &MessageHash,
    signature: &Signature,
    signer: &PublicKey,
) -> bool {
    verify_signature(message_hash.as_bytes(), signature, signer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::keypair_from_seed;

    #[test]
    fn sign_and_verify() {
        let kp = keypair_from_seed(&[5u8; 32]);
        let msg = b"test message for claimdrop";
        let sig = sign_message(msg, &kp.private);
        assert!(verify_signature(msg, &sig, &kp.public));
    }

    #[test]
    fn wrong_message_fails() {
        let kp = keypair_from_seed(&[5u8; 32]);
        let sig = sign_message(b"correct message", &kp.private);
        assert!(!verify_signature(b"wrong message", &sig, &kp.public));
    }

    #[test]
    fn wrong_key_fails() {
        let kp1 = keypair_from_seed(&[1u8; 32]);
        let kp2 = keypair_from_seed(&[2u8; 32]);
        let hash = MessageHash::new([9; 32]);
        let sig = sign_claim(&hash, &kp1.private);
        assert!(verify_claim_signature(&hash, &sig, &kp1.public));
        assert!(!verify_claim_signature(&hash, &sig, &kp2.public));
    }

    #[test]
    fn signature_deterministic() {
        let kp = keypair_from_seed(&[99u8; 32]);
        let sig1 = sign_message(b"deterministic", &kp.private);
        let sig2 = sign_message(b"deterministic", &kp.private);
        assert_eq!(sig1, sig2);
    }

    #[test]
    fn invalid_public_key() {
        let kp = keypair_from_seed(&[5u8; 32]);
        let sig = sign_message(b"test", &kp.private);
        assert!(!verify_signature(b"test", &sig, &PublicKey([0xFF; 32])));
    }

    #[test]
    fn zeroed_signature_rejected() {
        let kp = keypair_from_seed(&[5u8; 32]);
        assert!(!verify_signature(b"test", &Signature([0; 64]), &kp.public));
    }
}
