//! The authorization service.

use claimdrop_crypto::{
    hash_claim_message, keypair_from_private, sign_claim, verify_request_mac,
};
use claimdrop_merkle::{load_distribution, DistributionTree};
use claimdrop_types::{ClaimAuthorization, ClaimRequest, KeyPair, MerkleRoot, PublicKey};
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::config::SignerConfig;
use crate::error::SignerError;

pub struct AuthorizationService {
    keypair: KeyPair,
    tree: DistributionTree,
    mac_key: Option<Zeroizing<Vec<u8>>>,
}

impl AuthorizationService {
    pub fn new(keypair: KeyPair, tree: DistributionTree) -> Self {
        Self {
            keypair,
            tree,
            mac_key: None,
        }
    }

    /// Require requests passed to [`authorize_signed_request`] to carry an
    /// HMAC-SHA256 tag under `key`.
    ///
    /// [`authorize_signed_request`]: AuthorizationService::authorize_signed_request
    pub fn with_request_key(mut self, key: Vec<u8>) -> Self {
        self.mac_key = Some(Zeroizing::new(key));
        self
    }

    /// Build the tree from the configured distribution file and load keys.
    pub fn from_config(config: &SignerConfig) -> Result<Self, SignerError> {
        let entries = load_distribution(&config.distribution)?;
        let tree = DistributionTree::build(entries)?;
        let keypair = keypair_from_private(config.signing_key()?);
        let service = Self::new(keypair, tree);
        info!(
            entries = service.tree.len(),
            root = %service.tree.root(),
            signer = %service.keypair.public,
            "authorization service ready"
        );
        Ok(match config.mac_key()? {
            Some(key) => service.with_request_key(key),
            None => service,
        })
    }

    /// The identity distributors must be constructed with.
    pub fn signer(&self) -> PublicKey {
        self.keypair.public
    }

    pub fn merkle_root(&self) -> MerkleRoot {
        self.tree.root()
    }

    pub fn tree(&self) -> &DistributionTree {
        &self.tree
    }

    /// Sign a claim for exactly the committed entry of `request.user_id`.
    pub fn authorize(&self, request: &ClaimRequest) -> Result<ClaimAuthorization, SignerError> {
        let user_id = request.user_id;
        let Some(entry) = self.tree.entry(user_id) else {
            warn!(user_id, "refusing unknown user");
            return Err(SignerError::UnknownUser(user_id));
        };
        if entry.address != request.user_address {
            warn!(user_id, "refusing address mismatch");
            return Err(SignerError::AddressMismatch(user_id));
        }
        if entry.amount != request.amount {
            warn!(user_id, requested = %request.amount, "refusing amount mismatch");
            return Err(SignerError::AmountMismatch {
                user_id,
                requested: request.amount.raw(),
                entitled: entry.amount.raw(),
            });
        }

        let message_hash = hash_claim_message(request);
        let signature = sign_claim(&message_hash, &self.keypair.private);
        let authorization = ClaimAuthorization {
            user_id,
            user_address: request.user_address,
            delegate_address: request.delegate_address,
            amount: request.amount,
            message_hash,
            signature,
            leaf: self.tree.leaf(user_id)?,
            proof: self.tree.proof(user_id)?,
        };
        info!(user_id, delegate = %request.delegate_address, "claim authorized");
        Ok(authorization)
    }

    /// Authenticate a raw JSON request body against its hex HMAC tag, then
    /// authorize it. The body is not parsed until the tag checks out.
    pub fn authorize_signed_request(
        &self,
        body: &[u8],
        tag: &str,
    ) -> Result<ClaimAuthorization, SignerError> {
        let key = self.mac_key.as_ref().ok_or(SignerError::RequestKeyMissing)?;
        if !verify_request_mac(key, body, tag) {
            warn!("rejecting request with bad authentication tag");
            return Err(SignerError::BadRequestMac);
        }
        let request: ClaimRequest = serde_json::from_slice(body)
            .map_err(|e| SignerError::MalformedRequest(e.to_string()))?;
        self.authorize(&request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimdrop_crypto::{compute_request_mac, keypair_from_seed, verify_claim_signature};
    use claimdrop_merkle::verify;
    use claimdrop_types::{Address, DistributionEntry, TokenAmount};

    const MAC_KEY: &[u8] = b"request-key";

    fn addr(b: u8) -> Address {
        Address::new([b; 32])
    }

    fn service() -> AuthorizationService {
        let tree = DistributionTree::build([
            DistributionEntry {
                user_id: 1,
                address: addr(0xA1),
                amount: TokenAmount::new(100),
            },
            DistributionEntry {
                user_id: 2,
                address: addr(0xB2),
                amount: TokenAmount::new(50),
            },
        ])
        .unwrap();
        AuthorizationService::new(keypair_from_seed(&[0x51; 32]), tree)
            .with_request_key(MAC_KEY.to_vec())
    }

    fn request(user_id: u64, address: Address, amount: u128) -> ClaimRequest {
        ClaimRequest {
            user_id,
            user_address: address,
            delegate_address: addr(0xDE),
            amount: TokenAmount::new(amount),
        }
    }

    #[test]
    fn authorization_is_self_consistent() {
        let svc = service();
        let auth = svc.authorize(&request(1, addr(0xA1), 100)).unwrap();
        assert_eq!(auth.message_hash, hash_claim_message(&auth.request()));
        assert!(verify_claim_signature(&auth.message_hash, &auth.signature, &svc.signer()));
        assert!(verify(&auth.leaf, &auth.proof, &svc.merkle_root()));
    }

    #[test]
    fn unknown_user_refused() {
        let err = service().authorize(&request(9, addr(0xA1), 100)).unwrap_err();
        assert!(matches!(err, SignerError::UnknownUser(9)));
    }

    #[test]
    fn wrong_address_refused() {
        let err = service().authorize(&request(1, addr(0xB2), 100)).unwrap_err();
        assert!(matches!(err, SignerError::AddressMismatch(1)));
    }

    #[test]
    fn wrong_amount_refused() {
        let err = service().authorize(&request(1, addr(0xA1), 101)).unwrap_err();
        assert!(matches!(
            err,
            SignerError::AmountMismatch {
                user_id: 1,
                requested: 101,
                entitled: 100
            }
        ));
    }

    #[test]
    fn signed_request_is_authorized() {
        let body = serde_json::to_vec(&request(2, addr(0xB2), 50)).unwrap();
        let tag = compute_request_mac(MAC_KEY, &body).unwrap();
        let auth = service().authorize_signed_request(&body, &tag).unwrap();
        assert_eq!(auth.user_id, 2);
    }

    #[test]
    fn tampered_request_rejected_before_parsing() {
        let body = serde_json::to_vec(&request(2, addr(0xB2), 50)).unwrap();
        let tag = compute_request_mac(MAC_KEY, &body).unwrap();
        let mut tampered = body.clone();
        tampered.push(b' ');
        let err = service()
            .authorize_signed_request(&tampered, &tag)
            .unwrap_err();
        assert!(matches!(err, SignerError::BadRequestMac));
    }

    #[test]
    fn authenticated_garbage_is_malformed() {
        let body = b"{not json";
        let tag = compute_request_mac(MAC_KEY, body).unwrap();
        let err = service().authorize_signed_request(body, &tag).unwrap_err();
        assert!(matches!(err, SignerError::MalformedRequest(_)));
    }

    #[test]
    fn signed_request_without_key_refused() {
        let tree = service().tree().clone();
        let svc = AuthorizationService::new(keypair_from_seed(&[1; 32]), tree);
        let err = svc.authorize_signed_request(b"{}", "00").unwrap_err();
        assert!(matches!(err, SignerError::RequestKeyMissing));
    }
}
