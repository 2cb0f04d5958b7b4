#![no_main]

use claimdrop_crypto::{compute_request_mac, keypair_from_seed};
use claimdrop_merkle::DistributionTree;
use claimdrop_signer::{AuthorizationService, SignerError};
use claimdrop_types::{Address, DistributionEntry, TokenAmount};
use libfuzzer_sys::fuzz_target;

const KEY: &[u8] = b"fuzz-request-key";

// Untagged bodies are refused before parsing; correctly tagged bodies are
// parsed without panicking.
fuzz_target!(|data: &[u8]| {
    let entries = vec![
        DistributionEntry {
            user_id: 1,
            address: Address::new([1; 32]),
            amount: TokenAmount::new(100),
        },
        DistributionEntry {
            user_id: 2,
            address: Address::new([2; 32]),
            amount: TokenAmount::new(200),
        },
    ];
    let Ok(tree) = DistributionTree::build(entries) else {
        return;
    };
    let service =
        AuthorizationService::new(keypair_from_seed(&[9; 32]), tree).with_request_key(KEY.to_vec());

    let forged = service.authorize_signed_request(data, "00");
    assert!(matches!(forged, Err(SignerError::BadRequestMac)));

    if let Ok(tag) = compute_request_mac(KEY, data) {
        let _ = service.authorize_signed_request(data, &tag);
    }
});
