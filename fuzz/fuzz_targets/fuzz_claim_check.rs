#![no_main]

use claimdrop_distributor::{Distributor, DistributorConfig};
use claimdrop_token::TokenLedger;
use claimdrop_types::{Address, ClaimAuthorization, MerkleRoot, PublicKey, Timestamp, TokenAmount};
use libfuzzer_sys::fuzz_target;

// Decoded authorizations are either rejected or paid out; either way the
// pool balance and claimed total stay consistent.
fuzz_target!(|data: &[u8]| {
    let Ok(auth) = serde_json::from_slice::<ClaimAuthorization>(data) else {
        return;
    };
    let pool = Address::new([0xD1; 32]);
    let holder = Address::new([0xAA; 32]);
    let Ok(mut distributor) = Distributor::new(DistributorConfig {
        account: pool,
        merkle_root: MerkleRoot::new([0x11; 32]),
        signer: PublicKey([0x22; 32]),
        treasury: Address::new([0x7E; 32]),
        claim_deadline: Timestamp::new(1_000),
    }) else {
        return;
    };
    let Ok(mut ledger) = TokenLedger::new(holder, TokenAmount::new(1_000)) else {
        return;
    };
    let _ = ledger.set_distributor(&holder, &pool);
    let _ = ledger.transfer(&holder, &pool, TokenAmount::new(500));

    let caller = auth.user_address;
    if distributor.claim(&caller, &auth, &mut ledger).is_err() {
        assert_eq!(distributor.claimed_count(), 0);
        assert_eq!(ledger.balance_of(&pool), TokenAmount::new(500));
    }
});
