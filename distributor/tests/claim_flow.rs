//! End-to-end: authorization service → distributor → token ledger.

use claimdrop_crypto::{hash_claim_message, keypair_from_seed, sign_claim};
use claimdrop_distributor::{ClaimError, ClaimState, Distributor, DistributorConfig};
use claimdrop_merkle::DistributionTree;
use claimdrop_signer::AuthorizationService;
use claimdrop_token::TokenLedger;
use claimdrop_types::{Address, ClaimRequest, DistributionEntry, Timestamp, TokenAmount};

const A: Address = Address::new([0xA1; 32]);
const B: Address = Address::new([0xB2; 32]);
const POOL: Address = Address::new([0xD1; 32]);
const ADMIN: Address = Address::new([0xAD; 32]);
const TREASURY: Address = Address::new([0x7E; 32]);
const DELEGATE: Address = Address::new([0xDE; 32]);

struct World {
    service: AuthorizationService,
    distributor: Distributor,
    ledger: TokenLedger,
}

fn world() -> World {
    let tree = DistributionTree::build([
        DistributionEntry {
            user_id: 1,
            address: A,
            amount: TokenAmount::new(100),
        },
        DistributionEntry {
            user_id: 2,
            address: B,
            amount: TokenAmount::new(50),
        },
    ])
    .unwrap();
    let service = AuthorizationService::new(keypair_from_seed(&[0x51; 32]), tree);

    let distributor = Distributor::new(DistributorConfig {
        account: POOL,
        merkle_root: service.merkle_root(),
        signer: service.signer(),
        treasury: TREASURY,
        claim_deadline: Timestamp::new(10_000),
    })
    .unwrap();

    let mut ledger = TokenLedger::new(ADMIN, TokenAmount::new(1_000)).unwrap();
    ledger.set_distributor(&ADMIN, &POOL).unwrap();
    ledger.transfer(&ADMIN, &POOL, TokenAmount::new(150)).unwrap();

    World {
        service,
        distributor,
        ledger,
    }
}

fn request(user_id: u64, address: Address, amount: u128) -> ClaimRequest {
    ClaimRequest {
        user_id,
        user_address: address,
        delegate_address: DELEGATE,
        amount: TokenAmount::new(amount),
    }
}

#[test]
fn two_entry_scenario() {
    let mut w = world();
    let auth = w.service.authorize(&request(1, A, 100)).unwrap();

    let before = w.ledger.balance_of(&A);
    w.distributor.claim(&A, &auth, &mut w.ledger).unwrap();
    assert_eq!(w.ledger.balance_of(&A), before.checked_add(TokenAmount::new(100)).unwrap());
    assert_eq!(w.distributor.claim_state(1), ClaimState::Claimed);
    assert_eq!(w.ledger.delegates(&A), Some(DELEGATE));
    assert_eq!(w.ledger.current_votes(&DELEGATE), TokenAmount::new(100));

    let err = w.distributor.claim(&A, &auth, &mut w.ledger).unwrap_err();
    assert_eq!(err, ClaimError::AlreadyClaimed(1));
    assert_eq!(w.ledger.balance_of(&A), TokenAmount::new(100));

    assert_eq!(w.distributor.claim_state(2), ClaimState::Unclaimed);
}

#[test]
fn bundle_front_run_by_other_sender_fails() {
    let mut w = world();
    let auth = w.service.authorize(&request(1, A, 100)).unwrap();
    let err = w.distributor.claim(&B, &auth, &mut w.ledger).unwrap_err();
    assert_eq!(err, ClaimError::SenderMismatch);
    assert_eq!(w.ledger.balance_of(&B), TokenAmount::ZERO);
    assert_eq!(w.distributor.claimed_count(), 0);
}

#[test]
fn resubmission_with_altered_amount_fails_hash_check() {
    let mut w = world();
    let mut auth = w.service.authorize(&request(2, B, 50)).unwrap();
    auth.amount = TokenAmount::new(150);
    let err = w.distributor.claim(&B, &auth, &mut w.ledger).unwrap_err();
    assert_eq!(err, ClaimError::HashMismatch);
    assert_eq!(w.ledger.balance_of(&POOL), TokenAmount::new(150));
}

#[test]
fn compromised_signer_cannot_inflate_amount() {
    // The signing key leaks. An attacker signs an inflated amount and pairs
    // it with the real leaf and proof from a legitimate bundle.
    let mut w = world();
    let genuine = w.service.authorize(&request(2, B, 50)).unwrap();
    let leaked = keypair_from_seed(&[0x51; 32]);

    let mut forged = genuine.clone();
    forged.amount = TokenAmount::new(150);
    forged.message_hash = hash_claim_message(&forged.request());
    forged.signature = sign_claim(&forged.message_hash, &leaked.private);

    let err = w.distributor.claim(&B, &forged, &mut w.ledger).unwrap_err();
    assert_eq!(err, ClaimError::LeafHashMismatch);

    w.distributor.claim(&B, &genuine, &mut w.ledger).unwrap();
    assert_eq!(w.ledger.balance_of(&B), TokenAmount::new(50));
}

#[test]
fn claimant_with_existing_delegate_keeps_it() {
    let mut w = world();
    w.ledger.delegate(&A, &A).unwrap();
    let auth = w.service.authorize(&request(1, A, 100)).unwrap();
    w.distributor.claim(&A, &auth, &mut w.ledger).unwrap();
    assert_eq!(w.ledger.delegates(&A), Some(A));
    assert_eq!(w.ledger.current_votes(&A), TokenAmount::new(100));
    assert_eq!(w.ledger.current_votes(&DELEGATE), TokenAmount::ZERO);
}

#[test]
fn self_delegation_then_transfer() {
    let mut w = world();
    let auth = w.service.authorize(&request(1, A, 100)).unwrap();
    w.distributor.claim(&A, &auth, &mut w.ledger).unwrap();

    let d = A;
    let e = Address::new([0xEE; 32]);
    w.ledger.delegate(&d, &d).unwrap();
    assert_eq!(w.ledger.current_votes(&d), TokenAmount::new(100));

    w.ledger.transfer(&d, &e, TokenAmount::new(30)).unwrap();
    assert_eq!(w.ledger.current_votes(&d), TokenAmount::new(70));
    assert_eq!(w.ledger.delegates(&e), None);
    assert_eq!(w.ledger.current_votes(&e), TokenAmount::ZERO);
    assert_eq!(
        w.ledger.vote_weights().total_weight(),
        w.ledger.delegated_supply()
    );
}

#[test]
fn sweep_after_deadline_then_late_claim_fails_at_payout() {
    let mut w = world();
    let first = w.service.authorize(&request(1, A, 100)).unwrap();
    w.distributor.claim(&A, &first, &mut w.ledger).unwrap();

    let swept = w
        .distributor
        .sweep(Timestamp::new(10_001), &mut w.ledger)
        .unwrap();
    assert_eq!(swept, TokenAmount::new(50));
    assert_eq!(w.ledger.balance_of(&TREASURY), TokenAmount::new(50));

    let late = w.service.authorize(&request(2, B, 50)).unwrap();
    let err = w.distributor.claim(&B, &late, &mut w.ledger).unwrap_err();
    assert!(matches!(err, ClaimError::Payout(_)));
    assert!(!w.distributor.is_claimed(2));
}
