use claimdrop_types::{Address, ClaimRequest, DistributionEntry, NodeHash, TokenAmount};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn ed25519_sign_claim_bench(c: &mut Criterion) {
    let kp = claimdrop_crypto::keypair_from_seed(&[1u8; 32]);
    let hash = claimdrop_types::MessageHash::new([42u8; 32]);

    c.bench_function("ed25519_sign_claim", |b| {
        b.iter(|| claimdrop_crypto::sign_claim(black_box(&hash), &kp.private))
    });
}

fn ed25519_verify_claim_bench(c: &mut Criterion) {
    let kp = claimdrop_crypto::keypair_from_seed(&[1u8; 32]);
    let hash = claimdrop_types::MessageHash::new([42u8; 32]);
    let sig = claimdrop_crypto::sign_claim(&hash, &kp.private);

    c.bench_function("ed25519_verify_claim", |b| {
        b.iter(|| claimdrop_crypto::verify_claim_signature(black_box(&hash), &sig, &kp.public))
    });
}

fn hash_leaf_bench(c: &mut Criterion) {
    let entry = DistributionEntry {
        user_id: 77,
        address: Address::new([0xAB; 32]),
        amount: TokenAmount::new(1_000_000),
    };

    c.bench_function("hash_leaf", |b| {
        b.iter(|| claimdrop_crypto::hash_leaf(black_box(&entry)))
    });
}

fn hash_node_bench(c: &mut Criterion) {
    let left = NodeHash::new([1u8; 32]);
    let right = NodeHash::new([2u8; 32]);

    c.bench_function("hash_node", |b| {
        b.iter(|| claimdrop_crypto::hash_node(black_box(&left), black_box(&right)))
    });
}

fn hash_claim_message_bench(c: &mut Criterion) {
    let request = ClaimRequest {
        user_id: 77,
        user_address: Address::new([0xAB; 32]),
        delegate_address: Address::new([0xCD; 32]),
        amount: TokenAmount::new(1_000_000),
    };

    c.bench_function("hash_claim_message", |b| {
        b.iter(|| claimdrop_crypto::hash_claim_message(black_box(&request)))
    });
}

fn request_mac_bench(c: &mut Criterion) {
    let body = vec![0x7Bu8; 256];

    c.bench_function("hmac_sha256_request_256B", |b| {
        b.iter(|| claimdrop_crypto::compute_request_mac(b"shared-secret", black_box(&body)))
    });
}

criterion_group!(
    benches,
    ed25519_sign_claim_bench,
    ed25519_verify_claim_bench,
    hash_leaf_bench,
    hash_node_bench,
    hash_claim_message_bench,
    request_mac_bench,
);
criterion_main!(benches);
