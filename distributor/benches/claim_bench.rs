use claimdrop_crypto::keypair_from_seed;
use claimdrop_distributor::{Distributor, DistributorConfig};
use claimdrop_merkle::DistributionTree;
use claimdrop_signer::AuthorizationService;
use claimdrop_types::{Address, ClaimRequest, DistributionEntry, Timestamp, TokenAmount};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn check_claim_bench(c: &mut Criterion) {
    let entries: Vec<DistributionEntry> = (1..=50_000u64)
        .map(|i| {
            let mut addr = [0u8; 32];
            addr[..8].copy_from_slice(&i.to_be_bytes());
            DistributionEntry {
                user_id: i,
                address: Address::new(addr),
                amount: TokenAmount::new(i as u128 * 1_000),
            }
        })
        .collect();
    let claimant = entries[12_344];
    let tree = DistributionTree::build(entries).unwrap();
    let service = AuthorizationService::new(keypair_from_seed(&[9u8; 32]), tree);
    let distributor = Distributor::new(DistributorConfig {
        account: Address::new([0xD1; 32]),
        merkle_root: service.merkle_root(),
        signer: service.signer(),
        treasury: Address::new([0x7E; 32]),
        claim_deadline: Timestamp::new(u64::MAX),
    })
    .unwrap();
    let auth = service
        .authorize(&ClaimRequest {
            user_id: claimant.user_id,
            user_address: claimant.address,
            delegate_address: claimant.address,
            amount: claimant.amount,
        })
        .unwrap();

    c.bench_function("check_claim_50k", |b| {
        b.iter(|| distributor.check_claim(black_box(&claimant.address), black_box(&auth)))
    });
}

criterion_group!(benches, check_claim_bench);
criterion_main!(benches);
