use std::io::Write;

use claimdrop_crypto::{compute_request_mac, keypair_from_seed};
use claimdrop_signer::{AuthorizationService, SignerConfig, SignerError};
use claimdrop_types::{Address, ClaimRequest, TokenAmount};

fn write_distribution(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("distribution.json");
    let json = format!(
        r#"[
            {{"user_id": 1, "address": "{a}", "amount": 100}},
            {{"user_id": 2, "address": "{b}", "amount": 50}}
        ]"#,
        a = Address::new([0xA1; 32]),
        b = Address::new([0xB2; 32]),
    );
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn service_loads_from_toml() {
    let dir = tempfile::tempdir().unwrap();
    let dist = write_distribution(&dir);

    let mut cfg_file = tempfile::NamedTempFile::new_in(dir.path()).unwrap();
    writeln!(
        cfg_file,
        "distribution = {:?}\nsigning_seed = \"{}\"\nrequest_mac_key = \"{}\"",
        dist.display().to_string(),
        "51".repeat(32),
        hex::encode(b"k"),
    )
    .unwrap();

    let config = SignerConfig::from_toml_file(cfg_file.path()).unwrap();
    let service = AuthorizationService::from_config(&config).unwrap();
    assert_eq!(service.signer(), keypair_from_seed(&[0x51; 32]).public);
    assert_eq!(service.tree().len(), 2);

    let body = serde_json::to_vec(&ClaimRequest {
        user_id: 1,
        user_address: Address::new([0xA1; 32]),
        delegate_address: Address::new([0xA1; 32]),
        amount: TokenAmount::new(100),
    })
    .unwrap();
    let tag = compute_request_mac(b"k", &body).unwrap();
    let auth = service.authorize_signed_request(&body, &tag).unwrap();
    assert_eq!(auth.amount, TokenAmount::new(100));
}

#[test]
fn empty_distribution_refused() {
    let dir = tempfile::tempdir().unwrap();
    let dist = dir.path().join("empty.json");
    std::fs::write(&dist, "[]").unwrap();
    let config = SignerConfig {
        distribution: dist,
        signing_seed: Some("51".repeat(32)),
        request_mac_key: None,
    };
    assert!(matches!(
        AuthorizationService::from_config(&config),
        Err(SignerError::Merkle(_))
    ));
}
