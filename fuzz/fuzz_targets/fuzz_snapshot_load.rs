#![no_main]

use libfuzzer_sys::fuzz_target;

// Corrupt snapshot files must be reported, not panic.
fuzz_target!(|data: &[u8]| {
    let _ = claimdrop_token::TokenLedger::load_state(data);
    let _ = claimdrop_distributor::Distributor::load_state(data);
    let _ = claimdrop_deploy::Deployment::load_state(data);
});
