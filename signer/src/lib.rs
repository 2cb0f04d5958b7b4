//! Off-chain claim authorization service.
//!
//! The service holds the signer key and the full distribution list. Given a
//! claim request it checks the request against the committed entry and
//! returns a signed [`ClaimAuthorization`](claimdrop_types::ClaimAuthorization)
//! carrying the leaf and Merkle proof. It never touches ledger state.

pub mod config;
pub mod error;
pub mod service;

pub use config::SignerConfig;
pub use error::SignerError;
pub use service::AuthorizationService;
