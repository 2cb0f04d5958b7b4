use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("entropy source unavailable: {0}")]
    Entropy(String),

    #[error("invalid MAC key: {0}")]
    MacKey(String),
}
