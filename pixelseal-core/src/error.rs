use thiserror::Error;

#[derive(Error, Debug)]
pub enum PixelSealError {
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    #[error("Crypto initialization error: {0}")]
    CryptoInit(String),

    #[error("Codec error: {0}")]
    Codec(String),
}

pub type Result<T> = std::result::Result<T, PixelSealError>;
