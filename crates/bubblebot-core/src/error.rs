use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported chain '{0}'. Supported chains: {1}")]
    UnsupportedChain(String, String),

    #[error("Failed to serialize analysis: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
