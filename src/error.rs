//! Error types for the chorus gateway

use thiserror::Error;

/// Result type alias for chorus operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the chorus gateway
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (fatal at load time)
    #[error("configuration error: {0}")]
    Config(String),

    /// Identity resolution precondition violation
    #[error("identity error: {0}")]
    Identity(String),

    /// Response resolution error (empty pool, generator failure)
    #[error("response error: {0}")]
    Response(String),

    /// Guild directory lookup error
    #[error("directory error: {0}")]
    Directory(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
