//! Error handling and custom error types
//!
//! Provides unified error handling across the crate using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Invalid contact id: {0}")]
    InvalidContactId(String),

    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("Invalid expiration: {0}")]
    InvalidExpiration(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
