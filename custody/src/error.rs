use thiserror::Error;

use crate::amount::AmountError;

#[derive(Error, Debug)]
pub enum CustodyError {
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("transaction wire error: {0}")]
    Wire(#[from] bincode::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("{0}")]
    UnsupportedCapability(String),

    #[error("amount error: {0}")]
    Amount(#[from] AmountError),

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("login failed: {0}")]
    Login(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CustodyError>;
