use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Custody(#[from] custody::CustodyError),

    #[error("amount error: {0}")]
    Amount(#[from] custody::AmountError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("not logged in and no wallet available (log in, pass --view-as, or set PRIVATE_KEY)")]
    NoWallet,

    #[error("{signed} of {total} transactions signed")]
    PartialSign { signed: usize, total: usize },
}
