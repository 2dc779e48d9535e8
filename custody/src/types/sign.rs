use serde::{Deserialize, Serialize};

/// Body of `POST /solana/sign-transaction-bearer-react`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignRequest {
    /// Base64 wire transactions, unsigned by the custodial key.
    pub transactions: Vec<String>,
}

/// Success body of the signing endpoint. `data` is missing on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignResponse {
    #[serde(default)]
    pub data: Option<Vec<String>>,
}
