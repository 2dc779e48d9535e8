use std::str::FromStr;

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;

use crate::config::WalletInfo;
use crate::error::{CustodyError, Result};
use crate::wallet::WalletAdapter;

/// Browse as an arbitrary address. Every signing capability is refused.
pub struct ViewOnlyWallet {
    public_key: Pubkey,
    info: WalletInfo,
}

impl ViewOnlyWallet {
    pub fn new(address: &str) -> Result<Self> {
        let public_key = Pubkey::from_str(address)
            .map_err(|e| CustodyError::InvalidAddress(format!("{address}: {e}")))?;
        Ok(Self {
            public_key,
            info: WalletInfo {
                name: "View Only".into(),
                url: String::new(),
                icon: String::new(),
                version: env!("CARGO_PKG_VERSION").into(),
            },
        })
    }

    fn refuse(capability: &str) -> CustodyError {
        CustodyError::UnsupportedCapability(format!(
            "{capability} is not available while viewing as another wallet"
        ))
    }
}

#[async_trait]
impl WalletAdapter for ViewOnlyWallet {
    fn public_key(&self) -> Option<Pubkey> {
        Some(self.public_key)
    }

    fn connected(&self) -> bool {
        true
    }

    fn connecting(&self) -> bool {
        false
    }

    fn info(&self) -> &WalletInfo {
        &self.info
    }

    async fn sign_transaction(&self, _tx: &Transaction) -> Result<Vec<Transaction>> {
        Err(Self::refuse("transaction signing"))
    }

    async fn sign_all_transactions(&self, _txs: &[Transaction]) -> Result<crate::wallet::SignedBatch> {
        Err(Self::refuse("transaction signing"))
    }

    async fn sign_message(&self, _message: &[u8]) -> Result<Signature> {
        Err(Self::refuse("message signing"))
    }

    async fn connect(&self) -> Result<()> {
        Err(Self::refuse("connect"))
    }

    async fn disconnect(&self) -> Result<()> {
        Err(Self::refuse("disconnect"))
    }
}
