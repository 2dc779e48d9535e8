use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::transaction::Transaction;

use crate::config::WalletInfo;
use crate::error::{CustodyError, Result};
use crate::wallet::{ReadyState, WalletAdapter};
use crate::wire::check_transaction;

/// A wallet holding its own key, standing in for a browser wallet adapter.
pub struct KeypairWallet {
    keypair: Keypair,
    info: WalletInfo,
    connected: AtomicBool,
}

impl KeypairWallet {
    /// Create a disconnected wallet.
    pub fn new(keypair: Keypair) -> Self {
        Self {
            keypair,
            info: WalletInfo {
                name: "Keypair".into(),
                url: "https://solana.com".into(),
                icon: String::new(),
                version: env!("CARGO_PKG_VERSION").into(),
            },
            connected: AtomicBool::new(false),
        }
    }

    /// Create a wallet from a bs58 private key and connect it.
    pub fn from_private_key(private_key: &str) -> Result<Self> {
        let wallet = Self::new(crate::utils::keypair_from_private_key(private_key)?);
        wallet.connected.store(true, Ordering::SeqCst);
        Ok(wallet)
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.connected() {
            Ok(())
        } else {
            Err(CustodyError::SigningFailed("wallet not connected".into()))
        }
    }
}

#[async_trait]
impl WalletAdapter for KeypairWallet {
    fn public_key(&self) -> Option<Pubkey> {
        self.connected().then(|| self.keypair.pubkey())
    }

    fn connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn connecting(&self) -> bool {
        false
    }

    fn info(&self) -> &WalletInfo {
        &self.info
    }

    fn ready_state(&self) -> ReadyState {
        if self.connected() {
            ReadyState::Installed
        } else {
            ReadyState::Loadable
        }
    }

    async fn sign_transaction(&self, tx: &Transaction) -> Result<Vec<Transaction>> {
        self.ensure_connected()?;
        check_transaction(tx)?;
        let mut tx = tx.clone();
        let blockhash = tx.message.recent_blockhash;
        tx.try_partial_sign(&[&self.keypair], blockhash)
            .map_err(|e| CustodyError::SigningFailed(e.to_string()))?;
        Ok(vec![tx])
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Signature> {
        self.ensure_connected()?;
        Ok(self.keypair.sign_message(message))
    }

    async fn connect(&self) -> Result<()> {
        self.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self) -> Result<()> {
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }
}
