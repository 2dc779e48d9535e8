//! The wallet-adapter capability set and the wallets that satisfy it.

pub mod active;
pub mod keypair;
pub mod view_only;

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;

use crate::config::WalletInfo;
use crate::error::Result;

pub use active::ActiveWallet;
pub use keypair::KeypairWallet;
pub use view_only::ViewOnlyWallet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    /// Available and usable right away.
    Installed,
    /// Present but must be connected before it can sign.
    Loadable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionVersion {
    Legacy,
    V0,
}

/// One transaction of a batch that produced no signed output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignFailure {
    /// Position in the input slice.
    pub index: usize,
    pub reason: String,
}

/// Result of signing several transactions one after another.
///
/// `transactions` is the flat list of everything the signer returned, in
/// response order. It is not guaranteed to line up 1:1 with the input; use
/// `failures` to see which inputs produced nothing.
#[derive(Debug, Clone, Default)]
pub struct SignedBatch {
    pub transactions: Vec<Transaction>,
    pub failures: Vec<SignFailure>,
}

impl SignedBatch {
    /// True when every input was signed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn into_transactions(self) -> Vec<Transaction> {
        self.transactions
    }
}

/// Capability set every wallet exposes to the rest of the application.
#[async_trait]
pub trait WalletAdapter: Send + Sync {
    /// Wallet identity; `None` while disconnected.
    fn public_key(&self) -> Option<Pubkey>;

    fn connected(&self) -> bool;

    fn connecting(&self) -> bool;

    fn info(&self) -> &WalletInfo;

    fn ready_state(&self) -> ReadyState {
        ReadyState::Installed
    }

    fn supported_transaction_versions(&self) -> &'static [TransactionVersion] {
        &[TransactionVersion::Legacy]
    }

    /// Sign one transaction. A signer may return more than one transaction.
    async fn sign_transaction(&self, tx: &Transaction) -> Result<Vec<Transaction>>;

    /// Sign each transaction in turn, one request at a time.
    async fn sign_all_transactions(&self, txs: &[Transaction]) -> Result<SignedBatch> {
        let mut batch = SignedBatch::default();
        for (index, tx) in txs.iter().enumerate() {
            match self.sign_transaction(tx).await {
                Ok(signed) if signed.is_empty() => batch.failures.push(SignFailure {
                    index,
                    reason: "nothing was signed".into(),
                }),
                Ok(signed) => batch.transactions.extend(signed),
                Err(e) => batch.failures.push(SignFailure {
                    index,
                    reason: e.to_string(),
                }),
            }
        }
        Ok(batch)
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Signature>;

    async fn connect(&self) -> Result<()>;

    async fn disconnect(&self) -> Result<()>;
}
