use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;

use crate::config::WalletInfo;
use crate::error::Result;
use crate::signer::CustodialSigner;
use crate::wallet::{ReadyState, SignedBatch, TransactionVersion, ViewOnlyWallet, WalletAdapter};

/// The one wallet the application signs with for the rest of a session.
///
/// Chosen once, in priority order: a custodial login, then a view-as
/// address, then whatever wallet adapter the user connected.
pub enum ActiveWallet {
    Custodial(CustodialSigner),
    ViewOnly(ViewOnlyWallet),
    Adapter(Box<dyn WalletAdapter>),
}

impl ActiveWallet {
    pub fn select(
        custodial: Option<CustodialSigner>,
        view_as: Option<ViewOnlyWallet>,
        adapter: Option<Box<dyn WalletAdapter>>,
    ) -> Option<Self> {
        custodial
            .map(Self::Custodial)
            .or_else(|| view_as.map(Self::ViewOnly))
            .or_else(|| adapter.map(Self::Adapter))
    }

    pub fn is_custodial(&self) -> bool {
        matches!(self, Self::Custodial(_))
    }

    fn inner(&self) -> &dyn WalletAdapter {
        match self {
            Self::Custodial(w) => w,
            Self::ViewOnly(w) => w,
            Self::Adapter(w) => w.as_ref(),
        }
    }
}

#[async_trait]
impl WalletAdapter for ActiveWallet {
    fn public_key(&self) -> Option<Pubkey> {
        self.inner().public_key()
    }

    fn connected(&self) -> bool {
        self.inner().connected()
    }

    fn connecting(&self) -> bool {
        self.inner().connecting()
    }

    fn info(&self) -> &WalletInfo {
        self.inner().info()
    }

    fn ready_state(&self) -> ReadyState {
        self.inner().ready_state()
    }

    fn supported_transaction_versions(&self) -> &'static [TransactionVersion] {
        self.inner().supported_transaction_versions()
    }

    async fn sign_transaction(&self, tx: &Transaction) -> Result<Vec<Transaction>> {
        self.inner().sign_transaction(tx).await
    }

    async fn sign_all_transactions(&self, txs: &[Transaction]) -> Result<SignedBatch> {
        self.inner().sign_all_transactions(txs).await
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Signature> {
        self.inner().sign_message(message).await
    }

    async fn connect(&self) -> Result<()> {
        self.inner().connect().await
    }

    async fn disconnect(&self) -> Result<()> {
        self.inner().disconnect().await
    }
}
