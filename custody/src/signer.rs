//! Custodial signer: a wallet adapter whose key lives behind the Social
//! Connector gateway.
//!
//! The signer never holds key material. Each transaction is serialized,
//! posted to the signing endpoint with the session's bearer token, and the
//! signed transactions in the response are handed back. Signing failures stop
//! here: they are reported once through the [`Notifier`] and the caller gets
//! an empty result.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use tracing::{debug, warn};

use crate::config::WalletInfo;
use crate::error::{CustodyError, Result};
use crate::notify::{Notification, Notifier};
use crate::rest::ConnectorHttpClient;
use crate::session::{BearerToken, Session};
use crate::wallet::{ReadyState, SignFailure, SignedBatch, TransactionVersion, WalletAdapter};
use crate::wire::{decode_transaction, encode_transaction};

const SUPPORTED_VERSIONS: &[TransactionVersion] =
    &[TransactionVersion::Legacy, TransactionVersion::V0];

pub struct CustodialSigner {
    public_key: Pubkey,
    token: BearerToken,
    http_client: ConnectorHttpClient,
    info: WalletInfo,
    notifier: Arc<dyn Notifier>,
}

impl CustodialSigner {
    /// Build a signer for a resolved session.
    ///
    /// # Errors
    ///
    /// Returns `CustodyError::InvalidAddress` if the session address is not a
    /// valid base58 public key.
    pub fn new(
        session: &Session,
        http_client: ConnectorHttpClient,
        info: WalletInfo,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let public_key = Pubkey::from_str(&session.address)
            .map_err(|e| CustodyError::InvalidAddress(format!("{}: {e}", session.address)))?;
        Ok(Self {
            public_key,
            token: session.token.clone(),
            http_client,
            info,
            notifier,
        })
    }

    /// Sign one transaction, surfacing the failure instead of swallowing it.
    pub async fn try_sign_transaction(&self, tx: &Transaction) -> Result<Vec<Transaction>> {
        let encoded = encode_transaction(tx)?;
        let signed = self
            .http_client
            .sign_transactions(vec![encoded], &self.token)
            .await
            .map_err(|e| match e {
                CustodyError::SigningFailed(_) => e,
                other => CustodyError::SigningFailed(other.to_string()),
            })?;

        let txs = signed
            .iter()
            .map(|s| decode_transaction(s))
            .collect::<Result<Vec<_>>>()
            .map_err(|e| CustodyError::SigningFailed(format!("bad signed transaction: {e}")))?;
        debug!(count = txs.len(), "custodial signing complete");
        Ok(txs)
    }

    fn report_failure(&self, err: &CustodyError) {
        warn!(error = %err, signer = %self.public_key, "custodial signing failed");
        self.notifier
            .notify(Notification::error(format!("Transaction signing failed: {err}")));
    }

    fn unsupported(&self, capability: &str) -> CustodyError {
        let msg = format!("{capability} is not available for a {} wallet", self.info.name);
        self.notifier.notify(Notification::error(msg.clone()));
        CustodyError::UnsupportedCapability(msg)
    }
}

#[async_trait]
impl WalletAdapter for CustodialSigner {
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

    fn ready_state(&self) -> ReadyState {
        ReadyState::Installed
    }

    fn supported_transaction_versions(&self) -> &'static [TransactionVersion] {
        SUPPORTED_VERSIONS
    }

    /// Never fails: an empty list means nothing was signed.
    async fn sign_transaction(&self, tx: &Transaction) -> Result<Vec<Transaction>> {
        match self.try_sign_transaction(tx).await {
            Ok(txs) => Ok(txs),
            Err(e) => {
                self.report_failure(&e);
                Ok(Vec::new())
            }
        }
    }

    async fn sign_all_transactions(&self, txs: &[Transaction]) -> Result<SignedBatch> {
        let mut batch = SignedBatch::default();
        for (index, tx) in txs.iter().enumerate() {
            match self.try_sign_transaction(tx).await {
                Ok(signed) => batch.transactions.extend(signed),
                Err(e) => {
                    self.report_failure(&e);
                    batch.failures.push(SignFailure {
                        index,
                        reason: e.to_string(),
                    });
                }
            }
        }
        Ok(batch)
    }

    async fn sign_message(&self, _message: &[u8]) -> Result<Signature> {
        Err(self.unsupported("Message signing"))
    }

    async fn connect(&self) -> Result<()> {
        Err(self.unsupported("Connect"))
    }

    async fn disconnect(&self) -> Result<()> {
        Err(self.unsupported("Disconnect"))
    }
}
