pub mod amount;
pub mod client;
pub mod config;
pub mod deposit;
pub mod error;
pub mod notify;
pub mod rest;
pub mod session;
pub mod signer;
pub mod storage;
pub mod types;
pub mod utils;
pub mod wallet;
pub mod wire;

// ---- Top-level re-exports for ergonomic usage ----

// Client + config
pub use client::SocialConnector;
pub use config::{ConnectorConfig, WalletInfo};
pub use error::{CustodyError, Result};

// REST client
pub use rest::ConnectorHttpClient;

// Session
pub use session::{BearerToken, Session, SessionContext, SessionStore};

// Signing
pub use signer::CustodialSigner;
pub use wallet::{
    ActiveWallet, KeypairWallet, ReadyState, SignFailure, SignedBatch, TransactionVersion,
    ViewOnlyWallet, WalletAdapter,
};

// Amounts + deposits
pub use amount::AmountError;
pub use deposit::{DepositForm, DepositQuantity, DepositSubmitter};

// Notifications
pub use notify::{Notification, Notifier, NotifyKind, RecordingNotifier, TracingNotifier};
