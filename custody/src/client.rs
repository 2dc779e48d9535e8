use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::config::ConnectorConfig;
use crate::error::{CustodyError, Result};
use crate::notify::{Notification, Notifier};
use crate::rest::ConnectorHttpClient;
use crate::session::{BearerToken, Session, SessionContext, SessionStore};
use crate::signer::CustodialSigner;
use crate::wallet::{ActiveWallet, ViewOnlyWallet, WalletAdapter};

/// Entry point for the Social Connector custodial wallet.
///
/// Owns the session context for the lifetime of the run: the persisted
/// session is read once in [`SocialConnector::new`] and only changes through
/// [`login`](Self::login) and [`logout`](Self::logout).
pub struct SocialConnector {
    config: ConnectorConfig,
    http_client: ConnectorHttpClient,
    session: SessionContext,
    notifier: Arc<dyn Notifier>,
}

impl SocialConnector {
    pub fn new(
        config: ConnectorConfig,
        store: SessionStore,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        config.validate()?;
        let http_client = ConnectorHttpClient::new(&config.base_url);
        Ok(Self {
            config,
            http_client,
            session: SessionContext::init(store),
            notifier,
        })
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.session()
    }

    /// Full login payload saved at the last login.
    pub fn profile(&self) -> Option<Value> {
        self.session.store().profile()
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// Log in with email and password and persist the resulting session.
    ///
    /// Every failure is also reported through the notifier.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Session> {
        if email.is_empty() {
            return Err(self.fail(CustodyError::Validation("Email is required".into())));
        }
        if password.is_empty() {
            return Err(self.fail(CustodyError::Validation("Password is required".into())));
        }

        let data = match self.http_client.login(email, password).await {
            Ok(data) => data,
            Err(CustodyError::Http { status, message }) => {
                warn!(status, "login rejected");
                return Err(self.fail(CustodyError::Login(message)));
            }
            Err(e) => {
                warn!(error = %e, "login request failed");
                return Err(self.fail(CustodyError::Login("An error occurred".into())));
            }
        };

        let session = Session::new(data.customer.custodial_wallet, BearerToken::new(data.token));
        if let Err(e) = self.session.establish(session.clone(), &data.raw) {
            return Err(self.fail(e));
        }
        info!(address = %session.address, "logged in");
        self.notifier.notify(Notification::success("Authorized"));
        Ok(session)
    }

    /// Forget the session everywhere. Safe to call when logged out.
    pub fn logout(&mut self) -> Result<()> {
        self.session.teardown()
    }

    /// The custodial signer for the current session, if there is one.
    pub fn custodial_signer(&self) -> Result<Option<CustodialSigner>> {
        self.session
            .session()
            .map(|session| {
                CustodialSigner::new(
                    session,
                    self.http_client.clone(),
                    self.config.wallet.clone(),
                    Arc::clone(&self.notifier),
                )
            })
            .transpose()
    }

    /// Pick the wallet to sign with: custodial session, then `view_as`, then
    /// `adapter`.
    pub fn active_wallet(
        &self,
        view_as: Option<&str>,
        adapter: Option<Box<dyn WalletAdapter>>,
    ) -> Result<Option<ActiveWallet>> {
        let custodial = self.custodial_signer()?;
        let view_as = match (&custodial, view_as) {
            (None, Some(address)) => Some(ViewOnlyWallet::new(address)?),
            _ => None,
        };
        Ok(ActiveWallet::select(custodial, view_as, adapter))
    }

    fn fail(&self, err: CustodyError) -> CustodyError {
        let message = match &err {
            CustodyError::Validation(m) | CustodyError::Login(m) => m.clone(),
            other => other.to_string(),
        };
        self.notifier.notify(Notification::error(message));
        err
    }
}
