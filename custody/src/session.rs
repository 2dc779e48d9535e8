//! Custodial login session: persisted identity plus bearer token.

use std::fmt;
use std::path::Path;

use chrono::Duration;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::storage::{CookieJar, LocalStorage};

/// Cookie holding the custodial wallet address.
pub const PUBLIC_KEY_COOKIE: &str = "publicKey";
/// Cookie holding the bearer token.
pub const TOKEN_COOKIE: &str = "token";
/// Local-storage key of the full login payload.
pub const PROFILE_KEY: &str = "sc-details";
/// Lifetime of the session cookies.
pub const SESSION_EXPIRY_DAYS: i64 = 365;

/// Opaque bearer credential. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token. Only the signing request header and the cookie jar read it.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// A custodial login: wallet address and the token that authorizes signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Base58 public key of the custodial wallet.
    pub address: String,
    pub token: BearerToken,
    /// How long the persisted copy lives.
    pub expiry: Duration,
}

impl Session {
    pub fn new(address: impl Into<String>, token: BearerToken) -> Self {
        Self {
            address: address.into(),
            token,
            expiry: Duration::days(SESSION_EXPIRY_DAYS),
        }
    }
}

/// Reads and writes the session in client storage. Never touches the network.
#[derive(Debug, Clone)]
pub struct SessionStore {
    cookies: CookieJar,
    local: LocalStorage,
}

impl SessionStore {
    /// Store rooted at `dir` (created on first write).
    pub fn open(dir: &Path) -> Self {
        Self {
            cookies: CookieJar::new(dir),
            local: LocalStorage::new(dir),
        }
    }

    /// Read the persisted session, if any.
    ///
    /// Storage failures are logged and treated as "no session". An address
    /// without a token is a torn write and also yields `None`.
    pub fn load(&self) -> Option<Session> {
        let address = match self.cookies.get(PUBLIC_KEY_COOKIE) {
            Ok(Some(address)) if !address.is_empty() => address,
            Ok(_) => return None,
            Err(e) => {
                warn!(error = %e, "failed to read session cookies");
                return None;
            }
        };

        match self.cookies.get(TOKEN_COOKIE) {
            Ok(Some(token)) if !token.is_empty() => {
                debug!(address = %address, "session loaded");
                Some(Session::new(address, BearerToken::new(token)))
            }
            Ok(_) => {
                warn!(address = %address, "session address without token, ignoring");
                None
            }
            Err(e) => {
                warn!(error = %e, "failed to read session cookies");
                None
            }
        }
    }

    /// Persist the session cookies and the login payload. Last write wins.
    pub fn save(&self, session: &Session, profile: &serde_json::Value) -> Result<()> {
        self.cookies.set_many(
            &[
                (PUBLIC_KEY_COOKIE, session.address.as_str()),
                (TOKEN_COOKIE, session.token.expose()),
            ],
            session.expiry,
        )?;
        self.local.set_item(PROFILE_KEY, profile)?;
        info!(address = %session.address, "session saved");
        Ok(())
    }

    /// Delete the session cookies and the login payload. Idempotent.
    pub fn clear(&self) -> Result<()> {
        let cookies = self.cookies.remove_many(&[PUBLIC_KEY_COOKIE, TOKEN_COOKIE]);
        let profile = self.local.remove_item(PROFILE_KEY);
        cookies?;
        profile?;
        info!("session cleared");
        Ok(())
    }

    /// The login payload saved alongside the session, for display.
    pub fn profile(&self) -> Option<serde_json::Value> {
        self.local.get_item(PROFILE_KEY).unwrap_or_else(|e| {
            warn!(error = %e, "failed to read login profile");
            None
        })
    }
}

/// Session resolved once at start-up and passed down to whoever needs it.
#[derive(Debug)]
pub struct SessionContext {
    store: SessionStore,
    current: Option<Session>,
}

impl SessionContext {
    /// Read the persisted session once.
    pub fn init(store: SessionStore) -> Self {
        let current = store.load();
        match &current {
            Some(s) => info!(address = %s.address, "custodial session resolved"),
            None => debug!("no custodial session"),
        }
        Self { store, current }
    }

    pub fn session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Persist a fresh login and make it current.
    pub fn establish(&mut self, session: Session, profile: &serde_json::Value) -> Result<()> {
        self.store.save(&session, profile)?;
        self.current = Some(session);
        Ok(())
    }

    /// Drop the cached session and every persisted copy.
    pub fn teardown(&mut self) -> Result<()> {
        self.current = None;
        self.store.clear()
    }
}
