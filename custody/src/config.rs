use url::Url;

use crate::error::{CustodyError, Result};

/// Public Social Connector gateway.
pub const DEFAULT_BASE_API_URL: &str = "https://gateway.socialconnector.io/api/v2";

/// Path of the login endpoint, relative to the base URL.
pub const LOGIN_PATH: &str = "/auth/login";

/// Path of the custodial signing endpoint, relative to the base URL.
pub const SIGN_TRANSACTION_PATH: &str = "/solana/sign-transaction-bearer-react";

/// Static descriptive fields a wallet adapter exposes to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletInfo {
    pub name: String,
    pub url: String,
    pub icon: String,
    pub version: String,
}

impl WalletInfo {
    /// Descriptive fields of the Social Connector custodial wallet.
    pub fn social_connector() -> Self {
        Self {
            name: "Social Connector".into(),
            url: "https://gary.club".into(),
            icon: "https://gary.club/assets/imgs/garylogowhite.png".into(),
            version: "1.0.0".into(),
        }
    }
}

/// Configuration for the Social Connector client.
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// Base URL of the gateway API (e.g. `https://gateway.socialconnector.io/api/v2`).
    pub base_url: String,
    /// Descriptive fields reported by the custodial signer.
    pub wallet: WalletInfo,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_API_URL.into(),
            wallet: WalletInfo::social_connector(),
        }
    }
}

impl ConnectorConfig {
    /// Build a config from the environment, falling back to the public gateway.
    ///
    /// Reads `NEXT_BASE_API_URL` first, then `BASE_API_URL`.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("NEXT_BASE_API_URL")
            .or_else(|_| std::env::var("BASE_API_URL"))
            .unwrap_or_else(|_| DEFAULT_BASE_API_URL.into());
        Self::with_base_url(&base_url)
    }

    /// Default config pointed at a different gateway.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let config = Self {
            base_url: base_url.to_string(),
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the base URL is an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| CustodyError::Config(format!("base url {}: {e}", self.base_url)))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(CustodyError::Config(format!(
                "base url must be http or https, got {other}"
            ))),
        }
    }
}
