pub mod endpoints;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CustodyError, Result};
use crate::session::BearerToken;
use crate::types::ApiErrorBody;

/// HTTP client wrapper for the Social Connector gateway.
#[derive(Debug, Clone)]
pub struct ConnectorHttpClient {
    client: Client,
    base_url: String,
}

impl ConnectorHttpClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// POST a JSON body and decode a JSON response.
    ///
    /// Non-2xx responses become `CustodyError::Http`, carrying the gateway's
    /// `message` field when the body has one.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&BearerToken>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(body);
        if let Some(token) = bearer {
            req = req.bearer_auth(token.expose());
        }
        let resp = req.send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(body);
            return Err(CustodyError::Http { status, message });
        }

        resp.json::<T>().await.map_err(CustodyError::Request)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
