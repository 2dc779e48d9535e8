use crate::config::{LOGIN_PATH, SIGN_TRANSACTION_PATH};
use crate::error::{CustodyError, Result};
use crate::rest::ConnectorHttpClient;
use crate::session::BearerToken;
use crate::types::*;

impl ConnectorHttpClient {
    /// POST /auth/login - Exchange email + password for a custodial session.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginData> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp: LoginResponse = self.post_json(LOGIN_PATH, &body, None).await?;
        LoginData::from_value(resp.data)
            .map_err(|e| CustodyError::Login(format!("unexpected login response: {e}")))
    }

    /// POST /solana/sign-transaction-bearer-react - Sign base64 wire transactions.
    ///
    /// Returns the base64 signed transactions in response order.
    pub async fn sign_transactions(
        &self,
        transactions: Vec<String>,
        token: &BearerToken,
    ) -> Result<Vec<String>> {
        let body = SignRequest { transactions };
        let resp: SignResponse = self
            .post_json(SIGN_TRANSACTION_PATH, &body, Some(token))
            .await?;
        resp.data.ok_or_else(|| {
            CustodyError::SigningFailed("signed transactions are missing in the response".into())
        })
    }
}
