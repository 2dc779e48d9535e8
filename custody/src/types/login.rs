use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Success body of `POST /auth/login`; `data` is parsed into [`LoginData`].
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub data: serde_json::Value,
}

/// The `data` object of a successful login.
///
/// Only the fields the session needs are typed; the whole object is kept
/// verbatim in `raw` for display. No `Debug`: both fields carry the token.
#[derive(Clone, Deserialize)]
pub struct LoginData {
    pub customer: Customer,
    pub token: String,
    #[serde(skip)]
    pub raw: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub custodial_wallet: String,
}

/// Error body returned by the gateway on non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl LoginData {
    /// Parse the `data` object, keeping a verbatim copy.
    pub fn from_value(raw: serde_json::Value) -> serde_json::Result<Self> {
        let mut data: LoginData = serde_json::from_value(raw.clone())?;
        data.raw = raw;
        Ok(data)
    }
}
