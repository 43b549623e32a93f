//! Auth endpoints: login and signup.
//!
//! The backend has shipped the session token under several response field
//! names over time; all of them are accepted.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::ApiClient;
use crate::errors::{ApiError, ApiResult};

pub const LOGIN_PATH: &str = "/api/auth/login/";
pub const SIGNUP_PATH: &str = "/api/auth/signup/";

/// Signup payload; field names match the backend contract.
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Login/signup response. The token arrives under `token`,
/// `access_token`, or `access` depending on the backend build.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    access: Option<String>,
}

impl AuthResponse {
    /// Extract the session token, whichever field it arrived under.
    pub fn into_token(self) -> ApiResult<String> {
        self.token
            .or(self.access_token)
            .or(self.access)
            .ok_or_else(|| {
                ApiError::Decode(
                    "auth response carried no token field (token, access_token, access)"
                        .to_string(),
                )
            })
    }
}

/// Authenticate and return the session token.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> ApiResult<String> {
    debug!("[auth] POST {}", LOGIN_PATH);
    let response: AuthResponse = client
        .post(LOGIN_PATH, &json!({ "email": email, "password": password }))
        .await?;
    response.into_token()
}

/// Register a new user and return the session token.
pub async fn signup(client: &ApiClient, request: &SignupRequest) -> ApiResult<String> {
    debug!("[auth] POST {}", SIGNUP_PATH);
    let response: AuthResponse = client.post(SIGNUP_PATH, request).await?;
    response.into_token()
}
