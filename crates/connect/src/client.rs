//! Shared HTTP client for the stockfolio backend.
//!
//! All resource services go through this adapter so the auth header,
//! timeout, and error normalization are decided in exactly one place.

use std::str::FromStr;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::errors::{ApiError, ApiResult, HttpFailure};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How the session token is rendered into the `Authorization` header.
///
/// The backend accepts exactly one of these; which one is a deployment
/// decision, never guessed per call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScheme {
    /// `Authorization: Token <token>` (DRF TokenAuthentication).
    #[default]
    Token,
    /// `Authorization: Bearer <token>`.
    Bearer,
}

impl AuthScheme {
    fn render(&self, token: &str) -> String {
        match self {
            AuthScheme::Token => format!("Token {}", token),
            AuthScheme::Bearer => format!("Bearer {}", token),
        }
    }
}

impl FromStr for AuthScheme {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "token" => Ok(AuthScheme::Token),
            "bearer" => Ok(AuthScheme::Bearer),
            other => Err(format!(
                "unknown auth scheme '{}' (expected 'token' or 'bearer')",
                other
            )),
        }
    }
}

/// HTTP client for the stockfolio backend API.
///
/// Cheap to clone; clones share the session token, so a login through one
/// handle authenticates every other handle.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    scheme: AuthScheme,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a new client against `base_url` using the given header scheme.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be initialized.
    pub fn new(base_url: &str, scheme: AuthScheme) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            scheme,
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Install a session token; subsequent requests carry it.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap() = Some(token.into());
    }

    /// Drop the session token; subsequent requests are unauthenticated.
    pub fn clear_token(&self) {
        *self.token.write().unwrap() = None;
    }

    /// Presence of a token is the sole authentication gate on the client.
    pub fn has_token(&self) -> bool {
        self.token.read().unwrap().is_some()
    }

    fn headers(&self) -> ApiResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = self.token.read().unwrap().as_deref() {
            let value = HeaderValue::from_str(&self.scheme.render(token))
                .map_err(|e| ApiError::Unexpected(format!("Invalid session token: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> ApiResult<reqwest::Response> {
        let url = self.url(path);
        debug!("[api] {} {}", method, url);
        let mut request = self.client.request(method, &url).headers(self.headers()?);
        if let Some(body) = body {
            request = request.json(body);
        }
        request.send().await.map_err(ApiError::Network)
    }

    async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();
        let body = response.text().await.map_err(ApiError::Network)?;
        if !status.is_success() {
            return Err(ApiError::Http(HttpFailure::from_body(status.as_u16(), body)));
        }
        // 204-style responses carry no body; decode them as JSON null so
        // callers expecting `()` or `Value` still succeed.
        let body = if body.trim().is_empty() {
            "null".to_string()
        } else {
            body
        };
        serde_json::from_str(&body).map_err(|e| {
            ApiError::Decode(format!(
                "{} - {}",
                e,
                body.chars().take(200).collect::<String>()
            ))
        })
    }

    /// Low-level request used directly by the fallback resolver.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> ApiResult<T> {
        let response = self.send(method, path, body).await?;
        Self::parse_json(response).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::Unexpected(format!("Failed to serialize payload: {}", e)))?;
        self.request(Method::POST, path, Some(&body)).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::Unexpected(format!("Failed to serialize payload: {}", e)))?;
        self.request(Method::PATCH, path, Some(&body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(Method::DELETE, path, None).await
    }

    /// Fetch a non-JSON body (the HTML report endpoint).
    pub async fn get_text(&self, path: &str) -> ApiResult<String> {
        let response = self.send(Method::GET, path, None).await?;
        let status = response.status();
        let body = response.text().await.map_err(ApiError::Network)?;
        if !status.is_success() {
            return Err(ApiError::Http(HttpFailure::from_body(status.as_u16(), body)));
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_url_normalization() {
        let client = ApiClient::new("http://127.0.0.1:8000/", AuthScheme::Token).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
    }

    #[test]
    fn test_token_presence_gate() {
        let client = ApiClient::new("http://127.0.0.1:8000", AuthScheme::Token).unwrap();
        assert!(!client.has_token());
        client.set_token("abc123");
        assert!(client.has_token());
        client.clear_token();
        assert!(!client.has_token());
    }

    #[test]
    fn test_auth_scheme_rendering() {
        assert_eq!(AuthScheme::Token.render("t0k"), "Token t0k");
        assert_eq!(AuthScheme::Bearer.render("t0k"), "Bearer t0k");
    }

    #[test]
    fn test_auth_scheme_parsing() {
        assert_eq!("token".parse::<AuthScheme>().unwrap(), AuthScheme::Token);
        assert_eq!("Bearer".parse::<AuthScheme>().unwrap(), AuthScheme::Bearer);
        assert!("basic".parse::<AuthScheme>().is_err());
    }
}
