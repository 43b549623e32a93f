use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use stockfolio_connect::auth::{self, SignupRequest};
use stockfolio_connect::ApiClient;

use super::session_traits::{SessionServiceTrait, TokenStoreTrait};
use crate::errors::Result;

/// Service for the session lifecycle.
///
/// Owns the pairing between the persisted token and the token installed
/// on the shared [`ApiClient`]; the two never diverge.
pub struct SessionService {
    client: Arc<ApiClient>,
    store: Arc<dyn TokenStoreTrait>,
}

impl SessionService {
    /// Creates a new SessionService instance.
    pub fn new(client: Arc<ApiClient>, store: Arc<dyn TokenStoreTrait>) -> Self {
        Self { client, store }
    }
}

#[async_trait]
impl SessionServiceTrait for SessionService {
    async fn login(&self, email: &str, password: &str) -> Result<()> {
        let token = auth::login(&self.client, email, password).await?;
        self.store.save(&token).await?;
        self.client.set_token(token);
        info!("Logged in as {}", email);
        Ok(())
    }

    async fn signup(&self, request: SignupRequest) -> Result<()> {
        let email = request.email.clone();
        let token = auth::signup(&self.client, &request).await?;
        self.store.save(&token).await?;
        self.client.set_token(token);
        info!("Signed up as {}", email);
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        self.store.clear().await?;
        self.client.clear_token();
        info!("Logged out");
        Ok(())
    }

    async fn restore(&self) -> Result<bool> {
        match self.store.load().await? {
            Some(token) => {
                self.client.set_token(token);
                debug!("Restored persisted session");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn is_authenticated(&self) -> bool {
        self.client.has_token()
    }
}
