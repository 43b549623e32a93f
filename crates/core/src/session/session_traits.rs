//! Session and token store traits.

use async_trait::async_trait;

use stockfolio_connect::auth::SignupRequest;

use crate::errors::Result;

/// Persistent store for the opaque session token.
///
/// The token is the only durable client state; its presence is the sole
/// authentication gate.
#[async_trait]
pub trait TokenStoreTrait: Send + Sync {
    /// Loads the persisted token, if any.
    async fn load(&self) -> Result<Option<String>>;

    /// Persists the token, replacing any previous one.
    async fn save(&self, token: &str) -> Result<()>;

    /// Forgets the persisted token.
    async fn clear(&self) -> Result<()>;
}

/// Contract for session lifecycle operations.
#[async_trait]
pub trait SessionServiceTrait: Send + Sync {
    /// Authenticates, persists the token, and installs it on the client.
    async fn login(&self, email: &str, password: &str) -> Result<()>;

    /// Registers a new user; a successful signup also logs in.
    async fn signup(&self, request: SignupRequest) -> Result<()>;

    /// Clears the persisted token and de-authenticates the client.
    async fn logout(&self) -> Result<()>;

    /// Loads a previously persisted token into the client at startup.
    /// Returns whether a session was restored.
    async fn restore(&self) -> Result<bool>;

    /// Whether the client currently holds a session token.
    fn is_authenticated(&self) -> bool;
}
