//! Session module - token persistence and authentication state.

mod session_service;
mod session_store;
mod session_traits;


// Re-export the public interface
pub use session_service::SessionService;
pub use session_store::FileTokenStore;
pub use session_traits::{SessionServiceTrait, TokenStoreTrait};

// The signup payload is defined next to the wire call it feeds.
pub use stockfolio_connect::auth::SignupRequest;
