//! HTTP client for the stockfolio REST backend.
//!
//! This crate owns everything that touches the wire: the shared
//! [`ApiClient`] adapter (auth header, timeouts, error-shape
//! normalization), the endpoint [fallback](crate::fallback) resolver for
//! operations whose route shape varies across backend builds, the auth
//! endpoints, and the tolerant response envelopes.

pub mod auth;
pub mod client;
pub mod envelope;
pub mod errors;
pub mod fallback;

pub use client::{ApiClient, AuthScheme};
pub use reqwest::Method;
pub use envelope::{Enveloped, ListEnvelope};
pub use errors::{ApiError, ApiResult, HttpFailure};
pub use fallback::{request_with_fallback, resolve, FallbackOutcome};
