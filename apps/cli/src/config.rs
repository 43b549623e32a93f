//! Environment-driven configuration.
//!
//! Every deployment-dependent choice lands here, decided once per
//! process: backend URL, auth header scheme, raster scale, and the token
//! file location.

use std::path::PathBuf;

use log::warn;

use stockfolio_connect::AuthScheme;
use stockfolio_core::constants::{DEFAULT_API_BASE_URL, TOKEN_FILE_NAME};
use stockfolio_export::pipeline::DEFAULT_RASTER_SCALE;

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL.
    pub base_url: String,
    /// How the session token is rendered into the Authorization header.
    pub auth_scheme: AuthScheme,
    /// Where the session token is persisted.
    pub token_file: PathBuf,
    /// Device-scale factor for report rasterization.
    pub export_scale: f64,
    /// Directory receiving exported reports.
    pub export_dir: PathBuf,
}

impl Config {
    /// Reads configuration from the environment, falling back to defaults.
    /// Malformed values are warned about and replaced by the default.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("STOCKFOLIO_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let auth_scheme = match std::env::var("STOCKFOLIO_AUTH_SCHEME") {
            Ok(raw) => raw.parse().unwrap_or_else(|err| {
                warn!("{}; using the default scheme", err);
                AuthScheme::default()
            }),
            Err(_) => AuthScheme::default(),
        };

        let token_file = std::env::var("STOCKFOLIO_TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_token_file());

        let export_scale = match std::env::var("STOCKFOLIO_EXPORT_SCALE") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("invalid STOCKFOLIO_EXPORT_SCALE '{}'; using default", raw);
                DEFAULT_RASTER_SCALE
            }),
            Err(_) => DEFAULT_RASTER_SCALE,
        };

        let export_dir = std::env::var("STOCKFOLIO_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        Self {
            base_url,
            auth_scheme,
            token_file,
            export_scale,
            export_dir,
        }
    }
}

/// `~/.stockfolio/token`, or a working-directory fallback when no home
/// directory is known.
fn default_token_file() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".stockfolio").join(TOKEN_FILE_NAME),
        None => PathBuf::from(".stockfolio").join(TOKEN_FILE_NAME),
    }
}
