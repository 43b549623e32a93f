/// Default backend base URL; override per deployment.
pub const DEFAULT_API_BASE_URL: &str = "https://stock-backend-tl9t.onrender.com";

/// Fixed key name under which the session token is persisted.
pub const TOKEN_FILE_NAME: &str = "token";

/// Decimal precision for display.
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
