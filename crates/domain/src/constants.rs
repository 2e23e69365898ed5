//! Application constants
//!
//! Centralized location for the fixed endpoints, routes and storage keys the
//! client relies on.

// API
pub const DEFAULT_API_BASE_URL: &str = "https://api-vouch.sidshr.in/api/";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOGIN_ENDPOINT: &str = "auth/login/";
pub const DEFAULT_REFRESH_ENDPOINT: &str = "auth/token/refresh/";

// Durable credential storage
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "vouch";
pub const ACCESS_TOKEN_KEY: &str = "access";
pub const REFRESH_TOKEN_KEY: &str = "refresh";

// Navigation
pub const LOGIN_ROUTE: &str = "/loginsignup";

// Token claims, in lookup order
pub const USER_ID_CLAIMS: [&str; 3] = ["user_id", "id", "sub"];

// Reviews
pub const MIN_REVIEW_RATING: u8 = 1;
pub const MAX_REVIEW_RATING: u8 = 5;
