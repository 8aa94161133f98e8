//! Client configuration.
//!
//! The backend location is baked in at build time; there is no runtime
//! override.

/// Fallback used when `EXPENSE_TRACKER_API_URL` is not set during the build.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Build-time client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every API path is joined onto.
    pub api_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("EXPENSE_TRACKER_API_URL")
                .unwrap_or(DEFAULT_API_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}
