//! Client configuration
//!
//! Holds everything a request needs besides its own method, path and body:
//! the appliance base URL, optional API credentials and whether JSON
//! responses should be decoded.

use crate::auth::Credentials;

/// Environment variable holding the appliance base URL
pub const ENV_URL: &str = "ELEMENTAL_URL";
/// Environment variable holding the API user
pub const ENV_USER: &str = "ELEMENTAL_USER";
/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "ELEMENTAL_API_KEY";
/// Environment variable enabling JSON decoding ("1", "true", "yes")
pub const ENV_PARSE_JSON: &str = "ELEMENTAL_PARSE_JSON";

/// Immutable configuration shared by every request issued through a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    server_url: String,
    credentials: Option<Credentials>,
    parse_json: bool,
}

impl ClientConfig {
    /// Create a configuration for the given base URL
    ///
    /// Trailing slashes are removed so paths such as `/api/live_events`
    /// can be appended directly.
    pub fn new(server_url: impl Into<String>) -> Self {
        let server_url = server_url.into();
        Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            credentials: None,
            parse_json: false,
        }
    }

    /// Sign every request with these credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Decode `application/json` responses instead of returning raw text
    pub fn with_parse_json(mut self, parse_json: bool) -> Self {
        self.parse_json = parse_json;
        self
    }

    /// Build a configuration from `ELEMENTAL_*` environment variables
    ///
    /// Returns `None` when `ELEMENTAL_URL` is unset. Credentials are only
    /// configured when both user and API key are present.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var(ENV_URL).ok()?;
        let mut config = Self::new(url);

        if let (Ok(user), Ok(api_key)) = (std::env::var(ENV_USER), std::env::var(ENV_API_KEY)) {
            config = config.with_credentials(Credentials::new(user, api_key));
        }

        let parse_json = std::env::var(ENV_PARSE_JSON)
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Some(config.with_parse_json(parse_json))
    }

    /// Base URL without trailing slashes
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn parse_json(&self) -> bool {
        self.parse_json
    }

    /// Absolute URL for a path relative to the server
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.server_url, path)
        } else {
            format!("{}/{}", self.server_url, path)
        }
    }
}
