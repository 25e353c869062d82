//! Request signing
//!
//! The appliance authenticates each request with three headers. The key is
//! a nested MD5 over the request path, the user, the API key and the expiry
//! timestamp:
//!
//! ```text
//! X-Auth-Key = md5(api_key + md5(path + user + api_key + expires))
//! ```
//!
//! Host, query string and body are not part of the signature.

use chrono::{DateTime, Utc};
use std::fmt;

/// Header carrying the API user (`X-Auth-User`)
pub const HEADER_AUTH_USER: &str = "x-auth-user";
/// Header carrying the unix timestamp after which the signature is rejected
pub const HEADER_AUTH_EXPIRES: &str = "x-auth-expires";
/// Header carrying the signature (`X-Auth-Key`)
pub const HEADER_AUTH_KEY: &str = "x-auth-key";

/// Seconds a signature stays valid after the request is built
pub const SIGNATURE_WINDOW_SECS: i64 = 5 * 60;

/// API credentials for an appliance with user authentication enabled
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user: String,
    api_key: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            api_key: api_key.into(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Signature for `path` expiring at the unix timestamp `expires`
    pub fn sign(&self, path: &str, expires: i64) -> String {
        let inner = md5_hex(format!("{}{}{}{}", path, self.user, self.api_key, expires));
        md5_hex(format!("{}{}", self.api_key, inner))
    }

    /// Authentication headers for a request to `path` built at `now`
    pub fn auth_headers(&self, path: &str, now: DateTime<Utc>) -> AuthHeaders {
        let expires = expires_at(now);
        AuthHeaders {
            user: self.user.clone(),
            expires,
            key: self.sign(path, expires),
        }
    }
}

// Keep the API key out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Values of the three authentication headers for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    pub user: String,
    pub expires: i64,
    pub key: String,
}

/// Expiry timestamp for a request built at `now`, rounded to the nearest second
pub fn expires_at(now: DateTime<Utc>) -> i64 {
    let millis = now.timestamp_millis();
    let seconds = (millis as f64 / 1000.0).round() as i64;
    seconds + SIGNATURE_WINDOW_SECS
}

fn md5_hex(input: String) -> String {
    format!("{:x}", md5::compute(input.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use md5_reference::{Digest, Md5};

    // Independent MD5 implementation (RustCrypto) used to check the vector
    fn reference_md5(input: &str) -> String {
        let mut hasher = Md5::new();
        hasher.update(input.as_bytes());
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }

    #[test]
    fn test_signature_matches_reference_vector() {
        let credentials = Credentials::new("u", "k");
        let inner = reference_md5("/api/live_events/5/startuk1000");
        let expected = reference_md5(&format!("k{}", inner));

        assert_eq!(credentials.sign("/api/live_events/5/start", 1000), expected);
    }

    #[test]
    fn test_signature_is_lowercase_hex() {
        let key = Credentials::new("admin", "secret").sign("/api/presets", 42);

        assert_eq!(key.len(), 32);
        assert!(key.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_signature_covers_path_only_inputs() {
        let credentials = Credentials::new("admin", "secret");
        let a = credentials.sign("/api/live_events/1/start", 1000);
        let b = credentials.sign("/api/live_events/1/stop", 1000);
        let c = credentials.sign("/api/live_events/1/start", 1001);

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, credentials.sign("/api/live_events/1/start", 1000));
    }

    #[test]
    fn test_expiry_window() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_400).unwrap();
        assert_eq!(expires_at(now), 1_700_000_000 + 300);

        let rounded_up = Utc.timestamp_millis_opt(1_700_000_000_500).unwrap();
        assert_eq!(expires_at(rounded_up), 1_700_000_001 + 300);
    }

    #[test]
    fn test_auth_headers() {
        let credentials = Credentials::new("u", "k");
        let now = Utc.timestamp_opt(700, 0).unwrap();
        let headers = credentials.auth_headers("/api/live_events/5/start", now);

        assert_eq!(headers.user, "u");
        assert_eq!(headers.expires, 1000);
        assert_eq!(headers.key, credentials.sign("/api/live_events/5/start", 1000));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let rendered = format!("{:?}", Credentials::new("admin", "hunter2"));
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("hunter2"));
    }
}
