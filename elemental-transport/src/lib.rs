//! Signed HTTP transport for the Elemental Live REST API
//!
//! This crate turns a [`Request`] into one HTTP exchange with an appliance:
//! it renders XML bodies, attaches the `X-Auth-*` headers when credentials
//! are configured, rejects non-2xx answers and decodes the body according to
//! its content type.

mod auth;
mod config;
mod error;
mod request;
mod response;
pub mod xml;

pub use auth::{
    expires_at, AuthHeaders, Credentials, HEADER_AUTH_EXPIRES, HEADER_AUTH_KEY, HEADER_AUTH_USER,
    SIGNATURE_WINDOW_SECS,
};
pub use config::{ClientConfig, ENV_API_KEY, ENV_PARSE_JSON, ENV_URL, ENV_USER};
pub use error::{Error, Result, XmlError};
pub use request::Request;
pub use response::{decode, matches_media_type, ResponseBody};

pub use reqwest::header::{self, HeaderName, HeaderValue};
pub use reqwest::Method;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use tracing::debug;

const XML_CONTENT_TYPE: &str = "application/xml";

/// HTTP transport bound to one appliance
///
/// Cloning is cheap: the configuration is shared and `reqwest::Client`
/// pools connections internally. Concurrent calls are independent.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a transport with a default HTTP client
    ///
    /// Redirects are never followed: a 3xx answer is returned to the caller
    /// as [`Error::HttpStatus`].
    ///
    /// # Errors
    ///
    /// [`Error::Transport`] when the HTTP client cannot be initialized (TLS backend).
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self::with_http_client(config, http))
    }

    /// Create a transport with a custom HTTP client (proxies, TLS settings, timeouts)
    ///
    /// The client should be built with `redirect::Policy::none()`, otherwise
    /// a redirected request is reported with the status of its target.
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a request and decode the response
    ///
    /// # Errors
    ///
    /// * [`Error::Transport`] when the exchange itself fails
    /// * [`Error::HttpStatus`] for any status above 299, with the raw body
    /// * [`Error::XmlDecode`] / [`Error::JsonDecode`] when a declared body does not parse
    pub async fn send(&self, request: Request) -> Result<ResponseBody> {
        let (method, path, query, body, mut headers) = request.into_parts();

        if !headers.contains_key(ACCEPT) {
            headers.insert(ACCEPT, HeaderValue::from_static(XML_CONTENT_TYPE));
        }

        let body = body.map(|data| encode_body(data, &mut headers)).transpose()?;

        if let Some(credentials) = self.config.credentials() {
            apply_auth(&mut headers, credentials, &path, Utc::now())?;
        }

        debug!(%method, path = %path, "Sending request");

        let mut builder = self
            .http
            .request(method.clone(), self.config.url_for(&path))
            .headers(headers);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let text = response.text().await?;

        debug!(%method, path = %path, status_code, "Received response");

        if status_code > 299 {
            return Err(Error::HttpStatus {
                status_code,
                body: text,
            });
        }

        decode(
            status_code,
            content_type.as_deref(),
            text,
            self.config.parse_json(),
        )
    }
}

/// Insert the `X-Auth-*` headers for a request to `path` built at `now`
fn apply_auth(
    headers: &mut HeaderMap,
    credentials: &Credentials,
    path: &str,
    now: DateTime<Utc>,
) -> Result<()> {
    let auth = credentials.auth_headers(path, now);
    headers.insert(
        HeaderName::from_static(HEADER_AUTH_USER),
        HeaderValue::from_str(&auth.user)?,
    );
    headers.insert(
        HeaderName::from_static(HEADER_AUTH_EXPIRES),
        HeaderValue::from(auth.expires),
    );
    headers.insert(
        HeaderName::from_static(HEADER_AUTH_KEY),
        HeaderValue::from_str(&auth.key)?,
    );
    Ok(())
}

/// Serialize a request body, defaulting to XML
///
/// When the caller already chose a `Content-Type`, strings go out verbatim
/// and other values as JSON text.
fn encode_body(data: Value, headers: &mut HeaderMap) -> Result<String> {
    if headers.contains_key(CONTENT_TYPE) {
        return Ok(match data {
            Value::String(text) => text,
            other => other.to_string(),
        });
    }

    let document = xml::build_document(&data).map_err(Error::XmlEncode)?;
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(XML_CONTENT_TYPE));
    Ok(document)
}
