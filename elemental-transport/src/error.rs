//! Error types for the Elemental transport

use thiserror::Error;

/// Errors produced while building the XML tree of a request or response
#[derive(Debug, Error)]
pub enum XmlError {
    /// Tokenizer or writer error reported by quick-xml
    #[error("malformed XML: {0}")]
    Syntax(#[from] quick_xml::Error),

    /// Document ended while elements were still open
    #[error("unexpected end of document inside <{0}>")]
    UnexpectedEof(String),

    /// Text or a second element found outside the root element
    #[error("unexpected content outside the root element")]
    TrailingContent,
}

impl From<quick_xml::events::attributes::AttrError> for XmlError {
    fn from(error: quick_xml::events::attributes::AttrError) -> Self {
        XmlError::Syntax(error.into())
    }
}

/// Errors that can occur while talking to an Elemental appliance
///
/// Every failure surfaces directly to the caller: nothing is retried and
/// error payloads returned by the appliance are never parsed.
#[derive(Debug, Error)]
pub enum Error {
    /// Network, DNS or protocol failure reported by the HTTP client
    #[error("Network/HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The appliance answered with a status code above 299
    #[error("HTTP status {status_code}: {body}")]
    HttpStatus {
        status_code: u16,
        /// Raw response body, not decoded
        body: String,
    },

    /// The response was declared as XML but could not be parsed
    #[error("XML parsing error (status {status_code}): {source}")]
    XmlDecode {
        status_code: u16,
        #[source]
        source: XmlError,
        body: String,
    },

    /// The response was declared as JSON, JSON parsing was enabled and it failed
    #[error("JSON parsing error: {0}")]
    JsonDecode(#[from] serde_json::Error),

    /// The request body could not be rendered as XML
    #[error("XML encoding error: {0}")]
    XmlEncode(#[source] XmlError),

    /// A header value (usually a credential) contains characters HTTP forbids
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl Error {
    /// Status code carried by the error, when the appliance answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status_code, .. } | Error::XmlDecode { status_code, .. } => {
                Some(*status_code)
            }
            Error::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw response body carried by the error, if any
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::HttpStatus { body, .. } | Error::XmlDecode { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Type alias for results returned by the transport
pub type Result<T> = std::result::Result<T, Error>;
