//! Response decoding driven by the `Content-Type` header

use serde_json::Value;
use tracing::warn;

use crate::error::{Error, Result};
use crate::xml;

const XML_MEDIA_TYPE: &str = "application/xml";
const JSON_MEDIA_TYPE: &str = "application/json";

/// Body of a successful response
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// `application/xml` decoded into a value tree
    Xml(Value),
    /// `application/json` decoded because JSON parsing is enabled
    Json(Value),
    /// Any other content, returned as received
    Raw(String),
}

impl ResponseBody {
    /// Decoded value, `None` for raw bodies
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ResponseBody::Xml(value) | ResponseBody::Json(value) => Some(value),
            ResponseBody::Raw(_) => None,
        }
    }

    /// Raw text, `None` for decoded bodies
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Raw(text) => Some(text),
            _ => None,
        }
    }

    /// Convert into a value, wrapping raw text in `Value::String`
    pub fn into_value(self) -> Value {
        match self {
            ResponseBody::Xml(value) | ResponseBody::Json(value) => value,
            ResponseBody::Raw(text) => Value::String(text),
        }
    }
}

/// Whether `content_type` is `media_type`, optionally followed by parameters
///
/// `application/xml` and `application/xml; charset=utf-8` match,
/// `application/xml;` and `application/xml-dtd` do not.
pub fn matches_media_type(content_type: &str, media_type: &str) -> bool {
    match content_type.strip_prefix(media_type) {
        Some("") => true,
        Some(rest) => rest.len() > 1 && rest.starts_with(';'),
        None => false,
    }
}

/// Decode a response body that already passed the status check
pub fn decode(
    status_code: u16,
    content_type: Option<&str>,
    body: String,
    parse_json: bool,
) -> Result<ResponseBody> {
    let Some(content_type) = content_type else {
        return Ok(ResponseBody::Raw(body));
    };

    if matches_media_type(content_type, XML_MEDIA_TYPE) {
        return match xml::parse_document(&body) {
            Ok(value) => Ok(ResponseBody::Xml(value)),
            Err(source) => {
                warn!(status_code, error = %source, "Failed to parse XML response");
                Err(Error::XmlDecode {
                    status_code,
                    source,
                    body,
                })
            }
        };
    }

    if parse_json && matches_media_type(content_type, JSON_MEDIA_TYPE) {
        return serde_json::from_str(&body).map(ResponseBody::Json).map_err(|e| {
            warn!(status_code, error = %e, "Failed to parse JSON response");
            Error::JsonDecode(e)
        });
    }

    Ok(ResponseBody::Raw(body))
}
