//! Formatting helpers for values exchanged with the appliance

use std::fmt;

use chrono::{DateTime, TimeZone};
use serde_json::Value;

use transport::xml::ATTR_KEY;

/// Timestamp layout the appliance expects, e.g. `2024-03-01 09:05:07 -0500`
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Format a timestamp in its own time zone as `yyyy-mm-dd HH:MM:ss ±hhmm`
///
/// Pass a `DateTime<Local>` for local time, as schedule start and end times
/// are usually given. A `DateTime<Utc>` renders in UTC with a `+0000` offset.
pub fn format_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    date.format(DATE_FORMAT).to_string()
}

/// Trailing numeric id of an element's `href` attribute
///
/// Works on elements decoded from XML, where attributes live under `$`:
/// `{"$": {"href": "/live_events/42"}}` yields `"42"`. Returns an empty
/// string when there is no `href` or it does not end in digits.
pub fn extract_id_from_href(element: &Value) -> String {
    let Some(href) = element
        .get(ATTR_KEY)
        .and_then(|attrs| attrs.get("href"))
        .and_then(Value::as_str)
    else {
        return String::new();
    };

    let prefix = href.trim_end_matches(|c: char| c.is_ascii_digit());
    href[prefix.len()..].to_string()
}
