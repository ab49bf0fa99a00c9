//! Wire-level type strings.
//!
//! Wire type format: `format/payload-type`
//!
//! Known formats:
//! - `json/<tag>` - structured payload attached by a source binding
//! - anything else (`text/uri-list`, `text/plain`, ...) - raw text offered
//!   by unrelated drag sources, interpreted verbatim

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Prefix prepended to a payload type tag for structured payloads.
pub const ENCODING_PREFIX: &str = "json/";

/// Format tag of structured payloads (the prefix without its slash).
pub const JSON_FORMAT: &str = "json";

/// A wire-level type string as carried by a gesture's type/data table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireType(String);

impl WireType {
    /// Wrap a raw wire-level type string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Build the structured wire type for a payload type tag.
    ///
    /// An absent tag yields the bare prefix `"json/"`.
    pub fn json(tag: Option<&str>) -> Self {
        Self(format!("{ENCODING_PREFIX}{}", tag.unwrap_or_default()))
    }

    /// The format tag: everything before the first `/`, if any.
    pub fn format(&self) -> Option<&str> {
        format_of(&self.0)
    }

    /// The payload type: everything after the first `/`, if any.
    pub fn payload_type(&self) -> Option<&str> {
        self.0.split_once('/').map(|(_, payload)| payload)
    }

    /// Whether this wire type carries a structured payload.
    pub fn is_json(&self) -> bool {
        self.format() == Some(JSON_FORMAT)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Format tag of a raw wire-level type string.
pub fn format_of(raw: &str) -> Option<&str> {
    raw.split_once('/').map(|(format, _)| format)
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for WireType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for WireType {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for WireType {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<WireType> for String {
    fn from(wire: WireType) -> Self {
        wire.0
    }
}

impl AsRef<str> for WireType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_json() {
        let wire: WireType = "json/image".parse().unwrap();
        assert_eq!(wire.format(), Some("json"));
        assert_eq!(wire.payload_type(), Some("image"));
        assert!(wire.is_json());
    }

    #[test]
    fn parse_uri_list() {
        let wire = WireType::from("text/uri-list");
        assert_eq!(wire.format(), Some("text"));
        assert_eq!(wire.payload_type(), Some("uri-list"));
        assert!(!wire.is_json());
    }

    #[test]
    fn format_stops_at_first_slash() {
        let wire = WireType::from("json/a/b");
        assert_eq!(wire.format(), Some("json"));
        assert_eq!(wire.payload_type(), Some("a/b"));
    }

    #[test]
    fn no_slash_has_no_format() {
        let wire = WireType::from("Files");
        assert_eq!(wire.format(), None);
        assert_eq!(wire.payload_type(), None);
        assert!(!wire.is_json());
    }

    #[test]
    fn missing_tag_keeps_bare_prefix() {
        let wire = WireType::json(None);
        assert_eq!(wire.as_str(), "json/");
        assert!(wire.is_json());
        assert_eq!(wire.payload_type(), Some(""));
    }

    #[test]
    fn serializes_as_plain_string() {
        let wire = WireType::json(Some("contact"));
        assert_eq!(serde_json::to_string(&wire).unwrap(), r#""json/contact""#);
        let back: WireType = serde_json::from_str(r#""json/contact""#).unwrap();
        assert_eq!(back, wire);
    }
}
