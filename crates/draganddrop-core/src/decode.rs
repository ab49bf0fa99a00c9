//! Drop-time payload decoding.
//!
//! Every offered type is decoded on its own. A structured body that fails
//! to parse never keeps the other offered types from being delivered.

use crate::error::Error;
use crate::wire::{JSON_FORMAT, format_of};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// One decoded entry of a drop.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// A structured body, parsed.
    Json(Value),
    /// A body of any other format, verbatim.
    Text(String),
    /// A structured body that did not parse. Only produced under
    /// [`DecodePolicy::Mark`].
    Malformed { body: String, error: String },
}

impl Payload {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

/// What to do with a structured body that fails to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodePolicy {
    /// Leave the entry out of the decoded map.
    #[default]
    Omit,
    /// Keep the entry as [`Payload::Malformed`].
    Mark,
}

/// The decoded payload set of one drop, in offered order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedPayloads {
    entries: Vec<(String, Payload)>,
}

impl DecodedPayloads {
    pub fn get(&self, wire_type: &str) -> Option<&Payload> {
        self.entries
            .iter()
            .find(|(t, _)| t == wire_type)
            .map(|(_, payload)| payload)
    }

    pub fn contains(&self, wire_type: &str) -> bool {
        self.get(wire_type).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Payload)> {
        self.entries.iter().map(|(t, p)| (t.as_str(), p))
    }

    /// Deserialize the structured entry stored under `wire_type`.
    ///
    /// Returns `None` when the entry is absent or not structured.
    pub fn deserialize<T: DeserializeOwned>(&self, wire_type: &str) -> Option<Result<T, Error>> {
        let value = self.get(wire_type)?.as_json()?;
        Some(
            T::deserialize(value).map_err(|source| Error::Decode {
                wire_type: wire_type.to_string(),
                source,
            }),
        )
    }

    /// The untyped map form: structured entries as parsed, text as strings,
    /// malformed entries as `{ body, error }`.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(t, payload)| {
                let value = match payload {
                    Payload::Json(value) => value.clone(),
                    Payload::Text(text) => Value::String(text.clone()),
                    Payload::Malformed { body, error } => {
                        serde_json::json!({ "body": body, "error": error })
                    }
                };
                (t.clone(), value)
            })
            .collect();
        Value::Object(map)
    }

    fn insert(&mut self, wire_type: &str, payload: Payload) {
        match self.entries.iter_mut().find(|(t, _)| t == wire_type) {
            Some((_, existing)) => *existing = payload,
            None => self.entries.push((wire_type.to_string(), payload)),
        }
    }
}

impl IntoIterator for DecodedPayloads {
    type Item = (String, Payload);
    type IntoIter = std::vec::IntoIter<(String, Payload)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Decode a single body according to its wire type's format.
pub fn decode_one(wire_type: &str, body: String) -> Result<Payload, Error> {
    if format_of(wire_type) != Some(JSON_FORMAT) {
        return Ok(Payload::Text(body));
    }
    serde_json::from_str(&body)
        .map(Payload::Json)
        .map_err(|source| Error::Decode {
            wire_type: wire_type.to_string(),
            source,
        })
}

/// Decode every offered type.
///
/// `get` returns the body stored under a wire type; a missing body reads as
/// the empty string.
pub fn decode_payloads<F>(offered: &[String], get: F, policy: DecodePolicy) -> DecodedPayloads
where
    F: Fn(&str) -> Option<String>,
{
    let mut decoded = DecodedPayloads::default();

    for wire_type in offered {
        let body = get(wire_type).unwrap_or_default();
        match decode_one(wire_type, body.clone()) {
            Ok(payload) => {
                tracing::trace!(wire_type = %wire_type, "decoded payload");
                decoded.insert(wire_type, payload);
            }
            Err(err) => {
                tracing::warn!(wire_type = %wire_type, error = %err, "skipping undecodable payload");
                if policy == DecodePolicy::Mark {
                    decoded.insert(
                        wire_type,
                        Payload::Malformed {
                            body,
                            error: err.to_string(),
                        },
                    );
                }
            }
        }
    }

    decoded
}
