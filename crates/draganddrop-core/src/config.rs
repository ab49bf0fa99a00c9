//! Declarative element attributes.
//!
//! Hosts read these from markup or a config file and resolve them once into
//! a [`SourceConfig`] or [`TargetConfig`].

use crate::accept::Accept;
use crate::decode::DecodePolicy;
use crate::source::SourceConfig;
use crate::target::TargetConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Attributes of a draggable element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourceAttrs {
    /// `false` (boolean or the string `"false"`) disables dragging.
    #[serde(default)]
    pub draggable: Option<Value>,
    #[serde(default)]
    pub effect_allowed: Option<String>,
    #[serde(default)]
    pub draggable_type: Option<String>,
}

impl SourceAttrs {
    /// Collect from raw `name=value` markup attributes; unknown names are ignored.
    pub fn from_attributes<'a, I>(attrs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut out = Self::default();
        for (name, value) in attrs {
            match name {
                "draggable" => out.draggable = Some(Value::String(value.to_string())),
                "effect-allowed" => out.effect_allowed = Some(value.to_string()),
                "draggable-type" => out.draggable_type = Some(value.to_string()),
                _ => {}
            }
        }
        out
    }
}

impl From<SourceAttrs> for SourceConfig {
    fn from(attrs: SourceAttrs) -> Self {
        let draggable = match &attrs.draggable {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(text)) => SourceConfig::parse_draggable(Some(text.as_str())),
            _ => true,
        };
        Self {
            draggable,
            effect_allowed: attrs.effect_allowed,
            payload_type: attrs.draggable_type,
        }
    }
}

/// Attributes of a drop target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetAttrs {
    /// Boolean, wire type, or list of wire types.
    #[serde(default)]
    pub drop_accept: Option<Value>,
    #[serde(default)]
    pub drop_effect: Option<String>,
    #[serde(default)]
    pub drag_over_class: Option<String>,
    #[serde(default)]
    pub decode_policy: Option<DecodePolicy>,
}

impl TargetAttrs {
    /// Collect from raw `name=value` markup attributes.
    ///
    /// `drop-accept` is read as JSON when it parses (`true`, `["json/a"]`),
    /// otherwise as a single wire type.
    pub fn from_attributes<'a, I>(attrs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut out = Self::default();
        for (name, value) in attrs {
            match name {
                "drop-accept" => {
                    let accept = serde_json::from_str(value)
                        .unwrap_or_else(|_| Value::String(value.to_string()));
                    out.drop_accept = Some(accept);
                }
                "drop-effect" => out.drop_effect = Some(value.to_string()),
                "drag-over-class" => out.drag_over_class = Some(value.to_string()),
                "decode-policy" => {
                    out.decode_policy = match value {
                        "mark" => Some(DecodePolicy::Mark),
                        "omit" => Some(DecodePolicy::Omit),
                        other => {
                            tracing::warn!(value = other, "unknown decode policy, using default");
                            None
                        }
                    }
                }
                _ => {}
            }
        }
        out
    }
}

impl From<TargetAttrs> for TargetConfig {
    fn from(attrs: TargetAttrs) -> Self {
        let accept = attrs.drop_accept.as_ref().and_then(Accept::classify);
        if accept.is_none() && attrs.drop_accept.is_some() {
            tracing::warn!(drop_accept = ?attrs.drop_accept, "unrecognized drop-accept, rejecting all drags");
        }
        Self {
            accept,
            drop_effect: attrs.drop_effect,
            hover_class: attrs.drag_over_class,
            decode_policy: attrs.decode_policy.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_from_markup() {
        let attrs = SourceAttrs::from_attributes([
            ("draggable", "true"),
            ("effect-allowed", "link"),
            ("draggable-type", "image"),
            ("class", "card"),
        ]);
        let config = SourceConfig::from(attrs);

        assert!(config.draggable);
        assert_eq!(config.effect_allowed.as_deref(), Some("link"));
        assert_eq!(config.payload_type.as_deref(), Some("image"));
    }

    #[test]
    fn source_disabled_by_string_or_bool() {
        let from_markup = SourceAttrs::from_attributes([("draggable", "false")]);
        assert!(!SourceConfig::from(from_markup).draggable);

        let from_toml: SourceAttrs = toml::from_str("draggable = false").unwrap();
        assert!(!SourceConfig::from(from_toml).draggable);

        let bare = SourceAttrs::from_attributes([("draggable", "")]);
        assert!(SourceConfig::from(bare).draggable);
    }

    #[test]
    fn target_from_markup() {
        let attrs = TargetAttrs::from_attributes([
            ("drop-accept", r#"["json/image", "xxx"]"#),
            ("drop-effect", "link"),
            ("drag-over-class", "drag-over"),
            ("decode-policy", "mark"),
        ]);
        let config = TargetConfig::from(attrs);

        assert!(matches!(&config.accept, Some(Accept::AnyOf(types)) if types.len() == 2));
        assert_eq!(config.drop_effect.as_deref(), Some("link"));
        assert_eq!(config.hover_class.as_deref(), Some("drag-over"));
        assert_eq!(config.decode_policy, DecodePolicy::Mark);
    }

    #[test]
    fn bare_accept_is_a_wire_type() {
        let attrs = TargetAttrs::from_attributes([("drop-accept", "json/image")]);
        let config = TargetConfig::from(attrs);
        assert!(matches!(&config.accept, Some(Accept::Type(t)) if t == "json/image"));
    }

    #[test]
    fn target_from_toml() {
        let attrs: TargetAttrs = toml::from_str(
            r#"
            drop-accept = ["json/image", "json/video"]
            drag-over-class = "drag-over"
            decode-policy = "omit"
            "#,
        )
        .unwrap();
        let config = TargetConfig::from(attrs);

        assert!(config.accept.is_some());
        assert_eq!(config.decode_policy, DecodePolicy::Omit);
    }

    #[test]
    fn malformed_accept_fails_closed() {
        let attrs: TargetAttrs = toml::from_str("drop-accept = 3").unwrap();
        let config = TargetConfig::from(attrs);
        assert!(config.accept.is_none());

        let missing = TargetConfig::from(TargetAttrs::default());
        assert!(missing.accept.is_none());
    }
}
