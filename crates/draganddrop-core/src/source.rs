//! Source binding: attaches a typed payload to an outgoing gesture.

use crate::error::{BoxError, Error, Result};
use crate::gesture::Gesture;
use crate::wire::WireType;
use serde::Serialize;

/// Resolved configuration of a draggable element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Whether the element can be dragged at all.
    pub draggable: bool,
    /// Overrides the gesture's allowed effect when set.
    pub effect_allowed: Option<String>,
    /// Payload type tag, before the encoding prefix is applied.
    pub payload_type: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            draggable: true,
            effect_allowed: None,
            payload_type: None,
        }
    }
}

impl SourceConfig {
    pub fn new(payload_type: impl Into<String>) -> Self {
        Self {
            payload_type: Some(payload_type.into()),
            ..Self::default()
        }
    }

    pub fn effect_allowed(mut self, effect: impl Into<String>) -> Self {
        self.effect_allowed = Some(effect.into());
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    /// Read the enablement attribute: only the literal `"false"` disables.
    pub fn parse_draggable(attr: Option<&str>) -> bool {
        attr != Some("false")
    }
}

/// The source half of a drag: one per draggable element.
#[derive(Debug, Clone, Default)]
pub struct SourceBinding {
    config: SourceConfig,
}

impl SourceBinding {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Value the host reflects onto the element's draggable flag. When
    /// false the host attaches no gesture-start listener.
    pub fn is_draggable(&self) -> bool {
        self.config.draggable
    }

    /// Wire type this source attaches its payload under.
    pub fn wire_type(&self) -> WireType {
        WireType::json(self.config.payload_type.as_deref())
    }

    /// Handle gesture start.
    ///
    /// `payload` is evaluated only when the source is enabled. Its failure,
    /// like a serialization failure, propagates to the caller with nothing
    /// attached. Returns the wire type written, or `None` when disabled.
    pub fn drag_start<G, F, T, E>(&self, gesture: &mut G, payload: F) -> Result<Option<WireType>>
    where
        G: Gesture + ?Sized,
        F: FnOnce() -> std::result::Result<T, E>,
        T: Serialize,
        E: Into<BoxError>,
    {
        if !self.config.draggable {
            return Ok(None);
        }

        if let Some(effect) = &self.config.effect_allowed {
            gesture.set_effect_allowed(effect);
        }

        let value = payload().map_err(Error::evaluation)?;
        let text = serde_json::to_string(&value)?;

        let wire_type = self.wire_type();
        gesture.set_data(wire_type.as_str(), &text);
        // nested draggables: the innermost source owns the gesture
        gesture.stop_propagation();

        tracing::debug!(wire_type = %wire_type, bytes = text.len(), "attached drag payload");
        Ok(Some(wire_type))
    }

    /// [`drag_start`](Self::drag_start) with an already evaluated payload.
    pub fn drag_start_with<G, T>(&self, gesture: &mut G, payload: &T) -> Result<Option<WireType>>
    where
        G: Gesture + ?Sized,
        T: Serialize,
    {
        self.drag_start(gesture, || Ok::<_, BoxError>(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::MemoryGesture;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn enablement_attribute() {
        assert!(SourceConfig::parse_draggable(None));
        assert!(SourceConfig::parse_draggable(Some("")));
        assert!(SourceConfig::parse_draggable(Some("true")));
        assert!(SourceConfig::parse_draggable(Some("FALSE")));
        assert!(!SourceConfig::parse_draggable(Some("false")));
    }

    #[test]
    fn sets_effect_and_data() {
        let source = SourceBinding::new(SourceConfig::new("image").effect_allowed("link"));
        let mut gesture = MemoryGesture::new();

        let wire = source
            .drag_start_with(&mut gesture, &json!({"foo": "bar"}))
            .unwrap();

        assert_eq!(wire.map(String::from).as_deref(), Some("json/image"));
        assert_eq!(gesture.effect_allowed(), Some("link"));
        assert_eq!(gesture.get_data("json/image").as_deref(), Some(r#"{"foo":"bar"}"#));
        assert!(gesture.propagation_stopped());
    }

    #[test]
    fn leaves_platform_effect_alone() {
        let source = SourceBinding::new(SourceConfig::new("image"));
        let mut gesture = MemoryGesture::new();
        gesture.set_effect_allowed("copyMove");

        source.drag_start_with(&mut gesture, &1).unwrap();

        assert_eq!(gesture.effect_allowed(), Some("copyMove"));
    }

    #[test]
    fn missing_tag_uses_bare_prefix() {
        let source = SourceBinding::default();
        let mut gesture = MemoryGesture::new();

        source.drag_start_with(&mut gesture, &"x").unwrap();

        assert_eq!(gesture.types(), vec!["json/"]);
        assert_eq!(gesture.get_data("json/").as_deref(), Some(r#""x""#));
    }

    #[test]
    fn disabled_never_evaluates() {
        let source = SourceBinding::new(SourceConfig::new("image").draggable(false));
        let mut gesture = MemoryGesture::new();

        let wire = source
            .drag_start(&mut gesture, || -> Result<i32, BoxError> {
                panic!("payload evaluated for a disabled source")
            })
            .unwrap();

        assert!(wire.is_none());
        assert_eq!(gesture, MemoryGesture::new());
    }

    #[test]
    fn evaluation_error_propagates() {
        let source = SourceBinding::new(SourceConfig::new("image"));
        let mut gesture = MemoryGesture::new();

        let err = source
            .drag_start(&mut gesture, || Err::<i32, _>("undefined reference"))
            .unwrap_err();

        assert!(matches!(err, Error::Evaluation(_)));
        assert!(gesture.types().is_empty());
    }

    #[test]
    fn unserializable_payload_fails() {
        let source = SourceBinding::new(SourceConfig::new("map"));
        let mut gesture = MemoryGesture::new();
        let payload: HashMap<(i32, i32), i32> = HashMap::from([((1, 2), 3)]);

        let err = source.drag_start_with(&mut gesture, &payload).unwrap_err();

        assert!(matches!(err, Error::Serialization(_)));
        assert!(gesture.types().is_empty());
    }

    #[test]
    fn last_write_wins_for_same_tag() {
        let source = SourceBinding::new(SourceConfig::new("image"));
        let mut gesture = MemoryGesture::new();

        source.drag_start_with(&mut gesture, &1).unwrap();
        source.drag_start_with(&mut gesture, &2).unwrap();

        assert_eq!(gesture.types(), vec!["json/image"]);
        assert_eq!(gesture.get_data("json/image").as_deref(), Some("2"));
    }
}
