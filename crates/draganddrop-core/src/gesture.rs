//! The host gesture capability.
//!
//! The core never touches a platform event directly. Adapters expose the
//! platform's drag event through [`Gesture`]; [`MemoryGesture`] is the
//! in-process implementation used by tests and the board demo.

/// A drag gesture's data table and effect hints, as seen by one listener.
pub trait Gesture {
    /// The allowed-effect hint set by the source.
    fn effect_allowed(&self) -> Option<&str>;
    fn set_effect_allowed(&mut self, effect: &str);

    /// The drop-effect hint set by the target.
    fn drop_effect(&self) -> Option<&str>;
    fn set_drop_effect(&mut self, effect: &str);

    /// Offered wire-level types, in platform order.
    ///
    /// Adapters must normalize non-sequence collections first, see
    /// [`collect_types`].
    fn types(&self) -> Vec<String>;

    /// Attach `text` under `wire_type`. Setting a type twice replaces its body.
    fn set_data(&mut self, wire_type: &str, text: &str);

    /// Body stored under `wire_type`, if any.
    fn get_data(&self, wire_type: &str) -> Option<String>;

    /// Allow the drop (on hover) or suppress navigation (on drop).
    fn prevent_default(&mut self);

    /// Keep enclosing listeners from seeing this event.
    fn stop_propagation(&mut self);
}

/// Normalize an indexable, length-bearing collection into an ordered list.
///
/// Entries the collection cannot produce are skipped.
pub fn collect_types<F>(len: usize, item: F) -> Vec<String>
where
    F: Fn(usize) -> Option<String>,
{
    (0..len).filter_map(item).collect()
}

/// In-memory gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryGesture {
    effect_allowed: Option<String>,
    drop_effect: Option<String>,
    entries: Vec<(String, String)>,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl MemoryGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gesture already carrying `entries`, in order.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut gesture = Self::new();
        for (wire_type, text) in entries {
            let (wire_type, text): (String, String) = (wire_type.into(), text.into());
            gesture.set_data(&wire_type, &text);
        }
        gesture
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// The same data table seen by the next listener: fresh event flags,
    /// effect hints carried over.
    pub fn next_event(&self) -> Self {
        Self {
            effect_allowed: self.effect_allowed.clone(),
            drop_effect: self.drop_effect.clone(),
            entries: self.entries.clone(),
            default_prevented: false,
            propagation_stopped: false,
        }
    }
}

impl Gesture for MemoryGesture {
    fn effect_allowed(&self) -> Option<&str> {
        self.effect_allowed.as_deref()
    }

    fn set_effect_allowed(&mut self, effect: &str) {
        self.effect_allowed = Some(effect.to_string());
    }

    fn drop_effect(&self) -> Option<&str> {
        self.drop_effect.as_deref()
    }

    fn set_drop_effect(&mut self, effect: &str) {
        self.drop_effect = Some(effect.to_string());
    }

    fn types(&self) -> Vec<String> {
        self.entries.iter().map(|(t, _)| t.clone()).collect()
    }

    fn set_data(&mut self, wire_type: &str, text: &str) {
        match self.entries.iter_mut().find(|(t, _)| t == wire_type) {
            Some((_, body)) => *body = text.to_string(),
            None => self.entries.push((wire_type.to_string(), text.to_string())),
        }
    }

    fn get_data(&self, wire_type: &str) -> Option<String> {
        self.entries
            .iter()
            .find(|(t, _)| t == wire_type)
            .map(|(_, body)| body.clone())
    }

    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_data_replaces_in_place() {
        let mut g = MemoryGesture::new();
        g.set_data("json/image", "1");
        g.set_data("text/uri-list", "http://example.com");
        g.set_data("json/image", "2");
        assert_eq!(g.types(), vec!["json/image", "text/uri-list"]);
        assert_eq!(g.get_data("json/image").as_deref(), Some("2"));
    }

    #[test]
    fn collects_indexed_types() {
        let raw = ["json/image", "text/uri-list"];
        let types = collect_types(raw.len(), |i| raw.get(i).map(|s| s.to_string()));
        assert_eq!(types, vec!["json/image", "text/uri-list"]);
    }

    #[test]
    fn next_event_resets_flags() {
        let mut g = MemoryGesture::with_entries([("json/a", "1")]);
        g.set_effect_allowed("link");
        g.prevent_default();
        g.stop_propagation();

        let next = g.next_event();
        assert!(!next.default_prevented());
        assert!(!next.propagation_stopped());
        assert_eq!(next.effect_allowed(), Some("link"));
        assert_eq!(next.types(), vec!["json/a"]);
    }
}
