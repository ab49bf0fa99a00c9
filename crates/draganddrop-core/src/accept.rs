//! Acceptance specifications.
//!
//! A target declares which offered types it will take. The declared value
//! is classified once at setup into an [`Accept`]; only the predicate
//! variant does any work per hover tick.

use serde_json::Value;
use std::fmt;

/// Predicate over the full ordered offered type set.
pub type AcceptFn = Box<dyn Fn(&[String]) -> bool>;

/// What a target accepts.
pub enum Accept {
    /// Accept or reject everything, ignoring the offered types.
    Always(bool),
    /// Accept when this wire type is offered.
    Type(String),
    /// Accept when any of these wire types is offered.
    AnyOf(Vec<String>),
    /// Decide from the full offered set.
    Predicate(AcceptFn),
}

impl Accept {
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&[String]) -> bool + 'static,
    {
        Self::Predicate(Box::new(f))
    }

    /// Whether a gesture offering `offered` may be dropped here.
    pub fn accepts(&self, offered: &[String]) -> bool {
        match self {
            Self::Always(flag) => *flag,
            Self::Type(wire_type) => any_of(std::slice::from_ref(wire_type), offered),
            Self::AnyOf(wire_types) => any_of(wire_types, offered),
            Self::Predicate(f) => f(offered),
        }
    }

    /// Classify a declaratively configured value.
    ///
    /// Returns `None` for shapes that are not an acceptance specification,
    /// which callers treat as reject.
    pub fn classify(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(flag) => Some(Self::Always(*flag)),
            Value::String(wire_type) => Some(Self::Type(wire_type.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(Self::AnyOf),
            _ => None,
        }
    }
}

/// Acceptance check that fails closed when no specification is configured.
pub fn accepts(spec: Option<&Accept>, offered: &[String]) -> bool {
    spec.is_some_and(|spec| spec.accepts(offered))
}

fn any_of(wanted: &[String], offered: &[String]) -> bool {
    offered.iter().any(|t| wanted.contains(t))
}

impl fmt::Debug for Accept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always(flag) => f.debug_tuple("Always").field(flag).finish(),
            Self::Type(wire_type) => f.debug_tuple("Type").field(wire_type).finish(),
            Self::AnyOf(wire_types) => f.debug_tuple("AnyOf").field(wire_types).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<bool> for Accept {
    fn from(flag: bool) -> Self {
        Self::Always(flag)
    }
}

impl From<&str> for Accept {
    fn from(wire_type: &str) -> Self {
        Self::Type(wire_type.to_string())
    }
}

impl From<String> for Accept {
    fn from(wire_type: String) -> Self {
        Self::Type(wire_type)
    }
}

impl From<Vec<String>> for Accept {
    fn from(wire_types: Vec<String>) -> Self {
        Self::AnyOf(wire_types)
    }
}

impl From<&[&str]> for Accept {
    fn from(wire_types: &[&str]) -> Self {
        Self::AnyOf(wire_types.iter().map(|t| t.to_string()).collect())
    }
}
