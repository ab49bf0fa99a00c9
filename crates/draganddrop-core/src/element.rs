//! Visual side effects on the bound element.

use std::collections::BTreeSet;

/// A change the host must apply to the bound element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementEffect {
    AddClass(String),
    RemoveClass(String),
}

/// Receives element effects in the order they are produced.
pub trait ElementSink {
    fn apply(&mut self, effect: ElementEffect);
}

/// Records effects for later replay.
impl ElementSink for Vec<ElementEffect> {
    fn apply(&mut self, effect: ElementEffect) {
        self.push(effect);
    }
}

/// A class list: adding a present class or removing an absent one is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(BTreeSet<String>);

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.contains(class)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl ElementSink for ClassList {
    fn apply(&mut self, effect: ElementEffect) {
        match effect {
            ElementEffect::AddClass(class) => {
                self.0.insert(class);
            }
            ElementEffect::RemoveClass(class) => {
                self.0.remove(&class);
            }
        }
    }
}
