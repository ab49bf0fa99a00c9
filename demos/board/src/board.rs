//! Board description: sources, targets, and the gestures replayed between them.

use anyhow::Context;
use draganddrop_core::{SourceAttrs, TargetAttrs};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_BOARD: &str = include_str!("../board.toml");

#[derive(Debug, Deserialize)]
pub struct Board {
    #[serde(default, rename = "source")]
    pub sources: Vec<SourceSpec>,
    #[serde(default, rename = "target")]
    pub targets: Vec<TargetSpec>,
    #[serde(default, rename = "gesture")]
    pub gestures: Vec<GestureSpec>,
}

/// A draggable element and the value its payload expression yields.
#[derive(Debug, Deserialize)]
pub struct SourceSpec {
    pub name: String,
    #[serde(default)]
    pub payload: serde_json::Value,
    #[serde(flatten)]
    pub attrs: SourceAttrs,
}

#[derive(Debug, Deserialize)]
pub struct TargetSpec {
    pub name: String,
    #[serde(flatten)]
    pub attrs: TargetAttrs,
}

/// One drag gesture.
#[derive(Debug, Deserialize)]
pub struct GestureSpec {
    /// Source the gesture starts on; absent for drags from outside the board.
    #[serde(default)]
    pub source: Option<String>,
    /// Extra `(wire type, body)` entries offered by the platform.
    #[serde(default)]
    pub extra: Vec<(String, String)>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Over(String),
    Leave(String),
    Drop(String),
    Cancel,
}

impl Board {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let text = match path {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("reading board {}", path.display()))?,
            None => DEFAULT_BOARD.to_string(),
        };
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let board: Self = toml::from_str(text).context("parsing board")?;
        board.validate()?;
        Ok(board)
    }

    fn validate(&self) -> anyhow::Result<()> {
        for gesture in &self.gestures {
            if let Some(source) = &gesture.source {
                anyhow::ensure!(
                    self.sources.iter().any(|s| &s.name == source),
                    "gesture starts on unknown source {source:?}"
                );
            }
            for step in &gesture.steps {
                let target = match step {
                    Step::Over(t) | Step::Leave(t) | Step::Drop(t) => t,
                    Step::Cancel => continue,
                };
                anyhow::ensure!(
                    self.targets.iter().any(|t| &t.name == target),
                    "gesture step names unknown target {target:?}"
                );
            }
        }
        Ok(())
    }
}
