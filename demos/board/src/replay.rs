//! Replays board gestures against in-memory elements.

use crate::board::{Board, GestureSpec, Step};
use draganddrop_core::{
    ClassList, DecodedPayloads, Gesture, MemoryGesture, Result, SourceBinding, SourceConfig,
    TargetConfig, TargetHandler, TargetNegotiator,
};
use std::collections::HashMap;

/// Drop consumer of one target: logs and keeps what it receives.
#[derive(Debug, Default)]
pub struct Inbox {
    name: String,
    pub received: Vec<serde_json::Value>,
}

impl TargetHandler<MemoryGesture> for Inbox {
    fn on_drag_over(&mut self, event: &MemoryGesture) -> Result<()> {
        tracing::trace!(target_name = %self.name, drop_effect = ?event.drop_effect(), "drag over");
        Ok(())
    }

    fn on_drop(&mut self, data: DecodedPayloads, _event: &MemoryGesture) -> Result<()> {
        let value = data.to_json();
        tracing::info!(target_name = %self.name, data = %value, "received drop");
        self.received.push(value);
        Ok(())
    }
}

struct Element {
    negotiator: TargetNegotiator,
    classes: ClassList,
    inbox: Inbox,
}

pub struct Replay {
    sources: HashMap<String, (SourceBinding, serde_json::Value)>,
    targets: Vec<(String, Element)>,
}

impl Replay {
    pub fn new(board: Board) -> Self {
        let sources = board
            .sources
            .into_iter()
            .map(|s| {
                let binding = SourceBinding::new(SourceConfig::from(s.attrs));
                (s.name, (binding, s.payload))
            })
            .collect();

        let targets = board
            .targets
            .into_iter()
            .map(|t| {
                let element = Element {
                    negotiator: TargetNegotiator::new(TargetConfig::from(t.attrs)),
                    classes: ClassList::new(),
                    inbox: Inbox {
                        name: t.name.clone(),
                        received: Vec::new(),
                    },
                };
                (t.name, element)
            })
            .collect();

        Self { sources, targets }
    }

    /// Run one gesture. Returns `false` when the source refused to start it.
    pub fn run(&mut self, gesture_spec: &GestureSpec) -> anyhow::Result<bool> {
        let mut gesture = MemoryGesture::new();

        if let Some(name) = &gesture_spec.source {
            let (binding, payload) = self
                .sources
                .get(name)
                .ok_or_else(|| anyhow::anyhow!("unknown source {name:?}"))?;
            if !binding.is_draggable() {
                tracing::info!(source = %name, "source is not draggable, nothing to drag");
                return Ok(false);
            }
            binding.drag_start_with(&mut gesture, payload)?;
        }
        for (wire_type, body) in &gesture_spec.extra {
            gesture.set_data(wire_type, body);
        }
        tracing::info!(offered = ?gesture.types(), "drag started");

        for step in &gesture_spec.steps {
            match step {
                Step::Over(name) => {
                    let element = self.element(name)?;
                    let mut event = gesture.next_event();
                    element
                        .negotiator
                        .drag_over(&mut event, &mut element.classes, &mut element.inbox)?;
                    tracing::info!(
                        target_name = %name,
                        accepted = event.default_prevented(),
                        classes = ?element.classes.iter().collect::<Vec<_>>(),
                        "hover tick"
                    );
                }
                Step::Leave(name) => {
                    let element = self.element(name)?;
                    element.negotiator.drag_leave(&mut element.classes);
                    tracing::info!(target_name = %name, "drag left");
                }
                Step::Drop(name) => {
                    let element = self.element(name)?;
                    let mut event = gesture.next_event();
                    element
                        .negotiator
                        .drop(&mut event, &mut element.classes, &mut element.inbox)?;
                }
                Step::Cancel => {
                    for (_, element) in &mut self.targets {
                        element.negotiator.drag_end(&mut element.classes);
                    }
                    tracing::info!("drag cancelled");
                }
            }
        }

        Ok(true)
    }

    /// Everything each target received, in board order.
    pub fn received(&self) -> impl Iterator<Item = (&str, &[serde_json::Value])> {
        self.targets
            .iter()
            .map(|(name, element)| (name.as_str(), element.inbox.received.as_slice()))
    }

    /// Targets still showing a hover class.
    pub fn hovered(&self) -> Vec<&str> {
        self.targets
            .iter()
            .filter(|(_, element)| !element.classes.is_empty())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    fn element(&mut self, name: &str) -> anyhow::Result<&mut Element> {
        self.targets
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, element)| element)
            .ok_or_else(|| anyhow::anyhow!("unknown target {name:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn replay_default() -> Replay {
        let mut board = Board::load(None).unwrap();
        let gestures = std::mem::take(&mut board.gestures);
        let mut replay = Replay::new(board);
        for gesture in &gestures {
            replay.run(gesture).unwrap();
        }
        replay
    }

    #[test]
    fn default_board_delivers() {
        let replay = replay_default();
        let received: HashMap<_, _> = replay.received().collect();

        assert_eq!(
            received["gallery"],
            [json!({
                "json/image": {"foo": "bar", "width": 640, "height": 480},
                "text/uri-list": "http://example.com",
            })]
        );
        assert_eq!(
            received["media"],
            [json!({
                "text/uri-list": "http://example.com",
                "json/image": {
                    "body": "{bad",
                    "error": received["media"][0]["json/image"]["error"],
                },
            })]
        );
        assert!(received["media"][0]["json/image"]["error"].is_string());
        assert!(received["closed"].is_empty());
        assert!(replay.hovered().is_empty());
    }

    #[test]
    fn abandoned_hover_is_reported() {
        let mut board = Board::parse(
            r#"
            [[target]]
            name = "tray"
            drop-accept = true
            drag-over-class = "drag-over"

            [[gesture]]
            extra = [["text/plain", "hi"]]
            steps = [{ over = "tray" }]
            "#,
        )
        .unwrap();
        let gestures = std::mem::take(&mut board.gestures);
        let mut replay = Replay::new(board);
        assert!(replay.run(&gestures[0]).unwrap());

        assert_eq!(replay.hovered(), ["tray"]);
    }
}
