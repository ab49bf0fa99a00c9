//! Target negotiator.
//!
//! Decides, per hover tick, whether the gesture may be dropped here, and
//! decodes the payload set on drop. Visual changes are reported to an
//! [`ElementSink`] for the host adapter to apply; the negotiator never
//! touches the element itself.

use crate::accept::{Accept, accepts};
use crate::decode::{DecodePolicy, DecodedPayloads, decode_payloads};
use crate::element::{ElementEffect, ElementSink};
use crate::error::Result;
use crate::gesture::Gesture;

/// Resolved configuration of a drop target.
#[derive(Debug, Default)]
pub struct TargetConfig {
    /// `None` rejects every gesture.
    pub accept: Option<Accept>,
    /// Overrides the gesture's drop effect on accepted hover ticks.
    pub drop_effect: Option<String>,
    /// Class applied to the element while hovering.
    pub hover_class: Option<String>,
    pub decode_policy: DecodePolicy,
}

impl TargetConfig {
    pub fn new(accept: impl Into<Accept>) -> Self {
        Self {
            accept: Some(accept.into()),
            ..Self::default()
        }
    }

    pub fn drop_effect(mut self, effect: impl Into<String>) -> Self {
        self.drop_effect = Some(effect.into());
        self
    }

    pub fn hover_class(mut self, class: impl Into<String>) -> Self {
        self.hover_class = Some(class.into());
        self
    }

    pub fn decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.decode_policy = policy;
        self
    }
}

/// Hover lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering,
}

/// Consumer callbacks of a drop target.
///
/// Errors propagate out of the negotiator unchanged.
pub trait TargetHandler<G: ?Sized> {
    /// Called on every accepted hover tick with the raw event.
    fn on_drag_over(&mut self, _event: &G) -> Result<()> {
        Ok(())
    }

    /// Called once per drop with the decoded payloads and the raw event.
    fn on_drop(&mut self, _data: DecodedPayloads, _event: &G) -> Result<()> {
        Ok(())
    }
}

impl<G: ?Sized> TargetHandler<G> for () {}

/// The target half of a drag: one per drop target element.
#[derive(Debug, Default)]
pub struct TargetNegotiator {
    config: TargetConfig,
    state: HoverState,
}

impl TargetNegotiator {
    pub fn new(config: TargetConfig) -> Self {
        Self {
            config,
            state: HoverState::Idle,
        }
    }

    pub fn config(&self) -> &TargetConfig {
        &self.config
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    pub fn is_hovering(&self) -> bool {
        self.state == HoverState::Hovering
    }

    /// Whether the gesture's offered types satisfy this target right now.
    pub fn accepts(&self, offered: &[String]) -> bool {
        accepts(self.config.accept.as_ref(), offered)
    }

    /// Handle one hover tick.
    ///
    /// On acceptance the hover class is added, the drop effect is overridden
    /// (if configured), the handler sees the event, and the platform default
    /// is prevented so the drop becomes legal. A rejected tick leaves the
    /// gesture untouched. A handler error returns the target to idle.
    pub fn drag_over<G, E, H>(&mut self, gesture: &mut G, element: &mut E, handler: &mut H) -> Result<()>
    where
        G: Gesture + ?Sized,
        E: ElementSink + ?Sized,
        H: TargetHandler<G> + ?Sized,
    {
        let offered = gesture.types();

        if !self.accepts(&offered) {
            if self.state == HoverState::Hovering {
                tracing::debug!(?offered, "hover no longer accepted");
                self.state = HoverState::Idle;
                self.remove_class(element);
            }
            return Ok(());
        }

        if self.state == HoverState::Idle {
            tracing::debug!(?offered, "hover accepted");
        }
        self.state = HoverState::Hovering;

        if let Some(class) = &self.config.hover_class {
            element.apply(ElementEffect::AddClass(class.clone()));
        }
        if let Some(effect) = &self.config.drop_effect {
            gesture.set_drop_effect(effect);
        }
        if let Err(err) = handler.on_drag_over(gesture) {
            // the drop stays illegal, so the element must not look droppable
            self.state = HoverState::Idle;
            self.remove_class(element);
            return Err(err);
        }
        gesture.prevent_default();

        Ok(())
    }

    /// Handle the pointer leaving the element.
    pub fn drag_leave<E>(&mut self, element: &mut E)
    where
        E: ElementSink + ?Sized,
    {
        if self.state == HoverState::Hovering {
            tracing::debug!("hover left");
        }
        self.state = HoverState::Idle;
        self.remove_class(element);
    }

    /// Handle a gesture abandoned without a drop. Same as leaving.
    pub fn drag_end<E>(&mut self, element: &mut E)
    where
        E: ElementSink + ?Sized,
    {
        self.drag_leave(element);
    }

    /// Handle a drop.
    ///
    /// Not gated on acceptance: every drop decodes and delivers. The hover
    /// class is removed first; the platform default is prevented only once
    /// the handler succeeded.
    pub fn drop<G, E, H>(&mut self, gesture: &mut G, element: &mut E, handler: &mut H) -> Result<()>
    where
        G: Gesture + ?Sized,
        E: ElementSink + ?Sized,
        H: TargetHandler<G> + ?Sized,
    {
        self.state = HoverState::Idle;
        self.remove_class(element);

        let offered = gesture.types();
        let data = decode_payloads(&offered, |t| gesture.get_data(t), self.config.decode_policy);
        tracing::debug!(offered = offered.len(), decoded = data.len(), "drop");

        handler.on_drop(data, gesture)?;
        gesture.prevent_default();

        Ok(())
    }

    fn remove_class<E>(&self, element: &mut E)
    where
        E: ElementSink + ?Sized,
    {
        if let Some(class) = &self.config.hover_class {
            element.apply(ElementEffect::RemoveClass(class.clone()));
        }
    }
}
