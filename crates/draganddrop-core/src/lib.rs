//! Typed payload exchange over native drag-and-drop gestures.
//!
//! A [`SourceBinding`] serializes a payload and attaches it to the outgoing
//! gesture under `json/<tag>`. A [`TargetNegotiator`] decides on every hover
//! tick whether the offered types are acceptable, and on drop decodes every
//! offered type into a [`DecodedPayloads`] set for the consumer.
//!
//! Platform events reach the core through the [`Gesture`] trait; element
//! changes leave it as [`ElementEffect`]s.

mod accept;
mod config;
mod decode;
mod element;
mod error;
mod gesture;
mod source;
mod target;
mod wire;

pub use accept::{Accept, AcceptFn, accepts};
pub use config::{SourceAttrs, TargetAttrs};
pub use decode::{DecodePolicy, DecodedPayloads, Payload, decode_one, decode_payloads};
pub use element::{ClassList, ElementEffect, ElementSink};
pub use error::{BoxError, Error, Result};
pub use gesture::{Gesture, MemoryGesture, collect_types};
pub use source::{SourceBinding, SourceConfig};
pub use target::{HoverState, TargetConfig, TargetHandler, TargetNegotiator};
pub use wire::{ENCODING_PREFIX, JSON_FORMAT, WireType};
