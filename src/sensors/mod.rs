//! Inbound sensor and collaborator events
//!
//! Location fixes, heading readings, selection and hit notifications all
//! reach the engine as [`FeedEvent`]s pulled from an [`EventSource`].

pub mod heading;
pub mod scripted;

pub use heading::HeadingFilter;
pub use scripted::ScriptedFeed;

use serde::{Deserialize, Serialize};

use crate::core::{GeoPoint, RenderHandle};

/// A single event delivered to the hunt session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedEvent {
    /// New location fix
    Location { point: GeoPoint },
    /// New heading reading in degrees from true north
    Heading { degrees: f64 },
    /// User picked a target on the map
    Select { identifier: String },
    /// Renderer created a node for the selected target
    AttachRenderHandle { handle: RenderHandle },
    /// Hit test succeeded against the selected target
    Hit { identifier: String },
}

/// Source of feed events, polled until exhausted
pub trait EventSource {
    /// Next pending event, or None when the source has nothing more
    fn next_event(&mut self) -> Option<FeedEvent>;

    /// Identifier used in log output
    fn source_id(&self) -> &str;
}
