//! Creature hunt targeting engine
//!
//! Bearing and distance computations that tell an augmented-reality view
//! which way to turn towards a selected target and where to place it in
//! the scene, plus the bookkeeping of targets still to be defeated.

pub mod core;
pub mod algorithms;
pub mod tracking;
pub mod sensors;
pub mod validation;
pub mod utils;
pub mod api;

// Re-export commonly used types
pub use crate::core::{GeoPoint, RenderHandle, Target};
pub use algorithms::bearing::{bearing, destination, distance, CoordinateValidator};
pub use tracking::{IndicatorDecision, IndicatorState, PlacementAction, TargetRegistry, TargetTracker, TrackerState};
pub use sensors::{EventSource, FeedEvent, HeadingFilter, ScriptedFeed};
pub use validation::{ConfigError, TrackingError, TrackingResult};
pub use utils::{ConfigurationManager, HuntConfig, TargetSeed};
pub use api::{CallbackHandle, HuntEvent, HuntSession, SessionSummary};
