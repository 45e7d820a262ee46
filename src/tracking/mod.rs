//! Stateful targeting: tracker, registry and placement

pub mod tracker;
pub mod registry;
pub mod placement;

pub use tracker::{IndicatorDecision, IndicatorState, TargetTracker, TrackerState};
pub use registry::TargetRegistry;
pub use placement::PlacementAction;
