//! Event and summary types exposed by the hunt session

use serde::Serialize;

use crate::core::Target;
use crate::tracking::tracker::IndicatorDecision;

/// Notifications for map and scene observers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum HuntEvent {
    /// A target passed the proximity gate and became the active target
    TargetSelected { identifier: String, distance_m: f64 },
    /// The indicator to show changed
    IndicatorChanged { decision: IndicatorDecision },
    /// A target was hit and removed from the registry; its map and scene
    /// visuals should be deleted
    TargetRemoved { target: Target },
    /// The last remaining target was removed
    AllTargetsDefeated,
}

/// Observer callback
pub type EventCallback = Box<dyn Fn(&HuntEvent) + Send>;

/// Callback registration handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackHandle(u32);

impl CallbackHandle {
    pub(crate) fn new(id: u32) -> Self {
        CallbackHandle(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Outcome of draining an event source
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSummary {
    /// Events handled without error
    pub processed: usize,
    /// Events skipped because of a recoverable error
    pub skipped: usize,
    /// Heading readings suppressed by the heading filter
    pub filtered: usize,
    /// Targets removed by hits
    pub removed: Vec<String>,
    pub last_decision: Option<IndicatorDecision>,
}
