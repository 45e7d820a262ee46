//! Queue-backed event source for demos and testing

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use crate::algorithms::bearing::destination;
use crate::core::GeoPoint;
use crate::sensors::{EventSource, FeedEvent};
use crate::validation::error::ConfigError;

/// Upper bound on readings queued by a single sweep
pub const MAX_SWEEP_READINGS: usize = 3600;

/// Replays a fixed sequence of events
#[derive(Debug, Clone, Default)]
pub struct ScriptedFeed {
    id: String,
    queue: VecDeque<FeedEvent>,
    delivered: usize,
}

impl ScriptedFeed {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            queue: VecDeque::new(),
            delivered: 0,
        }
    }

    pub fn from_events(id: impl Into<String>, events: impl IntoIterator<Item = FeedEvent>) -> Self {
        Self {
            id: id.into(),
            queue: events.into_iter().collect(),
            delivered: 0,
        }
    }

    /// Load a JSON array of events
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path_str.clone(),
            source,
        })?;
        let events: Vec<FeedEvent> = serde_json::from_str(&content)?;
        Ok(Self::from_events(path_str, events))
    }

    pub fn push(&mut self, event: FeedEvent) {
        self.queue.push_back(event);
    }

    pub fn push_location(&mut self, point: GeoPoint) {
        self.push(FeedEvent::Location { point });
    }

    pub fn push_heading(&mut self, degrees: f64) {
        self.push(FeedEvent::Heading { degrees });
    }

    /// Queue fixes for a straight walk of `steps` equal legs
    pub fn push_walk(&mut self, start: GeoPoint, bearing_deg: f64, step_m: f64, steps: usize) {
        for step in 0..=steps {
            let point = destination(&start, bearing_deg, step_m * step as f64);
            self.push_location(point);
        }
    }

    /// Queue headings sweeping from `from` to `to` in `step` increments
    ///
    /// Returns the number of readings queued. Nothing is queued when the
    /// inputs are not finite, the step is not positive, or the sweep would
    /// need more than [`MAX_SWEEP_READINGS`] readings.
    pub fn push_sweep(&mut self, from: f64, to: f64, step: f64) -> usize {
        if !(from.is_finite() && to.is_finite() && step.is_finite()) || step <= 0.0 {
            return 0;
        }

        let intervals = ((to - from).abs() / step + 1e-9).floor();
        if intervals >= MAX_SWEEP_READINGS as f64 {
            return 0;
        }

        let count = intervals as usize + 1;
        let direction = if from <= to { 1.0 } else { -1.0 };
        for i in 0..count {
            self.push_heading(from + direction * step * i as f64);
        }
        count
    }

    pub fn queued_event_count(&self) -> usize {
        self.queue.len()
    }

    pub fn delivered_event_count(&self) -> usize {
        self.delivered
    }
}

impl EventSource for ScriptedFeed {
    fn next_event(&mut self) -> Option<FeedEvent> {
        let event = self.queue.pop_front()?;
        self.delivered += 1;
        Some(event)
    }

    fn source_id(&self) -> &str {
        &self.id
    }
}
