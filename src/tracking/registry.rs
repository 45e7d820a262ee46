//! Bookkeeping of targets that have not been defeated yet

use log::debug;

use crate::algorithms::bearing::distance;
use crate::core::{GeoPoint, Target};
use crate::validation::error::{TrackingError, TrackingResult};

/// Ordered collection of active targets.
///
/// Identifiers may repeat. Removal by identifier always takes the earliest
/// inserted match, so with duplicates only insertion order tells which entry
/// went away.
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    targets: Vec<Target>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_targets(targets: impl IntoIterator<Item = Target>) -> Self {
        Self {
            targets: targets.into_iter().collect(),
        }
    }

    /// Append a target; no uniqueness check
    pub fn add(&mut self, target: Target) {
        debug!("registering target '{}' at {:?}", target.identifier, target.location);
        self.targets.push(target);
    }

    /// Remove and return the first target with the given identifier
    pub fn remove_matching(&mut self, identifier: &str) -> TrackingResult<Target> {
        let index = self
            .targets
            .iter()
            .position(|t| t.identifier == identifier)
            .ok_or_else(|| TrackingError::NotFound {
                identifier: identifier.to_string(),
            })?;

        let removed = self.targets.remove(index);
        debug!(
            "removed target '{}' (index {}), {} remaining",
            removed.identifier,
            index,
            self.targets.len()
        );
        Ok(removed)
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    /// First target with the given identifier, without removing it
    pub fn first_matching(&self, identifier: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.identifier == identifier)
    }

    /// Closest target strictly within `radius_m` of `point`, with its distance
    pub fn nearest_within(&self, point: &GeoPoint, radius_m: f64) -> Option<(&Target, f64)> {
        self.targets
            .iter()
            .map(|t| (t, distance(point, &t.location)))
            .filter(|(_, d)| *d < radius_m)
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}
