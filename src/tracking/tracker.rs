//! Heading-driven target tracking
//!
//! The tracker aggregates the latest location fix, the latest device heading
//! and the selected target. Every heading update recomputes the bearing to
//! the target and derives which side indicator to show and where the target
//! sits relative to the camera.
//!
//! Known defect, kept on purpose: the bearing/heading difference is not
//! wrapped into [-180, 180]. A target 10 degrees left of a heading of 5
//! (bearing 355) yields a delta of +350 and the right indicator is shown.

use log::trace;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::algorithms::bearing::{bearing, distance};
use crate::core::{GeoPoint, RenderHandle, Target, DEFAULT_INDICATOR_THRESHOLD_DEG, FULL_CIRCLE_DEG};
use crate::validation::error::{TrackingError, TrackingResult};

/// Which directional indicator the renderer should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorState {
    ShowLeft,
    ShowRight,
    ShowNeither,
}

impl IndicatorState {
    /// Classify a signed bearing/heading difference
    pub fn from_delta(delta: f64, threshold_deg: f64) -> Self {
        if delta < -threshold_deg {
            IndicatorState::ShowLeft
        } else if delta > threshold_deg {
            IndicatorState::ShowRight
        } else {
            IndicatorState::ShowNeither
        }
    }
}

/// Result of a recompute, consumed by the rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorDecision {
    pub state: IndicatorState,
    /// Bearing from the user to the target (degrees)
    pub target_bearing: f64,
    /// Surface distance to the target (meters)
    pub distance: f64,
    /// Signed bearing minus heading (degrees), used as the horizontal coordinate
    pub offset: f64,
}

impl IndicatorDecision {
    /// Scene position of the target: x = offset, y = 0, z = -distance
    pub fn placement(&self) -> Vector3<f64> {
        Vector3::new(self.offset, 0.0, -self.distance)
    }
}

/// Mutable inputs of the tracker
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerState {
    /// Absent until the first fix
    pub user_location: Option<GeoPoint>,
    /// Always in [0, 360)
    pub device_heading: f64,
    pub active_target: Option<Target>,
}

/// Wrap a heading into [0, 360). Negative values wrap up, so -10 becomes 350.
pub fn normalize_heading(heading: f64) -> TrackingResult<f64> {
    if !heading.is_finite() {
        return Err(TrackingError::InvalidHeading { value: heading });
    }

    let wrapped = heading.rem_euclid(FULL_CIRCLE_DEG);
    // rem_euclid may round up to the modulus for tiny negative inputs
    if wrapped >= FULL_CIRCLE_DEG {
        Ok(0.0)
    } else {
        Ok(wrapped)
    }
}

/// Tracks the selected target against location and heading updates
#[derive(Debug, Clone)]
pub struct TargetTracker {
    state: TrackerState,
    indicator_threshold_deg: f64,
}

impl Default for TargetTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetTracker {
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_INDICATOR_THRESHOLD_DEG)
    }

    /// Create a tracker with a custom indicator threshold (degrees)
    pub fn with_threshold(indicator_threshold_deg: f64) -> Self {
        Self {
            state: TrackerState::default(),
            indicator_threshold_deg,
        }
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn indicator_threshold(&self) -> f64 {
        self.indicator_threshold_deg
    }

    pub fn user_location(&self) -> Option<GeoPoint> {
        self.state.user_location
    }

    pub fn device_heading(&self) -> f64 {
        self.state.device_heading
    }

    pub fn active_target(&self) -> Option<&Target> {
        self.state.active_target.as_ref()
    }

    /// Store a new location fix. Decisions are refreshed on the next heading update.
    pub fn set_user_location(&mut self, location: GeoPoint) {
        self.state.user_location = Some(location);
    }

    /// Store a new heading and recompute the decision.
    ///
    /// The heading is stored even when the recompute fails for lack of a fix
    /// or a target.
    pub fn set_device_heading(&mut self, heading: f64) -> TrackingResult<IndicatorDecision> {
        self.state.device_heading = normalize_heading(heading)?;
        self.recompute()
    }

    /// Replace the selected target. Decisions are refreshed on the next heading update.
    pub fn set_active_target(&mut self, target: Target) {
        self.state.active_target = Some(target);
    }

    /// Drop the selected target, returning it
    pub fn clear_active_target(&mut self) -> Option<Target> {
        self.state.active_target.take()
    }

    /// Record the renderer's node for the selected target
    pub fn attach_render_handle(&mut self, handle: RenderHandle) -> TrackingResult<()> {
        let target = self
            .state
            .active_target
            .as_mut()
            .ok_or(TrackingError::NoActiveTarget)?;
        target.render_handle = Some(handle);
        Ok(())
    }

    /// Compute the indicator decision from the current state
    pub fn recompute(&self) -> TrackingResult<IndicatorDecision> {
        let user = self.state.user_location.ok_or(TrackingError::NoUserFix)?;
        let target = self
            .state
            .active_target
            .as_ref()
            .ok_or(TrackingError::NoActiveTarget)?;

        let target_bearing = bearing(&user, &target.location);
        let delta = target_bearing - self.state.device_heading;
        let state = IndicatorState::from_delta(delta, self.indicator_threshold_deg);
        let dist = distance(&user, &target.location);

        trace!(
            "target '{}': bearing {:.1}, heading {:.1}, delta {:.1}, distance {:.1} m -> {:?}",
            target.identifier,
            target_bearing,
            self.state.device_heading,
            delta,
            dist,
            state
        );

        Ok(IndicatorDecision {
            state,
            target_bearing,
            distance: dist,
            offset: delta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::bearing::destination;

    fn tracker_with_target_at_bearing(bearing_deg: f64) -> TargetTracker {
        let user = GeoPoint::new_unchecked(40.0, -74.0);
        let target = Target::new("wolf", destination(&user, bearing_deg, 30.0));

        let mut tracker = TargetTracker::new();
        tracker.set_user_location(user);
        tracker.set_active_target(target);
        tracker
    }

    #[test]
    fn test_heading_normalization() {
        let mut tracker = TargetTracker::new();

        let _ = tracker.set_device_heading(-10.0);
        assert!((tracker.device_heading() - 350.0).abs() < 1e-9);

        let _ = tracker.set_device_heading(370.0);
        assert!((tracker.device_heading() - 10.0).abs() < 1e-9);

        let _ = tracker.set_device_heading(360.0);
        assert_eq!(tracker.device_heading(), 0.0);

        let _ = tracker.set_device_heading(-720.5);
        assert!((tracker.device_heading() - 359.5).abs() < 1e-9);

        for h in [-1e-20, -0.0, 0.0, 359.999, 1e6, -1e6] {
            let n = normalize_heading(h).unwrap();
            assert!((0.0..360.0).contains(&n), "{} normalized to {}", h, n);
        }
    }

    #[test]
    fn test_invalid_heading_leaves_state() {
        let mut tracker = TargetTracker::new();
        let _ = tracker.set_device_heading(42.0);

        let result = tracker.set_device_heading(f64::NAN);
        assert!(matches!(result, Err(TrackingError::InvalidHeading { .. })));
        assert!((tracker.device_heading() - 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_decision_boundaries() {
        let mut tracker = tracker_with_target_at_bearing(100.0);

        let decision = tracker.set_device_heading(80.0).unwrap();
        assert_eq!(decision.state, IndicatorState::ShowRight);
        assert!((decision.offset - 20.0).abs() < 1e-6);

        let decision = tracker.set_device_heading(95.0).unwrap();
        assert_eq!(decision.state, IndicatorState::ShowNeither);
        assert!((decision.offset - 5.0).abs() < 1e-6);

        let decision = tracker.set_device_heading(116.0).unwrap();
        assert_eq!(decision.state, IndicatorState::ShowLeft);
        assert!((decision.offset + 16.0).abs() < 1e-6);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert_eq!(IndicatorState::from_delta(15.0, 15.0), IndicatorState::ShowNeither);
        assert_eq!(IndicatorState::from_delta(-15.0, 15.0), IndicatorState::ShowNeither);
        assert_eq!(IndicatorState::from_delta(15.01, 15.0), IndicatorState::ShowRight);
        assert_eq!(IndicatorState::from_delta(-15.01, 15.0), IndicatorState::ShowLeft);
    }

    #[test]
    fn test_recompute_requires_fix() {
        let mut tracker = TargetTracker::new();
        tracker.set_active_target(Target::new("wolf", GeoPoint::new_unchecked(40.0, -74.0)));
        assert_eq!(tracker.recompute(), Err(TrackingError::NoUserFix));

        let mut tracker = TargetTracker::new();
        assert_eq!(tracker.recompute(), Err(TrackingError::NoUserFix));
        assert_eq!(tracker.set_device_heading(10.0), Err(TrackingError::NoUserFix));
    }

    #[test]
    fn test_recompute_requires_target() {
        let mut tracker = TargetTracker::new();
        tracker.set_user_location(GeoPoint::new_unchecked(40.0, -74.0));
        assert_eq!(tracker.recompute(), Err(TrackingError::NoActiveTarget));
    }

    #[test]
    fn test_target_due_south() {
        let target_location = GeoPoint::new_unchecked(40.525206, -74.441388);
        let user = GeoPoint::new_unchecked(40.525206 + 0.001, -74.441388);

        let mut tracker = TargetTracker::new();
        tracker.set_user_location(user);
        tracker.set_active_target(Target::new("wolf", target_location));

        let decision = tracker.set_device_heading(0.0).unwrap();
        assert!((decision.target_bearing - 180.0).abs() < 1e-6);
        assert!((decision.offset - 180.0).abs() < 1e-6);
        // 180 is above the threshold, so the right indicator is shown
        assert_eq!(decision.state, IndicatorState::ShowRight);
        assert!((decision.distance - 111.2).abs() < 0.5);
    }

    #[test]
    fn test_unwrapped_delta_near_north() {
        // Target 10 degrees left of the heading, across the 0/360 seam
        let mut tracker = tracker_with_target_at_bearing(355.0);
        let decision = tracker.set_device_heading(5.0).unwrap();
        assert!((decision.offset - 350.0).abs() < 1e-6);
        assert_eq!(decision.state, IndicatorState::ShowRight);

        // And 10 degrees right of it
        let mut tracker = tracker_with_target_at_bearing(5.0);
        let decision = tracker.set_device_heading(355.0).unwrap();
        assert!((decision.offset + 350.0).abs() < 1e-6);
        assert_eq!(decision.state, IndicatorState::ShowLeft);
    }

    #[test]
    fn test_placement_vector() {
        let mut tracker = tracker_with_target_at_bearing(100.0);
        let decision = tracker.set_device_heading(80.0).unwrap();
        let placement = decision.placement();

        assert!((placement.x - 20.0).abs() < 1e-6);
        assert_eq!(placement.y, 0.0);
        assert!((placement.z + 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_location_and_target_do_not_recompute() {
        let mut tracker = tracker_with_target_at_bearing(100.0);
        let before = tracker.state().clone();

        tracker.set_user_location(GeoPoint::new_unchecked(40.0001, -74.0));
        tracker.set_active_target(Target::new("dragon", GeoPoint::new_unchecked(40.0, -73.9999)));

        assert_ne!(tracker.state(), &before);
        assert_eq!(tracker.device_heading(), before.device_heading);
    }

    #[test]
    fn test_attach_render_handle() {
        let mut tracker = TargetTracker::new();
        assert_eq!(
            tracker.attach_render_handle(RenderHandle(1)),
            Err(TrackingError::NoActiveTarget)
        );

        tracker.set_active_target(Target::new("wolf", GeoPoint::new_unchecked(40.0, -74.0)));
        tracker.attach_render_handle(RenderHandle(1)).unwrap();
        assert!(tracker.active_target().map(|t| t.is_placed()).unwrap_or(false));

        let cleared = tracker.clear_active_target();
        assert!(cleared.is_some());
        assert!(tracker.active_target().is_none());
    }
}
