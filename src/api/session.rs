//! Hunt session orchestrating tracker, registry and observers
//!
//! The session is the single owner of the tracking state. Sensor and UI
//! collaborators push events into it; map and scene collaborators observe it
//! through registered callbacks.

use log::{debug, info, warn};
use std::collections::HashMap;

use crate::algorithms::bearing::{distance, CoordinateValidator};
use crate::api::types::{CallbackHandle, EventCallback, HuntEvent, SessionSummary};
use crate::core::{GeoPoint, RenderHandle, Target};
use crate::sensors::{EventSource, FeedEvent, HeadingFilter};
use crate::tracking::placement::PlacementAction;
use crate::tracking::registry::TargetRegistry;
use crate::tracking::tracker::{normalize_heading, IndicatorDecision, IndicatorState, TargetTracker};
use crate::utils::config::HuntConfig;
use crate::validation::error::{ConfigError, TrackingError, TrackingResult};

pub struct HuntSession {
    tracker: TargetTracker,
    registry: TargetRegistry,
    heading_filter: HeadingFilter,
    config: HuntConfig,
    /// Indicator last reported to observers
    last_indicator: Option<IndicatorState>,
    callback_counter: u32,
    callbacks: HashMap<CallbackHandle, EventCallback>,
}

impl HuntSession {
    /// Validate the configuration, then create a session and seed the
    /// registry from it
    pub fn new(config: HuntConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let registry = TargetRegistry::from_targets(config.seed_targets());
        info!("hunt session started with {} targets", registry.len());

        Ok(Self {
            tracker: TargetTracker::with_threshold(config.indicator_threshold_deg),
            registry,
            heading_filter: HeadingFilter::new(config.heading_filter_deg),
            config,
            last_indicator: None,
            callback_counter: 0,
            callbacks: HashMap::new(),
        })
    }

    pub fn tracker(&self) -> &TargetTracker {
        &self.tracker
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    pub fn config(&self) -> &HuntConfig {
        &self.config
    }

    /// Register an observer callback
    pub fn register_callback(&mut self, callback: EventCallback) -> CallbackHandle {
        self.callback_counter += 1;
        let handle = CallbackHandle::new(self.callback_counter);
        self.callbacks.insert(handle, callback);
        handle
    }

    /// Unregister an observer callback
    pub fn unregister_callback(&mut self, handle: CallbackHandle) -> TrackingResult<()> {
        self.callbacks
            .remove(&handle)
            .map(|_| ())
            .ok_or(TrackingError::InvalidCallbackHandle { id: handle.id() })
    }

    /// Add a target after startup
    pub fn add_target(&mut self, target: Target) -> TrackingResult<()> {
        CoordinateValidator::validate(&target.location)?;
        self.registry.add(target);
        Ok(())
    }

    /// Store a new location fix
    pub fn update_location(&mut self, point: GeoPoint) -> TrackingResult<()> {
        CoordinateValidator::validate(&point)?;
        self.tracker.set_user_location(point);
        Ok(())
    }

    /// Feed a heading reading. Returns None when the reading is within the
    /// heading filter of the last delivered one.
    pub fn update_heading(&mut self, degrees: f64) -> TrackingResult<Option<IndicatorDecision>> {
        let heading = normalize_heading(degrees)?;
        let Some(heading) = self.heading_filter.accept(heading) else {
            return Ok(None);
        };

        let decision = self.tracker.set_device_heading(heading)?;
        if self.last_indicator != Some(decision.state) {
            self.last_indicator = Some(decision.state);
            self.trigger_event(HuntEvent::IndicatorChanged { decision });
        }
        Ok(Some(decision))
    }

    /// Select the nearest registered target with this identifier, provided it
    /// lies strictly within the selection radius.
    pub fn select_target(&mut self, identifier: &str) -> TrackingResult<()> {
        let user = self.tracker.user_location().ok_or(TrackingError::NoUserFix)?;

        let (target, dist) = self
            .registry
            .iter()
            .filter(|t| t.identifier == identifier)
            .map(|t| (t, distance(&user, &t.location)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or_else(|| TrackingError::NotFound {
                identifier: identifier.to_string(),
            })?;

        if dist >= self.config.selection_radius_m {
            return Err(TrackingError::OutOfRange {
                identifier: identifier.to_string(),
                distance_m: dist,
                limit_m: self.config.selection_radius_m,
            });
        }

        let target = target.clone();
        self.activate(target, dist);
        Ok(())
    }

    /// Select whichever target is closest, if any is within the selection radius
    pub fn select_nearest(&mut self) -> TrackingResult<()> {
        let user = self.tracker.user_location().ok_or(TrackingError::NoUserFix)?;

        let (target, dist) = match self.registry.nearest_within(&user, self.config.selection_radius_m) {
            Some((target, dist)) => (target.clone(), dist),
            None => {
                return Err(TrackingError::NotFound {
                    identifier: "<nearest>".to_string(),
                })
            }
        };
        self.activate(target, dist);
        Ok(())
    }

    fn activate(&mut self, target: Target, distance_m: f64) {
        info!("selected target '{}' at {:.1} m", target.identifier, distance_m);
        let identifier = target.identifier.clone();
        self.tracker.set_active_target(target);
        self.last_indicator = None;
        // Force the next heading reading through so the view is refreshed
        self.heading_filter.reset();
        self.trigger_event(HuntEvent::TargetSelected {
            identifier,
            distance_m,
        });
    }

    /// Record the renderer's node for the active target
    pub fn attach_render_handle(&mut self, handle: RenderHandle) -> TrackingResult<()> {
        self.tracker.attach_render_handle(handle)
    }

    /// Placement instruction for the active target, given whether its node is
    /// currently part of the scene
    pub fn placement_action(&self, in_scene: bool) -> TrackingResult<PlacementAction> {
        let decision = self.tracker.recompute()?;
        let target = self
            .tracker
            .active_target()
            .ok_or(TrackingError::NoActiveTarget)?;

        Ok(PlacementAction::plan(
            target,
            &decision,
            in_scene,
            self.config.reposition_duration_s,
        ))
    }

    /// Handle a successful hit: remove the first target with this identifier
    /// and notify observers.
    pub fn report_hit(&mut self, identifier: &str) -> TrackingResult<Target> {
        let removed = self.registry.remove_matching(identifier)?;

        let was_active = self
            .tracker
            .active_target()
            .map(|t| t.identifier == identifier)
            .unwrap_or(false);
        if was_active {
            self.tracker.clear_active_target();
            self.last_indicator = None;
        }

        info!(
            "target '{}' defeated, {} remaining",
            removed.identifier,
            self.registry.len()
        );
        self.trigger_event(HuntEvent::TargetRemoved {
            target: removed.clone(),
        });
        if self.registry.is_empty() {
            self.trigger_event(HuntEvent::AllTargetsDefeated);
        }

        Ok(removed)
    }

    /// Dispatch a single feed event
    pub fn process(&mut self, event: FeedEvent) -> TrackingResult<Option<IndicatorDecision>> {
        match event {
            FeedEvent::Location { point } => self.update_location(point).map(|_| None),
            FeedEvent::Heading { degrees } => self.update_heading(degrees),
            FeedEvent::Select { identifier } => self.select_target(&identifier).map(|_| None),
            FeedEvent::AttachRenderHandle { handle } => self.attach_render_handle(handle).map(|_| None),
            FeedEvent::Hit { identifier } => self.report_hit(&identifier).map(|_| None),
        }
    }

    /// Drain an event source. Recoverable errors are logged and the event is
    /// skipped; anything else aborts the run.
    pub fn run<S: EventSource + ?Sized>(&mut self, source: &mut S) -> TrackingResult<SessionSummary> {
        let mut summary = SessionSummary::default();

        while let Some(event) = source.next_event() {
            let is_heading = matches!(event, FeedEvent::Heading { .. });
            let hit = match &event {
                FeedEvent::Hit { identifier } => Some(identifier.clone()),
                _ => None,
            };

            match self.process(event) {
                Ok(Some(decision)) => {
                    summary.processed += 1;
                    summary.last_decision = Some(decision);
                }
                Ok(None) if is_heading => summary.filtered += 1,
                Ok(None) => {
                    summary.processed += 1;
                    if let Some(identifier) = hit {
                        summary.removed.push(identifier);
                    }
                }
                Err(e) if e.is_recoverable() => {
                    match e {
                        TrackingError::NoActiveTarget | TrackingError::NoUserFix => {
                            debug!("{}: skipping event: {}", source.source_id(), e)
                        }
                        _ => warn!("{}: skipping event: {}", source.source_id(), e),
                    }
                    summary.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(summary)
    }

    fn trigger_event(&self, event: HuntEvent) {
        for callback in self.callbacks.values() {
            callback(&event);
        }
    }
}
