//! Core data types for the targeting engine

use serde::{Deserialize, Serialize};

use crate::algorithms::bearing::CoordinateValidator;
use crate::validation::error::TrackingResult;

/// Geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a validated point. Latitude must lie in [-90, 90] and
    /// longitude in [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> TrackingResult<Self> {
        let point = Self { latitude, longitude };
        CoordinateValidator::validate(&point)?;
        Ok(point)
    }

    /// Create a point without range checks, for compile-time constants and
    /// values already known to be valid.
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Opaque reference to a renderable owned by the rendering collaborator.
///
/// The engine never interprets the value; it only records whether a target
/// has one attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenderHandle(pub u64);

impl RenderHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A creature placed in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Display name, e.g. "wolf". Not unique.
    pub identifier: String,
    pub location: GeoPoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_handle: Option<RenderHandle>,
}

impl Target {
    pub fn new(identifier: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            identifier: identifier.into(),
            location,
            render_handle: None,
        }
    }

    pub fn with_render_handle(mut self, handle: RenderHandle) -> Self {
        self.render_handle = Some(handle);
        self
    }

    /// Whether the renderer has attached a node for this target
    pub fn is_placed(&self) -> bool {
        self.render_handle.is_some()
    }
}
