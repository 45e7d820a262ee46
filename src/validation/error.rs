//! Error types for tracking and configuration

use thiserror::Error;

/// Errors raised by the targeting engine.
///
/// None of these are fatal: a caller that receives one skips the render
/// update for that tick and waits for the next sensor event.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackingError {
    /// Recompute requested while no target is selected
    #[error("no active target selected")]
    NoActiveTarget,
    /// Recompute requested before the first location fix
    #[error("no user location fix available yet")]
    NoUserFix,
    /// No target with the given identifier is registered
    #[error("target '{identifier}' not found")]
    NotFound { identifier: String },
    /// Target exists but is too far away to be selected
    #[error("target '{identifier}' is {distance_m:.1} m away, selection limit is {limit_m:.1} m")]
    OutOfRange {
        identifier: String,
        distance_m: f64,
        limit_m: f64,
    },
    /// Coordinate outside the WGS84 range or not finite
    #[error("invalid coordinate: lat={latitude}, lon={longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
    /// Heading reading that cannot be normalized
    #[error("invalid heading: {value}")]
    InvalidHeading { value: f64 },
    /// Callback handle that was never issued or already removed
    #[error("invalid callback handle {id}")]
    InvalidCallbackHandle { id: u32 },
}

impl TrackingError {
    /// Whether the event loop may skip this error and continue
    pub fn is_recoverable(&self) -> bool {
        match self {
            TrackingError::NoActiveTarget
            | TrackingError::NoUserFix
            | TrackingError::NotFound { .. }
            | TrackingError::OutOfRange { .. }
            | TrackingError::InvalidCoordinate { .. }
            | TrackingError::InvalidHeading { .. } => true,
            TrackingError::InvalidCallbackHandle { .. } => false,
        }
    }
}

/// Result type for tracking operations
pub type TrackingResult<T> = Result<T, TrackingError>;

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read or written
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON (de)serialization failure
    #[error("serialization error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Parameter outside its valid range
    #[error("invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
    /// No file path known for an implicit save
    #[error("no file path set for saving configuration")]
    NoFilePath,
}
