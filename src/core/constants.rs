//! Physical constants and gameplay parameters

/// Mean Earth radius used for great-circle distances (m)
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_008.8;

/// Bearing/heading difference beyond which a side indicator is shown (degrees)
pub const DEFAULT_INDICATOR_THRESHOLD_DEG: f64 = 15.0;

/// Maximum distance at which a target may be selected from the map (m)
pub const DEFAULT_SELECTION_RADIUS_M: f64 = 50.0;

/// Minimum heading change before a new heading is delivered (degrees)
pub const DEFAULT_HEADING_FILTER_DEG: f64 = 1.0;

/// Duration of the move animation when an already placed target is repositioned (s)
pub const DEFAULT_REPOSITION_DURATION_S: f64 = 0.2;

/// Full circle in degrees
pub const FULL_CIRCLE_DEG: f64 = 360.0;
