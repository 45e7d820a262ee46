//! Heading delivery threshold
//!
//! Compass hardware reports continuously; the engine only wants a reading
//! once the heading has moved by more than the filter angle since the last
//! delivered one.

use crate::core::{DEFAULT_HEADING_FILTER_DEG, FULL_CIRCLE_DEG};

#[derive(Debug, Clone)]
pub struct HeadingFilter {
    filter_deg: f64,
    last_delivered: Option<f64>,
}

impl Default for HeadingFilter {
    fn default() -> Self {
        Self::new(DEFAULT_HEADING_FILTER_DEG)
    }
}

impl HeadingFilter {
    pub fn new(filter_deg: f64) -> Self {
        Self {
            filter_deg: filter_deg.max(0.0),
            last_delivered: None,
        }
    }

    pub fn filter_deg(&self) -> f64 {
        self.filter_deg
    }

    /// Returns the reading when it should be delivered. The first reading is
    /// always delivered; later ones only when the change on the circle
    /// exceeds the filter angle.
    pub fn accept(&mut self, heading: f64) -> Option<f64> {
        let deliver = match self.last_delivered {
            None => true,
            Some(last) => angular_difference(last, heading) > self.filter_deg,
        };

        if deliver {
            self.last_delivered = Some(heading);
            Some(heading)
        } else {
            None
        }
    }

    /// Forget the last delivered reading
    pub fn reset(&mut self) {
        self.last_delivered = None;
    }
}

/// Smallest absolute angle between two headings, in [0, 180]
fn angular_difference(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(FULL_CIRCLE_DEG);
    diff.min(FULL_CIRCLE_DEG - diff)
}
