//! Error types shared across the engine

pub mod error;

pub use error::{ConfigError, TrackingError, TrackingResult};
