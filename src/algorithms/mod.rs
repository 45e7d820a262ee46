//! Geodesy used by the tracker

pub mod bearing;

pub use bearing::{bearing, destination, distance, CoordinateValidator};
