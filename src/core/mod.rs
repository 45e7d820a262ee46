//! Core types and constants for the targeting engine

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
