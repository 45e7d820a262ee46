//! Configuration handling

pub mod config;

pub use config::{ConfigurationManager, HuntConfig, TargetSeed};
