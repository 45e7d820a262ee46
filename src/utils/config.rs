use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::algorithms::bearing::CoordinateValidator;
use crate::core::{
    GeoPoint, Target, DEFAULT_HEADING_FILTER_DEG, DEFAULT_INDICATOR_THRESHOLD_DEG,
    DEFAULT_REPOSITION_DURATION_S, DEFAULT_SELECTION_RADIUS_M,
};
use crate::validation::error::ConfigError;

/// Hunt-wide configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HuntConfig {
    /// Bearing/heading difference beyond which a side indicator is shown (degrees)
    pub indicator_threshold_deg: f64,
    /// Targets farther than this cannot be selected (meters)
    pub selection_radius_m: f64,
    /// Minimum heading change before an update is processed (degrees)
    pub heading_filter_deg: f64,
    /// Move animation length for already placed targets (seconds)
    pub reposition_duration_s: f64,
    /// Targets seeded into the registry at startup
    pub targets: Vec<TargetSeed>,
}

/// Seed entry for a target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSeed {
    pub identifier: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl TargetSeed {
    pub fn new(identifier: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            identifier: identifier.into(),
            latitude,
            longitude,
        }
    }

    pub fn to_target(&self) -> Target {
        Target::new(
            self.identifier.clone(),
            GeoPoint::new_unchecked(self.latitude, self.longitude),
        )
    }
}

impl Default for HuntConfig {
    fn default() -> Self {
        // Demo site: two wolves and a dragon stacked on the same spot
        let (lat, lon) = (40.525206, -74.441388);
        Self {
            indicator_threshold_deg: DEFAULT_INDICATOR_THRESHOLD_DEG,
            selection_radius_m: DEFAULT_SELECTION_RADIUS_M,
            heading_filter_deg: DEFAULT_HEADING_FILTER_DEG,
            reposition_duration_s: DEFAULT_REPOSITION_DURATION_S,
            targets: vec![
                TargetSeed::new("wolf", lat, lon),
                TargetSeed::new("wolf", lat, lon),
                TargetSeed::new("dragon", lat, lon),
            ],
        }
    }
}

impl HuntConfig {
    pub fn seed_targets(&self) -> Vec<Target> {
        self.targets.iter().map(TargetSeed::to_target).collect()
    }

    /// Check every parameter, returning the first violation
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "indicator_threshold_deg",
            self.indicator_threshold_deg,
            0.0,
            180.0,
        )?;
        check_range("heading_filter_deg", self.heading_filter_deg, 0.0, 180.0)?;
        check_range("reposition_duration_s", self.reposition_duration_s, 0.0, 10.0)?;

        if !self.selection_radius_m.is_finite() || self.selection_radius_m <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "selection_radius_m".to_string(),
                value: self.selection_radius_m.to_string(),
                reason: "must be a positive distance".to_string(),
            });
        }

        for (index, seed) in self.targets.iter().enumerate() {
            if seed.identifier.trim().is_empty() {
                return Err(ConfigError::InvalidParameter {
                    parameter: format!("targets[{}].identifier", index),
                    value: seed.identifier.clone(),
                    reason: "identifier must not be empty".to_string(),
                });
            }

            let point = GeoPoint::new_unchecked(seed.latitude, seed.longitude);
            if let Err(e) = CoordinateValidator::validate(&point) {
                return Err(ConfigError::InvalidParameter {
                    parameter: format!("targets[{}].location", index),
                    value: format!("{}, {}", seed.latitude, seed.longitude),
                    reason: e.to_string(),
                });
            }
        }

        Ok(())
    }
}

fn check_range(parameter: &str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: format!("must be between {} and {}", min, max),
        })
    }
}

/// Loads, validates and saves the hunt configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigurationManager {
    config: HuntConfig,
    config_file_path: Option<String>,
    is_modified: bool,
}

impl ConfigurationManager {
    /// Create a configuration manager with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration manager and load from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn config(&self) -> &HuntConfig {
        &self.config
    }

    /// Replace the configuration after validating it
    pub fn update_config(&mut self, config: HuntConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        self.is_modified = true;
        Ok(())
    }

    /// Change the selection radius
    pub fn set_selection_radius(&mut self, radius_m: f64) -> Result<f64, ConfigError> {
        let mut candidate = self.config.clone();
        candidate.selection_radius_m = radius_m;
        candidate.validate()?;

        let old = self.config.selection_radius_m;
        self.config = candidate;
        self.is_modified = true;
        Ok(old)
    }

    /// Add a target seed
    pub fn add_target(&mut self, seed: TargetSeed) -> Result<(), ConfigError> {
        let mut candidate = self.config.clone();
        candidate.targets.push(seed);
        candidate.validate()?;

        self.config = candidate;
        self.is_modified = true;
        Ok(())
    }

    /// Load configuration from a JSON file. Missing fields take defaults.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path_str.clone(),
            source,
        })?;
        let config: HuntConfig = serde_json::from_str(&content)?;

        // Validate before applying
        config.validate()?;

        info!(
            "loaded configuration from '{}' with {} targets",
            path_str,
            config.targets.len()
        );
        self.config = config;
        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let content = serde_json::to_string_pretty(&self.config)?;

        fs::write(&path, content).map_err(|source| ConfigError::Io {
            path: path_str.clone(),
            source,
        })?;

        debug!("saved configuration to '{}'", path_str);
        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save to the currently loaded file path
    pub fn save(&mut self) -> Result<(), ConfigError> {
        match self.config_file_path.clone() {
            Some(path) => self.save_to_file(path),
            None => Err(ConfigError::NoFilePath),
        }
    }

    /// Check if configuration has been modified since last load or save
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = HuntConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.indicator_threshold_deg, 15.0);
        assert_eq!(config.selection_radius_m, 50.0);

        let names: Vec<String> = config.seed_targets().into_iter().map(|t| t.identifier).collect();
        assert_eq!(names, vec!["wolf", "wolf", "dragon"]);
    }

    #[test]
    fn test_invalid_parameters() {
        let config = HuntConfig {
            selection_radius_m: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { ref parameter, .. }) if parameter == "selection_radius_m"
        ));

        let config = HuntConfig {
            indicator_threshold_deg: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let mut config = HuntConfig::default();
        config.targets.push(TargetSeed::new("griffin", 95.0, 0.0));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { ref parameter, .. }) if parameter == "targets[3].location"
        ));

        let mut config = HuntConfig::default();
        config.targets.push(TargetSeed::new("  ", 0.0, 0.0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_manager_updates() {
        let mut manager = ConfigurationManager::new();
        assert!(!manager.is_modified());

        assert_eq!(manager.set_selection_radius(75.0).unwrap(), 50.0);
        assert!(manager.is_modified());
        assert!(manager.set_selection_radius(-1.0).is_err());
        assert_eq!(manager.config().selection_radius_m, 75.0);

        assert!(manager.add_target(TargetSeed::new("griffin", 40.0, -74.0)).is_ok());
        assert!(manager.add_target(TargetSeed::new("bad", 0.0, 200.0)).is_err());
        assert_eq!(manager.config().targets.len(), 4);

        assert!(matches!(manager.save(), Err(ConfigError::NoFilePath)));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"selection_radius_m": 120.0, "targets": [{{"identifier": "griffin", "latitude": 51.5, "longitude": -0.12}}]}}"#
        )
        .unwrap();

        let manager = ConfigurationManager::from_file(file.path()).unwrap();
        let config = manager.config();
        assert_eq!(config.selection_radius_m, 120.0);
        assert_eq!(config.indicator_threshold_deg, 15.0);
        assert_eq!(config.targets.len(), 1);
        assert!(!manager.is_modified());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hunt.json");

        let mut manager = ConfigurationManager::new();
        manager.set_selection_radius(80.0).unwrap();
        manager.save_to_file(&path).unwrap();
        assert!(!manager.is_modified());

        let reloaded = ConfigurationManager::from_file(&path).unwrap();
        assert_eq!(reloaded.config(), manager.config());
    }

    #[test]
    fn test_invalid_file_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"heading_filter_deg": -3.0}}"#).unwrap();
        assert!(matches!(
            ConfigurationManager::from_file(file.path()),
            Err(ConfigError::InvalidParameter { .. })
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            ConfigurationManager::from_file(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
