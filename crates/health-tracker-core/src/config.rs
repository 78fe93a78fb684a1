//! Tracker configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid threshold range: min {min} > max {max}")]
    InvalidRange { min: u32, max: u32 },

    #[error("Default threshold {default} outside [{min}, {max}]")]
    DefaultOutOfRange { default: u32, min: u32, max: u32 },

    #[error("Alert capacity {capacity} outside [1, {max}]")]
    CapacityOutOfRange { capacity: usize, max: usize },
}

/// Upper bound on the rolling alert log.
pub const MAX_ALERT_CAPACITY: usize = 5;

/// Adjustable range for the heart-rate alert threshold, in bpm.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ThresholdRange {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl Default for ThresholdRange {
    fn default() -> Self {
        Self {
            min: 60,
            max: 140,
            default: 100,
        }
    }
}

impl ThresholdRange {
    /// Clamp a requested value into the range.
    pub fn clamp(&self, value: u32) -> u32 {
        value.clamp(self.min, self.max)
    }
}

/// Storage keys for persisted state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageKeys {
    pub token: String,
    pub user: String,
    pub patients: String,
    pub contacts: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            token: "token".into(),
            user: "user".into(),
            patients: "patients".into(),
            contacts: "contacts".into(),
        }
    }
}

/// Top-level tracker configuration. Missing fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TrackerConfig {
    pub threshold: ThresholdRange,
    /// Number of alerts kept in the rolling log, at most [`MAX_ALERT_CAPACITY`]
    pub alert_capacity: usize,
    /// Look-back window named in the alert text
    pub alert_window_days: u32,
    pub keys: StorageKeys,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            threshold: ThresholdRange::default(),
            alert_capacity: MAX_ALERT_CAPACITY,
            alert_window_days: 7,
            keys: StorageKeys::default(),
        }
    }
}

impl TrackerConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ThresholdRange { min, max, default } = self.threshold;
        if min > max {
            return Err(ConfigError::InvalidRange { min, max });
        }
        if default < min || default > max {
            return Err(ConfigError::DefaultOutOfRange { default, min, max });
        }
        if !(1..=MAX_ALERT_CAPACITY).contains(&self.alert_capacity) {
            return Err(ConfigError::CapacityOutOfRange {
                capacity: self.alert_capacity,
                max: MAX_ALERT_CAPACITY,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();
        assert_eq!(config.threshold.default, 100);
        assert_eq!(config.threshold.min, 60);
        assert_eq!(config.threshold.max, 140);
        assert_eq!(config.alert_capacity, 5);
        assert_eq!(config.keys.patients, "patients");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = TrackerConfig::from_json(r#"{"alert_capacity": 3}"#).unwrap();
        assert_eq!(config.alert_capacity, 3);
        assert_eq!(config.threshold, ThresholdRange::default());
    }

    #[test]
    fn test_custom_keys() {
        let config = TrackerConfig::from_json(r#"{"keys": {"patients": "app.patients"}}"#).unwrap();
        assert_eq!(config.keys.patients, "app.patients");
        assert_eq!(config.keys.token, "token");
    }

    #[test]
    fn test_invalid_range() {
        let err = TrackerConfig::from_json(r#"{"threshold": {"min": 150, "max": 100}}"#);
        assert!(matches!(err, Err(ConfigError::InvalidRange { .. })));
    }

    #[test]
    fn test_default_out_of_range() {
        let err = TrackerConfig::from_json(r#"{"threshold": {"default": 200}}"#);
        assert!(matches!(err, Err(ConfigError::DefaultOutOfRange { .. })));
    }

    #[test]
    fn test_zero_capacity() {
        let err = TrackerConfig::from_json(r#"{"alert_capacity": 0}"#);
        assert!(matches!(err, Err(ConfigError::CapacityOutOfRange { .. })));
    }

    #[test]
    fn test_capacity_above_five_rejected() {
        let err = TrackerConfig::from_json(r#"{"alert_capacity": 6}"#);
        assert!(matches!(
            err,
            Err(ConfigError::CapacityOutOfRange { capacity: 6, max: 5 })
        ));
        assert!(TrackerConfig::from_json(r#"{"alert_capacity": 5}"#).is_ok());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            TrackerConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_clamp() {
        let range = ThresholdRange::default();
        assert_eq!(range.clamp(10), 60);
        assert_eq!(range.clamp(200), 140);
        assert_eq!(range.clamp(95), 95);
    }
}
