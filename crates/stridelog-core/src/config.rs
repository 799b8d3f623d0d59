// ABOUTME: Classifier configuration with speed/acceleration thresholds and calorie constants
// ABOUTME: Supports partial overrides before a session starts and validation of threshold ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Stridelog

//! # Classifier Configuration
//!
//! All tunable constants for classification, step detection, confidence
//! scoring, and calorie accrual. A config is immutable for the lifetime of a
//! session; callers may apply a [`ClassifierConfigOverride`] between sessions
//! to replace individual values.

use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, EngineResult};

/// Configuration for activity classification and session aggregation
///
/// Speed thresholds are in meters per second, acceleration thresholds in
/// g-units (magnitude of the three-axis accelerometer vector).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Below this effective speed the subject is considered idle (m/s)
    pub idle_speed_threshold: f64,
    /// At or above this effective speed walking becomes plausible (m/s)
    pub walking_speed_threshold: f64,
    /// At or above this effective speed running becomes plausible (m/s)
    pub running_speed_threshold: f64,
    /// At or above this effective speed the subject is assumed in a vehicle (m/s)
    pub vehicle_speed_threshold: f64,
    /// Acceleration magnitude typical of an idle device (g)
    pub idle_acceleration_threshold: f64,
    /// Acceleration magnitude typical of walking cadence (g)
    pub walking_acceleration_threshold: f64,
    /// Acceleration magnitude typical of running cadence (g)
    pub running_acceleration_threshold: f64,
    /// Number of recent samples retained per signal channel for smoothing
    pub moving_average_window: usize,
    /// Minimum rise over the previous acceleration sample to count a step (g)
    pub step_detection_threshold: f64,
    /// Confidence below which consumers should treat a record as unreliable
    pub confidence_threshold: f64,
    /// Calories accrued per detected step while walking or running
    pub calories_per_step: f64,
    /// Additional calories per kilometer covered while classified as running
    pub calories_per_km_running: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            idle_speed_threshold: 0.5,
            walking_speed_threshold: 2.5,
            running_speed_threshold: 5.0,
            vehicle_speed_threshold: 8.0,
            idle_acceleration_threshold: 0.15,
            walking_acceleration_threshold: 0.3,
            running_acceleration_threshold: 0.6,
            moving_average_window: 5,
            step_detection_threshold: 0.2,
            confidence_threshold: 0.6,
            calories_per_step: 0.04,
            calories_per_km_running: 60.0,
        }
    }
}

impl ClassifierConfig {
    /// Validate threshold ordering and value ranges
    ///
    /// # Errors
    /// Returns `EngineError::InvalidConfig` if the speed or acceleration
    /// thresholds are not strictly increasing, the smoothing window is zero,
    /// or any constant is negative or non-finite.
    pub fn validate(&self) -> EngineResult<()> {
        let speeds = [
            ("idle_speed_threshold", self.idle_speed_threshold),
            ("walking_speed_threshold", self.walking_speed_threshold),
            ("running_speed_threshold", self.running_speed_threshold),
            ("vehicle_speed_threshold", self.vehicle_speed_threshold),
        ];
        let accels = [
            (
                "idle_acceleration_threshold",
                self.idle_acceleration_threshold,
            ),
            (
                "walking_acceleration_threshold",
                self.walking_acceleration_threshold,
            ),
            (
                "running_acceleration_threshold",
                self.running_acceleration_threshold,
            ),
        ];

        for (field, value) in speeds.iter().chain(accels.iter()).copied() {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::invalid_config(
                    field,
                    format!("must be a non-negative finite number, got {value}"),
                ));
            }
        }
        for window in [speeds.windows(2), accels.windows(2)].into_iter().flatten() {
            let (lower_name, lower) = window[0];
            let (upper_name, upper) = window[1];
            if lower >= upper {
                return Err(EngineError::invalid_config(
                    upper_name,
                    format!("must be greater than {lower_name} ({lower} >= {upper})"),
                ));
            }
        }

        if self.moving_average_window == 0 {
            return Err(EngineError::invalid_config(
                "moving_average_window",
                "must be at least 1",
            ));
        }
        if !self.step_detection_threshold.is_finite() || self.step_detection_threshold <= 0.0 {
            return Err(EngineError::invalid_config(
                "step_detection_threshold",
                format!(
                    "must be a positive finite number, got {}",
                    self.step_detection_threshold
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(EngineError::invalid_config(
                "confidence_threshold",
                format!("must be within [0, 1], got {}", self.confidence_threshold),
            ));
        }
        for (field, value) in [
            ("calories_per_step", self.calories_per_step),
            ("calories_per_km_running", self.calories_per_km_running),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::invalid_config(
                    field,
                    format!("must be a non-negative finite number, got {value}"),
                ));
            }
        }

        Ok(())
    }
}

/// Partial replacement for [`ClassifierConfig`] fields
///
/// Every field is optional; `None` keeps the current value. Overrides are
/// applied between sessions only, so a running session always observes a
/// single consistent set of constants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfigOverride {
    /// Replacement idle speed threshold (m/s)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_speed_threshold: Option<f64>,
    /// Replacement walking speed threshold (m/s)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walking_speed_threshold: Option<f64>,
    /// Replacement running speed threshold (m/s)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub running_speed_threshold: Option<f64>,
    /// Replacement vehicle speed threshold (m/s)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_speed_threshold: Option<f64>,
    /// Replacement idle acceleration threshold (g)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_acceleration_threshold: Option<f64>,
    /// Replacement walking acceleration threshold (g)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walking_acceleration_threshold: Option<f64>,
    /// Replacement running acceleration threshold (g)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub running_acceleration_threshold: Option<f64>,
    /// Replacement smoothing window length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moving_average_window: Option<usize>,
    /// Replacement step detection delta (g)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_detection_threshold: Option<f64>,
    /// Replacement confidence threshold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_threshold: Option<f64>,
    /// Replacement calories-per-step constant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_per_step: Option<f64>,
    /// Replacement calories-per-km-running constant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_per_km_running: Option<f64>,
}

impl ClassifierConfigOverride {
    /// Merge this override into `base`, returning the resulting config
    ///
    /// The result is not validated here; callers validate before adopting it
    /// so a rejected override leaves their current config untouched.
    #[must_use]
    pub fn apply(&self, base: &ClassifierConfig) -> ClassifierConfig {
        ClassifierConfig {
            idle_speed_threshold: self
                .idle_speed_threshold
                .unwrap_or(base.idle_speed_threshold),
            walking_speed_threshold: self
                .walking_speed_threshold
                .unwrap_or(base.walking_speed_threshold),
            running_speed_threshold: self
                .running_speed_threshold
                .unwrap_or(base.running_speed_threshold),
            vehicle_speed_threshold: self
                .vehicle_speed_threshold
                .unwrap_or(base.vehicle_speed_threshold),
            idle_acceleration_threshold: self
                .idle_acceleration_threshold
                .unwrap_or(base.idle_acceleration_threshold),
            walking_acceleration_threshold: self
                .walking_acceleration_threshold
                .unwrap_or(base.walking_acceleration_threshold),
            running_acceleration_threshold: self
                .running_acceleration_threshold
                .unwrap_or(base.running_acceleration_threshold),
            moving_average_window: self
                .moving_average_window
                .unwrap_or(base.moving_average_window),
            step_detection_threshold: self
                .step_detection_threshold
                .unwrap_or(base.step_detection_threshold),
            confidence_threshold: self
                .confidence_threshold
                .unwrap_or(base.confidence_threshold),
            calories_per_step: self.calories_per_step.unwrap_or(base.calories_per_step),
            calories_per_km_running: self
                .calories_per_km_running
                .unwrap_or(base.calories_per_km_running),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ClassifierConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_window() {
        let config = ClassifierConfig {
            moving_average_window: 0,
            ..ClassifierConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unordered_speed_thresholds() {
        let config = ClassifierConfig {
            walking_speed_threshold: 0.4, // below idle threshold
            ..ClassifierConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_confidence_threshold() {
        let config = ClassifierConfig {
            confidence_threshold: 1.5,
            ..ClassifierConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn override_replaces_only_named_fields() {
        let base = ClassifierConfig::default();
        let patch = ClassifierConfigOverride {
            vehicle_speed_threshold: Some(10.0),
            moving_average_window: Some(8),
            ..ClassifierConfigOverride::default()
        };

        let merged = patch.apply(&base);
        assert_eq!(merged.vehicle_speed_threshold, 10.0);
        assert_eq!(merged.moving_average_window, 8);
        assert_eq!(merged.idle_speed_threshold, base.idle_speed_threshold);
        assert_eq!(merged.calories_per_step, base.calories_per_step);
    }

    #[test]
    fn empty_override_is_identity() {
        let base = ClassifierConfig::default();
        let merged = ClassifierConfigOverride::default().apply(&base);
        assert_eq!(merged, base);
    }
}
