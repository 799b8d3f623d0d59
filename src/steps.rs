// ABOUTME: Step detection via peak finding over consecutive acceleration magnitudes
// ABOUTME: Pure predicate over the shared history; gating by activity is the caller's job
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Stridelog

//! # Step Detector
//!
//! A footfall shows up as a sharp rise in acceleration magnitude over the
//! previous sample. The detector is a pure predicate over the acceleration
//! history the classifier already maintains; it never pushes samples itself,
//! so each observation is considered exactly once. Gating to Walking/Running
//! is performed by the session pipeline, not here.

use stridelog_core::ClassifierConfig;

use crate::signal::SignalHistory;

/// Whether the newest acceleration sample in `accel_history` is a step peak
///
/// A step requires the newest magnitude to exceed the previous sample by more
/// than `step_detection_threshold` and to exceed
/// `walking_acceleration_threshold` in absolute terms. Returns `false` when
/// fewer than two samples exist.
#[must_use]
pub fn detect_step(config: &ClassifierConfig, accel_history: &SignalHistory) -> bool {
    let Some((previous, newest)) = accel_history.last_two() else {
        return false;
    };
    newest - previous > config.step_detection_threshold
        && newest > config.walking_acceleration_threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(values: &[f64]) -> SignalHistory {
        let mut h = SignalHistory::new(5);
        for &v in values {
            h.push(v);
        }
        h
    }

    #[test]
    fn no_step_with_fewer_than_two_samples() {
        let config = ClassifierConfig::default();
        assert!(!detect_step(&config, &history(&[])));
        assert!(!detect_step(&config, &history(&[99.0])));
    }

    #[test]
    fn sharp_rise_above_floor_is_a_step() {
        let config = ClassifierConfig::default();
        // Rise of 0.5 over the previous sample, newest well above 0.3.
        assert!(detect_step(&config, &history(&[0.4, 0.9])));
    }

    #[test]
    fn gentle_rise_is_not_a_step() {
        let config = ClassifierConfig::default();
        // Rise of 0.1 is below the 0.2 delta.
        assert!(!detect_step(&config, &history(&[0.8, 0.9])));
    }

    #[test]
    fn rise_below_walking_floor_is_not_a_step() {
        let config = ClassifierConfig::default();
        // Big relative rise, but the newest magnitude stays under 0.3.
        assert!(!detect_step(&config, &history(&[0.01, 0.28])));
    }

    #[test]
    fn only_the_two_newest_samples_matter() {
        let config = ClassifierConfig::default();
        assert!(detect_step(&config, &history(&[5.0, 5.0, 5.0, 0.4, 0.9])));
        assert!(!detect_step(&config, &history(&[0.4, 0.9, 5.0, 5.0, 5.0])));
    }
}
