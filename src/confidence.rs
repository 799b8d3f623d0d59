// ABOUTME: Confidence scoring for classified observations using history state and raw consistency
// ABOUTME: Base score plus data sufficiency, rule consistency, and variance stability bonuses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Stridelog

//! # Confidence Estimator
//!
//! Produces a `[0, 1]` score for a `(raw speed, raw acceleration, chosen
//! activity)` triple. The score starts at a neutral base and earns additive
//! bonuses:
//!
//! - data sufficiency: how full the smoothing window is
//! - rule consistency: the *raw* (non-averaged) observation independently
//!   satisfies the chosen activity's defining thresholds
//! - stability: a full speed window with low variance
//!
//! Raw values are deliberately used for the consistency bonus: when smoothing
//! and the instantaneous observation agree, the classification deserves more
//! trust than when smoothing alone carried the decision.

use stridelog_core::{ActivityState, ClassifierConfig};

use crate::signal::SignalHistory;

/// Neutral starting score before any bonus
const BASE_CONFIDENCE: f64 = 0.5;
/// Maximum bonus for a full smoothing window
const SUFFICIENCY_WEIGHT: f64 = 0.2;
/// Bonus when a full speed window shows low variance
const STABILITY_BONUS: f64 = 0.1;
/// Speed-history variance below which motion counts as stable
const STABILITY_VARIANCE_LIMIT: f64 = 0.5;

/// Score a classification in `[0, 1]`
#[must_use]
pub fn estimate(
    config: &ClassifierConfig,
    speed_history: &SignalHistory,
    activity: ActivityState,
    raw_speed: f64,
    raw_accel: f64,
) -> f64 {
    let mut confidence = BASE_CONFIDENCE;

    if speed_history.window() > 0 {
        let fill = speed_history.len() as f64 / speed_history.window() as f64;
        confidence += fill.min(1.0) * SUFFICIENCY_WEIGHT;
    }

    confidence += consistency_bonus(config, activity, raw_speed, raw_accel);

    if speed_history.is_full() && speed_history.variance() < STABILITY_VARIANCE_LIMIT {
        confidence += STABILITY_BONUS;
    }

    confidence.clamp(0.0, 1.0)
}

/// Bonus earned when the raw observation independently satisfies the chosen
/// activity's defining thresholds
fn consistency_bonus(
    config: &ClassifierConfig,
    activity: ActivityState,
    raw_speed: f64,
    raw_accel: f64,
) -> f64 {
    match activity {
        ActivityState::Idle => {
            if raw_speed < config.idle_speed_threshold
                && raw_accel < config.idle_acceleration_threshold
            {
                0.3
            } else {
                0.0
            }
        }
        ActivityState::Walking => {
            if raw_speed >= config.idle_speed_threshold
                && raw_speed < config.running_speed_threshold
                && raw_accel >= config.walking_acceleration_threshold
            {
                0.25
            } else {
                0.0
            }
        }
        ActivityState::Running => {
            if raw_speed >= config.running_speed_threshold
                && raw_accel >= config.running_acceleration_threshold
            {
                0.3
            } else {
                0.0
            }
        }
        ActivityState::Vehicle => {
            if raw_speed >= config.vehicle_speed_threshold {
                0.3
            } else {
                0.0
            }
        }
        ActivityState::Unknown => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_history(window: usize, values: &[f64]) -> SignalHistory {
        let mut history = SignalHistory::new(window);
        for &v in values {
            history.push(v);
        }
        history
    }

    #[test]
    fn idle_with_consistent_raw_observation_scores_high() {
        let config = ClassifierConfig::default();
        let history = filled_history(5, &[0.2]);
        let score = estimate(&config, &history, ActivityState::Idle, 0.2, 0.05);
        // 0.5 base + 0.04 sufficiency (1/5) + 0.3 idle consistency.
        assert!((score - 0.84).abs() < 1e-9);
    }

    #[test]
    fn running_with_full_stable_history_saturates() {
        let config = ClassifierConfig::default();
        let history = filled_history(5, &[6.0, 6.0, 6.1, 5.9, 6.0]);
        let score = estimate(&config, &history, ActivityState::Running, 6.0, 0.7);
        // 0.5 + 0.2 + 0.3 + 0.1 clamps at 1.0.
        assert_eq!(score, 1.0);
    }

    #[test]
    fn inconsistent_raw_observation_earns_no_bonus() {
        let config = ClassifierConfig::default();
        let history = filled_history(5, &[6.0]);
        // Classified Running via history, but raw speed is walking pace.
        let score = estimate(&config, &history, ActivityState::Running, 2.0, 0.7);
        assert!((score - (0.5 + 0.04)).abs() < 1e-9);
    }

    #[test]
    fn unstable_full_window_skips_stability_bonus() {
        let config = ClassifierConfig::default();
        let history = filled_history(5, &[1.0, 9.0, 1.0, 9.0, 1.0]);
        let score = estimate(&config, &history, ActivityState::Vehicle, 9.0, 0.1);
        // 0.5 + 0.2 + 0.3, variance far above the stability limit.
        assert!((score - 1.0).abs() < 1e-9);
        let score = estimate(&config, &history, ActivityState::Walking, 9.0, 0.1);
        assert!((score - 0.7).abs() < 1e-9);
    }

    #[test]
    fn unknown_never_earns_consistency() {
        let config = ClassifierConfig::default();
        let history = SignalHistory::new(5);
        let score = estimate(&config, &history, ActivityState::Unknown, 0.0, 0.0);
        assert!((score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn score_is_always_within_unit_interval() {
        let config = ClassifierConfig::default();
        for speed in [-5.0, 0.0, 0.3, 2.0, 6.0, 50.0] {
            for accel in [0.0, 0.1, 0.5, 3.0] {
                for activity in ActivityState::all() {
                    let history = filled_history(5, &[speed; 5]);
                    let score = estimate(&config, &history, activity, speed, accel);
                    assert!((0.0..=1.0).contains(&score), "{activity} {speed} {accel}");
                }
            }
        }
    }
}
