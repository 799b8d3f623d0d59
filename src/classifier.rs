// ABOUTME: Ordered threshold rules mapping speed and motion observations to activity states
// ABOUTME: Owns the per-session signal histories shared with step detection and confidence scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Stridelog

//! # Activity Classifier
//!
//! Maps an instantaneous `(speed, acceleration magnitude)` observation,
//! combined with the smoothed history, to one [`ActivityState`]. The decision
//! is an ordered first-match rule chain; later rules assume earlier ones did
//! not fire, so the precedence must not be reordered.
//!
//! The classifier owns the two [`SignalHistory`] channels and pushes the
//! current observation *before* deciding, so each sample is part of its own
//! smoothing window. Step detection and confidence scoring read the same
//! histories; the single push here is the only mutation per sample, which
//! keeps the three consumers from double-counting.

use stridelog_core::{ActivityState, ClassifierConfig};

use crate::signal::SignalHistory;

/// Stateful classifier: configuration plus the two smoothing windows
#[derive(Debug, Clone)]
pub struct ActivityClassifier {
    config: ClassifierConfig,
    speed_history: SignalHistory,
    accel_history: SignalHistory,
}

impl ActivityClassifier {
    /// Create a classifier with empty histories sized from the config
    #[must_use]
    pub fn new(config: ClassifierConfig) -> Self {
        let window = config.moving_average_window;
        Self {
            config,
            speed_history: SignalHistory::new(window),
            accel_history: SignalHistory::new(window),
        }
    }

    /// Push the observation into both histories, then classify it
    ///
    /// Always returns a defined state; the fallback to
    /// [`ActivityState::Unknown`] on unusable input is the session pipeline's
    /// responsibility, not part of the rule logic.
    pub fn classify(&mut self, speed: f64, accel_magnitude: f64) -> ActivityState {
        self.speed_history.push(speed);
        self.accel_history.push(accel_magnitude);
        self.decide(speed, accel_magnitude)
    }

    /// Apply the ordered rules to an observation already in the histories
    fn decide(&self, raw_speed: f64, raw_accel: f64) -> ActivityState {
        let speed = self.effective(&self.speed_history, raw_speed);
        let accel = self.effective(&self.accel_history, raw_accel);
        let cfg = &self.config;

        // Rule order is load-bearing: first match wins.
        if speed < cfg.idle_speed_threshold {
            // Low displacement dominates regardless of jostle.
            return ActivityState::Idle;
        }
        if speed >= cfg.vehicle_speed_threshold {
            return ActivityState::Vehicle;
        }
        if speed >= cfg.running_speed_threshold {
            // Fast but low-jostle motion is riding, not running.
            return if accel >= cfg.running_acceleration_threshold {
                ActivityState::Running
            } else {
                ActivityState::Vehicle
            };
        }
        if speed >= cfg.walking_speed_threshold {
            // Brisk cadence at walking speed is reclassified upward.
            return if accel >= cfg.walking_acceleration_threshold {
                ActivityState::Running
            } else {
                ActivityState::Walking
            };
        }
        if accel >= cfg.walking_acceleration_threshold {
            // Low speed but high jostle: e.g. GPS noise while walking in place.
            return ActivityState::Walking;
        }
        ActivityState::Idle
    }

    /// Smoothed value when meaningful history exists, otherwise the raw one
    fn effective(&self, history: &SignalHistory, raw: f64) -> f64 {
        let mean = history.mean();
        if !history.is_empty() && mean > 0.0 {
            mean
        } else {
            raw
        }
    }

    /// The configuration this classifier was built with
    #[must_use]
    pub const fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Smoothing window over recent speeds
    #[must_use]
    pub const fn speed_history(&self) -> &SignalHistory {
        &self.speed_history
    }

    /// Smoothing window over recent acceleration magnitudes
    #[must_use]
    pub const fn accel_history(&self) -> &SignalHistory {
        &self.accel_history
    }

    /// Clear both histories; mandatory at session start and stop so no
    /// smoothing leaks across sessions
    pub fn reset(&mut self) {
        self.speed_history.reset();
        self.accel_history.reset();
    }
}
