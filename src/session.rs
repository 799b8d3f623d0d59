// ABOUTME: Live session state machine and incremental statistics aggregation
// ABOUTME: Fuses location and acceleration updates into immutable activity records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Stridelog

//! # Session Tracking
//!
//! A [`SessionTracker`] moves through an explicit state machine:
//! idle (no session) → `start()` → active (records folding) → `stop()` →
//! closed stats handed over as a [`SavedRoute`], back to idle. All smoothing
//! state lives inside the active session, so nothing leaks between sessions
//! and independent trackers never share state.
//!
//! Each call to [`SessionTracker::process`] consumes exactly one location fix
//! and one acceleration sample. The caller decides the fusion cadence
//! (classify on every acceleration tick with the latest fix, or on every fix
//! with the latest sample); the emitted record embeds both consumed inputs,
//! so the decision is always reconstructable from the log.

use chrono::Utc;
use tracing::{debug, warn};

use stridelog_core::{
    AccelerationSample, ActivityRecord, ActivityState, ClassifierConfig, ClassifierConfigOverride,
    EngineError, EngineResult, LocationFix, SavedRoute, SessionStats,
};
use uuid::Uuid;

use crate::classifier::ActivityClassifier;
use crate::confidence;
use crate::geo;
use crate::steps;

/// State held only while a session is active
#[derive(Debug)]
struct ActiveSession {
    classifier: ActivityClassifier,
    stats: SessionStats,
    records: Vec<ActivityRecord>,
    last_fix: Option<LocationFix>,
}

/// Activity tracking engine: configuration plus at most one active session
#[derive(Debug)]
pub struct SessionTracker {
    config: ClassifierConfig,
    active: Option<ActiveSession>,
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionTracker {
    /// Create a tracker with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ClassifierConfig::default(),
            active: None,
        }
    }

    /// Create a tracker with a custom configuration
    ///
    /// # Errors
    /// Returns `EngineError::InvalidConfig` if the configuration fails
    /// validation.
    pub fn with_config(config: ClassifierConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            active: None,
        })
    }

    /// The configuration the next session will use
    #[must_use]
    pub const fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Whether a session is currently active
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Apply a partial configuration override for subsequent sessions
    ///
    /// # Errors
    /// Returns `EngineError::SessionAlreadyActive` while a session is running
    /// (configuration is immutable for a session's lifetime), or
    /// `EngineError::InvalidConfig` if the merged result fails validation; in
    /// both cases the current configuration is unchanged.
    pub fn apply_override(&mut self, patch: &ClassifierConfigOverride) -> EngineResult<()> {
        if let Some(active) = &self.active {
            return Err(EngineError::SessionAlreadyActive {
                session_id: active.stats.session_id.clone(),
            });
        }
        let merged = patch.apply(&self.config);
        merged.validate()?;
        self.config = merged;
        Ok(())
    }

    /// Start a new session, returning its identifier
    ///
    /// # Errors
    /// Returns `EngineError::SessionAlreadyActive` if a session is running;
    /// it must be stopped first.
    pub fn start(&mut self) -> EngineResult<String> {
        if let Some(active) = &self.active {
            return Err(EngineError::SessionAlreadyActive {
                session_id: active.stats.session_id.clone(),
            });
        }

        let session_id = Uuid::new_v4().to_string();
        let started_at = Utc::now().timestamp_millis();
        debug!(session_id = %session_id, "session started");

        self.active = Some(ActiveSession {
            classifier: ActivityClassifier::new(self.config.clone()),
            stats: SessionStats::new(session_id.clone(), started_at),
            records: Vec::new(),
            last_fix: None,
        });
        Ok(session_id)
    }

    /// Process one fused sensor update and fold the result into the session
    ///
    /// Runs the full pipeline: smooth, classify, score, detect a step, and
    /// update the running statistics. Unusable sensor input (non-finite
    /// coordinates or axes) does not halt the pipeline; the update is recorded
    /// as [`ActivityState::Unknown`] with confidence 0 and contributes no
    /// distance, steps, or calories.
    ///
    /// # Errors
    /// Returns `EngineError::NoActiveSession` when called before `start()`.
    pub fn process(
        &mut self,
        fix: LocationFix,
        sample: AccelerationSample,
    ) -> EngineResult<ActivityRecord> {
        let config = &self.config;
        let active = self.active.as_mut().ok_or(EngineError::NoActiveSession {
            operation: "process",
        })?;

        let usable = fix.is_usable() && sample.is_usable();
        let (activity, confidence, step) = if usable {
            let speed = fix.speed_mps();
            let magnitude = sample.magnitude();
            let activity = active.classifier.classify(speed, magnitude);
            let confidence = confidence::estimate(
                config,
                active.classifier.speed_history(),
                activity,
                speed,
                magnitude,
            );
            let step = activity.is_locomotion()
                && steps::detect_step(config, active.classifier.accel_history());
            (activity, confidence, step)
        } else {
            warn!(
                timestamp_ms = fix.timestamp_ms,
                "unusable sensor input, recording as unknown"
            );
            (ActivityState::Unknown, 0.0, false)
        };

        let distance_increment = if usable {
            active
                .last_fix
                .as_ref()
                .map(|previous| {
                    geo::haversine_distance(
                        previous.latitude,
                        previous.longitude,
                        fix.latitude,
                        fix.longitude,
                    )
                })
                .filter(|d| d.is_finite())
                .unwrap_or(0.0)
        } else {
            0.0
        };

        let record = ActivityRecord::new(activity, confidence, fix.clone(), sample);
        if record.confidence < config.confidence_threshold {
            debug!(
                activity = %record.activity,
                confidence = record.confidence,
                "record below confidence threshold"
            );
        }

        Self::fold(config, &mut active.stats, &record, distance_increment, step);

        if usable {
            active.last_fix = Some(fix);
        }
        active.records.push(record.clone());
        Ok(record)
    }

    /// Fold one record into the running statistics
    ///
    /// Distance, steps, and calories only ever grow; average speed is
    /// recomputed from cumulative distance over elapsed wall time, which
    /// stays stable under irregular sampling.
    fn fold(
        config: &ClassifierConfig,
        stats: &mut SessionStats,
        record: &ActivityRecord,
        distance_increment: f64,
        step: bool,
    ) {
        stats.distance_meters += distance_increment.max(0.0);

        if step {
            stats.steps += 1;
            stats.calories += match record.activity {
                ActivityState::Walking => config.calories_per_step,
                ActivityState::Running => {
                    config.calories_per_step
                        + (distance_increment / 1000.0) * config.calories_per_km_running
                }
                _ => 0.0,
            };
        }

        stats.max_speed = stats.max_speed.max(record.speed);
        *stats.activities.entry(record.activity).or_insert(0) += 1;

        let now_ms = Utc::now().timestamp_millis();
        stats.duration_ms = (now_ms - stats.start_time_ms).max(0);
        let elapsed_seconds = stats.duration_ms as f64 / 1000.0;
        stats.average_speed = if elapsed_seconds > 0.0 {
            stats.distance_meters / elapsed_seconds
        } else {
            0.0
        };
    }

    /// Stop the active session and hand its outputs over as a [`SavedRoute`]
    ///
    /// Statistics are closed deterministically with whatever records were
    /// folded so far; stopping early is cancellation, not an error. Smoothing
    /// state is discarded with the session.
    ///
    /// # Errors
    /// Returns `EngineError::NoActiveSession` when no session is running.
    pub fn stop(&mut self, name: impl Into<String>) -> EngineResult<SavedRoute> {
        let mut active = self
            .active
            .take()
            .ok_or(EngineError::NoActiveSession { operation: "stop" })?;

        active.classifier.reset();
        let ended_at = Utc::now().timestamp_millis();
        active.stats.close(ended_at);
        debug!(
            session_id = %active.stats.session_id,
            records = active.records.len(),
            distance_m = active.stats.distance_meters,
            "session stopped"
        );

        Ok(SavedRoute::new(name, active.records, active.stats))
    }

    /// Snapshot of the active session's statistics, if any
    #[must_use]
    pub fn stats(&self) -> Option<&SessionStats> {
        self.active.as_ref().map(|a| &a.stats)
    }

    /// The most recent record of the active session, if any
    #[must_use]
    pub fn last_record(&self) -> Option<&ActivityRecord> {
        self.active.as_ref().and_then(|a| a.records.last())
    }

    /// Number of records folded into the active session so far
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.active.as_ref().map_or(0, |a| a.records.len())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn start_while_active_is_rejected_and_state_unchanged() {
        let mut tracker = SessionTracker::new();
        let id = tracker.start().unwrap();
        let err = tracker.start().unwrap_err();
        assert!(matches!(err, EngineError::SessionAlreadyActive { .. }));
        assert_eq!(tracker.stats().unwrap().session_id, id);
    }

    #[test]
    fn process_without_session_is_rejected() {
        let mut tracker = SessionTracker::new();
        let err = tracker
            .process(
                LocationFix::new(0.0, 0.0, Some(1.0), 0),
                AccelerationSample::new(0.0, 0.0, 1.0, 0),
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::NoActiveSession { .. }));
    }

    #[test]
    fn override_is_rejected_while_active() {
        let mut tracker = SessionTracker::new();
        tracker.start().unwrap();
        let patch = ClassifierConfigOverride {
            moving_average_window: Some(10),
            ..ClassifierConfigOverride::default()
        };
        assert!(tracker.apply_override(&patch).is_err());
        tracker.stop("t").unwrap();
        assert!(tracker.apply_override(&patch).is_ok());
        assert_eq!(tracker.config().moving_average_window, 10);
    }

    #[test]
    fn rejected_override_leaves_config_untouched() {
        let mut tracker = SessionTracker::new();
        let patch = ClassifierConfigOverride {
            moving_average_window: Some(0),
            ..ClassifierConfigOverride::default()
        };
        assert!(tracker.apply_override(&patch).is_err());
        assert_eq!(tracker.config().moving_average_window, 5);
    }

    #[test]
    fn unusable_input_records_unknown_without_accrual() {
        let mut tracker = SessionTracker::new();
        tracker.start().unwrap();
        let record = tracker
            .process(
                LocationFix::new(f64::NAN, 0.0, Some(3.0), 1_000),
                AccelerationSample::new(0.0, 0.0, 1.0, 1_000),
            )
            .unwrap();
        assert_eq!(record.activity, ActivityState::Unknown);
        assert_eq!(record.confidence, 0.0);

        let stats = tracker.stats().unwrap();
        assert_eq!(stats.distance_meters, 0.0);
        assert_eq!(stats.steps, 0);
        assert_eq!(stats.activity_count(ActivityState::Unknown), 1);
    }

    #[test]
    fn tally_sum_matches_record_count() {
        let mut tracker = SessionTracker::new();
        tracker.start().unwrap();
        for i in 0..10 {
            tracker
                .process(
                    LocationFix::new(45.5, -73.6, Some(0.2), i * 1_000),
                    AccelerationSample::new(0.0, 0.0, 0.05, i * 1_000),
                )
                .unwrap();
        }
        let stats = tracker.stats().unwrap();
        assert_eq!(stats.record_count(), 10);
        assert_eq!(stats.record_count() as usize, tracker.record_count());
    }
}
