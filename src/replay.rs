// ABOUTME: Batch recomputation of session statistics from a persisted record log
// ABOUTME: Rebuilds step detection history in log order; independent of original sampling rate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Stridelog

//! # Batch Replay
//!
//! Recomputes [`SessionStats`] from a complete ordered [`ActivityRecord`] log
//! and a [`ClassifierConfig`], as used when finalizing or re-deriving a
//! session from persistence. The computation depends only on the persisted
//! record sequence, never on the original live sampling rate, and is
//! idempotent: recomputing twice over the same log yields identical output.
//!
//! Unlike the live aggregator, average speed here is the arithmetic mean of
//! all positive per-record speeds, and the running calorie bonus covers the
//! distance accumulated while classified as running.

use chrono::Utc;
use tracing::debug;

use stridelog_core::{ActivityRecord, ActivityState, ClassifierConfig, SessionStats};

use crate::geo;
use crate::signal::SignalHistory;
use crate::steps;

/// Recompute closed statistics for `session_id` from an ordered record log
///
/// An empty log is not an error: it yields zero-valued statistics closed at
/// the current time.
#[must_use]
pub fn recompute_stats(
    session_id: &str,
    records: &[ActivityRecord],
    config: &ClassifierConfig,
) -> SessionStats {
    let Some(first) = records.first() else {
        let mut stats = SessionStats::new(session_id, Utc::now().timestamp_millis());
        stats.close(stats.start_time_ms);
        return stats;
    };

    let mut stats = SessionStats::new(session_id, first.timestamp_ms);
    let mut accel_history = SignalHistory::new(config.moving_average_window);
    let mut previous: Option<&ActivityRecord> = None;
    let mut running_distance = 0.0_f64;
    let mut speed_sum = 0.0_f64;
    let mut speed_count = 0_u64;

    for record in records {
        let increment = previous
            .map(|prev| {
                geo::haversine_distance(
                    prev.location.latitude,
                    prev.location.longitude,
                    record.location.latitude,
                    record.location.longitude,
                )
            })
            .filter(|d| d.is_finite())
            .unwrap_or(0.0)
            .max(0.0);
        stats.distance_meters += increment;
        if record.activity == ActivityState::Running {
            running_distance += increment;
        }

        // Step detection history is rebuilt from scratch in log order.
        accel_history.push(record.acceleration.magnitude());
        if record.activity.is_locomotion() && steps::detect_step(config, &accel_history) {
            stats.steps += 1;
        }

        if record.speed > 0.0 {
            speed_sum += record.speed;
            speed_count += 1;
            stats.max_speed = stats.max_speed.max(record.speed);
        }
        *stats.activities.entry(record.activity).or_insert(0) += 1;
        previous = Some(record);
    }

    stats.calories = stats.steps as f64 * config.calories_per_step
        + (running_distance / 1000.0) * config.calories_per_km_running;
    stats.average_speed = if speed_count > 0 {
        speed_sum / speed_count as f64
    } else {
        0.0
    };

    let last_ms = records.last().map_or(stats.start_time_ms, |r| r.timestamp_ms);
    stats.close(last_ms);
    debug!(
        session_id = %session_id,
        records = records.len(),
        distance_m = stats.distance_meters,
        steps = stats.steps,
        "recomputed session statistics from log"
    );
    stats
}
