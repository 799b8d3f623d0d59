// ABOUTME: Main library entry point for the Stridelog activity engine
// ABOUTME: Wires classification, step detection, confidence scoring, and session aggregation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Stridelog

#![deny(unsafe_code)]

//! # Stridelog
//!
//! A stateful activity-classification and session-aggregation engine. It
//! ingests a live stream of positioning fixes and tri-axial acceleration
//! samples and produces, for every fused update, a classified activity state,
//! a confidence score, and incrementally updated session statistics.
//!
//! ## Architecture
//!
//! - **geo**: great-circle distance between consecutive fixes
//! - **signal**: bounded moving-average/variance windows over scalar channels
//! - **classifier**: ordered threshold rules over smoothed speed and motion
//! - **confidence**: [0, 1] scoring of each classification
//! - **steps**: peak detection over the acceleration magnitude stream
//! - **session**: live session state machine and incremental aggregation
//! - **replay**: batch recomputation of statistics from a persisted log
//!
//! The engine is synchronous and single-threaded by design: external
//! collaborators deliver sensor events at their own cadence and every update
//! function is a non-blocking computation over in-memory state.
//!
//! ## Example
//!
//! ```
//! use stridelog::{AccelerationSample, LocationFix, SessionTracker};
//!
//! # fn main() -> stridelog::EngineResult<()> {
//! let mut tracker = SessionTracker::new();
//! tracker.start()?;
//!
//! let fix = LocationFix::new(45.501, -73.567, Some(1.4), 1_000);
//! let sample = AccelerationSample::new(0.1, 0.2, 0.95, 1_050);
//! let record = tracker.process(fix, sample)?;
//! println!("classified as {} ({:.2})", record.activity, record.confidence);
//!
//! let route = tracker.stop("Morning walk")?;
//! assert_eq!(route.records.len(), 1);
//! # Ok(())
//! # }
//! ```

/// Great-circle distance between coordinate pairs
pub mod geo;

/// Bounded sliding windows with mean and variance over scalar samples
pub mod signal;

/// Ordered threshold rules mapping observations to activity states
pub mod classifier;

/// Confidence scoring for classified observations
pub mod confidence;

/// Peak-detection step counting over the acceleration stream
pub mod steps;

/// Live session state machine and incremental statistics aggregation
pub mod session;

/// Batch recomputation of session statistics from a persisted record log
pub mod replay;

pub use classifier::ActivityClassifier;
pub use session::SessionTracker;
pub use signal::SignalHistory;
pub use stridelog_core::{
    AccelerationSample, ActivityRecord, ActivityState, ClassifierConfig, ClassifierConfigOverride,
    EngineError, EngineResult, LocationFix, SavedRoute, SessionStats,
};
