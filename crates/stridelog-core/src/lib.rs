// ABOUTME: Core types and constants for the Stridelog activity engine
// ABOUTME: Foundation crate with data models, error types, and classifier configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Stridelog

#![deny(unsafe_code)]

//! # Stridelog Core
//!
//! Foundation crate providing the shared data model, error types, and
//! classifier configuration for the Stridelog activity engine. This crate is
//! designed to change infrequently; the algorithmic pipeline lives in the
//! `stridelog` crate and depends on the types defined here.
//!
//! ## Modules
//!
//! - **models**: Sensor inputs (`LocationFix`, `AccelerationSample`) and
//!   engine outputs (`ActivityRecord`, `SessionStats`, `SavedRoute`)
//! - **errors**: Unified error handling with `EngineError` and `EngineResult`
//! - **config**: `ClassifierConfig` thresholds and partial override support

/// Unified error handling for engine invocation and configuration failures
pub mod errors;

/// Classifier thresholds, aggregation constants, and override support
pub mod config;

/// Core data models (sensor inputs, activity records, session statistics)
pub mod models;

pub use config::{ClassifierConfig, ClassifierConfigOverride};
pub use errors::{EngineError, EngineResult};
pub use models::{
    AccelerationSample, ActivityRecord, ActivityState, LocationFix, SavedRoute, SessionStats,
};
