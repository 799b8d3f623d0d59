// ABOUTME: Core data models for sensor inputs and classified activity outputs
// ABOUTME: LocationFix, AccelerationSample, ActivityState, ActivityRecord, SessionStats, SavedRoute
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Stridelog

//! # Data Model
//!
//! Sensor inputs arrive from external location and motion collaborators and
//! are never mutated by the engine. Outputs (`ActivityRecord`) are created
//! once per fused sensor update and appended to an insertion-ordered log;
//! corrections happen by reprocessing the log, not by editing records.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{EngineError, EngineResult};

/// A single reported GPS/location sample
///
/// Produced by the external location collaborator; immutable once created.
/// `speed` may be absent on devices that do not report instantaneous speed;
/// the engine treats a missing speed as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Instantaneous speed in m/s, if the device reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Milliseconds since the Unix epoch
    pub timestamp_ms: i64,
    /// Altitude in meters, if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    /// Horizontal accuracy radius in meters, if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    /// Heading in degrees clockwise from true north, if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
}

impl LocationFix {
    /// Create a fix with the required fields; optional channels default to `None`
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64, speed: Option<f64>, timestamp_ms: i64) -> Self {
        Self {
            latitude,
            longitude,
            speed,
            timestamp_ms,
            altitude: None,
            accuracy: None,
            heading: None,
        }
    }

    /// Reported speed as a non-negative value, or 0 when absent
    ///
    /// Some location stacks report negative speed to signal an invalid
    /// Doppler estimate; the absolute value is used in either case.
    #[must_use]
    pub fn speed_mps(&self) -> f64 {
        self.speed.map_or(0.0, f64::abs)
    }

    /// Whether the coordinates and timestamp are usable for classification
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.speed.map_or(true, f64::is_finite)
    }
}

/// A single tri-axial accelerometer sample in g-units
///
/// Produced by the external motion collaborator, typically at a higher rate
/// than location fixes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccelerationSample {
    /// X-axis acceleration (g)
    pub x: f64,
    /// Y-axis acceleration (g)
    pub y: f64,
    /// Z-axis acceleration (g)
    pub z: f64,
    /// Milliseconds since the Unix epoch
    pub timestamp_ms: i64,
}

impl AccelerationSample {
    /// Create a new sample
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, timestamp_ms: i64) -> Self {
        Self { x, y, z, timestamp_ms }
    }

    /// Euclidean norm of the three-axis vector (g)
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Whether all three axes carry finite values
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Classified physical-activity state
///
/// `Unknown` is the safe fallback when classification cannot proceed (for
/// example on unusable sensor input); the normal rule path never produces it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityState {
    /// Stationary or negligible displacement
    Idle,
    /// Walking pace locomotion
    Walking,
    /// Running pace locomotion
    Running,
    /// Riding in a vehicle
    Vehicle,
    /// Classification could not proceed
    #[default]
    Unknown,
}

impl ActivityState {
    /// Whether this state represents on-foot locomotion (walking or running)
    ///
    /// Steps and calories only accrue in locomotion states.
    #[must_use]
    pub const fn is_locomotion(self) -> bool {
        matches!(self, Self::Walking | Self::Running)
    }

    /// All states in classification precedence order, useful for reporting
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Idle,
            Self::Walking,
            Self::Running,
            Self::Vehicle,
            Self::Unknown,
        ]
    }
}

impl fmt::Display for ActivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Walking => "walking",
            Self::Running => "running",
            Self::Vehicle => "vehicle",
            Self::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ActivityState {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(Self::Idle),
            "walking" => Ok(Self::Walking),
            "running" => Ok(Self::Running),
            "vehicle" => Ok(Self::Vehicle),
            "unknown" => Ok(Self::Unknown),
            other => Err(EngineError::invalid_config(
                "activity_state",
                format!("unrecognized activity state '{other}'"),
            )),
        }
    }
}

/// One classified sample: the immutable output of a fused sensor update
///
/// The embedded `location` and `acceleration` document exactly which inputs
/// this classification consumed, regardless of the caller's fusion cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Unique record identifier
    pub id: String,
    /// Classified activity state
    pub activity: ActivityState,
    /// Classification confidence in [0, 1]
    pub confidence: f64,
    /// The location fix this classification consumed
    pub location: LocationFix,
    /// The acceleration sample this classification consumed
    pub acceleration: AccelerationSample,
    /// Milliseconds since the Unix epoch (newest of the two input timestamps)
    pub timestamp_ms: i64,
    /// Non-negative speed in m/s derived from the location fix
    pub speed: f64,
}

impl ActivityRecord {
    /// Create a record for a fused update, deriving speed and timestamp
    /// from the consumed inputs and clamping confidence to [0, 1]
    #[must_use]
    pub fn new(
        activity: ActivityState,
        confidence: f64,
        location: LocationFix,
        acceleration: AccelerationSample,
    ) -> Self {
        let speed = location.speed_mps();
        let speed = if speed.is_finite() { speed } else { 0.0 };
        let timestamp_ms = location.timestamp_ms.max(acceleration.timestamp_ms);
        Self {
            id: Uuid::new_v4().to_string(),
            activity,
            confidence: confidence.clamp(0.0, 1.0),
            location,
            acceleration,
            timestamp_ms,
            speed,
        }
    }
}

/// Running statistics for one tracking session
///
/// Created at session start, folded incrementally on each record, and closed
/// at session stop. `distance_meters`, `steps`, and `calories` never decrease
/// within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Identifier of the owning session
    pub session_id: String,
    /// Session start, milliseconds since the Unix epoch
    pub start_time_ms: i64,
    /// Session end, set exactly once when the session closes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time_ms: Option<i64>,
    /// Elapsed session time in milliseconds
    pub duration_ms: i64,
    /// Cumulative great-circle distance in meters
    pub distance_meters: f64,
    /// Cumulative detected steps
    pub steps: u64,
    /// Cumulative estimated calories
    pub calories: f64,
    /// Average speed in m/s (mode-dependent, see the session and replay docs)
    pub average_speed: f64,
    /// Maximum observed record speed in m/s
    pub max_speed: f64,
    /// Number of folded records per activity state
    pub activities: HashMap<ActivityState, u64>,
}

impl SessionStats {
    /// Create zeroed statistics for a session starting at `start_time_ms`
    #[must_use]
    pub fn new(session_id: impl Into<String>, start_time_ms: i64) -> Self {
        Self {
            session_id: session_id.into(),
            start_time_ms,
            end_time_ms: None,
            duration_ms: 0,
            distance_meters: 0.0,
            steps: 0,
            calories: 0.0,
            average_speed: 0.0,
            max_speed: 0.0,
            activities: HashMap::new(),
        }
    }

    /// Close the session, freezing the end time and final duration
    pub fn close(&mut self, end_time_ms: i64) {
        self.end_time_ms = Some(end_time_ms);
        self.duration_ms = (end_time_ms - self.start_time_ms).max(0);
    }

    /// Total number of records folded so far (sum of the activity tallies)
    #[must_use]
    pub fn record_count(&self) -> u64 {
        self.activities.values().sum()
    }

    /// Tally for a single activity state, 0 if never observed
    #[must_use]
    pub fn activity_count(&self, state: ActivityState) -> u64 {
        self.activities.get(&state).copied().unwrap_or(0)
    }
}

/// The persisted unit for one completed session
///
/// Immutable once created; deletion removes the whole unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRoute {
    /// Unique route identifier
    pub id: String,
    /// Human-readable route name
    pub name: String,
    /// When the route was saved
    pub date: DateTime<Utc>,
    /// Ordered record log, exactly as folded during the session
    pub records: Vec<ActivityRecord>,
    /// Final closed session statistics
    pub stats: SessionStats,
}

impl SavedRoute {
    /// Assemble a route from a completed session's outputs
    #[must_use]
    pub fn new(name: impl Into<String>, records: Vec<ActivityRecord>, stats: SessionStats) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            date: Utc::now(),
            records,
            stats,
        }
    }

    /// Serialize this route to JSON for the persistence collaborator
    ///
    /// # Errors
    /// Returns `EngineError::Serialization` if encoding fails.
    pub fn to_json(&self) -> EngineResult<String> {
        serde_json::to_string(self).map_err(|source| EngineError::Serialization {
            context: "saved route",
            source,
        })
    }

    /// Deserialize a route previously produced by [`Self::to_json`]
    ///
    /// # Errors
    /// Returns `EngineError::Serialization` if decoding fails.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        serde_json::from_str(json).map_err(|source| EngineError::Serialization {
            context: "saved route",
            source,
        })
    }
}
