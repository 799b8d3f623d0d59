// ABOUTME: Error types for engine invocation and configuration failures
// ABOUTME: Defines EngineError with structured context and the EngineResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Stridelog

//! # Engine Error Handling
//!
//! The engine distinguishes *invocation errors* (caller misuse, reported
//! synchronously with state unchanged) from *degenerate numeric input*
//! (repeat fixes, zero elapsed time), which is never an error and is resolved
//! inline to defined values. Only the former appear here.

/// Common error types for engine operations
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A session is already active; it must be stopped before starting another
    #[error("session '{session_id}' is already active; stop it before starting a new one")]
    SessionAlreadyActive {
        /// Identifier of the currently active session
        session_id: String,
    },

    /// The requested operation requires an active session
    #[error("no active session for operation '{operation}'")]
    NoActiveSession {
        /// Name of the operation that was attempted
        operation: &'static str,
    },

    /// Configuration value is invalid
    #[error("invalid configuration for '{field}': {reason}")]
    InvalidConfig {
        /// Name of the offending configuration field
        field: &'static str,
        /// Reason why the value is invalid
        reason: String,
    },

    /// Serialization error
    #[error("serialization failed for {context}")]
    Serialization {
        /// Context where serialization failed
        context: &'static str,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

impl EngineError {
    /// Convenience constructor for configuration errors
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_carry_context() {
        let err = EngineError::NoActiveSession { operation: "process" };
        assert!(err.to_string().contains("process"));

        let err = EngineError::invalid_config("moving_average_window", "must be at least 1");
        assert!(err.to_string().contains("moving_average_window"));
    }
}
