// ABOUTME: Bounded sliding window over scalar samples with mean and variance
// ABOUTME: FIFO eviction keeps at most the configured number of recent values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Stridelog

//! # Signal History
//!
//! One [`SignalHistory`] per scalar channel (speed, acceleration magnitude)
//! smooths the raw sensor stream for the classifier. All operations are total
//! over the current buffer state; an empty window reports 0 for both mean and
//! variance.

use std::collections::VecDeque;

/// Fixed-capacity sliding window over recent scalar samples
#[derive(Debug, Clone)]
pub struct SignalHistory {
    window: usize,
    values: VecDeque<f64>,
}

impl SignalHistory {
    /// Create an empty history retaining at most `window` samples
    #[must_use]
    pub fn new(window: usize) -> Self {
        Self {
            window,
            values: VecDeque::with_capacity(window),
        }
    }

    /// Append a sample, evicting the oldest once the window is full
    pub fn push(&mut self, value: f64) {
        if self.window == 0 {
            return;
        }
        if self.values.len() == self.window {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    /// Arithmetic mean of the current contents, 0 if empty
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Mean squared deviation from the mean, 0 if empty
    #[must_use]
    pub fn variance(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        self.values
            .iter()
            .map(|v| (v - mean) * (v - mean))
            .sum::<f64>()
            / self.values.len() as f64
    }

    /// Clear to empty; called at session start and stop
    pub fn reset(&mut self) {
        self.values.clear();
    }

    /// Number of samples currently held
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the window currently holds no samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether the window has reached its configured capacity
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.window > 0 && self.values.len() == self.window
    }

    /// Configured window capacity
    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }

    /// The two most recent samples as `(previous, newest)`, if present
    #[must_use]
    pub fn last_two(&self) -> Option<(f64, f64)> {
        let len = self.values.len();
        if len < 2 {
            return None;
        }
        Some((self.values[len - 2], self.values[len - 1]))
    }
}
