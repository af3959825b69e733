/*!
 * Turnaround Statistics
 * Accumulated over every process that has terminated
 */

use crate::core::types::Tick;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TurnaroundStats {
    /// Sum of (termination tick + 1 - start time)
    pub total: Tick,
    pub terminated: u64,
}

impl TurnaroundStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, turnaround: Tick) {
        self.total += turnaround;
        self.terminated += 1;
    }

    /// Mean turnaround, 0.0 before anything has terminated
    pub fn average(&self) -> f64 {
        if self.terminated == 0 {
            0.0
        } else {
            self.total as f64 / self.terminated as f64
        }
    }
}

impl fmt::Display for TurnaroundStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Average turnaround time: {:.6}", self.average())
    }
}
