/*!
 * Simulator Configuration
 *
 * Runtime configuration for table sizing and behavioural policies
 */

use super::limits::{MAX_INSTRUCTIONS, MAX_PROCESSES};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// What a Step does when no process is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdleStepPolicy {
    /// Only advance the clock; dispatch waits for the next Unblock
    #[default]
    Skip,
    /// Advance the clock, then try to dispatch from the ready queue
    Dispatch,
}

/// What happens to a process whose Replace load fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplaceFailurePolicy {
    /// Program is left empty and the counter moves one further past the Replace
    #[default]
    Discard,
    /// Previous program is kept and execution continues after the Replace
    Revert,
}

impl FromStr for IdleStepPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "dispatch" => Ok(Self::Dispatch),
            other => Err(format!("unknown idle step policy: {}", other)),
        }
    }
}

impl FromStr for ReplaceFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discard" => Ok(Self::Discard),
            "revert" => Ok(Self::Revert),
            other => Err(format!("unknown replace failure policy: {}", other)),
        }
    }
}

/// Simulator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimConfig {
    /// Number of slots in the process table (at least 1, slot 0 is init)
    pub max_processes: usize,
    /// Longest program the loader accepts
    pub max_instructions: usize,
    pub idle_step: IdleStepPolicy,
    pub replace_failure: ReplaceFailurePolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_processes: MAX_PROCESSES,
            max_instructions: MAX_INSTRUCTIONS,
            idle_step: IdleStepPolicy::default(),
            replace_failure: ReplaceFailurePolicy::default(),
        }
    }
}

impl SimConfig {
    /// Environment variable for the process table capacity
    pub const ENV_MAX_PROCESSES: &'static str = "PROCSIM_MAX_PROCESSES";
    /// Environment variable for the program length limit
    pub const ENV_MAX_INSTRUCTIONS: &'static str = "PROCSIM_MAX_INSTRUCTIONS";
    /// Environment variable for the idle step policy (`skip` | `dispatch`)
    pub const ENV_IDLE_STEP: &'static str = "PROCSIM_IDLE_STEP";
    /// Environment variable for the replace failure policy (`discard` | `revert`)
    pub const ENV_REPLACE_FAILURE: &'static str = "PROCSIM_REPLACE_FAILURE";

    /// Defaults overlaid with any `PROCSIM_*` environment variables
    pub fn from_env() -> Self {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary key lookup; invalid values are logged and skipped
    pub fn overlay<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(n) = parse_var::<usize, _>(&lookup, Self::ENV_MAX_PROCESSES) {
            self = self.with_max_processes(n);
        }
        if let Some(n) = parse_var::<usize, _>(&lookup, Self::ENV_MAX_INSTRUCTIONS) {
            self = self.with_max_instructions(n);
        }
        if let Some(policy) = parse_var::<IdleStepPolicy, _>(&lookup, Self::ENV_IDLE_STEP) {
            self.idle_step = policy;
        }
        if let Some(policy) = parse_var::<ReplaceFailurePolicy, _>(&lookup, Self::ENV_REPLACE_FAILURE) {
            self.replace_failure = policy;
        }
        self
    }

    #[must_use]
    pub fn with_max_processes(mut self, max_processes: usize) -> Self {
        self.max_processes = max_processes.max(1);
        self
    }

    #[must_use]
    pub fn with_max_instructions(mut self, max_instructions: usize) -> Self {
        self.max_instructions = max_instructions;
        self
    }

    #[must_use]
    pub fn with_idle_step(mut self, policy: IdleStepPolicy) -> Self {
        self.idle_step = policy;
        self
    }

    #[must_use]
    pub fn with_replace_failure(mut self, policy: ReplaceFailurePolicy) -> Self {
        self.replace_failure = policy;
        self
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, value = %raw, error = %e, "Ignoring invalid configuration value");
            None
        }
    }
}
