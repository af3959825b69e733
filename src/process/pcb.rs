/*!
 * Process Control Block
 * Saved state of one simulated process
 */

use super::program::Program;
use crate::core::types::{Pid, Priority, Register, Tick};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Waiting in the ready queue
    Ready,
    /// Loaded into the CPU
    Running,
    /// Waiting in the blocked queue for an unblock
    Blocked,
    /// Slot is free for reuse
    Terminated,
}

impl ProcessState {
    /// Whether a slot in this state holds a live process
    #[inline]
    pub fn is_live(self) -> bool {
        !matches!(self, Self::Terminated)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::Running => "RUNNING",
            Self::Blocked => "BLOCKED",
            Self::Terminated => "TERMINATED",
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessControlBlock {
    pub pid: Pid,
    /// `None` only for init
    pub parent_pid: Option<Pid>,
    pub program: Program,
    pub program_counter: usize,
    pub value: Register,
    pub priority: Priority,
    pub state: ProcessState,
    pub start_time: Tick,
    /// Carried for reporting; nothing accumulates into it
    pub time_used: Tick,
}

impl ProcessControlBlock {
    /// A fresh process at the start of `program`, ready to be queued
    pub fn new(pid: Pid, parent_pid: Option<Pid>, program: Program, start_time: Tick) -> Self {
        Self {
            pid,
            parent_pid,
            program,
            program_counter: 0,
            value: 0,
            priority: 0,
            state: ProcessState::Ready,
            start_time,
            time_used: 0,
        }
    }

    /// Child of this process resuming at `program_counter` with register `value`
    pub fn fork(
        &self,
        pid: Pid,
        program_counter: usize,
        value: Register,
        start_time: Tick,
    ) -> Self {
        Self {
            pid,
            parent_pid: Some(self.pid),
            program: self.program.clone(),
            program_counter,
            value,
            priority: self.priority,
            state: ProcessState::Ready,
            start_time,
            time_used: 0,
        }
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.state.is_live()
    }
}

impl Default for ProcessControlBlock {
    /// A free slot
    fn default() -> Self {
        Self {
            pid: 0,
            parent_pid: None,
            program: Program::default(),
            program_counter: 0,
            value: 0,
            priority: 0,
            state: ProcessState::Terminated,
            start_time: 0,
            time_used: 0,
        }
    }
}
