/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::types::SlotIndex;
use crate::process::ProcessState;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Program decoding errors
///
/// Any of these fails the whole load: no partial program is ever produced.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum LoadError {
    #[error("Error opening file {path}: {reason}")]
    #[diagnostic(
        code(loader::io),
        help("Check that the program file exists and is readable.")
    )]
    Io { path: String, reason: String },

    #[error("{origin}:{line} - Invalid operation, {code}")]
    #[diagnostic(
        code(loader::invalid_operation),
        help("Valid operations are S, A, D, B, E, F and R.")
    )]
    InvalidOperation {
        origin: String,
        line: usize,
        code: char,
    },

    #[error("{origin}:{line} - Missing string argument")]
    #[diagnostic(
        code(loader::missing_argument),
        help("R must be followed by the path of the replacement program.")
    )]
    MissingArgument { origin: String, line: usize },

    #[error("{origin} - Program exceeds {limit} instructions")]
    #[diagnostic(
        code(loader::too_many_instructions),
        help("Split the program or raise PROCSIM_MAX_INSTRUCTIONS.")
    )]
    TooManyInstructions { origin: String, limit: usize },
}

/// Process management errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ProcessError {
    #[error("No available PCB entry for forking process (capacity {capacity})")]
    #[diagnostic(
        code(process::no_free_slot),
        help("Wait for a process to terminate or raise PROCSIM_MAX_PROCESSES.")
    )]
    NoFreeSlot { capacity: usize },

    #[error("No processes are running")]
    #[diagnostic(code(process::no_process_running))]
    NoProcessRunning,

    #[error("Invalid state transition for slot {slot}: {from:?} -> {to:?}")]
    #[diagnostic(
        code(process::invalid_transition),
        help("Queue membership and PCB state have diverged.")
    )]
    InvalidTransition {
        slot: SlotIndex,
        from: ProcessState,
        to: ProcessState,
    },

    #[error("Slot {0} is outside the process table")]
    #[diagnostic(code(process::slot_out_of_range))]
    SlotOutOfRange(SlotIndex),
}

/// Top-level simulator errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum SimulatorError {
    #[error("Failed to load the init program")]
    #[diagnostic(code(simulator::boot))]
    Boot(#[source] #[diagnostic_source] LoadError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Process(#[from] ProcessError),
}

/// Result type for program loading
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for process management
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Result type for whole-simulator operations
pub type SimulatorResult<T> = Result<T, SimulatorError>;
