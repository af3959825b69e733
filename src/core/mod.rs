/*!
 * Core Module
 * Shared types, limits, configuration and errors
 */

pub mod config;
pub mod errors;
pub mod limits;
pub mod types;

pub use config::{IdleStepPolicy, ReplaceFailurePolicy, SimConfig};
pub use errors::{
    LoadError, LoadResult, ProcessError, ProcessResult, SimulatorError, SimulatorResult,
};
pub use types::{Pid, Priority, Register, SlotIndex, Tick};
