/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type (never reused within a run)
pub type Pid = u32;

/// Position in the process table (reused after termination)
pub type SlotIndex = usize;

/// Simulation clock tick
pub type Tick = u64;

/// Priority level (carried on every PCB, not consulted by the dispatcher)
pub type Priority = u32;

/// The single scalar register of the simulated CPU
pub type Register = i32;
