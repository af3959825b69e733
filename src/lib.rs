/*!
 * Process Simulator Library
 * Single-CPU cooperative multiprogramming simulator
 *
 * A fixed table of simulated processes runs tiny instruction programs on one
 * virtual CPU. External commands drive the machine one instruction at a time;
 * scheduling is FIFO and non-preemptive.
 */

pub mod core;
pub mod kernel;
pub mod monitoring;
pub mod process;
pub mod scheduler;
pub mod shell;

// Re-exports
pub use crate::core::{
    IdleStepPolicy, LoadError, Pid, ProcessError, ReplaceFailurePolicy, SimConfig,
    SimulatorError, SlotIndex, Tick,
};
pub use kernel::{PcbSnapshot, Simulation, Snapshot, StepEvent, StepOutcome};
pub use monitoring::{init_tracing, TurnaroundStats};
pub use process::{
    decode, FileLoader, Instruction, MemoryLoader, ProcessControlBlock, ProcessState, Program,
    ProgramLoader,
};
pub use scheduler::{Dispatcher, Transition};
pub use shell::{Command, CommandReader, Input, Line};
