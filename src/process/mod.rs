/*!
 * Process Module
 * Programs, process control blocks, the process table and CPU context
 */

pub mod cpu;
pub mod loader;
pub mod pcb;
pub mod program;
pub mod table;

// Re-export for convenience
pub use cpu::CpuContext;
pub use loader::{decode, FileLoader, MemoryLoader, ProgramLoader};
pub use pcb::{ProcessControlBlock, ProcessState};
pub use program::{Instruction, Program};
pub use table::ProcessTable;
