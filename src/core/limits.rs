/*!
 * System Limits and Constants
 *
 * Default capacities for the process table and program store.
 */

use crate::core::types::{Pid, SlotIndex};

// =============================================================================
// PROCESS TABLE
// =============================================================================

/// Default number of PCB slots in the process table
pub const MAX_PROCESSES: usize = 10;

/// Slot reserved for the init process at boot
pub const INIT_SLOT: SlotIndex = 0;

/// Process ID of the init process
pub const INIT_PID: Pid = 0;

/// First process ID handed out after init
pub const FIRST_USER_PID: Pid = 1;

// =============================================================================
// PROGRAM STORE
// =============================================================================

/// Default maximum number of decoded instructions per program
pub const MAX_INSTRUCTIONS: usize = 100;
