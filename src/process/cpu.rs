/*!
 * CPU Context
 * Register state of the running process
 */

use super::pcb::ProcessControlBlock;
use crate::core::types::{Register, SlotIndex};
use serde::Serialize;

/// Loaded from a PCB on dispatch and authoritative while that slot runs.
/// The program itself stays in the PCB; `slot` is the reference to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CpuContext {
    pub slot: SlotIndex,
    pub program_counter: usize,
    pub value: Register,
}

impl CpuContext {
    pub fn load(slot: SlotIndex, pcb: &ProcessControlBlock) -> Self {
        Self {
            slot,
            program_counter: pcb.program_counter,
            value: pcb.value,
        }
    }

    /// Write the registers back into the PCB
    pub fn save(&self, pcb: &mut ProcessControlBlock) {
        pcb.program_counter = self.program_counter;
        pcb.value = self.value;
    }
}
