/*!
 * Process Table
 * Fixed-capacity PCB slots with scan-for-free allocation
 *
 * Slot indices are recycled once a process terminates; process IDs come
 * from a separate counter and are never reused.
 */

use super::pcb::ProcessControlBlock;
use crate::core::errors::{ProcessError, ProcessResult};
use crate::core::limits::FIRST_USER_PID;
use crate::core::types::{Pid, SlotIndex};

#[derive(Debug, Clone)]
pub struct ProcessTable {
    slots: Vec<ProcessControlBlock>,
    next_pid: Pid,
}

impl ProcessTable {
    /// Table with `capacity` free slots
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![ProcessControlBlock::default(); capacity],
            next_pid: FIRST_USER_PID,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// First free slot, scanning from 0
    pub fn allocate(&self) -> ProcessResult<SlotIndex> {
        self.slots
            .iter()
            .position(|pcb| !pcb.is_live())
            .ok_or(ProcessError::NoFreeSlot {
                capacity: self.capacity(),
            })
    }

    /// Draw the next process ID
    pub fn issue_pid(&mut self) -> Pid {
        let pid = self.next_pid;
        self.next_pid += 1;
        pid
    }

    /// The ID the next `issue_pid` call will return
    #[inline]
    pub fn next_pid(&self) -> Pid {
        self.next_pid
    }

    /// Store `pcb` in a free slot
    pub fn install(&mut self, slot: SlotIndex, pcb: ProcessControlBlock) -> ProcessResult<()> {
        let entry = self.get_mut(slot)?;
        if entry.is_live() {
            return Err(ProcessError::InvalidTransition {
                slot,
                from: entry.state,
                to: pcb.state,
            });
        }
        *entry = pcb;
        Ok(())
    }

    pub fn get(&self, slot: SlotIndex) -> ProcessResult<&ProcessControlBlock> {
        self.slots.get(slot).ok_or(ProcessError::SlotOutOfRange(slot))
    }

    pub fn get_mut(&mut self, slot: SlotIndex) -> ProcessResult<&mut ProcessControlBlock> {
        self.slots
            .get_mut(slot)
            .ok_or(ProcessError::SlotOutOfRange(slot))
    }

    /// Live slots in index order
    pub fn live(&self) -> impl Iterator<Item = (SlotIndex, &ProcessControlBlock)> {
        self.slots.iter().enumerate().filter(|(_, pcb)| pcb.is_live())
    }

    pub fn live_count(&self) -> usize {
        self.live().count()
    }
}
