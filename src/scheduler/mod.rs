/*!
 * Dispatcher
 * FIFO, non-preemptive selection of the running process
 *
 * Owns the ready and blocked queues and the CPU context. Priority is never
 * consulted: the front of the ready queue always wins.
 */

pub mod queues;
pub mod transition;

pub use queues::{Queues, SlotQueue};
pub use transition::Transition;

use crate::core::errors::ProcessResult;
use crate::core::types::SlotIndex;
use crate::process::{CpuContext, ProcessTable};

#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    queues: Queues,
    cpu: Option<CpuContext>,
    dispatches: u64,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill an idle CPU from the front of the ready queue
    ///
    /// Returns the slot dispatched, or `None` when the CPU was already busy
    /// or nothing was ready.
    pub fn schedule(&mut self, table: &mut ProcessTable) -> ProcessResult<Option<SlotIndex>> {
        if self.cpu.is_some() {
            return Ok(None);
        }
        let Some(slot) = self.queues.ready.front() else {
            return Ok(None);
        };
        self.apply(table, slot, Transition::Dispatch)?;
        Ok(Some(slot))
    }

    /// Slot currently loaded into the CPU
    #[inline]
    pub fn running(&self) -> Option<SlotIndex> {
        self.cpu.map(|cpu| cpu.slot)
    }

    #[inline]
    pub fn cpu(&self) -> Option<&CpuContext> {
        self.cpu.as_ref()
    }

    #[inline]
    pub fn cpu_mut(&mut self) -> Option<&mut CpuContext> {
        self.cpu.as_mut()
    }

    pub fn queues(&self) -> &Queues {
        &self.queues
    }

    pub fn ready(&self) -> Vec<SlotIndex> {
        self.queues.ready.to_vec()
    }

    pub fn blocked(&self) -> Vec<SlotIndex> {
        self.queues.blocked.to_vec()
    }

    /// Number of Ready -> Running transitions so far
    pub fn dispatch_count(&self) -> u64 {
        self.dispatches
    }
}
