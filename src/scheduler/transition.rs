/*!
 * State Transitions
 * The only place that changes PCB state, queue membership or the running slot
 */

use super::Dispatcher;
use crate::core::errors::{ProcessError, ProcessResult};
use crate::core::types::SlotIndex;
use crate::process::{CpuContext, ProcessState, ProcessTable};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Process lifecycle edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Freshly installed Ready PCB joins the back of the ready queue
    Admit,
    /// Ready -> Running: load the CPU context
    Dispatch,
    /// Running -> Blocked: save the CPU context, join the blocked queue
    Block,
    /// Blocked -> Ready: join the back of the ready queue
    Wake,
    /// Running -> Terminated: discard the CPU context, free the slot
    Exit,
}

impl Transition {
    /// State the slot must be in beforehand
    pub fn source(self) -> ProcessState {
        match self {
            Self::Admit | Self::Dispatch => ProcessState::Ready,
            Self::Block | Self::Exit => ProcessState::Running,
            Self::Wake => ProcessState::Blocked,
        }
    }

    /// State the slot is in afterwards
    pub fn target(self) -> ProcessState {
        match self {
            Self::Admit | Self::Wake => ProcessState::Ready,
            Self::Dispatch => ProcessState::Running,
            Self::Block => ProcessState::Blocked,
            Self::Exit => ProcessState::Terminated,
        }
    }
}

impl Dispatcher {
    /// Apply `transition` to `slot`
    ///
    /// Either every part of the transition happens or none does: on error
    /// the PCB, both queues and the CPU context are untouched.
    pub fn apply(
        &mut self,
        table: &mut ProcessTable,
        slot: SlotIndex,
        transition: Transition,
    ) -> ProcessResult<()> {
        let pcb = table.get_mut(slot)?;
        let invalid = ProcessError::InvalidTransition {
            slot,
            from: pcb.state,
            to: transition.target(),
        };
        if pcb.state != transition.source() {
            return Err(invalid);
        }

        match transition {
            Transition::Admit => {
                if self.queues.is_queued(slot) || self.running() == Some(slot) {
                    return Err(invalid);
                }
                self.queues.ready.push_back(slot);
            }
            Transition::Dispatch => {
                if self.cpu.is_some() || !self.queues.ready.remove(slot) {
                    return Err(invalid);
                }
                self.cpu = Some(CpuContext::load(slot, pcb));
                self.dispatches += 1;
            }
            Transition::Block => {
                let cpu = self.release(slot).ok_or(invalid)?;
                cpu.save(pcb);
                self.queues.blocked.push_back(slot);
            }
            Transition::Wake => {
                if !self.queues.blocked.remove(slot) {
                    return Err(invalid);
                }
                self.queues.ready.push_back(slot);
            }
            Transition::Exit => {
                self.release(slot).ok_or(invalid)?;
            }
        }

        pcb.state = transition.target();
        debug!(slot, pid = pcb.pid, ?transition, state = %pcb.state, "Process transitioned");
        Ok(())
    }

    /// Take the CPU context if `slot` is the one running
    fn release(&mut self, slot: SlotIndex) -> Option<CpuContext> {
        match self.cpu {
            Some(cpu) if cpu.slot == slot => self.cpu.take(),
            _ => None,
        }
    }
}
