/*!
 * Instruction Interpreter
 * Executes one instruction of the running process per step
 */

use super::Simulation;
use crate::core::config::{IdleStepPolicy, ReplaceFailurePolicy};
use crate::core::errors::{LoadError, ProcessError, ProcessResult};
use crate::core::types::{Pid, Register, SlotIndex, Tick};
use crate::process::{CpuContext, Instruction, ProgramLoader};
use crate::scheduler::Transition;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// What a step did to the running process
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StepEvent {
    /// `S`, `A` or `D` updated the register
    Computed {
        instruction: Instruction,
        value: Register,
    },
    Blocked,
    Ended {
        turnaround: Tick,
    },
    /// Program ran out without an `E`
    ImplicitEnd {
        turnaround: Tick,
    },
    Forked {
        child_slot: SlotIndex,
        child_pid: Pid,
    },
    /// Table full; parent continues, no child exists
    ForkRefused {
        error: ProcessError,
    },
    Replaced {
        path: String,
        instructions: usize,
    },
    ReplaceFailed {
        path: String,
        error: LoadError,
    },
}

/// Result of a step that found a running process
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    /// Clock value when the instruction executed
    pub tick: Tick,
    pub slot: SlotIndex,
    pub pid: Pid,
    pub event: StepEvent,
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (tick, slot) = (self.tick, self.slot);
        match &self.event {
            StepEvent::Computed { instruction, .. } => write!(
                f,
                "Time: {}, Process {} executed instruction {}",
                tick, slot, instruction
            ),
            StepEvent::Blocked => {
                write!(f, "Time: {}, Process {} executed instruction B", tick, slot)
            }
            StepEvent::Ended { .. } => {
                write!(f, "Time: {}, Process {} executed instruction E", tick, slot)
            }
            StepEvent::ImplicitEnd { .. } => {
                write!(f, "End of program reached without E operation")
            }
            StepEvent::Forked { child_pid, .. } => write!(
                f,
                "Time: {}, New Process {} created, Process {} continues",
                tick, child_pid, slot
            ),
            StepEvent::ForkRefused { error } => {
                write!(f, "Time: {}, Process {} could not fork: {}", tick, slot, error)
            }
            StepEvent::Replaced { .. } => {
                write!(f, "Time: {}, Process {} replaced with new program", tick, slot)
            }
            StepEvent::ReplaceFailed { error, .. } => write!(
                f,
                "Time: {}, Process {} could not replace program: {}",
                tick, slot, error
            ),
        }
    }
}

impl<L: ProgramLoader> Simulation<L> {
    /// Execute one instruction of the running process
    ///
    /// The clock advances by one whether or not anything ran. With no
    /// process running this returns [`ProcessError::NoProcessRunning`]
    /// after advancing the clock.
    pub fn step(&mut self) -> ProcessResult<StepOutcome> {
        let tick = self.clock;
        let Some(cpu) = self.dispatcher.cpu().copied() else {
            self.clock += 1;
            debug!(tick, "Step with no process running");
            if self.config.idle_step == IdleStepPolicy::Dispatch {
                self.schedule()?;
            }
            return Err(ProcessError::NoProcessRunning);
        };

        let slot = cpu.slot;
        let pcb = self.table.get(slot)?;
        let pid = pcb.pid;
        let fetched = pcb.program.fetch(cpu.program_counter).cloned();

        let event = match fetched {
            Some(instruction) => {
                self.running_cpu()?.program_counter += 1;
                debug!(tick, slot, pid, %instruction, "Executing");
                self.execute(slot, instruction)?
            }
            None => StepEvent::ImplicitEnd {
                turnaround: self.terminate(slot)?,
            },
        };

        self.clock += 1;
        self.schedule()?;
        Ok(StepOutcome {
            tick,
            slot,
            pid,
            event,
        })
    }

    fn execute(&mut self, slot: SlotIndex, instruction: Instruction) -> ProcessResult<StepEvent> {
        match instruction {
            Instruction::SetValue(n) => self.compute(instruction, |_| n),
            Instruction::Add(n) => self.compute(instruction, |v| v.wrapping_add(n)),
            Instruction::Decrement(n) => self.compute(instruction, |v| v.wrapping_sub(n)),
            Instruction::Block => {
                self.dispatcher
                    .apply(&mut self.table, slot, Transition::Block)?;
                Ok(StepEvent::Blocked)
            }
            Instruction::End => Ok(StepEvent::Ended {
                turnaround: self.terminate(slot)?,
            }),
            Instruction::Fork(offset) => self.fork(slot, offset),
            Instruction::Replace(path) => self.replace(slot, path),
        }
    }

    fn compute<F>(&mut self, instruction: Instruction, op: F) -> ProcessResult<StepEvent>
    where
        F: FnOnce(Register) -> Register,
    {
        let cpu = self.running_cpu()?;
        cpu.value = op(cpu.value);
        Ok(StepEvent::Computed {
            instruction,
            value: cpu.value,
        })
    }

    /// Child resumes right after the Fork with the parent's register;
    /// the parent additionally skips `offset` instructions.
    fn fork(&mut self, slot: SlotIndex, offset: i32) -> ProcessResult<StepEvent> {
        let child_slot = match self.table.allocate() {
            Ok(child_slot) => child_slot,
            Err(error) => {
                warn!(slot, tick = self.clock, %error, "Fork refused");
                return Ok(StepEvent::ForkRefused { error });
            }
        };

        let parent = *self.running_cpu()?;
        let child_pid = self.table.issue_pid();
        let child = self.table.get(slot)?.fork(
            child_pid,
            parent.program_counter,
            parent.value,
            self.clock,
        );
        self.table.install(child_slot, child)?;
        self.dispatcher
            .apply(&mut self.table, child_slot, Transition::Admit)?;

        let cpu = self.running_cpu()?;
        cpu.program_counter = cpu.program_counter.saturating_add_signed(offset as isize);

        debug!(
            slot,
            child_slot,
            child_pid,
            parent_pc = cpu.program_counter,
            child_pc = parent.program_counter,
            "Forked"
        );
        Ok(StepEvent::Forked {
            child_slot,
            child_pid,
        })
    }

    fn replace(&mut self, slot: SlotIndex, path: String) -> ProcessResult<StepEvent> {
        match self.loader.load(&path) {
            Ok(program) => {
                let instructions = program.len();
                self.table.get_mut(slot)?.program = program;
                self.running_cpu()?.program_counter = 0;
                debug!(slot, path = %path, instructions, "Program replaced");
                Ok(StepEvent::Replaced { path, instructions })
            }
            Err(error) => {
                let policy = self.config.replace_failure;
                warn!(slot, path = %path, %error, ?policy, "Replace failed");
                if policy == ReplaceFailurePolicy::Discard {
                    self.table.get_mut(slot)?.program.clear();
                    self.running_cpu()?.program_counter += 1;
                }
                Ok(StepEvent::ReplaceFailed { path, error })
            }
        }
    }

    fn running_cpu(&mut self) -> ProcessResult<&mut CpuContext> {
        self.dispatcher
            .cpu_mut()
            .ok_or(ProcessError::NoProcessRunning)
    }
}
