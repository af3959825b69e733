/*!
 * Snapshot
 * Read-only view of the whole machine
 */

use super::Simulation;
use crate::core::types::{Pid, Priority, Register, SlotIndex, Tick};
use crate::process::ProcessState;
use serde::Serialize;
use std::fmt;

/// One live PCB as seen from outside
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PcbSnapshot {
    pub slot: SlotIndex,
    pub pid: Pid,
    pub parent_pid: Option<Pid>,
    pub program_counter: usize,
    pub value: Register,
    pub state: ProcessState,
    pub priority: Priority,
    pub start_time: Tick,
    pub time_used: Tick,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub tick: Tick,
    pub running: Option<SlotIndex>,
    pub ready: Vec<SlotIndex>,
    pub blocked: Vec<SlotIndex>,
    /// Live slots in index order
    pub processes: Vec<PcbSnapshot>,
}

impl<L> Simulation<L> {
    /// Capture the current state; the running slot reports its live CPU registers
    pub fn snapshot(&self) -> Snapshot {
        let cpu = self.dispatcher.cpu();
        let processes = self
            .table
            .live()
            .map(|(slot, pcb)| {
                let (program_counter, value) = match cpu {
                    Some(cpu) if cpu.slot == slot => (cpu.program_counter, cpu.value),
                    _ => (pcb.program_counter, pcb.value),
                };
                PcbSnapshot {
                    slot,
                    pid: pcb.pid,
                    parent_pid: pcb.parent_pid,
                    program_counter,
                    value,
                    state: pcb.state,
                    priority: pcb.priority,
                    start_time: pcb.start_time,
                    time_used: pcb.time_used,
                }
            })
            .collect();

        Snapshot {
            tick: self.clock,
            running: self.dispatcher.running(),
            ready: self.dispatcher.ready(),
            blocked: self.dispatcher.blocked(),
            processes,
        }
    }
}

fn write_queue(f: &mut fmt::Formatter<'_>, label: &str, slots: &[SlotIndex]) -> fmt::Result {
    write!(f, "{}:", label)?;
    for slot in slots {
        write!(f, " {}", slot)?;
    }
    writeln!(f)
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current system state at time {}:", self.tick)?;
        match self.running {
            Some(slot) => writeln!(f, "Running process: {}", slot)?,
            None => writeln!(f, "Running process: -1")?,
        }
        write_queue(f, "Ready queue", &self.ready)?;
        write_queue(f, "Blocked queue", &self.blocked)?;
        for pcb in &self.processes {
            writeln!(f, "{}", pcb)?;
        }
        Ok(())
    }
}

impl fmt::Display for PcbSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PCB {}: PID={}, ParentPID=", self.slot, self.pid)?;
        match self.parent_pid {
            Some(parent) => write!(f, "{}", parent)?,
            None => write!(f, "-1")?,
        }
        write!(
            f,
            ", PC={}, Value={}, State={}, Priority={}, StartTime={}, TimeUsed={}",
            self.program_counter,
            self.value,
            self.state,
            self.priority,
            self.start_time,
            self.time_used
        )
    }
}
