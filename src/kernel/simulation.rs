/*!
 * Simulation State
 * Process table, dispatcher, clock and statistics for one run
 */

use crate::core::config::SimConfig;
use crate::core::errors::{ProcessResult, SimulatorError, SimulatorResult};
use crate::core::limits::{INIT_PID, INIT_SLOT};
use crate::core::types::{SlotIndex, Tick};
use crate::monitoring::TurnaroundStats;
use crate::process::{FileLoader, ProcessControlBlock, ProcessTable, Program, ProgramLoader};
use crate::scheduler::{Dispatcher, Transition};
use tracing::{debug, info};

/// One simulated machine
///
/// Every command mutates this struct through `&mut self`; there is no
/// shared or global state.
#[derive(Debug)]
pub struct Simulation<L = FileLoader> {
    pub(super) config: SimConfig,
    pub(super) table: ProcessTable,
    pub(super) dispatcher: Dispatcher,
    pub(super) clock: Tick,
    pub(super) stats: TurnaroundStats,
    pub(super) loader: L,
}

impl<L: ProgramLoader> Simulation<L> {
    /// Load the init program from `path` and start it running in slot 0
    pub fn boot(config: SimConfig, loader: L, path: &str) -> SimulatorResult<Self> {
        let program = loader.load(path).map_err(SimulatorError::Boot)?;
        info!(path, instructions = program.len(), "Init program loaded");
        Ok(Self::with_program(config, loader, program)?)
    }

    /// Start a run whose init process executes `program`
    pub fn with_program(config: SimConfig, loader: L, program: Program) -> ProcessResult<Self> {
        let mut table = ProcessTable::new(config.max_processes.max(1));
        let mut dispatcher = Dispatcher::new();

        table.install(INIT_SLOT, ProcessControlBlock::new(INIT_PID, None, program, 0))?;
        dispatcher.apply(&mut table, INIT_SLOT, Transition::Admit)?;
        dispatcher.schedule(&mut table)?;

        info!(
            capacity = table.capacity(),
            idle_step = ?config.idle_step,
            replace_failure = ?config.replace_failure,
            "Simulation started"
        );

        Ok(Self {
            config,
            table,
            dispatcher,
            clock: 0,
            stats: TurnaroundStats::new(),
            loader,
        })
    }

    /// Fill an idle CPU from the ready queue
    pub fn schedule(&mut self) -> ProcessResult<Option<SlotIndex>> {
        let dispatched = self.dispatcher.schedule(&mut self.table)?;
        if let Some(slot) = dispatched {
            debug!(slot, tick = self.clock, "Dispatched");
        }
        Ok(dispatched)
    }

    /// Move the oldest blocked process to ready, then try to dispatch
    ///
    /// Returns the slot that was unblocked, if any.
    pub fn unblock(&mut self) -> ProcessResult<Option<SlotIndex>> {
        let woken = self.dispatcher.queues().blocked.front();
        if let Some(slot) = woken {
            self.dispatcher.apply(&mut self.table, slot, Transition::Wake)?;
            debug!(slot, tick = self.clock, "Unblocked");
        }
        self.schedule()?;
        Ok(woken)
    }

    /// Terminate the running `slot` and record its turnaround
    pub(super) fn terminate(&mut self, slot: SlotIndex) -> ProcessResult<Tick> {
        let pcb = self.table.get(slot)?;
        let (pid, start_time) = (pcb.pid, pcb.start_time);
        let turnaround = (self.clock + 1).saturating_sub(start_time);

        self.dispatcher.apply(&mut self.table, slot, Transition::Exit)?;
        self.stats.record(turnaround);
        debug!(slot, pid, tick = self.clock, turnaround, "Process terminated");
        Ok(turnaround)
    }
}

impl<L> Simulation<L> {
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Current tick
    pub fn clock(&self) -> Tick {
        self.clock
    }

    pub fn table(&self) -> &ProcessTable {
        &self.table
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn running(&self) -> Option<SlotIndex> {
        self.dispatcher.running()
    }

    pub fn ready(&self) -> Vec<SlotIndex> {
        self.dispatcher.ready()
    }

    pub fn blocked(&self) -> Vec<SlotIndex> {
        self.dispatcher.blocked()
    }

    pub fn stats(&self) -> &TurnaroundStats {
        &self.stats
    }

    pub fn average_turnaround(&self) -> f64 {
        self.stats.average()
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }
}
