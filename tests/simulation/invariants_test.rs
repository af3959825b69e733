/*!
 * Invariant Tests
 * Random programs and command sequences must never break scheduler invariants
 */

use proptest::prelude::*;
use process_simulator::{
    Instruction, MemoryLoader, Pid, ProcessError, ProcessState, Program, SimConfig, Simulation,
    StepEvent,
};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy)]
enum Op {
    Step,
    Unblock,
    Snapshot,
}

fn instruction() -> impl Strategy<Value = Instruction> {
    prop_oneof![
        (-5i32..5).prop_map(Instruction::SetValue),
        (-5i32..5).prop_map(Instruction::Add),
        (-5i32..5).prop_map(Instruction::Decrement),
        Just(Instruction::Block),
        Just(Instruction::End),
        (-2i32..4).prop_map(Instruction::Fork),
        prop_oneof![Just("worker"), Just("missing")]
            .prop_map(|path| Instruction::Replace(path.to_string())),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => Just(Op::Step),
        2 => Just(Op::Unblock),
        1 => Just(Op::Snapshot),
    ]
}

/// Running/ready/blocked membership matches PCB state exactly
fn check_membership(sim: &Simulation<MemoryLoader>) {
    let running: Vec<_> = sim.running().into_iter().collect();
    let ready = sim.ready();
    let blocked = sim.blocked();

    let mut seen = HashSet::new();
    for slot in running.iter().chain(&ready).chain(&blocked) {
        assert!(seen.insert(*slot), "slot {} tracked twice", slot);
    }

    let by_state = |state: ProcessState| -> HashSet<usize> {
        sim.table()
            .live()
            .filter(|(_, pcb)| pcb.state == state)
            .map(|(slot, _)| slot)
            .collect()
    };
    assert_eq!(by_state(ProcessState::Running), running.iter().copied().collect::<HashSet<_>>());
    assert_eq!(by_state(ProcessState::Ready), ready.iter().copied().collect::<HashSet<_>>());
    assert_eq!(by_state(ProcessState::Blocked), blocked.iter().copied().collect::<HashSet<_>>());
    assert_eq!(seen.len(), sim.table().live_count());

    let pids: HashSet<Pid> = sim.table().live().map(|(_, pcb)| pcb.pid).collect();
    assert_eq!(pids.len(), sim.table().live_count(), "duplicate live pid");
}

/// Tracks every pid ever seen so reuse or reordering is caught
#[derive(Default)]
struct PidLedger {
    live: HashSet<Pid>,
    retired: HashSet<Pid>,
    max: Option<Pid>,
}

impl PidLedger {
    fn observe(&mut self, sim: &Simulation<MemoryLoader>) {
        let now: HashSet<Pid> = sim.table().live().map(|(_, pcb)| pcb.pid).collect();
        let mut fresh: Vec<Pid> = now.difference(&self.live).copied().collect();
        fresh.sort_unstable();

        for pid in fresh {
            assert!(!self.retired.contains(&pid), "pid {} reused", pid);
            if let Some(max) = self.max {
                assert!(pid > max, "pid {} issued after {}", pid, max);
            }
            self.max = Some(pid);
        }
        for pid in self.live.difference(&now) {
            self.retired.insert(*pid);
        }
        self.live = now;
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_scheduler_invariants(
        program in prop::collection::vec(instruction(), 0..12),
        worker in prop::collection::vec(instruction(), 0..6),
        ops in prop::collection::vec(op(), 0..60),
        capacity in 1usize..5,
    ) {
        let worker_source: Vec<String> = worker.iter().map(ToString::to_string).collect();
        let loader = MemoryLoader::new().with_source("worker", worker_source.join("\n"));
        let config = SimConfig::default().with_max_processes(capacity);
        let mut sim = Simulation::with_program(config, loader, Program::from(program)).unwrap();

        let mut ledger = PidLedger::default();
        ledger.observe(&sim);
        check_membership(&sim);

        for op in ops {
            let clock = sim.clock();
            match op {
                Op::Step => {
                    match sim.step() {
                        Ok(_) | Err(ProcessError::NoProcessRunning) => {}
                        Err(e) => panic!("step failed: {}", e),
                    }
                    prop_assert_eq!(sim.clock(), clock + 1);
                }
                Op::Unblock => {
                    let nothing_blocked = sim.blocked().is_empty();
                    let busy = sim.running().is_some();
                    let before = sim.snapshot();
                    sim.unblock().unwrap();
                    if nothing_blocked && busy {
                        prop_assert_eq!(sim.snapshot(), before);
                    }
                    prop_assert_eq!(sim.clock(), clock);
                }
                Op::Snapshot => {
                    let snapshot = sim.snapshot();
                    prop_assert_eq!(snapshot.running, sim.running());
                    prop_assert_eq!(snapshot.processes.len(), sim.table().live_count());
                    prop_assert_eq!(sim.clock(), clock);
                }
            }

            check_membership(&sim);
            ledger.observe(&sim);
        }
    }

    #[test]
    fn prop_average_turnaround_matches_terminations(
        program in prop::collection::vec(instruction(), 1..10),
        steps in 0usize..40,
    ) {
        let mut sim = Simulation::with_program(
            SimConfig::default(),
            MemoryLoader::new(),
            Program::from(program),
        )
        .unwrap();

        let mut expected_total = 0u64;
        let mut terminated = 0u64;
        for _ in 0..steps {
            if let Ok(outcome) = sim.step() {
                if let StepEvent::Ended { turnaround } | StepEvent::ImplicitEnd { turnaround } =
                    outcome.event
                {
                    let start_time = sim.table().get(outcome.slot).unwrap().start_time;
                    prop_assert_eq!(turnaround, outcome.tick + 1 - start_time);
                    expected_total += turnaround;
                    terminated += 1;
                }
            }
            sim.unblock().unwrap();
        }

        prop_assert_eq!(sim.stats().total, expected_total);
        prop_assert_eq!(sim.stats().terminated, terminated);
    }
}
