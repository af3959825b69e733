/*!
 * Scenario Tests
 * End-to-end command sequences against the simulator
 */

use pretty_assertions::assert_eq;
use process_simulator::{
    decode, LoadError, MemoryLoader, ProcessError, ProcessState, ReplaceFailurePolicy, SimConfig,
    Simulation, StepEvent,
};

fn boot(source: &str) -> Simulation<MemoryLoader> {
    boot_with(SimConfig::default(), MemoryLoader::new(), source)
}

fn boot_with(config: SimConfig, loader: MemoryLoader, source: &str) -> Simulation<MemoryLoader> {
    let program = decode(source, "init", config.max_instructions).unwrap();
    Simulation::with_program(config, loader, program).unwrap()
}

#[test]
fn test_set_add_end_turnaround() {
    let mut sim = boot("S 5\nA 3\nE");

    sim.step().unwrap();
    let add = sim.step().unwrap();
    assert!(matches!(add.event, StepEvent::Computed { value: 8, .. }));

    let end = sim.step().unwrap();
    assert_eq!(end.event, StepEvent::Ended { turnaround: end.tick + 1 });
    assert_eq!(sim.stats().total, 3);
    assert_eq!(sim.average_turnaround(), 3.0);
}

#[test]
fn test_block_idle_unblock_end() {
    let mut sim = boot("S 1\nB\nS 2\nE");

    // Step 1: value = 1
    sim.step().unwrap();
    assert_eq!(sim.clock(), 1);

    // Step 2: blocks; nothing ready so the CPU goes idle
    let blocked = sim.step().unwrap();
    assert_eq!(blocked.event, StepEvent::Blocked);
    assert_eq!(sim.clock(), 2);
    assert_eq!(sim.running(), None);
    assert_eq!(sim.blocked(), vec![0]);

    // Step 3: idle
    assert_eq!(sim.step().unwrap_err(), ProcessError::NoProcessRunning);
    assert_eq!(sim.clock(), 3);

    // Unblock dispatches straight away because the CPU is idle
    assert_eq!(sim.unblock().unwrap(), Some(0));
    assert_eq!(sim.running(), Some(0));
    assert!(sim.blocked().is_empty());
    assert!(sim.ready().is_empty());

    // Step 4: value = 2, resuming from the saved counter
    let set = sim.step().unwrap();
    assert!(matches!(set.event, StepEvent::Computed { value: 2, .. }));
    assert_eq!(sim.clock(), 4);

    // Step 5: terminates at tick 4, turnaround 4 + 1 - 0
    let end = sim.step().unwrap();
    assert_eq!(end.event, StepEvent::Ended { turnaround: 5 });
    assert_eq!(sim.clock(), 5);
    assert_eq!(sim.average_turnaround(), 5.0);
}

#[test]
fn test_fork_child_runs_after_parent_ends() {
    // Parent skips the child's two instructions
    let mut sim = boot("S 10\nF 2\nA 1\nE\nD 3\nE");

    sim.step().unwrap();
    sim.step().unwrap();
    assert_eq!(sim.ready(), vec![1]);

    // Parent: D 3, E
    let dec = sim.step().unwrap();
    assert!(matches!(dec.event, StepEvent::Computed { value: 7, .. }));
    let end = sim.step().unwrap();
    assert_eq!(end.slot, 0);
    assert!(matches!(end.event, StepEvent::Ended { .. }));

    // Child dispatched at the end of the parent's final step
    assert_eq!(sim.running(), Some(1));
    let add = sim.step().unwrap();
    assert_eq!(add.slot, 1);
    assert!(matches!(add.event, StepEvent::Computed { value: 11, .. }));
    let child_end = sim.step().unwrap();
    // Child started at tick 1 and ends at tick 5
    assert_eq!(child_end.event, StepEvent::Ended { turnaround: 5 });

    assert_eq!(sim.stats().terminated, 2);
    assert_eq!(sim.average_turnaround(), (4.0 + 5.0) / 2.0);
}

#[test]
fn test_slot_reuse_issues_fresh_pid() {
    let config = SimConfig::default().with_max_processes(2);
    // Child ends immediately; the parent forks again into the freed slot
    let mut sim = boot_with(config, MemoryLoader::new(), "F 1\nE\nB\nF 1\nE\nB");

    sim.step().unwrap(); // fork child pid 1 into slot 1
    sim.step().unwrap(); // parent blocks, child dispatched
    let child_end = sim.step().unwrap();
    assert_eq!(child_end.pid, 1);
    assert_eq!(sim.table().get(1).unwrap().state, ProcessState::Terminated);

    sim.unblock().unwrap();
    let fork = sim.step().unwrap();
    assert_eq!(
        fork.event,
        StepEvent::Forked {
            child_slot: 1,
            child_pid: 2
        }
    );
}

#[test]
fn test_replace_loads_new_program() {
    let loader = MemoryLoader::new().with_source("worker", "A 5\nE");
    let mut sim = boot_with(SimConfig::default(), loader, "S 1\nR worker\nS 100");

    sim.step().unwrap();
    let replaced = sim.step().unwrap();
    assert_eq!(
        replaced.to_string(),
        "Time: 1, Process 0 replaced with new program"
    );

    let add = sim.step().unwrap();
    assert!(matches!(add.event, StepEvent::Computed { value: 6, .. }));
    assert!(matches!(sim.step().unwrap().event, StepEvent::Ended { .. }));
}

#[test]
fn test_replace_with_undecodable_program_discards_image() {
    let loader = MemoryLoader::new().with_source("bad", "S 1\nX 2");
    let mut sim = boot_with(SimConfig::default(), loader, "S 4\nR bad\nS 9\nE");

    sim.step().unwrap();
    let failed = sim.step().unwrap();
    match failed.event {
        StepEvent::ReplaceFailed { path, error } => {
            assert_eq!(path, "bad");
            assert!(matches!(
                error,
                LoadError::InvalidOperation {
                    line: 2,
                    code: 'X',
                    ..
                }
            ));
        }
        other => panic!("expected ReplaceFailed, got {:?}", other),
    }

    assert!(sim.table().get(0).unwrap().program.is_empty());
    assert_eq!(sim.snapshot().processes[0].program_counter, 3);
    assert_eq!(sim.snapshot().processes[0].value, 4);

    let next = sim.step().unwrap();
    assert_eq!(next.event, StepEvent::ImplicitEnd { turnaround: 3 });
    assert_eq!(
        next.to_string(),
        "End of program reached without E operation"
    );
}

#[test]
fn test_replace_missing_argument_in_new_program() {
    let loader = MemoryLoader::new().with_source("nested", "S 1\nR");
    let mut sim = boot_with(SimConfig::default(), loader, "R nested\nE");

    let failed = sim.step().unwrap();
    assert!(matches!(
        failed.event,
        StepEvent::ReplaceFailed {
            error: LoadError::MissingArgument { line: 2, .. },
            ..
        }
    ));
    assert!(sim.table().get(0).unwrap().program.is_empty());
}

#[test]
fn test_replace_oversized_program_reverts() {
    let loader = MemoryLoader::new()
        .with_max_instructions(2)
        .with_source("big", "S 1\nS 2\nS 3");
    let config = SimConfig::default().with_replace_failure(ReplaceFailurePolicy::Revert);
    let mut sim = boot_with(config, loader, "R big\nS 7\nE");

    let failed = sim.step().unwrap();
    assert!(matches!(
        failed.event,
        StepEvent::ReplaceFailed {
            error: LoadError::TooManyInstructions { limit: 2, .. },
            ..
        }
    ));
    assert_eq!(sim.table().get(0).unwrap().program.len(), 3);

    let set = sim.step().unwrap();
    assert!(matches!(set.event, StepEvent::Computed { value: 7, .. }));
}

#[test]
fn test_forked_child_inherits_replaced_program() {
    let loader = MemoryLoader::new().with_source("worker", "F 0\nA 1\nE");
    let mut sim = boot_with(SimConfig::default(), loader, "R worker");

    sim.step().unwrap();
    sim.step().unwrap();

    let child = sim.table().get(1).unwrap();
    assert_eq!(child.program.len(), 3);
    assert_eq!(child.program_counter, 1);
}

#[test]
fn test_snapshot_queues_and_live_processes() {
    let mut sim = boot("F 0\nF 0\nB\nE");
    sim.step().unwrap();
    sim.step().unwrap();
    sim.step().unwrap(); // parent blocks, slot 1 dispatched

    let snapshot = sim.snapshot();
    assert_eq!(snapshot.tick, 3);
    assert_eq!(snapshot.running, Some(1));
    assert_eq!(snapshot.ready, vec![2]);
    assert_eq!(snapshot.blocked, vec![0]);
    let states: Vec<_> = snapshot.processes.iter().map(|p| p.state).collect();
    assert_eq!(
        states,
        vec![
            ProcessState::Blocked,
            ProcessState::Running,
            ProcessState::Ready
        ]
    );
}
