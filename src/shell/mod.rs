/*!
 * Shell
 * Applies commands to a simulation and renders the results
 */

pub mod command;
pub mod input;

pub use command::{parse_line, Command, Input};
pub use input::{CommandReader, Line, PROMPT};

use crate::core::errors::ProcessError;
use crate::kernel::Simulation;
use crate::monitoring::TurnaroundStats;
use crate::process::ProgramLoader;
use std::io::{self, Write};
use tracing::{debug, error, info};

/// Apply commands in arrival order until Stop or the source closes,
/// then write the turnaround report
///
/// `prompt`, when set, is written to `out` before waiting for each line.
pub async fn run<L, W>(
    sim: &mut Simulation<L>,
    commands: flume::Receiver<Line>,
    out: &mut W,
    prompt: Option<&str>,
) -> io::Result<TurnaroundStats>
where
    L: ProgramLoader,
    W: Write,
{
    'session: loop {
        if let Some(prompt) = prompt {
            write!(out, "{}", prompt)?;
            out.flush()?;
        }

        let Ok(line) = commands.recv_async().await else {
            break;
        };
        for input in line {
            match input {
                Input::Command(Command::Stop) => break 'session,
                Input::Command(command) => execute(sim, command, out)?,
                Input::Invalid(c) => {
                    debug!(input = %c, "Invalid command");
                    writeln!(out, "You entered an invalid character!")?;
                }
            }
        }
        out.flush()?;
    }

    let stats = *sim.stats();
    writeln!(out, "{}", stats)?;
    out.flush()?;
    info!(
        tick = sim.clock(),
        terminated = stats.terminated,
        average = stats.average(),
        "Simulation stopped"
    );
    Ok(stats)
}

/// Apply a single command and write its output
pub fn execute<L, W>(sim: &mut Simulation<L>, command: Command, out: &mut W) -> io::Result<()>
where
    L: ProgramLoader,
    W: Write,
{
    match command {
        Command::Step => match sim.step() {
            Ok(outcome) => writeln!(out, "{}", outcome),
            Err(ProcessError::NoProcessRunning) => {
                writeln!(out, "{}", ProcessError::NoProcessRunning)
            }
            Err(e) => {
                error!(error = %e, "Step failed");
                writeln!(out, "{}", e)
            }
        },
        Command::Unblock => match sim.unblock() {
            Ok(_) => Ok(()),
            Err(e) => {
                error!(error = %e, "Unblock failed");
                writeln!(out, "{}", e)
            }
        },
        Command::Snapshot => write!(out, "{}", sim.snapshot()),
        Command::Stop => Ok(()),
    }
}
