/*!
 * Process Simulator - Main Entry Point
 *
 * Usage: procsim <program file>
 *
 * Loads the init program, then applies Q/U/P/T commands read from stdin.
 */

use miette::{miette, IntoDiagnostic};
use process_simulator::shell::{self, PROMPT};
use process_simulator::{init_tracing, CommandReader, FileLoader, SimConfig, Simulation};
use std::io::BufReader;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    init_tracing();

    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| miette!("Usage: procsim <program file>"))?;

    let config = SimConfig::from_env();
    info!(?config, "Process simulator starting");

    let loader = FileLoader::new(config.max_instructions);
    let mut sim = Simulation::boot(config, loader, &path)?;

    let (commands, _reader) = CommandReader::new(BufReader::new(std::io::stdin())).spawn();

    let mut stdout = std::io::stdout();
    shell::run(&mut sim, commands, &mut stdout, Some(PROMPT))
        .await
        .into_diagnostic()?;

    Ok(())
}
