/*!
 * Kernel
 * The simulated machine and its command operations
 */

mod interpreter;
mod simulation;
mod snapshot;

pub use interpreter::{StepEvent, StepOutcome};
pub use simulation::Simulation;
pub use snapshot::{PcbSnapshot, Snapshot};
