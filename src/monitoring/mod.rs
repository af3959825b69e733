/*!
 * Monitoring
 * Turnaround statistics and tracing setup
 */

mod stats;
mod tracer;

pub use stats::TurnaroundStats;
pub use tracer::{init_tracing, TRACE_JSON_ENV};
