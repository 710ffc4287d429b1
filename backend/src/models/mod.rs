//! Domain records produced by the simulator

pub mod event;
pub mod results;
pub mod trace;

// Re-exports
pub use event::{Event, EventLog};
pub use results::{AggregateResult, RunResult, ToolUnavailability};
pub use trace::RunTrace;
