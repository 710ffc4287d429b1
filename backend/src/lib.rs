//! Production Line Simulator Core - Rust Engine
//!
//! Stochastic, discrete-time simulation of a small manufacturing line
//! modelled as a Petri net, with Monte Carlo aggregation of throughput,
//! tool contention and buffer occupancy.
//!
//! # Architecture
//!
//! - **petri**: Generic token-flow primitive (places, arcs, transitions)
//! - **line**: The fixed production topology built on it
//! - **config**: Timing parameters and run settings
//! - **core**: Unit-step time management
//! - **rng**: Deterministic, per-run random number generation
//! - **orchestrator**: Single-run driver and Monte Carlo loop
//! - **analysis**: Per-run statistics and cross-run aggregation
//! - **models**: Event log, run trace and result records
//!
//! # Critical Invariants
//!
//! 1. Token counts never go negative; firing is all-or-nothing
//! 2. Per-step firing order is tool_release, produce, work, process1, process2
//! 3. All randomness is deterministic given the base seed
//!
//! # Example
//!
//! ```
//! use production_line_sim_core::{StochasticProductionSimulation, TransitionConfig};
//!
//! let mut sim = StochasticProductionSimulation::new(TransitionConfig::default(), 1800.0).unwrap();
//! let result = sim.run_monte_carlo(10, Some(1)).unwrap();
//!
//! println!("{:.2} items/hour", result.production_rate);
//! for (buffer, size) in &result.buffer_sizes {
//!     println!("{}: {} items", buffer, size);
//! }
//! ```

// Module declarations
pub mod analysis;
pub mod config;
pub mod core;
pub mod line;
pub mod models;
pub mod orchestrator;
pub mod petri;
pub mod rng;

// Re-exports for convenience
pub use config::{ConfigError, SimulationConfig, TransitionConfig, TransitionParams};
pub use core::time::TimeManager;
pub use line::{Buffer, ProductionLine, TransitionKind};
pub use models::{AggregateResult, Event, EventLog, RunResult, RunTrace, ToolUnavailability};
pub use orchestrator::monte_carlo::run_simulation;
pub use orchestrator::{SimulationError, StochasticProductionSimulation};
pub use petri::{PetriNet, PetriNetError};
pub use rng::RngManager;

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn production_line_sim_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::simulation::PySimulation>()?;
    Ok(())
}
