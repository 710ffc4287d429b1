//! Orchestrator - single-run driver and Monte Carlo loop
//!
//! See `engine.rs` for the per-step loop and `monte_carlo.rs` for the
//! repetition and aggregation around it.

pub mod engine;
pub mod monte_carlo;

// Re-export main types for convenience
pub use engine::{SimulationError, StochasticProductionSimulation};
