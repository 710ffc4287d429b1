//! Python bindings (feature `pyo3`)
//!
//! Exposes the Monte Carlo entry point to Python. The boundary is kept
//! minimal: a configuration dict goes in, an aggregate-result dict comes out.

pub mod simulation;
mod types;
