//! PyO3 wrapper for the simulation
//!
//! This module provides the Python interface to the Rust engine.

use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{aggregate_result_to_py, parse_transition_config};
use crate::config::DEFAULT_SIMULATION_DURATION;
use crate::orchestrator::StochasticProductionSimulation;

/// Python wrapper for [`StochasticProductionSimulation`]
///
/// # Example (from Python)
///
/// ```python
/// from production_line_sim_core import Simulation
///
/// config = {
///     "produce": {"mean_time": 40.0, "time_sd": 5.0},
///     "tool_occupied_ratio": 0.15,
/// }
///
/// sim = Simulation(config, simulation_duration=3600.0 * 8)
/// result = sim.run_monte_carlo(100, seed=42)
/// print(f"{result['production_rate']:.2f} items/hour")
/// ```
#[pyclass(name = "Simulation")]
pub struct PySimulation {
    inner: StochasticProductionSimulation,
}

#[pymethods]
impl PySimulation {
    /// Create a simulation from a transition-config dict
    ///
    /// Missing fields take their defaults. Raises ValueError if a value is
    /// out of range.
    #[new]
    #[pyo3(signature = (config, simulation_duration = DEFAULT_SIMULATION_DURATION))]
    fn new(config: &Bound<'_, PyDict>, simulation_duration: f64) -> PyResult<Self> {
        let transitions = parse_transition_config(config)?;
        transitions
            .validate()
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))?;

        if !simulation_duration.is_finite() || simulation_duration <= 0.0 {
            return Err(PyErr::new::<pyo3::exceptions::PyValueError, _>(
                "simulation_duration must be a finite value > 0",
            ));
        }

        let inner = StochasticProductionSimulation::new(transitions, simulation_duration)
            .map_err(|e| {
                PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
                    "Failed to create simulation: {}",
                    e
                ))
            })?;

        Ok(PySimulation { inner })
    }

    /// Run a Monte Carlo study and return the aggregate result as a dict
    ///
    /// Keys: `production_rate`, `tool_work_rate`, `post_processing_rate`,
    /// `tool_unavailable_stats` (frequency, mean duration), `buffer_sizes`,
    /// `buffer_levels`, `num_simulations`, `simulation_duration`, `base_seed`.
    #[pyo3(signature = (num_simulations = 100, seed = None))]
    fn run_monte_carlo<'py>(
        &mut self,
        py: Python<'py>,
        num_simulations: usize,
        seed: Option<u64>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let result = self
            .inner
            .run_monte_carlo(num_simulations, seed)
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))?;

        aggregate_result_to_py(py, &result)
    }

    /// Graphviz DOT source of the production network
    fn dot(&self) -> String {
        self.inner.line().net().to_dot()
    }

    #[getter]
    fn simulation_duration(&self) -> f64 {
        self.inner.simulation_duration()
    }
}
