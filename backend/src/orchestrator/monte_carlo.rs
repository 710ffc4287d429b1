//! Monte Carlo loop
//!
//! Repeats reset → run → analyze → fold. Each run draws from its own
//! generator, [`RngManager::for_run`]`(base_seed, run_index)`, so a run's
//! outcome depends only on the base seed and its index.

use tracing::{debug, info, info_span};

use crate::analysis::MonteCarloAccumulator;
use crate::config::SimulationConfig;
use crate::models::AggregateResult;
use crate::orchestrator::engine::{SimulationError, StochasticProductionSimulation};
use crate::rng::{entropy_seed, RngManager};

impl StochasticProductionSimulation {
    /// Run `num_simulations` independent runs and aggregate them
    ///
    /// With `base_seed = None` a seed is drawn from OS entropy and reported
    /// in [`AggregateResult::base_seed`].
    ///
    /// # Errors
    /// [`SimulationError::NoRuns`] if `num_simulations` is 0
    ///
    /// # Example
    /// ```
    /// use production_line_sim_core::{StochasticProductionSimulation, TransitionConfig};
    ///
    /// let mut sim = StochasticProductionSimulation::new(TransitionConfig::default(), 600.0).unwrap();
    /// let result = sim.run_monte_carlo(5, Some(42)).unwrap();
    ///
    /// assert_eq!(result.num_simulations, 5);
    /// assert_eq!(result.base_seed, 42);
    /// ```
    pub fn run_monte_carlo(
        &mut self,
        num_simulations: usize,
        base_seed: Option<u64>,
    ) -> Result<AggregateResult, SimulationError> {
        if num_simulations == 0 {
            return Err(SimulationError::NoRuns);
        }
        let base_seed = base_seed.unwrap_or_else(entropy_seed);

        let span = info_span!("monte_carlo", runs = num_simulations, base_seed);
        let _enter = span.enter();
        info!(
            duration = self.simulation_duration(),
            "starting Monte Carlo study"
        );

        let mut accumulator = MonteCarloAccumulator::new();
        for run_index in 0..num_simulations {
            self.reset();
            let mut rng = RngManager::for_run(base_seed, run_index as u64);

            let trace = self.run_single_simulation(&mut rng);
            let result = self.analyze_simulation_state(&trace);
            debug!(
                run = run_index,
                events = trace.events.len(),
                production_rate = result.production_rate,
                "run complete"
            );

            accumulator.fold(&result, &trace);
        }

        let aggregate = accumulator.finish(self.simulation_duration(), base_seed);
        info!(
            production_rate = aggregate.production_rate,
            max_buffer_size = aggregate.max_buffer_size(),
            "Monte Carlo study complete"
        );
        Ok(aggregate)
    }
}

/// Validate a configuration and run the Monte Carlo study it describes
///
/// # Example
/// ```
/// use production_line_sim_core::config::SimulationConfig;
/// use production_line_sim_core::run_simulation;
///
/// let config = SimulationConfig {
///     simulation_duration: 600.0,
///     num_simulations: 3,
///     rng_seed: Some(7),
///     ..Default::default()
/// };
/// let result = run_simulation(&config).unwrap();
/// assert_eq!(result.buffer_levels.len(), 3);
/// ```
pub fn run_simulation(config: &SimulationConfig) -> Result<AggregateResult, SimulationError> {
    let mut simulation = StochasticProductionSimulation::from_config(config)?;
    simulation.run_monte_carlo(config.num_simulations, config.rng_seed)
}
