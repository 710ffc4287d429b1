//! Orchestrator Engine - single-run driver
//!
//! Runs the production line forward in unit steps and records a [`RunTrace`].
//!
//! # Architecture
//!
//! ```text
//! For each step t = 0, 1, ..., floor(simulation_duration):
//! 1. Record buffer levels and tool availability (before any firing)
//! 2. Tool hazard: maybe fire tool_occupy with probability p(t)
//! 3. Priority pass: tool_release, produce, work, process1, process2
//! 4. Advance time by one step
//! ```
//!
//! Every transition has its own earliest re-fire time. A transition that is
//! enabled by tokens is still skipped until its timer has elapsed; after a
//! firing the timer moves to `t + max(1, Normal(mean, sd))`.
//!
//! The hazard probability decays logarithmically with elapsed hours:
//!
//! ```text
//! p(t) = ratio / (1 + decay * ln(1 + t / 3600))
//! ```
//!
//! # Example
//!
//! ```rust
//! use production_line_sim_core::{RngManager, StochasticProductionSimulation, TransitionConfig};
//!
//! let mut sim = StochasticProductionSimulation::new(TransitionConfig::default(), 600.0).unwrap();
//! let mut rng = RngManager::new(12345);
//!
//! let trace = sim.run_single_simulation(&mut rng);
//! assert_eq!(trace.num_samples(), 601);
//! ```

use thiserror::Error;
use tracing::trace;

use crate::analysis::analyze_trace;
use crate::config::{ConfigError, SimulationConfig, TransitionConfig, DEFAULT_SIMULATION_DURATION};
use crate::core::time::{TimeManager, SECONDS_PER_HOUR};
use crate::line::{Buffer, ProductionLine, TransitionKind};
use crate::models::{Event, RunResult, RunTrace};
use crate::petri::PetriNetError;
use crate::rng::RngManager;

// ============================================================================
// Errors
// ============================================================================

/// Simulation error types
///
/// Only raised while setting a simulation up; stepping and firing never fail.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation error
    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// The production network could not be built
    #[error("Topology error: {0}")]
    Topology(#[from] PetriNetError),

    /// A Monte Carlo study was requested with zero runs
    #[error("num_simulations must be at least 1")]
    NoRuns,
}

// ============================================================================
// Re-fire schedule
// ============================================================================

/// Earliest time each transition may fire again
#[derive(Debug, Clone, Default)]
struct FireSchedule {
    next: [f64; TransitionKind::ALL.len()],
}

impl FireSchedule {
    fn is_due(&self, kind: TransitionKind, time: f64) -> bool {
        time >= self.next[kind as usize]
    }

    fn set(&mut self, kind: TransitionKind, time: f64) {
        self.next[kind as usize] = time;
    }
}

// ============================================================================
// Simulation
// ============================================================================

/// Stochastic simulation of the production line
///
/// Owns its network, which is mutated by each run and reset to the initial
/// marking before the next. Randomness is always passed in, so the instance
/// itself holds no generator state.
#[derive(Debug, Clone)]
pub struct StochasticProductionSimulation {
    line: ProductionLine,
    config: TransitionConfig,
    simulation_duration: f64,
}

impl StochasticProductionSimulation {
    /// Create a simulation over `simulation_duration` seconds
    ///
    /// The configuration is taken as is; use
    /// [`from_config`](Self::from_config) to validate first.
    pub fn new(
        config: TransitionConfig,
        simulation_duration: f64,
    ) -> Result<Self, SimulationError> {
        Ok(Self {
            line: ProductionLine::new()?,
            config,
            simulation_duration,
        })
    }

    /// Create a one-hour simulation
    pub fn with_default_duration(config: TransitionConfig) -> Result<Self, SimulationError> {
        Self::new(config, DEFAULT_SIMULATION_DURATION)
    }

    /// Validate a full configuration and build a simulation from it
    pub fn from_config(config: &SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Self::new(config.transitions.clone(), config.simulation_duration)
    }

    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    pub fn simulation_duration(&self) -> f64 {
        self.simulation_duration
    }

    pub fn line(&self) -> &ProductionLine {
        &self.line
    }

    /// Restore the initial marking
    pub fn reset(&mut self) {
        self.line.reset();
    }

    /// Probability that the tool gets occupied at a step at time `t`
    pub fn hazard_probability(&self, time: f64) -> f64 {
        let decay = self.config.tool_occupied_ratio_decay_rate;
        self.config.tool_occupied_ratio / (1.0 + decay * (time / SECONDS_PER_HOUR).ln_1p())
    }

    /// Run the line forward from its current marking and record a trace
    ///
    /// Does not reset the network; the Monte Carlo loop does that.
    pub fn run_single_simulation(&mut self, rng: &mut RngManager) -> RunTrace {
        let mut clock = TimeManager::new(self.simulation_duration);
        let mut trace = RunTrace::with_capacity(clock.num_steps());
        let mut schedule = FireSchedule::default();

        while !clock.is_finished() {
            let time = clock.current_time();

            // 1. Sample state before anything fires this step
            let tool_available = self.line.tool_available();
            trace.record_step(
                [
                    self.line.buffer_level(Buffer::Buffer1),
                    self.line.buffer_level(Buffer::Buffer2),
                    self.line.buffer_level(Buffer::Buffer3),
                ],
                tool_available,
            );

            // 2. Tool occupation hazard; the draw only happens once the
            //    deterministic gates pass
            if tool_available
                && schedule.is_due(TransitionKind::ToolOccupy, time)
                && rng.next_f64() < self.hazard_probability(time)
                && self.line.fire(TransitionKind::ToolOccupy)
            {
                trace!(time, "tool occupied");
                trace.events.log(Event::ToolOccupied { time });
                self.reschedule(&mut schedule, TransitionKind::ToolOccupy, time, rng);
                trace.work_when_tool_available.push(false);
            }

            // 3. Priority pass
            for kind in TransitionKind::FIRING_ORDER {
                if !schedule.is_due(kind, time) || !self.line.fire(kind) {
                    continue;
                }

                trace!(time, transition = %kind, "fired");
                trace.events.log(Event::Fired {
                    time,
                    transition: kind,
                });
                self.reschedule(&mut schedule, kind, time, rng);

                if kind == TransitionKind::Work {
                    trace.work_when_tool_available.push(tool_available);
                }
            }

            // 4. Advance time
            clock.advance_step();
        }

        trace
    }

    /// Reduce a trace produced by this simulation
    pub fn analyze_simulation_state(&self, trace: &RunTrace) -> RunResult {
        analyze_trace(trace, self.simulation_duration)
    }

    fn reschedule(
        &self,
        schedule: &mut FireSchedule,
        kind: TransitionKind,
        time: f64,
        rng: &mut RngManager,
    ) {
        let delay = rng.delay(self.config.params(kind));
        schedule.set(kind, time + delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransitionParams;

    fn quiet_config() -> TransitionConfig {
        TransitionConfig {
            tool_occupied_ratio: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_hazard_probability_decays() {
        let sim = StochasticProductionSimulation::new(TransitionConfig::default(), 3600.0).unwrap();

        assert!((sim.hazard_probability(0.0) - 0.15).abs() < 1e-12);
        let expected = 0.15 / (1.0 + 0.8 * 2.0_f64.ln());
        assert!((sim.hazard_probability(3600.0) - expected).abs() < 1e-12);
        assert!(sim.hazard_probability(7200.0) < sim.hazard_probability(3600.0));
    }

    #[test]
    fn test_zero_decay_keeps_hazard_flat() {
        let config = TransitionConfig {
            tool_occupied_ratio_decay_rate: 0.0,
            ..Default::default()
        };
        let sim = StochasticProductionSimulation::new(config, 3600.0).unwrap();
        assert_eq!(sim.hazard_probability(0.0), sim.hazard_probability(10_000.0));
    }

    #[test]
    fn test_first_step_fires_in_priority_order() {
        let mut sim = StochasticProductionSimulation::new(quiet_config(), 0.0).unwrap();
        let trace = sim.run_single_simulation(&mut RngManager::new(1));

        // Each firing enables the next transition in the order, so the whole
        // chain runs within the first step.
        let fired: Vec<TransitionKind> = trace.events.events().iter().map(|e| e.transition()).collect();
        assert_eq!(
            fired,
            vec![
                TransitionKind::Produce,
                TransitionKind::Work,
                TransitionKind::Process1,
                TransitionKind::Process2,
            ]
        );
        assert_eq!(trace.num_samples(), 1);
        assert_eq!(trace.work_when_tool_available, vec![true]);
    }

    #[test]
    fn test_never_occupied_without_hazard() {
        let mut sim = StochasticProductionSimulation::new(quiet_config(), 3600.0).unwrap();
        let trace = sim.run_single_simulation(&mut RngManager::new(5));

        assert_eq!(trace.events.count(TransitionKind::ToolOccupy), 0);
        assert_eq!(trace.events.count(TransitionKind::ToolRelease), 0);
        assert!(trace.tool_state.iter().all(|&available| available));
    }

    #[test]
    fn test_certain_hazard_occupies_at_first_step() {
        let config = TransitionConfig {
            tool_occupied_ratio: 1.0,
            tool_occupied_ratio_decay_rate: 0.0,
            ..Default::default()
        };
        let mut sim = StochasticProductionSimulation::new(config, 0.0).unwrap();
        let trace = sim.run_single_simulation(&mut RngManager::new(3));

        assert_eq!(trace.events.events()[0], Event::ToolOccupied { time: 0.0 });
        // tool_release is due at t = 0 and goes first, so work still gets the
        // tool in the same step.
        assert_eq!(
            trace.events.events()[1],
            Event::Fired {
                time: 0.0,
                transition: TransitionKind::ToolRelease
            }
        );
        assert_eq!(trace.events.count(TransitionKind::Work), 1);
        assert_eq!(trace.work_when_tool_available, vec![false, true]);
        assert_eq!(trace.tool_state, vec![true]);
    }

    #[test]
    fn test_timer_gates_refiring() {
        let config = TransitionConfig {
            produce: TransitionParams::new(10.0, 0.0),
            ..quiet_config()
        };
        let mut sim = StochasticProductionSimulation::new(config, 25.0).unwrap();
        let trace = sim.run_single_simulation(&mut RngManager::new(8));

        let times: Vec<f64> = trace
            .events
            .events_of(TransitionKind::Produce)
            .iter()
            .map(|e| e.time())
            .collect();
        assert_eq!(times, vec![0.0, 10.0, 20.0]);
    }
}
