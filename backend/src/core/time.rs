//! Time management for the simulation
//!
//! The simulation operates in discrete steps of [`STEP_SECONDS`]. A run samples
//! every step from `t = 0` up to and including the configured duration.

use serde::{Deserialize, Serialize};

/// Length of one simulation step, in simulated seconds
pub const STEP_SECONDS: f64 = 1.0;

/// Simulated seconds per hour, used for rate and hazard scaling
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Manages simulation time in discrete unit steps
///
/// The step counter is integral so repeated advancement never accumulates
/// floating-point drift.
///
/// # Example
/// ```
/// use production_line_sim_core::TimeManager;
///
/// let mut time = TimeManager::new(3.0);
/// assert_eq!(time.current_time(), 0.0);
///
/// time.advance_step();
/// assert_eq!(time.current_time(), 1.0);
/// assert_eq!(time.num_steps(), 4);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeManager {
    /// Steps elapsed since the start of the run
    current_step: usize,
    /// Last time (inclusive) that is still simulated
    duration: f64,
}

impl TimeManager {
    /// Create a new TimeManager at `t = 0`
    ///
    /// # Arguments
    /// * `duration` - Simulated seconds; the step at exactly `duration` is included
    pub fn new(duration: f64) -> Self {
        Self {
            current_step: 0,
            duration,
        }
    }

    /// Advance time by one step
    pub fn advance_step(&mut self) {
        self.current_step += 1;
    }

    /// Index of the current step (0-based)
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Current simulated time in seconds
    pub fn current_time(&self) -> f64 {
        self.current_step as f64 * STEP_SECONDS
    }

    /// Whether time has moved past the configured duration
    ///
    /// A NaN duration counts as already finished.
    ///
    /// # Example
    /// ```
    /// use production_line_sim_core::TimeManager;
    ///
    /// let mut time = TimeManager::new(1.0);
    /// assert!(!time.is_finished());
    /// time.advance_step();
    /// assert!(!time.is_finished());
    /// time.advance_step();
    /// assert!(time.is_finished());
    /// ```
    pub fn is_finished(&self) -> bool {
        !(self.current_time() <= self.duration)
    }

    /// Number of steps a complete run samples: `floor(duration) + 1`
    pub fn num_steps(&self) -> usize {
        if self.duration >= 0.0 {
            (self.duration / STEP_SECONDS).floor() as usize + 1
        } else {
            0
        }
    }

    /// Configured duration in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Configured duration in hours
    pub fn duration_hours(&self) -> f64 {
        self.duration / SECONDS_PER_HOUR
    }

    /// Rewind to `t = 0`
    pub fn reset(&mut self) {
        self.current_step = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_duration_has_no_steps() {
        let time = TimeManager::new(-5.0);
        assert_eq!(time.num_steps(), 0);
        assert!(time.is_finished());
    }

    #[test]
    fn test_nan_duration_is_finished() {
        let time = TimeManager::new(f64::NAN);
        assert!(time.is_finished());
        assert_eq!(time.num_steps(), 0);
    }

    #[test]
    fn test_fractional_duration_rounds_down() {
        let time = TimeManager::new(2.5);
        assert_eq!(time.num_steps(), 3);
    }
}
