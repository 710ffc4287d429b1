//! Run analysis and cross-run aggregation
//!
//! - [`analyze_trace`] reduces one [`RunTrace`] to a [`RunResult`]
//! - [`MonteCarloAccumulator`] folds run results and traces into an
//!   [`AggregateResult`](crate::models::AggregateResult)

mod aggregate;

pub use aggregate::{percentile, MonteCarloAccumulator, BUFFER_SIZE_PERCENTILE};

use crate::core::time::SECONDS_PER_HOUR;
use crate::line::{Buffer, TransitionKind};
use crate::models::{RunResult, RunTrace, ToolUnavailability};

/// Reduce a completed trace to per-run statistics
///
/// Rates are per simulated hour of `simulation_duration`. The mean unavailable
/// duration divides every unavailable step by the number of hazard
/// occupations, and is 0 when the tool was never occupied.
///
/// # Example
/// ```
/// use production_line_sim_core::analysis::analyze_trace;
/// use production_line_sim_core::line::TransitionKind;
/// use production_line_sim_core::models::{Event, RunTrace};
///
/// let mut trace = RunTrace::with_capacity(2);
/// trace.record_step([0, 0, 0], true);
/// trace.record_step([1, 0, 0], true);
/// trace.events.log(Event::Fired { time: 0.0, transition: TransitionKind::Produce });
///
/// let result = analyze_trace(&trace, 1800.0);
/// assert_eq!(result.production_rate, 2.0);
/// assert_eq!(result.tool_unavailable_stats.mean_duration, 0.0);
/// ```
pub fn analyze_trace(trace: &RunTrace, simulation_duration: f64) -> RunResult {
    let hours = simulation_duration / SECONDS_PER_HOUR;
    let count = |kind: TransitionKind| trace.events.count(kind) as f64;

    let work_with_tool = trace
        .work_when_tool_available
        .iter()
        .filter(|&&available| available)
        .count() as f64;

    let occupations = trace.events.count(TransitionKind::ToolOccupy);
    let mean_duration = if occupations > 0 {
        trace.unavailable_steps() as f64 / occupations as f64
    } else {
        0.0
    };

    let buffer_sizes = Buffer::ALL
        .into_iter()
        .map(|b| (b, trace.levels(b).iter().copied().max().unwrap_or(0)))
        .collect();

    RunResult {
        production_rate: count(TransitionKind::Produce) / hours,
        tool_work_rate: work_with_tool / hours,
        post_processing_rate: (count(TransitionKind::Process1) + count(TransitionKind::Process2))
            / hours,
        tool_unavailable_stats: ToolUnavailability {
            frequency_per_hour: occupations as f64 / hours,
            mean_duration,
        },
        buffer_sizes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Event;

    fn fired(time: f64, transition: TransitionKind) -> Event {
        Event::Fired { time, transition }
    }

    #[test]
    fn test_rates_are_per_hour() {
        let mut trace = RunTrace::with_capacity(4);
        for _ in 0..4 {
            trace.record_step([0, 0, 0], true);
        }
        trace.events.log(fired(0.0, TransitionKind::Produce));
        trace.events.log(fired(1.0, TransitionKind::Process1));
        trace.events.log(fired(2.0, TransitionKind::Process2));
        trace.events.log(fired(2.0, TransitionKind::Process2));

        let result = analyze_trace(&trace, 7200.0);
        assert_eq!(result.production_rate, 0.5);
        assert_eq!(result.post_processing_rate, 1.5);
        assert_eq!(result.tool_work_rate, 0.0);
    }

    #[test]
    fn test_tool_work_rate_counts_only_true_flags() {
        let mut trace = RunTrace::with_capacity(1);
        trace.record_step([0, 0, 0], true);
        trace.work_when_tool_available = vec![true, false, true, false];

        let result = analyze_trace(&trace, 3600.0);
        assert_eq!(result.tool_work_rate, 2.0);
    }

    #[test]
    fn test_unavailability_stats() {
        let mut trace = RunTrace::with_capacity(6);
        for available in [true, false, false, false, true, false] {
            trace.record_step([0, 0, 0], available);
        }
        trace.events.log(Event::ToolOccupied { time: 0.0 });
        trace.events.log(Event::ToolOccupied { time: 4.0 });

        let result = analyze_trace(&trace, 3600.0);
        assert_eq!(result.tool_unavailable_stats.frequency_per_hour, 2.0);
        assert_eq!(result.tool_unavailable_stats.mean_duration, 2.0);
    }

    #[test]
    fn test_buffer_peaks() {
        let mut trace = RunTrace::with_capacity(3);
        trace.record_step([1, 0, 2], true);
        trace.record_step([4, 1, 2], true);
        trace.record_step([2, 3, 0], true);

        let result = analyze_trace(&trace, 3600.0);
        assert_eq!(result.buffer_sizes[&Buffer::Buffer1], 4);
        assert_eq!(result.buffer_sizes[&Buffer::Buffer2], 3);
        assert_eq!(result.buffer_sizes[&Buffer::Buffer3], 2);
    }
}
