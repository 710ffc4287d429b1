//! Monte Carlo aggregation
//!
//! Scalars are averaged over runs, buffer sizes take a percentile of per-run
//! peaks, and buffer traces are averaged step by step. Traces are folded into
//! running sums so only one run's trace is alive at a time.

use std::collections::BTreeMap;

use crate::line::Buffer;
use crate::models::{AggregateResult, RunResult, RunTrace, ToolUnavailability};

/// Percentile of per-run peaks used as the recommended buffer size
pub const BUFFER_SIZE_PERCENTILE: f64 = 95.0;

/// Percentile with linear interpolation between closest ranks
///
/// `p` is in percent. Returns 0 for an empty sample.
///
/// # Example
/// ```
/// use production_line_sim_core::analysis::percentile;
///
/// assert_eq!(percentile(&[1.0, 2.0, 3.0, 4.0, 5.0], 50.0), 3.0);
/// assert!((percentile(&[1.0, 2.0, 3.0, 4.0, 5.0], 95.0) - 4.8).abs() < 1e-12);
/// ```
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower_idx = rank.floor() as usize;
    let upper_idx = rank.ceil() as usize;
    let weight = rank - lower_idx as f64;

    sorted[lower_idx] * (1.0 - weight) + sorted[upper_idx] * weight
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Running collections for one Monte Carlo study
///
/// # Panics
/// [`fold`](Self::fold) panics if two traces have different lengths; every
/// run of one study shares the same duration and step size.
#[derive(Debug, Clone, Default)]
pub struct MonteCarloAccumulator {
    production_rates: Vec<f64>,
    tool_work_rates: Vec<f64>,
    post_processing_rates: Vec<f64>,
    unavailable_frequencies: Vec<f64>,
    unavailable_durations: Vec<f64>,
    peaks: BTreeMap<Buffer, Vec<f64>>,
    level_sums: BTreeMap<Buffer, Vec<f64>>,
}

impl MonteCarloAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs folded so far
    pub fn num_runs(&self) -> usize {
        self.production_rates.len()
    }

    /// Fold one analyzed run and its trace
    pub fn fold(&mut self, result: &RunResult, trace: &RunTrace) {
        self.production_rates.push(result.production_rate);
        self.tool_work_rates.push(result.tool_work_rate);
        self.post_processing_rates.push(result.post_processing_rate);
        self.unavailable_frequencies
            .push(result.tool_unavailable_stats.frequency_per_hour);
        self.unavailable_durations
            .push(result.tool_unavailable_stats.mean_duration);

        for buffer in Buffer::ALL {
            let peak = result.buffer_sizes.get(&buffer).copied().unwrap_or(0);
            self.peaks.entry(buffer).or_default().push(f64::from(peak));

            let levels = trace.levels(buffer);
            let sums = self.level_sums.entry(buffer).or_default();
            if sums.is_empty() {
                sums.resize(levels.len(), 0.0);
            }
            assert_eq!(
                sums.len(),
                levels.len(),
                "trace of {} has {} samples, earlier runs had {}",
                buffer,
                levels.len(),
                sums.len()
            );
            for (sum, &level) in sums.iter_mut().zip(levels) {
                *sum += f64::from(level);
            }
        }
    }

    /// Reduce everything folded so far
    pub fn finish(self, simulation_duration: f64, base_seed: u64) -> AggregateResult {
        let runs = self.num_runs();

        let buffer_sizes = Buffer::ALL
            .into_iter()
            .map(|b| {
                let peaks = self.peaks.get(&b).map(Vec::as_slice).unwrap_or(&[]);
                (b, percentile(peaks, BUFFER_SIZE_PERCENTILE).ceil() as u32)
            })
            .collect();

        let buffer_levels = self
            .level_sums
            .into_iter()
            .map(|(b, sums)| {
                let means = sums.into_iter().map(|s| s / runs as f64).collect();
                (b, means)
            })
            .collect();

        AggregateResult {
            production_rate: mean(&self.production_rates),
            tool_work_rate: mean(&self.tool_work_rates),
            post_processing_rate: mean(&self.post_processing_rates),
            tool_unavailable_stats: ToolUnavailability {
                frequency_per_hour: mean(&self.unavailable_frequencies),
                mean_duration: mean(&self.unavailable_durations),
            },
            buffer_sizes,
            buffer_levels,
            num_simulations: runs,
            simulation_duration,
            base_seed,
        }
    }
}
