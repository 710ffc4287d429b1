//! Run and aggregate statistics
//!
//! [`RunResult`] summarizes one trace; [`AggregateResult`] is what the Monte
//! Carlo aggregator hands to callers (CLI, Python bindings).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::line::Buffer;

/// How often the tool was taken out of service, and for how long
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ToolUnavailability {
    /// Hazard occupations per simulated hour
    pub frequency_per_hour: f64,

    /// Unavailable steps per occupation (0 when the tool was never occupied)
    pub mean_duration: f64,
}

/// Statistics of a single run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// `produce` firings per hour
    pub production_rate: f64,

    /// `work` firings with the tool available, per hour
    pub tool_work_rate: f64,

    /// `process1` + `process2` firings per hour
    pub post_processing_rate: f64,

    pub tool_unavailable_stats: ToolUnavailability,

    /// Peak level of each buffer
    pub buffer_sizes: BTreeMap<Buffer, u32>,
}

/// Cross-run summary
///
/// Rates are means over runs. Buffer sizes are the ceiling of the 95th
/// percentile of per-run peaks, a conservative capacity rather than an
/// average. Buffer levels are the per-step mean over runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub production_rate: f64,
    pub tool_work_rate: f64,
    pub post_processing_rate: f64,
    pub tool_unavailable_stats: ToolUnavailability,

    /// Recommended capacity of each buffer
    pub buffer_sizes: BTreeMap<Buffer, u32>,

    /// Mean level of each buffer at every step
    pub buffer_levels: BTreeMap<Buffer, Vec<f64>>,

    /// Runs aggregated
    pub num_simulations: usize,

    /// Seconds simulated per run
    pub simulation_duration: f64,

    /// Seed the per-run generators were derived from
    pub base_seed: u64,
}

impl AggregateResult {
    /// Largest recommended buffer size
    pub fn max_buffer_size(&self) -> u32 {
        self.buffer_sizes.values().copied().max().unwrap_or(0)
    }

    /// Recommended size of one buffer
    pub fn buffer_size(&self, buffer: Buffer) -> u32 {
        self.buffer_sizes.get(&buffer).copied().unwrap_or(0)
    }
}
