//! Report rendering for the `run` command

use std::fmt::Write;

use serde::Serialize;

use production_line_sim_core::config::SimulationConfig;
use production_line_sim_core::core::time::SECONDS_PER_HOUR;
use production_line_sim_core::AggregateResult;

/// Human-readable summary
pub fn render_text(result: &AggregateResult, config_hash: &str) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "\nSimulation Results:");
    let _ = writeln!(
        out,
        "  ({} runs of {:.1} hours, seed {}, config {})",
        result.num_simulations,
        result.simulation_duration / SECONDS_PER_HOUR,
        result.base_seed,
        &config_hash[..config_hash.len().min(12)]
    );
    let _ = writeln!(
        out,
        "\n1. Production Rate: {:.2} items/hour",
        result.production_rate
    );
    let _ = writeln!(
        out,
        "2. Tool Work Rate when Available: {:.2} operations/hour",
        result.tool_work_rate
    );
    let _ = writeln!(out, "3. Tool Unavailability:");
    let _ = writeln!(
        out,
        "   - Frequency: {:.2} times/hour",
        result.tool_unavailable_stats.frequency_per_hour
    );
    let _ = writeln!(
        out,
        "   - Average Duration: {:.2} seconds",
        result.tool_unavailable_stats.mean_duration
    );
    let _ = writeln!(
        out,
        "4. Post-Processing Rate: {:.2} items/hour",
        result.post_processing_rate
    );

    let _ = writeln!(out, "\nRecommended Buffer Sizes:");
    for (buffer, size) in &result.buffer_sizes {
        let _ = writeln!(out, "  {}: {} items", buffer, size);
    }
    out
}

#[derive(Serialize)]
struct Report<'a> {
    config_hash: &'a str,
    config: &'a SimulationConfig,
    result: &'a AggregateResult,
}

/// Machine-readable report: configuration, its hash, and the aggregate result
pub fn render_json(
    config: &SimulationConfig,
    config_hash: &str,
    result: &AggregateResult,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Report {
        config_hash,
        config,
        result,
    })
}
