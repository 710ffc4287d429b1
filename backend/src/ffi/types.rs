//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust records and Python dicts.

use std::collections::BTreeMap;

use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::config::{TransitionConfig, TransitionParams};
use crate::line::TransitionKind;
use crate::models::AggregateResult;

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract a field with a default value if missing.
///
/// # Errors
/// Returns error only if type conversion fails (not if field is missing)
fn extract_with_default<'py, T>(dict: &Bound<'py, PyDict>, key: &str, default: T) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) => value.extract(),
        None => Ok(default),
    }
}

// ========================================================================
// Configuration Parsers
// ========================================================================

/// Convert a `{"mean_time": .., "time_sd": ..}` dict, defaulting each field
fn parse_transition_params(
    dict: &Bound<'_, PyDict>,
    default: TransitionParams,
) -> PyResult<TransitionParams> {
    Ok(TransitionParams {
        mean_time: extract_with_default(dict, "mean_time", default.mean_time)?,
        time_sd: extract_with_default(dict, "time_sd", default.time_sd)?,
    })
}

/// Convert Python dict to TransitionConfig
///
/// Transition entries are keyed by transition name; omitted entries and
/// fields keep their defaults.
pub fn parse_transition_config(py_config: &Bound<'_, PyDict>) -> PyResult<TransitionConfig> {
    let defaults = TransitionConfig::default();
    let mut config = defaults.clone();

    for kind in TransitionKind::ALL {
        if let Some(item) = py_config.get_item(kind.name())? {
            let params_dict = item.downcast_into::<PyDict>()?;
            let params = parse_transition_params(&params_dict, *defaults.params(kind))?;
            match kind {
                TransitionKind::Produce => config.produce = params,
                TransitionKind::Work => config.work = params,
                TransitionKind::Process1 => config.process1 = params,
                TransitionKind::Process2 => config.process2 = params,
                TransitionKind::ToolOccupy => config.tool_occupy = params,
                TransitionKind::ToolRelease => config.tool_release = params,
            }
        }
    }

    config.tool_occupied_ratio =
        extract_with_default(py_config, "tool_occupied_ratio", defaults.tool_occupied_ratio)?;
    config.tool_occupied_ratio_decay_rate = extract_with_default(
        py_config,
        "tool_occupied_ratio_decay_rate",
        defaults.tool_occupied_ratio_decay_rate,
    )?;

    Ok(config)
}

// ========================================================================
// Result Conversion
// ========================================================================

/// Convert an AggregateResult to a Python dict
pub fn aggregate_result_to_py<'py>(
    py: Python<'py>,
    result: &AggregateResult,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("production_rate", result.production_rate)?;
    dict.set_item("tool_work_rate", result.tool_work_rate)?;
    dict.set_item("post_processing_rate", result.post_processing_rate)?;
    dict.set_item(
        "tool_unavailable_stats",
        (
            result.tool_unavailable_stats.frequency_per_hour,
            result.tool_unavailable_stats.mean_duration,
        ),
    )?;

    let buffer_sizes: BTreeMap<String, u32> = result
        .buffer_sizes
        .iter()
        .map(|(b, &size)| (b.name().to_string(), size))
        .collect();
    dict.set_item("buffer_sizes", buffer_sizes)?;

    let buffer_levels: BTreeMap<String, Vec<f64>> = result
        .buffer_levels
        .iter()
        .map(|(b, levels)| (b.name().to_string(), levels.clone()))
        .collect();
    dict.set_item("buffer_levels", buffer_levels)?;

    dict.set_item("num_simulations", result.num_simulations)?;
    dict.set_item("simulation_duration", result.simulation_duration)?;
    dict.set_item("base_seed", result.base_seed)?;

    Ok(dict)
}
