//! Simulation configuration
//!
//! Timing parameters for the six production-line transitions, the tool
//! occupation hazard, and the Monte Carlo run settings. These records are the
//! caller-facing configuration layer: [`SimulationConfig::validate`] rejects
//! out-of-range values before they reach the engine, which itself accepts
//! anything (a non-positive mean simply floors every delay to one step).
//!
//! # Example
//!
//! ```
//! use production_line_sim_core::config::SimulationConfig;
//!
//! let config = SimulationConfig::from_json_str(r#"{
//!     "simulation_duration": 28800.0,
//!     "transitions": { "tool_occupied_ratio": 0.2 }
//! }"#).unwrap();
//!
//! assert_eq!(config.simulation_duration, 28800.0);
//! assert_eq!(config.transitions.tool_occupied_ratio, 0.2);
//! assert_eq!(config.transitions.produce.mean_time, 40.0);
//! config.validate().unwrap();
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::core::time::SECONDS_PER_HOUR;
use crate::line::TransitionKind;

/// Default length of one simulated run, in seconds
pub const DEFAULT_SIMULATION_DURATION: f64 = SECONDS_PER_HOUR;

/// Default number of Monte Carlo repetitions
pub const DEFAULT_NUM_SIMULATIONS: usize = 100;

/// Errors from loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Normal distribution over the delay before a transition may fire again
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionParams {
    /// Mean delay in simulated seconds
    pub mean_time: f64,
    /// Standard deviation of the delay
    pub time_sd: f64,
}

impl TransitionParams {
    pub const fn new(mean_time: f64, time_sd: f64) -> Self {
        Self { mean_time, time_sd }
    }

    fn validate(&self, field: &str) -> Result<(), ConfigError> {
        if !self.mean_time.is_finite() || self.mean_time < 0.0 {
            return Err(ConfigError::invalid(
                format!("{}.mean_time", field),
                format!("must be a finite value >= 0, got {}", self.mean_time),
            ));
        }
        if !self.time_sd.is_finite() || self.time_sd < 0.0 {
            return Err(ConfigError::invalid(
                format!("{}.time_sd", field),
                format!("must be a finite value >= 0, got {}", self.time_sd),
            ));
        }
        Ok(())
    }
}

/// Timing of every transition plus the tool occupation hazard
///
/// Immutable for the lifetime of a simulation instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    pub produce: TransitionParams,
    pub work: TransitionParams,
    pub process1: TransitionParams,
    pub process2: TransitionParams,
    pub tool_occupy: TransitionParams,
    pub tool_release: TransitionParams,

    /// Hazard probability per step at `t = 0`
    pub tool_occupied_ratio: f64,

    /// How quickly the hazard decays with elapsed hours (logarithmic)
    pub tool_occupied_ratio_decay_rate: f64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            produce: TransitionParams::new(40.0, 5.0),
            work: TransitionParams::new(20.0, 10.0),
            process1: TransitionParams::new(30.0, 10.0),
            process2: TransitionParams::new(30.0, 10.0),
            tool_occupy: TransitionParams::new(5.0, 0.0),
            tool_release: TransitionParams::new(50.0, 20.0),
            tool_occupied_ratio: 0.15,
            tool_occupied_ratio_decay_rate: 0.8,
        }
    }
}

impl TransitionConfig {
    /// Timing parameters bound to one transition
    pub fn params(&self, kind: TransitionKind) -> &TransitionParams {
        match kind {
            TransitionKind::Produce => &self.produce,
            TransitionKind::Work => &self.work,
            TransitionKind::Process1 => &self.process1,
            TransitionKind::Process2 => &self.process2,
            TransitionKind::ToolOccupy => &self.tool_occupy,
            TransitionKind::ToolRelease => &self.tool_release,
        }
    }

    /// Check every value against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in TransitionKind::ALL {
            self.params(kind).validate(kind.name())?;
        }

        let ratio = self.tool_occupied_ratio;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(ConfigError::invalid(
                "tool_occupied_ratio",
                format!("must be within [0, 1], got {}", ratio),
            ));
        }

        let decay = self.tool_occupied_ratio_decay_rate;
        if !decay.is_finite() || decay < 0.0 {
            return Err(ConfigError::invalid(
                "tool_occupied_ratio_decay_rate",
                format!("must be a finite value >= 0, got {}", decay),
            ));
        }

        Ok(())
    }
}

/// Everything needed to run a Monte Carlo study
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub transitions: TransitionConfig,

    /// Simulated seconds per run (the step at exactly this time is included)
    pub simulation_duration: f64,

    /// Number of independent runs to aggregate
    pub num_simulations: usize,

    /// Base seed; `None` draws one from OS entropy per Monte Carlo call
    pub rng_seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            transitions: TransitionConfig::default(),
            simulation_duration: DEFAULT_SIMULATION_DURATION,
            num_simulations: DEFAULT_NUM_SIMULATIONS,
            rng_seed: None,
        }
    }
}

impl SimulationConfig {
    /// Parse a configuration from JSON; omitted fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Validate the timing table and the run settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.transitions.validate()?;

        if !self.simulation_duration.is_finite() || self.simulation_duration <= 0.0 {
            return Err(ConfigError::invalid(
                "simulation_duration",
                format!("must be a finite value > 0, got {}", self.simulation_duration),
            ));
        }
        if self.num_simulations == 0 {
            return Err(ConfigError::invalid("num_simulations", "must be > 0"));
        }

        Ok(())
    }

    /// SHA-256 of the canonical JSON form of this configuration
    ///
    /// `serde_json` maps keep their keys sorted, so equal configurations
    /// always hash identically.
    pub fn config_hash(&self) -> Result<String, ConfigError> {
        let value = serde_json::to_value(self)?;
        let json = serde_json::to_string(&value)?;

        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        Ok(format!("{:x}", hasher.finalize()))
    }
}
