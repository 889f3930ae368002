//! Configuration system for the pipeline simulator.
//!
//! This module defines the configuration structures used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline constants (data memory size, cycle cap).
//! 2. **Structures:** Hierarchical config for general, memory, and pipeline settings.
//!
//! Configuration is supplied as JSON (every field optional) or built with `Config::default()`.

use serde::Deserialize;

use crate::common::{SimError, SimResult};

/// Default configuration constants for the simulator.
mod defaults {
    /// Capacity of the data memory in bytes (4 KiB).
    ///
    /// Every load and store must lie fully inside `[0, MEMORY_SIZE)`.
    pub const MEMORY_SIZE: usize = 4096;

    /// Safety cap on the number of cycles a run may take.
    ///
    /// Programs that never drain (for example an unconditional backward jump)
    /// stop here with a cycle-limit outcome instead of hanging.
    pub const MAX_CYCLES: u64 = 1000;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use rvpipe_core::config::Config;
///
/// let config = Config::from_json(r#"{ "pipeline": { "max_cycles": 50 } }"#).unwrap();
/// assert_eq!(config.pipeline.max_cycles, 50);
/// assert_eq!(config.memory.size_bytes, 4096);
/// assert!(!config.general.trace_instructions);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Data memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Pipeline run-control configuration
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// Missing sections and fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] carrying the parser message when the text is not
    /// valid JSON or a field has the wrong type.
    pub fn from_json(text: &str) -> SimResult<Self> {
        serde_json::from_str(text).map_err(|e| SimError::Io(format!("invalid config: {e}")))
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Log the pipeline occupancy of every cycle at `info` level.
    #[serde(default)]
    pub trace_instructions: bool,
}

/// Data memory configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryConfig {
    /// Capacity of the data memory in bytes.
    #[serde(default = "MemoryConfig::default_size_bytes")]
    pub size_bytes: usize,
}

impl MemoryConfig {
    /// Returns the default data memory capacity.
    const fn default_size_bytes() -> usize {
        defaults::MEMORY_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::MEMORY_SIZE,
        }
    }
}

/// Pipeline run-control configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PipelineConfig {
    /// Hard cap on cycles for `run_to_completion`.
    #[serde(default = "PipelineConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl PipelineConfig {
    /// Returns the default cycle cap.
    const fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}
