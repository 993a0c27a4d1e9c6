use crate::{DebugInfoError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".wasm-scope-debugger.toml";

/// Default ceiling on rendered disassembly lines for pathologically large modules
pub const DEFAULT_MAX_DISASSEMBLY_LINES: usize = 100_000;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub disassembly: DisassemblyConfig,
    #[serde(default)]
    pub expressions: ExpressionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisassemblyConfig {
    /// Maximum number of rendered text lines before truncation
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,
    /// Marker line appended when output is truncated
    #[serde(default = "default_truncation_marker")]
    pub truncation_marker: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpressionConfig {
    /// Placeholder token standing in for the frame base in decoded expressions
    #[serde(default = "default_frame_base_placeholder")]
    pub frame_base_placeholder: String,
}

fn default_max_lines() -> usize {
    DEFAULT_MAX_DISASSEMBLY_LINES
}

fn default_truncation_marker() -> String {
    ";; .... text is truncated due to the size".to_string()
}

fn default_frame_base_placeholder() -> String {
    crate::expression::FRAME_BASE_PLACEHOLDER.to_string()
}

impl Default for DisassemblyConfig {
    fn default() -> Self {
        Self {
            max_lines: default_max_lines(),
            truncation_marker: default_truncation_marker(),
        }
    }
}

impl Default for ExpressionConfig {
    fn default() -> Self {
        Self {
            frame_base_placeholder: default_frame_base_placeholder(),
        }
    }
}

impl Config {
    /// Load configuration from the default file in the working directory,
    /// falling back to defaults when the file is absent.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Load configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            DebugInfoError::FileError(format!(
                "Failed to read config file {:?}: {}",
                config_path, e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            DebugInfoError::FileError(format!(
                "Failed to parse TOML config from {:?}: {}",
                config_path, e
            ))
        })?;

        Ok(config)
    }
}
