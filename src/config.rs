//! kmap-solver configuration
//!
//! Loaded from `kmap.yaml` (or `.kmap.yaml`). Every section and field has a
//! default, so an empty file or no file at all is a valid configuration.

use crate::error::{Error, Result};
use crate::render::RenderConfig;
use crate::simplify::SimplifyMode;
use crate::simulate::SimulatorConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File names searched by [`Config::discover`], in order
pub const CONFIG_FILES: [&str; 2] = ["kmap.yaml", ".kmap.yaml"];

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Sum-of-products reduction
    pub simplify: SimplifyConfig,

    /// Verilog output
    pub render: RenderConfig,

    /// External simulator
    pub simulator: SimulatorConfig,
}

/// Simplifier settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SimplifyConfig {
    pub mode: SimplifyMode,
}

impl Config {
    /// Parse YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_norway::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a specific file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Load the first config file found in `dir`, or defaults when there is none
    pub fn discover(dir: &Path) -> Result<Self> {
        match Self::find(dir) {
            Some(path) => {
                log::debug!("using config {}", path.display());
                Self::load(&path)
            }
            None => Ok(Config::default()),
        }
    }

    /// Path of the config file [`Config::discover`] would read
    pub fn find(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Render back to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_norway::to_string(self)?)
    }

    fn validate(&self) -> Result<()> {
        if self.render.module_name.trim().is_empty() {
            return Err(Error::Config("render.module_name must not be empty".into()));
        }
        if self.render.output_name.trim().is_empty() {
            return Err(Error::Config("render.output_name must not be empty".into()));
        }
        if self.render.step_delay == 0 {
            return Err(Error::Config("render.step_delay must be positive".into()));
        }
        if self.simulator.timeout_secs == 0 {
            return Err(Error::Config("simulator.timeout_secs must be positive".into()));
        }
        Ok(())
    }
}
