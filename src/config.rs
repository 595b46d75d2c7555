//! Dashboard configuration.
//!
//! Settings come from a TOML file when one is found, otherwise from
//! defaults. Command-line flags are applied on top by `main`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DashboardError, Result};
use crate::schedule::{CoverageThresholds, SlotLayout, DEFAULT_NURSE_PREFIX};

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "SHIFT_DASHBOARD_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";
pub const DEFAULT_INPUT_PATH: &str = "resultado_asignacion.csv";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub input: InputSettings,
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub coverage: CoverageSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSettings {
    #[serde(default = "default_input_path")]
    pub path: PathBuf,
    #[serde(default = "default_has_headers")]
    pub has_headers: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    #[serde(default = "default_days")]
    pub days: Vec<String>,
    #[serde(default = "default_shifts")]
    pub shifts: Vec<String>,
    #[serde(default = "default_nurse_prefix")]
    pub nurse_prefix: String,
}

/// Either a named preset or explicit bounds; explicit bounds win.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageSettings {
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_input_path() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT_PATH)
}

fn default_has_headers() -> bool {
    true
}

fn default_days() -> Vec<String> {
    SlotLayout::default().days
}

fn default_shifts() -> Vec<String> {
    SlotLayout::default().shifts
}

fn default_nurse_prefix() -> String {
    DEFAULT_NURSE_PREFIX.to_string()
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            path: default_input_path(),
            has_headers: default_has_headers(),
        }
    }
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            days: default_days(),
            shifts: default_shifts(),
            nurse_prefix: default_nurse_prefix(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

impl CoverageSettings {
    pub fn thresholds(&self) -> Result<CoverageThresholds> {
        let base = match &self.preset {
            Some(name) => CoverageThresholds::preset(name).ok_or_else(|| {
                DashboardError::ConfigurationMismatch(format!(
                    "unknown coverage preset '{}'",
                    name
                ))
            })?,
            None => CoverageThresholds::default(),
        };
        CoverageThresholds::new(self.low.unwrap_or(base.low), self.high.unwrap_or(base.high))
    }
}

impl DashboardConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DashboardConfig = toml::from_str(content).map_err(|e| {
            DashboardError::ConfigurationMismatch(format!("Failed to parse config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            DashboardError::FileLoad(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Loads from `explicit`, then `$SHIFT_DASHBOARD_CONFIG`, then
    /// `dashboard.toml` in the working directory, falling back to defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::from_file(path);
        }
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            return Self::from_file(default_path);
        }
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<()> {
        self.slot_layout()?;
        self.coverage.thresholds()?;
        Ok(())
    }

    pub fn slot_layout(&self) -> Result<SlotLayout> {
        SlotLayout::new(self.layout.days.clone(), self.layout.shifts.clone())
    }
}
