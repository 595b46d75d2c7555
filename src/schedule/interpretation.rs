//! Rule-based reading of the coverage percentage.
//!
//! Two thresholds split coverage into three bands. Dashboards built on the
//! same matrix have used both 20/60 and 10/50, and neither is documented as
//! the intended one, so both ship as named presets and either bound can be
//! overridden from configuration.

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// Lower bound of the moderate band in the default preset
pub const DEFAULT_LOW_THRESHOLD: f64 = 20.0;
/// Lower bound of the high band in the default preset
pub const DEFAULT_HIGH_THRESHOLD: f64 = 60.0;
pub const ALTERNATE_LOW_THRESHOLD: f64 = 10.0;
pub const ALTERNATE_HIGH_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageThresholds {
    pub low: f64,
    pub high: f64,
}

impl Default for CoverageThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CoverageThresholds {
    pub const DEFAULT: CoverageThresholds = CoverageThresholds {
        low: DEFAULT_LOW_THRESHOLD,
        high: DEFAULT_HIGH_THRESHOLD,
    };

    pub const ALTERNATE: CoverageThresholds = CoverageThresholds {
        low: ALTERNATE_LOW_THRESHOLD,
        high: ALTERNATE_HIGH_THRESHOLD,
    };

    pub fn new(low: f64, high: f64) -> Result<Self> {
        let thresholds = Self { low, high };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Looks up a preset by name: "default" or "alternate"
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "default" => Some(Self::DEFAULT),
            "alternate" => Some(Self::ALTERNATE),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let in_range = |v: f64| v.is_finite() && (0.0..=100.0).contains(&v);
        if !in_range(self.low) || !in_range(self.high) {
            return Err(DashboardError::ConfigurationMismatch(format!(
                "coverage thresholds must be within 0..=100, got {}/{}",
                self.low, self.high
            )));
        }
        if self.low > self.high {
            return Err(DashboardError::ConfigurationMismatch(format!(
                "low threshold {} is above high threshold {}",
                self.low, self.high
            )));
        }
        Ok(())
    }

    /// Parses "LOW,HIGH"
    pub fn parse(spec: &str) -> Result<Self> {
        let parts: Vec<&str> = spec.split(',').map(|p| p.trim()).collect();
        if parts.len() != 2 {
            return Err(DashboardError::ConfigurationMismatch(format!(
                "thresholds must be given as LOW,HIGH, got '{}'",
                spec
            )));
        }
        let parse = |p: &str| {
            p.parse::<f64>().map_err(|_| {
                DashboardError::ConfigurationMismatch(format!("'{}' is not a number", p))
            })
        };
        Self::new(parse(parts[0])?, parse(parts[1])?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageLevel {
    Low,
    Moderate,
    High,
}

impl CoverageLevel {
    pub fn message(&self) -> &'static str {
        match self {
            CoverageLevel::Low => {
                "Few shifts were assigned because of strict rules. The system is conservative."
            }
            CoverageLevel::Moderate => {
                "The distribution is moderate. It respects rest periods and a balanced workload."
            }
            CoverageLevel::High => {
                "High occupancy. It could affect rest periods and staff well-being."
            }
        }
    }
}

/// Coverage below `low` is low, below `high` moderate, otherwise high
pub fn interpret(coverage_percent: f64, thresholds: &CoverageThresholds) -> CoverageLevel {
    if coverage_percent < thresholds.low {
        CoverageLevel::Low
    } else if coverage_percent < thresholds.high {
        CoverageLevel::Moderate
    } else {
        CoverageLevel::High
    }
}
