use thiserror::Error;

/// Result type for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Errors that can occur while loading or reading an assignment matrix.
///
/// None of these are retryable: the input is a static file, so the load is
/// reported and abandoned.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Input file is missing or unreadable
    #[error("Failed to load file: {0}")]
    FileLoad(String),

    /// Cell value outside {0,1}, non-numeric cell, or wrong column count
    #[error("Invalid data format: {0}")]
    DataFormat(String),

    /// Column count does not fit the configured day/shift layout
    #[error("Configuration mismatch: {0}")]
    ConfigurationMismatch(String),

    /// Degenerate matrix (no cells to compute over)
    #[error("Data error: {0}")]
    Data(String),
}

impl DashboardError {
    /// Short machine-readable code used in HTTP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            DashboardError::FileLoad(_) => "FILE_LOAD",
            DashboardError::DataFormat(_) => "DATA_FORMAT",
            DashboardError::ConfigurationMismatch(_) => "CONFIGURATION_MISMATCH",
            DashboardError::Data(_) => "DATA_ERROR",
        }
    }
}
