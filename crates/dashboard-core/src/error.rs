use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the sales dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The sales file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No sales file was found at any of the searched locations.
    #[error("Data file not found: {0}")]
    DataFileNotFound(PathBuf),

    /// The CSV reader rejected the input (bad quoting, invalid UTF-8, ...).
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// An `Order_Date` cell did not match any recognised date format.
    #[error("Invalid date on line {line}: {value:?}")]
    InvalidDate { line: usize, value: String },

    /// A numeric cell could not be parsed as a decimal amount.
    #[error("Invalid number in column {column} on line {line}: {value:?}")]
    InvalidNumber {
        line: usize,
        column: String,
        value: String,
    },

    /// The current selection matches no rows.
    #[error("No data available for the selected filters")]
    EmptySelection,

    /// A JSON document could not be produced.
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DashboardError {
    /// `true` for the errors raised while loading the dataset.
    ///
    /// These are fatal: the binary reports them and exits.
    pub fn is_data_load(&self) -> bool {
        matches!(
            self,
            DashboardError::FileRead { .. }
                | DashboardError::DataFileNotFound(_)
                | DashboardError::Csv(_)
                | DashboardError::MissingColumn(_)
                | DashboardError::InvalidDate { .. }
                | DashboardError::InvalidNumber { .. }
        )
    }
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
