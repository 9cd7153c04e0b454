//! Shared domain types for the sales dashboard.
//!
//! Holds the record and dataset models, the error taxonomy, profit-margin
//! metrics, display formatting helpers and the command-line settings.

pub mod error;
pub mod formatting;
pub mod metrics;
pub mod models;
pub mod settings;

pub use error::{DashboardError, Result};
