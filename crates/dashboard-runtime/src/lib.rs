//! Runtime layer for the sales dashboard.
//!
//! Owns the loaded dataset and the user's selection, and turns selection
//! events into fresh pipeline snapshots for the UI and report views.

pub mod session;

pub use dashboard_core as core;
pub use dashboard_data as data;
