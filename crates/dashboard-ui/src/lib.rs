//! Terminal UI layer for the sales dashboard.
//!
//! Provides themes, the header and selector components, record and
//! aggregate tables, bar and line charts, metric cards, and the main
//! application event loop built on top of [`ratatui`].

pub mod app;
pub mod chart_view;
pub mod components;
pub mod metrics_view;
pub mod table_view;
pub mod themes;

pub use dashboard_core as core;
