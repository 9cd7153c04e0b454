//! Data layer for the sales dashboard.
//!
//! Responsible for reading the sales CSV into a [`Dataset`], grouping rows by
//! category and calendar month, filtering by the user's selection and running
//! the per-interaction pipeline that produces a [`pipeline::DashboardSnapshot`].
//!
//! [`Dataset`]: dashboard_core::models::Dataset

pub mod aggregator;
pub mod filter;
pub mod pipeline;
pub mod reader;

pub use dashboard_core as core;
