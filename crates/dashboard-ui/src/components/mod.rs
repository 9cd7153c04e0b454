//! Reusable widgets: the dashboard header and the category selectors.

pub mod header;
pub mod selector;
