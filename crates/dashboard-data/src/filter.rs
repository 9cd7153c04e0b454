//! Category / sub-category filtering and selector candidates.

use std::collections::HashSet;

use dashboard_core::models::{Dataset, SalesRecord, Selection};

/// Rows whose category equals `category` exactly.
pub fn filter_by_category<'a>(dataset: &'a Dataset, category: &str) -> Vec<&'a SalesRecord> {
    dataset.iter().filter(|r| r.category == category).collect()
}

/// Rows in `category` whose sub-category is one of `sub_categories`.
///
/// An empty `sub_categories` slice yields no rows, not the whole category.
pub fn filter<'a>(
    dataset: &'a Dataset,
    category: &str,
    sub_categories: &[String],
) -> Vec<&'a SalesRecord> {
    if sub_categories.is_empty() {
        return Vec::new();
    }
    let wanted: HashSet<&str> = sub_categories.iter().map(String::as_str).collect();
    filter_by_category(dataset, category)
        .into_iter()
        .filter(|r| wanted.contains(r.sub_category.as_str()))
        .collect()
}

/// Rows matching `selection`; empty when no category is chosen yet.
pub fn filter_selection<'a>(dataset: &'a Dataset, selection: &Selection) -> Vec<&'a SalesRecord> {
    match &selection.category {
        Some(category) => filter(dataset, category, &selection.sub_categories),
        None => Vec::new(),
    }
}

/// Distinct categories in order of first appearance.
pub fn unique_categories(dataset: &Dataset) -> Vec<String> {
    unique_in_order(dataset.iter().map(|r| r.category.as_str()))
}

/// Distinct sub-categories within `category`, in order of first appearance.
pub fn unique_sub_categories(dataset: &Dataset, category: &str) -> Vec<String> {
    unique_in_order(
        dataset
            .iter()
            .filter(|r| r.category == category)
            .map(|r| r.sub_category.as_str()),
    )
}

fn unique_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashSet<&'a str> = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
