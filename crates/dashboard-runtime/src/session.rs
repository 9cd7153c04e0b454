//! Explicit event-driven dashboard session.
//!
//! A [`DashboardSession`] holds the shared dataset and the current
//! [`Selection`]. Every user interaction is expressed as a
//! [`SelectionEvent`]; [`DashboardSession::handle`] applies it and re-runs
//! the pipeline from scratch.

use std::sync::Arc;

use dashboard_core::models::{Dataset, Selection};
use dashboard_data::filter::{unique_categories, unique_sub_categories};
use dashboard_data::pipeline::{run_pipeline, DashboardSnapshot};
use tracing::{debug, warn};

// ── Public types ──────────────────────────────────────────────────────────────

/// A single change requested by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// Choose a category by name.
    SelectCategory(String),
    /// Move to the next category candidate, wrapping around.
    NextCategory,
    /// Move to the previous category candidate, wrapping around.
    PreviousCategory,
    /// Add or remove one sub-category.
    ToggleSubCategory(String),
    /// Select every sub-category of the current category.
    SelectAllSubCategories,
    /// Deselect every sub-category.
    ClearSubCategories,
    /// Recompute without changing the selection.
    Refresh,
}

/// The dataset plus the user's current selection.
#[derive(Debug, Clone)]
pub struct DashboardSession {
    dataset: Arc<Dataset>,
    selection: Selection,
}

impl DashboardSession {
    /// Create a session.
    ///
    /// With no `initial` selection the first category is chosen and no
    /// sub-category is selected, the same default a fresh selector pair
    /// shows. A requested selection is validated against the dataset:
    /// an unknown category falls back to the default and sub-categories
    /// outside the category are dropped.
    pub fn new(dataset: Arc<Dataset>, initial: Option<Selection>) -> Self {
        let mut session = Self {
            dataset,
            selection: Selection::default(),
        };
        session.selection = session.default_selection();

        if let Some(requested) = initial {
            session.apply_initial(requested);
        }

        debug!(
            category = ?session.selection.category,
            sub_categories = session.selection.sub_categories.len(),
            "session created"
        );
        session
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Run the pipeline for the current selection.
    pub fn snapshot(&self) -> DashboardSnapshot {
        run_pipeline(&self.dataset, &self.selection)
    }

    /// Apply `event` to the selection and return the recomputed snapshot.
    pub fn handle(&mut self, event: SelectionEvent) -> DashboardSnapshot {
        debug!(?event, "handling selection event");

        match event {
            SelectionEvent::SelectCategory(name) => self.select_category(&name),
            SelectionEvent::NextCategory => self.step_category(1),
            SelectionEvent::PreviousCategory => self.step_category(-1),
            SelectionEvent::ToggleSubCategory(name) => self.toggle_sub_category(&name),
            SelectionEvent::SelectAllSubCategories => {
                self.selection.sub_categories = self.sub_category_candidates();
            }
            SelectionEvent::ClearSubCategories => self.selection.sub_categories.clear(),
            SelectionEvent::Refresh => {}
        }

        self.snapshot()
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn default_selection(&self) -> Selection {
        match unique_categories(&self.dataset).into_iter().next() {
            Some(first) => Selection::new(first, Vec::new()),
            None => Selection::default(),
        }
    }

    fn apply_initial(&mut self, requested: Selection) {
        let Some(category) = requested.category else {
            return;
        };
        if !unique_categories(&self.dataset).contains(&category) {
            warn!(category = %category, "unknown category requested; using default");
            return;
        }
        self.selection = Selection::new(category, Vec::new());

        for name in &requested.sub_categories {
            if !self.selection.has_sub_category(name) {
                self.toggle_sub_category(name);
            }
        }
    }

    fn sub_category_candidates(&self) -> Vec<String> {
        self.selection
            .category
            .as_deref()
            .map(|c| unique_sub_categories(&self.dataset, c))
            .unwrap_or_default()
    }

    fn select_category(&mut self, name: &str) {
        if self.selection.category.as_deref() == Some(name) {
            return;
        }
        if !unique_categories(&self.dataset).iter().any(|c| c == name) {
            warn!(category = %name, "ignoring unknown category");
            return;
        }
        self.selection = Selection::new(name, Vec::new());
    }

    fn step_category(&mut self, step: isize) {
        let categories = unique_categories(&self.dataset);
        if categories.is_empty() {
            return;
        }
        let len = categories.len() as isize;
        let next = match self
            .selection
            .category
            .as_ref()
            .and_then(|c| categories.iter().position(|x| x == c))
        {
            Some(idx) => (idx as isize + step).rem_euclid(len) as usize,
            None => 0,
        };
        self.select_category(&categories[next]);
    }

    /// Toggle `name`, keeping the chosen set in candidate order.
    fn toggle_sub_category(&mut self, name: &str) {
        if self.selection.has_sub_category(name) {
            self.selection.sub_categories.retain(|s| s != name);
            return;
        }

        let candidates = self.sub_category_candidates();
        if !candidates.iter().any(|c| c == name) {
            warn!(sub_category = %name, "ignoring sub-category outside the selected category");
            return;
        }

        let chosen = &self.selection.sub_categories;
        self.selection.sub_categories = candidates
            .into_iter()
            .filter(|c| c == name || chosen.contains(c))
            .collect();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dashboard_core::models::SalesRecord;
    use dashboard_data::pipeline::SelectionView;

    fn record(category: &str, sub: &str, day: u32, sales: f64, profit: f64) -> SalesRecord {
        SalesRecord::new(
            category,
            sub,
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            sales,
            profit,
        )
    }

    fn session() -> DashboardSession {
        let ds = Dataset::new(vec![
            record("Furniture", "Chairs", 5, 100.0, 10.0),
            record("Furniture", "Tables", 20, 200.0, -20.0),
            record("Technology", "Phones", 7, 500.0, 100.0),
            record("Office Supplies", "Paper", 9, 20.0, 8.0),
        ]);
        DashboardSession::new(Arc::new(ds), None)
    }

    #[test]
    fn test_new_defaults_to_first_category_without_sub_categories() {
        let s = session();
        assert_eq!(s.selection().category.as_deref(), Some("Furniture"));
        assert!(s.selection().sub_categories.is_empty());
        assert!(s.snapshot().selection_view.is_empty());
    }

    #[test]
    fn test_new_empty_dataset() {
        let s = DashboardSession::new(Arc::new(Dataset::default()), None);
        assert!(s.selection().category.is_none());
        let snap = s.snapshot();
        assert!(snap.categories.is_empty());
        assert!(snap.selection_view.is_empty());
    }

    #[test]
    fn test_new_with_valid_initial_selection() {
        let s = session();
        let initial = Selection::new("Furniture", vec!["Tables".into(), "Chairs".into()]);
        let s = DashboardSession::new(Arc::clone(s.dataset()), Some(initial));
        // Kept in candidate order.
        assert_eq!(s.selection().sub_categories, vec!["Chairs", "Tables"]);
    }

    #[test]
    fn test_new_with_unknown_initial_category_falls_back() {
        let s = session();
        let initial = Selection::new("Garden", vec!["Hoses".into()]);
        let s = DashboardSession::new(Arc::clone(s.dataset()), Some(initial));
        assert_eq!(s.selection().category.as_deref(), Some("Furniture"));
        assert!(s.selection().sub_categories.is_empty());
    }

    #[test]
    fn test_new_drops_foreign_initial_sub_categories() {
        let s = session();
        let initial = Selection::new("Furniture", vec!["Phones".into(), "Chairs".into()]);
        let s = DashboardSession::new(Arc::clone(s.dataset()), Some(initial));
        assert_eq!(s.selection().sub_categories, vec!["Chairs"]);
    }

    #[test]
    fn test_select_all_then_metrics() {
        let mut s = session();
        let snap = s.handle(SelectionEvent::SelectAllSubCategories);
        let m = snap.selection_view.metrics().unwrap();
        assert!((m.total_sales - 300.0).abs() < 1e-9);
        assert!((m.total_profit - -10.0).abs() < 1e-9);
    }

    #[test]
    fn test_clear_sub_categories_is_no_data() {
        let mut s = session();
        s.handle(SelectionEvent::SelectAllSubCategories);
        let snap = s.handle(SelectionEvent::ClearSubCategories);
        assert!(matches!(snap.selection_view, SelectionView::NoData));
    }

    #[test]
    fn test_select_category_clears_sub_categories() {
        let mut s = session();
        s.handle(SelectionEvent::SelectAllSubCategories);
        let snap = s.handle(SelectionEvent::SelectCategory("Technology".into()));
        assert_eq!(snap.selection.category.as_deref(), Some("Technology"));
        assert!(snap.selection.sub_categories.is_empty());
        assert_eq!(snap.sub_categories, vec!["Phones"]);
    }

    #[test]
    fn test_select_same_category_keeps_sub_categories() {
        let mut s = session();
        s.handle(SelectionEvent::ToggleSubCategory("Chairs".into()));
        s.handle(SelectionEvent::SelectCategory("Furniture".into()));
        assert_eq!(s.selection().sub_categories, vec!["Chairs"]);
    }

    #[test]
    fn test_select_unknown_category_is_ignored() {
        let mut s = session();
        s.handle(SelectionEvent::ToggleSubCategory("Chairs".into()));
        let before = s.selection().clone();
        s.handle(SelectionEvent::SelectCategory("Garden".into()));
        assert_eq!(s.selection(), &before);
    }

    #[test]
    fn test_next_and_previous_category_wrap() {
        let mut s = session();
        // Candidates in first-appearance order: Furniture, Technology, Office Supplies.
        s.handle(SelectionEvent::NextCategory);
        assert_eq!(s.selection().category.as_deref(), Some("Technology"));
        s.handle(SelectionEvent::NextCategory);
        s.handle(SelectionEvent::NextCategory);
        assert_eq!(s.selection().category.as_deref(), Some("Furniture"));
        s.handle(SelectionEvent::PreviousCategory);
        assert_eq!(s.selection().category.as_deref(), Some("Office Supplies"));
    }

    #[test]
    fn test_toggle_sub_category_adds_and_removes() {
        let mut s = session();
        s.handle(SelectionEvent::ToggleSubCategory("Tables".into()));
        s.handle(SelectionEvent::ToggleSubCategory("Chairs".into()));
        assert_eq!(s.selection().sub_categories, vec!["Chairs", "Tables"]);

        let snap = s.handle(SelectionEvent::ToggleSubCategory("Tables".into()));
        assert_eq!(snap.selection.sub_categories, vec!["Chairs"]);
        let m = snap.selection_view.metrics().unwrap();
        assert!((m.total_sales - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_toggle_foreign_sub_category_is_ignored() {
        let mut s = session();
        s.handle(SelectionEvent::ToggleSubCategory("Phones".into()));
        assert!(s.selection().sub_categories.is_empty());
    }

    #[test]
    fn test_refresh_keeps_selection() {
        let mut s = session();
        s.handle(SelectionEvent::ToggleSubCategory("Chairs".into()));
        let snap = s.handle(SelectionEvent::Refresh);
        assert_eq!(snap.selection.sub_categories, vec!["Chairs"]);
        assert_eq!(snap.metadata.records_total, 4);
    }
}
