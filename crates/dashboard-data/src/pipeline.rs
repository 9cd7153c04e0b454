//! Per-interaction aggregation pipeline.
//!
//! Runs grouping, resampling, filtering and metric derivation against the
//! loaded dataset and returns a [`DashboardSnapshot`] ready for the UI or a
//! report. Nothing is cached: every call recomputes from the dataset.

use chrono::Utc;
use dashboard_core::error::DashboardError;
use dashboard_core::metrics::{MetricsCalculator, SalesMetrics};
use dashboard_core::models::{Dataset, Selection};
use serde::Serialize;
use tracing::{debug, warn};

use crate::aggregator::{CategoryTotals, MonthlyTotals, SalesAggregator};
use crate::filter::{filter_selection, unique_categories, unique_sub_categories};

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside a snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineMetadata {
    /// ISO-8601 timestamp when this snapshot was generated.
    pub generated_at: String,
    /// Number of rows in the full dataset.
    pub records_total: usize,
    /// Number of rows matching the selection.
    pub records_selected: usize,
    /// Wall-clock seconds spent computing the snapshot.
    pub compute_time_seconds: f64,
}

/// What the selection panel shows.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SelectionView {
    /// The filtered subset is empty; metrics are not computed.
    NoData,
    /// The filtered subset has rows.
    Data {
        /// Number of selected rows.
        rows: usize,
        /// Monthly sales of the selected rows, zero-filled.
        monthly_sales: Vec<MonthlyTotals>,
        /// Headline metrics of the selected rows.
        metrics: SalesMetrics,
    },
}

impl SelectionView {
    pub fn metrics(&self) -> Option<&SalesMetrics> {
        match self {
            SelectionView::Data { metrics, .. } => Some(metrics),
            SelectionView::NoData => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SelectionView::NoData)
    }
}

/// Everything one render of the dashboard needs.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    /// Sales/profit per category over the whole dataset, sorted by name.
    pub category_totals: Vec<CategoryTotals>,
    /// Sales per calendar month over the whole dataset, zero-filled.
    pub monthly_sales: Vec<MonthlyTotals>,
    /// Category selector candidates, in first-appearance order.
    pub categories: Vec<String>,
    /// Sub-category selector candidates within the chosen category.
    pub sub_categories: Vec<String>,
    /// The selection this snapshot was computed for.
    pub selection: Selection,
    /// Profit margin over the whole dataset.
    pub overall_profit_margin: f64,
    /// Selection chart and metrics, or the no-data marker.
    pub selection_view: SelectionView,
    pub metadata: PipelineMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full pipeline for one interaction.
///
/// 1. Group the dataset by category.
/// 2. Resample the dataset by calendar month.
/// 3. Collect selector candidates.
/// 4. Filter by the selection (category, then sub-category membership).
/// 5. Resample the subset and compute metrics, or report no data.
pub fn run_pipeline(dataset: &Dataset, selection: &Selection) -> DashboardSnapshot {
    let started = std::time::Instant::now();

    // ── Step 1–2: Dataset-wide aggregates ─────────────────────────────────────
    let category_totals = SalesAggregator::group_by_category(dataset);
    let monthly_sales = SalesAggregator::resample_by_month(dataset);

    // ── Step 3: Selector candidates ───────────────────────────────────────────
    let categories = unique_categories(dataset);
    let sub_categories = selection
        .category
        .as_deref()
        .map(|c| unique_sub_categories(dataset, c))
        .unwrap_or_default();

    // ── Step 4: Filter ────────────────────────────────────────────────────────
    let subset = filter_selection(dataset, selection);

    // ── Step 5: Selection view ────────────────────────────────────────────────
    let selection_view = match MetricsCalculator::compute(&subset, dataset) {
        Ok(metrics) => SelectionView::Data {
            rows: subset.len(),
            monthly_sales: SalesAggregator::resample_by_month(subset.iter().copied()),
            metrics,
        },
        Err(DashboardError::EmptySelection) => SelectionView::NoData,
        Err(e) => {
            warn!("Metrics unavailable for {:?}: {}", selection, e);
            SelectionView::NoData
        }
    };

    let metadata = PipelineMetadata {
        generated_at: Utc::now().to_rfc3339(),
        records_total: dataset.len(),
        records_selected: subset.len(),
        compute_time_seconds: started.elapsed().as_secs_f64(),
    };

    debug!(
        "Pipeline: {} of {} records selected, {} categories, {} months",
        metadata.records_selected,
        metadata.records_total,
        category_totals.len(),
        monthly_sales.len(),
    );

    DashboardSnapshot {
        category_totals,
        monthly_sales,
        categories,
        sub_categories,
        selection: selection.clone(),
        overall_profit_margin: MetricsCalculator::overall_profit_margin(dataset),
        selection_view,
        metadata,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dashboard_core::models::SalesRecord;

    fn record(category: &str, sub: &str, date: &str, sales: f64, profit: f64) -> SalesRecord {
        SalesRecord::new(
            category,
            sub,
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            sales,
            profit,
        )
    }

    fn furniture_dataset() -> Dataset {
        Dataset::new(vec![
            record("Furniture", "Chairs", "2024-01-05", 100.0, 10.0),
            record("Furniture", "Tables", "2024-01-20", 200.0, -20.0),
        ])
    }

    #[test]
    fn test_run_pipeline_furniture_example() {
        let ds = furniture_dataset();
        let sel = Selection::new("Furniture", vec!["Chairs".into(), "Tables".into()]);
        let snap = run_pipeline(&ds, &sel);

        let m = snap.selection_view.metrics().unwrap();
        assert!((m.total_sales - 300.0).abs() < 1e-9);
        assert!((m.total_profit - -10.0).abs() < 1e-9);
        assert_eq!(
            dashboard_core::formatting::format_percent(m.profit_margin),
            "-3.33%"
        );
        assert_eq!(snap.metadata.records_selected, 2);
    }

    #[test]
    fn test_run_pipeline_empty_sub_categories_is_no_data() {
        let ds = furniture_dataset();
        let sel = Selection::new("Furniture", vec![]);
        let snap = run_pipeline(&ds, &sel);

        assert!(snap.selection_view.is_empty());
        assert!(snap.selection_view.metrics().is_none());
        assert_eq!(snap.sub_categories, vec!["Chairs", "Tables"]);
        // Dataset-wide views are still populated.
        assert_eq!(snap.category_totals.len(), 1);
        assert_eq!(snap.monthly_sales.len(), 1);
    }

    #[test]
    fn test_run_pipeline_no_category_has_no_candidates() {
        let ds = furniture_dataset();
        let snap = run_pipeline(&ds, &Selection::default());
        assert_eq!(snap.categories, vec!["Furniture"]);
        assert!(snap.sub_categories.is_empty());
        assert!(snap.selection_view.is_empty());
    }

    #[test]
    fn test_run_pipeline_delta_against_overall() {
        // Overall: 1000 sales, 150 profit → 15 %. Phones: 500 / 100 → 20 %.
        let ds = Dataset::new(vec![
            record("Technology", "Phones", "2024-01-01", 500.0, 100.0),
            record("Furniture", "Chairs", "2024-03-01", 500.0, 50.0),
        ]);
        let sel = Selection::new("Technology", vec!["Phones".into()]);
        let snap = run_pipeline(&ds, &sel);

        assert!((snap.overall_profit_margin - 15.0).abs() < 1e-9);
        let m = snap.selection_view.metrics().unwrap();
        assert!((m.delta - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_run_pipeline_selection_months_zero_filled() {
        let ds = Dataset::new(vec![
            record("Technology", "Phones", "2024-01-01", 10.0, 1.0),
            record("Technology", "Phones", "2024-04-01", 30.0, 3.0),
            record("Furniture", "Chairs", "2024-02-01", 99.0, 9.0),
        ]);
        let sel = Selection::new("Technology", vec!["Phones".into()]);
        let snap = run_pipeline(&ds, &sel);

        match &snap.selection_view {
            SelectionView::Data { monthly_sales, .. } => {
                let keys: Vec<String> = monthly_sales.iter().map(|m| m.month.to_string()).collect();
                assert_eq!(keys, vec!["2024-01", "2024-02", "2024-03", "2024-04"]);
                assert_eq!(monthly_sales[1].stats.sales, 0.0);
            }
            SelectionView::NoData => panic!("expected data"),
        }
    }

    #[test]
    fn test_snapshot_serializes_status_tag() {
        let ds = furniture_dataset();
        let snap = run_pipeline(&ds, &Selection::new("Furniture", vec![]));
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["selection_view"]["status"], "no_data");
        assert!(json["selection_view"].get("rows").is_none());
        assert_eq!(json["category_totals"][0]["category"], "Furniture");
        assert_eq!(json["monthly_sales"][0]["month"], "2024-01");
    }
}
