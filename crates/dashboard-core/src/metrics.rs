use serde::Serialize;

use crate::error::{DashboardError, Result};
use crate::models::{Dataset, SalesRecord};

/// Headline figures for a selection, compared against the whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesMetrics {
    pub total_sales: f64,
    pub total_profit: f64,
    /// `total_profit / total_sales * 100`, or `0.0` when sales are zero.
    pub profit_margin: f64,
    /// Profit margin over every row of the dataset.
    pub overall_profit_margin: f64,
    /// `profit_margin - overall_profit_margin`, in percentage points.
    pub delta: f64,
}

/// Compute `profit / sales * 100`.
///
/// Returns `0.0` when `sales` is zero instead of dividing.
///
/// # Examples
///
/// ```
/// use dashboard_core::metrics::profit_margin;
///
/// assert!((profit_margin(15.0, 100.0) - 15.0).abs() < 1e-9);
/// assert_eq!(profit_margin(10.0, 0.0), 0.0);
/// ```
pub fn profit_margin(profit: f64, sales: f64) -> f64 {
    if sales == 0.0 {
        return 0.0;
    }
    (profit / sales) * 100.0
}

// ── MetricsCalculator ─────────────────────────────────────────────────────────

/// Stateless collection of selection metric calculations.
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Compute [`SalesMetrics`] for `subset`, compared against `dataset`.
    ///
    /// Returns [`DashboardError::EmptySelection`] when `subset` has no rows so
    /// that callers show a "no data" message rather than zeros.
    pub fn compute(subset: &[&SalesRecord], dataset: &Dataset) -> Result<SalesMetrics> {
        if subset.is_empty() {
            return Err(DashboardError::EmptySelection);
        }

        let total_sales: f64 = subset.iter().map(|r| r.sales).sum();
        let total_profit: f64 = subset.iter().map(|r| r.profit).sum();
        let margin = profit_margin(total_profit, total_sales);
        let overall = Self::overall_profit_margin(dataset);

        Ok(SalesMetrics {
            total_sales,
            total_profit,
            profit_margin: margin,
            overall_profit_margin: overall,
            delta: margin - overall,
        })
    }

    /// Profit margin over every row of `dataset`.
    pub fn overall_profit_margin(dataset: &Dataset) -> f64 {
        profit_margin(dataset.total_profit(), dataset.total_sales())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
