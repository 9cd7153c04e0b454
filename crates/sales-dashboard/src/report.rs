//! Non-interactive `summary` and `json` views.

use dashboard_core::formatting::{format_currency, format_delta, format_number, format_percent};
use dashboard_data::pipeline::{DashboardSnapshot, SelectionView};
use dashboard_ui::metrics_view::no_data_message;

/// Render the snapshot as a plain-text report.
pub fn render_summary(snapshot: &DashboardSnapshot, source: &str) -> String {
    let mut lines = vec![
        "SALES DASHBOARD".to_string(),
        "=".repeat(60),
        format!(
            "Source: {} ({} records)",
            source,
            format_number(snapshot.metadata.records_total as f64, 0)
        ),
        format!(
            "Overall profit margin: {}",
            format_percent(snapshot.overall_profit_margin)
        ),
        String::new(),
        "Sales by Category".to_string(),
        format!("{:<20} {:>16} {:>16} {:>10}", "Category", "Sales", "Profit", "Margin"),
    ];

    lines.extend(snapshot.category_totals.iter().map(|group| {
        format!(
            "{:<20} {:>16} {:>16} {:>10}",
            group.category,
            format_currency(group.stats.sales),
            format_currency(group.stats.profit),
            format_percent(group.stats.profit_margin()),
        )
    }));

    lines.push(String::new());
    lines.push("Sales by Month".to_string());
    lines.push(format!("{:<8} {:>16}", "Month", "Sales"));
    lines.extend(snapshot.monthly_sales.iter().map(|month| {
        format!(
            "{:<8} {:>16}",
            month.month.to_string(),
            format_currency(month.stats.sales)
        )
    }));

    let selection = &snapshot.selection;
    let subs = if selection.sub_categories.is_empty() {
        "(none)".to_string()
    } else {
        selection.sub_categories.join(", ")
    };
    lines.push(String::new());
    lines.push("Selection".to_string());
    lines.push(format!(
        "Category: {}",
        selection.category.as_deref().unwrap_or("(none)")
    ));
    lines.push(format!("Sub-Categories: {}", subs));

    match &snapshot.selection_view {
        SelectionView::Data { rows, metrics, .. } => {
            lines.push(format!("Rows: {}", format_number(*rows as f64, 0)));
            lines.push(format!("Total Sales: {}", format_currency(metrics.total_sales)));
            lines.push(format!("Total Profit: {}", format_currency(metrics.total_profit)));
            lines.push(format!(
                "Profit Margin: {} ({} vs overall)",
                format_percent(metrics.profit_margin),
                format_delta(metrics.delta)
            ));
        }
        SelectionView::NoData => lines.push(no_data_message()),
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Render the snapshot as pretty-printed JSON.
pub fn render_json(snapshot: &DashboardSnapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
