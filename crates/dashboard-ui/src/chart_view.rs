//! Bar and line charts: sales by category, sales by month.

use ratatui::{
    layout::Rect,
    symbols,
    text::Line,
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset as ChartDataset, GraphType,
    },
    Frame,
};

use dashboard_core::formatting::format_compact;
use dashboard_data::aggregator::{CategoryTotals, MonthlyTotals};

use crate::table_view::{render_no_data, truncate_to_width};
use crate::themes::Theme;

const MIN_BAR_WIDTH: u16 = 3;
const MAX_BAR_WIDTH: u16 = 24;
const BAR_GAP: u16 = 2;

/// Width of each bar so `count` bars fill `inner_width` columns.
pub fn bar_width_for(inner_width: u16, count: usize) -> u16 {
    if count == 0 {
        return MIN_BAR_WIDTH;
    }
    let count = u16::try_from(count).unwrap_or(u16::MAX);
    let available = inner_width.saturating_sub(BAR_GAP * count.saturating_sub(1));
    (available / count).clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH)
}

/// Render the "Sales by Category" bar chart.
pub fn render_category_bar_chart(
    frame: &mut Frame,
    area: Rect,
    groups: &[CategoryTotals],
    theme: &Theme,
) {
    if groups.is_empty() {
        render_no_data(frame, area, "Sales by Category", "No categories to chart.", theme);
        return;
    }

    let width = bar_width_for(area.width.saturating_sub(2), groups.len());
    let bars: Vec<Bar> = groups
        .iter()
        .map(|g| {
            Bar::default()
                .value(g.stats.sales.max(0.0).round() as u64)
                .label(Line::from(truncate_to_width(&g.category, width as usize)))
                .text_value(format_compact(g.stats.sales))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Sales by Category "),
        )
        .bar_width(width)
        .bar_gap(BAR_GAP)
        .bar_style(theme.chart_bar)
        .value_style(theme.chart_bar_value)
        .label_style(theme.label)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

// ── Line chart ────────────────────────────────────────────────────────────────

/// `(index, sales)` points, one per month.
pub fn chart_points(months: &[MonthlyTotals]) -> Vec<(f64, f64)> {
    months
        .iter()
        .enumerate()
        .map(|(i, m)| (i as f64, m.stats.sales))
        .collect()
}

/// Y-axis bounds covering every value and zero.
pub fn value_bounds(points: &[(f64, f64)]) -> [f64; 2] {
    let lo = points.iter().map(|p| p.1).fold(0.0_f64, f64::min);
    let hi = points.iter().map(|p| p.1).fold(0.0_f64, f64::max);
    if (hi - lo).abs() < f64::EPSILON {
        [lo, lo + 1.0]
    } else {
        [lo, hi]
    }
}

/// First, middle and last month labels.
pub fn month_labels(months: &[MonthlyTotals]) -> Vec<String> {
    match months.len() {
        0 => Vec::new(),
        1 => vec![months[0].month.to_string()],
        2 => vec![months[0].month.to_string(), months[1].month.to_string()],
        n => vec![
            months[0].month.to_string(),
            months[n / 2].month.to_string(),
            months[n - 1].month.to_string(),
        ],
    }
}

/// Render a line chart of monthly sales titled `title`.
pub fn render_monthly_line_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    months: &[MonthlyTotals],
    theme: &Theme,
) {
    if months.is_empty() {
        render_no_data(frame, area, title, "No months to chart.", theme);
        return;
    }

    let points = chart_points(months);
    let [y_lo, y_hi] = value_bounds(&points);
    let x_hi = (points.len().saturating_sub(1)).max(1) as f64;

    let datasets = vec![ChartDataset::default()
        .name("Sales")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme.chart_line)
        .data(&points)];

    let y_labels = vec![
        format_compact(y_lo),
        format_compact((y_lo + y_hi) / 2.0),
        format_compact(y_hi),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title)),
        )
        .x_axis(
            Axis::default()
                .style(theme.chart_axis)
                .bounds([0.0, x_hi])
                .labels(month_labels(months)),
        )
        .y_axis(
            Axis::default()
                .style(theme.chart_axis)
                .bounds([y_lo, y_hi])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dashboard_core::models::{Dataset, SalesRecord};
    use dashboard_data::aggregator::SalesAggregator;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn dataset() -> Dataset {
        let d = |m| NaiveDate::from_ymd_opt(2024, m, 10).unwrap();
        Dataset::new(vec![
            SalesRecord::new("Furniture", "Chairs", d(1), 1_200.0, 100.0),
            SalesRecord::new("Office Supplies", "Paper", d(3), 300.0, 50.0),
            SalesRecord::new("Technology", "Phones", d(5), 4_500.0, 900.0),
        ])
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_bar_width_for() {
        assert_eq!(bar_width_for(80, 3), 24);
        assert_eq!(bar_width_for(30, 3), 8);
        assert_eq!(bar_width_for(5, 10), MIN_BAR_WIDTH);
        assert_eq!(bar_width_for(40, 0), MIN_BAR_WIDTH);
    }

    #[test]
    fn test_bar_width_for_huge_category_count() {
        assert_eq!(bar_width_for(80, 65_536), MIN_BAR_WIDTH);
        assert_eq!(bar_width_for(80, 1_000_000), MIN_BAR_WIDTH);
    }

    #[test]
    fn test_chart_points_and_bounds() {
        let months = SalesAggregator::resample_by_month(&dataset());
        let points = chart_points(&months);
        assert_eq!(points.len(), 5);
        assert_eq!(points[1], (1.0, 0.0));
        assert_eq!(value_bounds(&points), [0.0, 4_500.0]);
    }

    #[test]
    fn test_value_bounds_flat_series() {
        assert_eq!(value_bounds(&[(0.0, 0.0), (1.0, 0.0)]), [0.0, 1.0]);
        assert_eq!(value_bounds(&[]), [0.0, 1.0]);
    }

    #[test]
    fn test_value_bounds_include_negative() {
        assert_eq!(value_bounds(&[(0.0, -20.0), (1.0, 50.0)]), [-20.0, 50.0]);
    }

    #[test]
    fn test_month_labels() {
        let months = SalesAggregator::resample_by_month(&dataset());
        assert_eq!(month_labels(&months), vec!["2024-01", "2024-03", "2024-05"]);
        assert_eq!(month_labels(&months[..1]), vec!["2024-01"]);
        assert!(month_labels(&[]).is_empty());
    }

    #[test]
    fn test_render_category_bar_chart() {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let groups = SalesAggregator::group_by_category(&dataset());

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_category_bar_chart(frame, area, &groups, &theme);
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Sales by Category"));
        assert!(text.contains("Furniture"));
    }

    #[test]
    fn test_render_category_bar_chart_empty() {
        let backend = TestBackend::new(60, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_category_bar_chart(frame, area, &[], &theme);
            })
            .unwrap();

        assert!(buffer_text(&terminal).contains("No categories to chart."));
    }

    #[test]
    fn test_render_monthly_line_chart_does_not_panic() {
        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();
        let months = SalesAggregator::resample_by_month(&dataset());

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_monthly_line_chart(frame, area, "Sales by Month", &months, &theme);
            })
            .unwrap();

        assert!(buffer_text(&terminal).contains("Sales by Month"));
    }

    #[test]
    fn test_render_monthly_line_chart_single_month() {
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let months = SalesAggregator::resample_by_month(&dataset());

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_monthly_line_chart(frame, area, "Selection", &months[..1], &theme);
            })
            .unwrap();
    }
}
