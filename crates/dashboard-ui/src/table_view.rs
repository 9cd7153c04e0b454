//! Record and aggregate table views for the dashboard TUI.
//!
//! Renders bordered [`ratatui::widgets::Table`]s for the raw records, the
//! per-category totals and the monthly totals. Aggregate tables end with a
//! highlighted totals row.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use dashboard_core::formatting;
use dashboard_core::models::SalesRecord;
use dashboard_data::aggregator::{AggregatedStats, CategoryTotals, MonthlyTotals, SalesAggregator};

use crate::themes::Theme;

/// Rows lost to borders and the header line.
const TABLE_CHROME_ROWS: u16 = 3;

/// Number of data rows that fit in a bordered table of height `area_height`.
pub fn visible_rows(area_height: u16) -> usize {
    area_height.saturating_sub(TABLE_CHROME_ROWS) as usize
}

/// Clamp a scroll offset so the last page stays full.
pub fn clamp_scroll(offset: usize, total_rows: usize, visible: usize) -> usize {
    offset.min(total_rows.saturating_sub(visible))
}

/// Truncate `text` to at most `max_width` terminal columns, appending `…`
/// when anything was cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn row_style(index: usize, theme: &Theme) -> ratatui::style::Style {
    if index % 2 == 0 {
        theme.table_row
    } else {
        theme.table_row_alt
    }
}

fn header_row<'a>(titles: &[&'a str], theme: &Theme) -> Row<'a> {
    Row::new(
        titles
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1)
}

fn signed_cell<'a>(value: f64, theme: &Theme) -> Cell<'a> {
    let style = if value < 0.0 {
        theme.negative
    } else {
        theme.table_row
    };
    Cell::from(formatting::format_currency(value)).style(style)
}

// ── Raw records ───────────────────────────────────────────────────────────────

/// Render the raw records table starting at row `offset`.
pub fn render_records_table(
    frame: &mut Frame,
    area: Rect,
    records: &[SalesRecord],
    offset: usize,
    theme: &Theme,
) {
    let visible = visible_rows(area.height);
    let offset = clamp_scroll(offset, records.len(), visible);
    let end = (offset + visible).min(records.len());

    let rows: Vec<Row> = records[offset..end]
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Row::new(vec![
                Cell::from(r.order_date.format("%Y-%m-%d").to_string()),
                Cell::from(r.order_id.clone().unwrap_or_default()),
                Cell::from(truncate_to_width(&r.category, 16)),
                Cell::from(truncate_to_width(&r.sub_category, 14)),
                Cell::from(truncate_to_width(
                    r.product_name.as_deref().unwrap_or(""),
                    32,
                )),
                Cell::from(formatting::format_currency(r.sales)),
                signed_cell(r.profit, theme),
                Cell::from(r.quantity.to_string()),
            ])
            .style(row_style(offset + i, theme))
        })
        .collect();

    let title = if records.is_empty() {
        " Data ".to_string()
    } else {
        format!(
            " Data (rows {}–{} of {}) ",
            formatting::format_number((offset + 1) as f64, 0),
            formatting::format_number(end as f64, 0),
            formatting::format_number(records.len() as f64, 0),
        )
    };

    let widths = [
        Constraint::Length(10),
        Constraint::Length(15),
        Constraint::Length(16),
        Constraint::Length(14),
        Constraint::Min(12),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(4),
    ];

    let table = Table::new(rows, widths)
        .header(header_row(
            &[
                "Order Date",
                "Order ID",
                "Category",
                "Sub-Category",
                "Product",
                "Sales",
                "Profit",
                "Qty",
            ],
            theme,
        ))
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(theme.text);

    frame.render_widget(table, area);
}

// ── Aggregates ────────────────────────────────────────────────────────────────

fn totals_row<'a>(label: &'a str, count_label: String, totals: &AggregatedStats, theme: &Theme) -> Row<'a> {
    Row::new(vec![
        Cell::from(label),
        Cell::from(formatting::format_currency(totals.sales)),
        Cell::from(formatting::format_currency(totals.profit)),
        Cell::from(formatting::format_percent(totals.profit_margin())),
        Cell::from(count_label),
    ])
    .style(theme.table_total)
}

fn stats_cells<'a>(stats: &AggregatedStats, theme: &Theme) -> Vec<Cell<'a>> {
    vec![
        Cell::from(formatting::format_currency(stats.sales)),
        signed_cell(stats.profit, theme),
        Cell::from(formatting::format_percent(stats.profit_margin())),
        Cell::from(formatting::format_number(f64::from(stats.count), 0)),
    ]
}

const AGGREGATE_WIDTHS: [Constraint; 5] = [
    Constraint::Length(20),
    Constraint::Length(16),
    Constraint::Length(16),
    Constraint::Length(10),
    Constraint::Length(10),
];

/// Render the per-category totals table with a grand-total row.
pub fn render_category_table(
    frame: &mut Frame,
    area: Rect,
    groups: &[CategoryTotals],
    theme: &Theme,
) {
    let mut rows: Vec<Row> = groups
        .iter()
        .enumerate()
        .map(|(i, g)| {
            let mut cells = vec![Cell::from(truncate_to_width(&g.category, 20))];
            cells.extend(stats_cells(&g.stats, theme));
            Row::new(cells).style(row_style(i, theme))
        })
        .collect();

    let totals = SalesAggregator::calculate_totals(groups.iter().map(|g| &g.stats));
    rows.push(totals_row(
        "TOTAL",
        formatting::format_number(f64::from(totals.count), 0),
        &totals,
        theme,
    ));

    let table = Table::new(rows, AGGREGATE_WIDTHS)
        .header(header_row(&["Category", "Sales", "Profit", "Margin", "Orders"], theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Sales by Category "),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render the monthly totals table starting at row `offset`, with a
/// grand-total row over every month.
pub fn render_monthly_table(
    frame: &mut Frame,
    area: Rect,
    months: &[MonthlyTotals],
    offset: usize,
    theme: &Theme,
) {
    // One line is reserved for the totals row.
    let visible = visible_rows(area.height).saturating_sub(1);
    let offset = clamp_scroll(offset, months.len(), visible);
    let end = (offset + visible).min(months.len());

    let mut rows: Vec<Row> = months[offset..end]
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let mut cells = vec![Cell::from(m.month.to_string())];
            cells.extend(stats_cells(&m.stats, theme));
            Row::new(cells).style(row_style(offset + i, theme))
        })
        .collect();

    let totals = SalesAggregator::calculate_totals(months.iter().map(|m| &m.stats));
    rows.push(totals_row(
        "TOTAL",
        format!("{} months", months.len()),
        &totals,
        theme,
    ));

    let table = Table::new(rows, AGGREGATE_WIDTHS)
        .header(header_row(&["Month", "Sales", "Profit", "Margin", "Orders"], theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Monthly Sales "),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render a bordered placeholder carrying `message`.
pub fn render_no_data(frame: &mut Frame, area: Rect, title: &str, message: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme.warning)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title)),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
