//! Metric cards for the current selection.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use dashboard_core::error::DashboardError;
use dashboard_core::formatting::{format_currency, format_delta, format_percent};
use dashboard_core::metrics::SalesMetrics;

use crate::themes::Theme;

/// Text shown in place of the cards when the selection is empty.
pub fn no_data_message() -> String {
    format!("{}.", DashboardError::EmptySelection)
}

/// One headline figure with an optional signed delta.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
    /// Signed value the value is coloured by, if any.
    pub sign: Option<f64>,
    /// Formatted delta and the raw value used to colour it.
    pub delta: Option<(String, f64)>,
}

/// Build the Total Sales, Total Profit and Profit Margin cards.
pub fn metric_cards(metrics: &SalesMetrics) -> [MetricCard; 3] {
    [
        MetricCard {
            title: "Total Sales",
            value: format_currency(metrics.total_sales),
            sign: None,
            delta: None,
        },
        MetricCard {
            title: "Total Profit",
            value: format_currency(metrics.total_profit),
            sign: Some(metrics.total_profit),
            delta: None,
        },
        MetricCard {
            title: "Profit Margin (%)",
            value: format_percent(metrics.profit_margin),
            sign: None,
            delta: Some((format_delta(metrics.delta), metrics.delta)),
        },
    ]
}

fn render_card(frame: &mut Frame, area: Rect, card: &MetricCard, theme: &Theme) {
    let value_style: Style = match card.sign {
        Some(v) if v < 0.0 => theme.metric_value.patch(theme.negative),
        _ => theme.metric_value,
    };

    let mut lines = vec![Line::from(Span::styled(card.value.clone(), value_style))];
    if let Some((text, raw)) = &card.delta {
        let arrow = if *raw < 0.0 { "↓ " } else { "↑ " };
        lines.push(Line::from(vec![
            Span::styled(arrow, theme.signed_style(*raw)),
            Span::styled(text.clone(), theme.signed_style(*raw)),
            Span::styled(" vs overall", theme.dim),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(format!(" {} ", card.title), theme.metric_title));

    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

/// Render the three metric cards side by side, or the no-data message.
pub fn render_metrics(frame: &mut Frame, area: Rect, metrics: Option<&SalesMetrics>, theme: &Theme) {
    let Some(metrics) = metrics else {
        let text = Text::from(vec![
            Line::from(""),
            Line::from(Span::styled(no_data_message(), theme.warning)),
        ]);
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" Metrics ")),
            area,
        );
        return;
    };

    let cards = metric_cards(metrics);
    let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(area);
    for (card, column) in cards.iter().zip(columns.iter()) {
        render_card(frame, *column, card, theme);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
