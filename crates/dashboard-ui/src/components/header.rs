use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative marker placed either side of the application title.
pub const ACCENT: &str = "◆ ◇ ◆";

/// Dashboard header rendering three lines:
///
/// 1. Application title with accent decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. Dataset information in `[ source | N records | first → last ]` format.
pub struct Header<'a> {
    /// Display name of the loaded data file.
    pub source: &'a str,
    /// Number of records in the dataset.
    pub records: usize,
    /// First and last order date, already formatted.
    pub date_range: Option<(String, String)>,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(
        source: &'a str,
        records: usize,
        date_range: Option<(String, String)>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            source,
            records,
            date_range,
            theme,
        }
    }

    /// Render the header as exactly three lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);
        let range = match &self.date_range {
            Some((first, last)) => format!("{} → {}", first, last),
            None => "no dates".to_string(),
        };

        vec![
            Line::from(vec![
                Span::styled(ACCENT, self.theme.header_accent),
                Span::styled(" SALES DASHBOARD ", self.theme.header),
                Span::styled(ACCENT, self.theme.header_accent),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.source, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(
                    format!(
                        "{} records",
                        dashboard_core::formatting::format_number(self.records as f64, 0)
                    ),
                    self.theme.value,
                ),
                Span::styled(" | ", self.theme.label),
                Span::styled(range, self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
