use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`. Background values
/// 0–6 are considered dark; 7–15 are considered light. Absent or
/// unparseable values resolve to [`BackgroundType::Dark`].
pub fn detect_background() -> BackgroundType {
    background_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

fn background_from_colorfgbg(value: Option<&str>) -> BackgroundType {
    value
        .and_then(|v| v.split(';').next_back())
        .and_then(|bg| bg.parse::<u8>().ok())
        .map(|bg| {
            if bg <= 6 {
                BackgroundType::Dark
            } else {
                BackgroundType::Light
            }
        })
        .unwrap_or(BackgroundType::Dark)
}

/// Complete theme definition carrying every style the dashboard uses.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header & tabs ────────────────────────────────────────────────────────
    pub header: Style,
    pub header_accent: Style,
    pub separator: Style,
    pub tab_active: Style,
    pub tab_inactive: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,
    pub warning: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_total: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub chart_bar: Style,
    pub chart_bar_value: Style,
    pub chart_line: Style,
    pub chart_axis: Style,

    // ── Metric cards ─────────────────────────────────────────────────────────
    pub metric_title: Style,
    pub metric_value: Style,
    /// Non-negative deltas and amounts.
    pub positive: Style,
    /// Negative deltas and amounts.
    pub negative: Style,

    // ── Selectors ────────────────────────────────────────────────────────────
    pub selector_cursor: Style,
    pub selector_checked: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),
            tab_active: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            warning: Style::default().fg(Color::Yellow),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),

            chart_bar: Style::default().fg(Color::Cyan),
            chart_bar_value: Style::default().fg(Color::Black).bg(Color::Cyan),
            chart_line: Style::default().fg(Color::Cyan),
            chart_axis: Style::default().fg(Color::Gray),

            metric_title: Style::default().fg(Color::Gray),
            metric_value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            positive: Style::default().fg(Color::Green),
            negative: Style::default().fg(Color::Red),

            selector_cursor: Style::default().fg(Color::Black).bg(Color::Cyan),
            selector_checked: Style::default().fg(Color::Green),
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),
            tab_active: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            warning: Style::default().fg(Color::Magenta),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_total: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),

            chart_bar: Style::default().fg(Color::Blue),
            chart_bar_value: Style::default().fg(Color::White).bg(Color::Blue),
            chart_line: Style::default().fg(Color::Blue),
            chart_axis: Style::default().fg(Color::DarkGray),

            metric_title: Style::default().fg(Color::DarkGray),
            metric_value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            positive: Style::default().fg(Color::Green),
            negative: Style::default().fg(Color::Red),

            selector_cursor: Style::default().fg(Color::White).bg(Color::Blue),
            selector_checked: Style::default().fg(Color::Green),
        }
    }

    /// Classic theme using only the basic 8-colour ANSI palette, no bold.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_accent: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),
            tab_active: Style::default().fg(Color::Yellow),
            tab_inactive: Style::default().fg(Color::White),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),
            warning: Style::default().fg(Color::Yellow),

            table_header: Style::default().fg(Color::Cyan),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default().fg(Color::Yellow),

            chart_bar: Style::default().fg(Color::Green),
            chart_bar_value: Style::default().fg(Color::Black).bg(Color::Green),
            chart_line: Style::default().fg(Color::Green),
            chart_axis: Style::default().fg(Color::White),

            metric_title: Style::default().fg(Color::Gray),
            metric_value: Style::default().fg(Color::White),
            positive: Style::default().fg(Color::Green),
            negative: Style::default().fg(Color::Red),

            selector_cursor: Style::default().fg(Color::Black).bg(Color::White),
            selector_checked: Style::default().fg(Color::Green),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            BackgroundType::Dark => Self::dark(),
        }
    }

    /// Construct a theme by name. Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Style for a signed amount or delta: `negative` below zero, else
    /// `positive`.
    pub fn signed_style(&self, value: f64) -> Style {
        if value < 0.0 {
            self.negative
        } else {
            self.positive
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
