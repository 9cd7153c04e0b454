//! Main application state and TUI event loop for the sales dashboard.
//!
//! [`App`] owns the theme, the active tab, the [`DashboardSession`] and the
//! latest [`DashboardSnapshot`]. Key presses are translated into
//! [`SelectionEvent`]s; every event re-runs the pipeline through the session.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame, Terminal,
};
use tracing::debug;

use dashboard_data::pipeline::{DashboardSnapshot, SelectionView};
use dashboard_runtime::session::{DashboardSession, SelectionEvent};

use crate::chart_view;
use crate::components::header::Header;
use crate::components::selector::{CategorySelector, SubCategoryList};
use crate::metrics_view;
use crate::table_view;
use crate::themes::Theme;

/// Help text shown in the footer.
const HELP: &str =
    "Tab/1-4 switch  ←/→ category  ↑/↓ move  Space toggle  a all  c clear  j/k scroll  q quit";

// ── Tab ───────────────────────────────────────────────────────────────────────

/// Which page the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// Raw records table.
    Data,
    /// Category totals and bar chart.
    ByCategory,
    /// Monthly totals and line chart.
    ByMonth,
    /// Selectors, selection chart and metric cards.
    Selection,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Data, Tab::ByCategory, Tab::ByMonth, Tab::Selection];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Data => "Data",
            Tab::ByCategory => "By Category",
            Tab::ByMonth => "By Month",
            Tab::Selection => "Selection",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Data => 0,
            Tab::ByCategory => 1,
            Tab::ByMonth => 2,
            Tab::Selection => 3,
        }
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn previous(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }

    /// Tab bound to the digit key `c` (`'1'`–`'4'`).
    pub fn from_digit(c: char) -> Option<Tab> {
        let n = c.to_digit(10)? as usize;
        n.checked_sub(1).and_then(|i| Tab::ALL.get(i).copied())
    }
}

// ── Terminal guard ────────────────────────────────────────────────────────────

/// Restores the terminal (raw mode, alternate screen) when dropped.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Current page.
    pub tab: Tab,
    /// Display name of the data file.
    pub source: String,
    /// Highlighted row of the sub-category list.
    pub cursor: usize,
    /// First visible row of the records table.
    pub data_scroll: usize,
    /// First visible row of the monthly table.
    pub month_scroll: usize,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    session: DashboardSession,
    snapshot: DashboardSnapshot,
}

impl App {
    pub fn new(session: DashboardSession, theme_name: &str, source: String) -> Self {
        let snapshot = session.snapshot();
        Self {
            theme: Theme::from_name(theme_name),
            tab: Tab::Selection,
            source,
            cursor: 0,
            data_scroll: 0,
            month_scroll: 0,
            should_quit: false,
            session,
            snapshot,
        }
    }

    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    pub fn session(&self) -> &DashboardSession {
        &self.session
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the interactive dashboard until `q` or `Ctrl+C`.
    ///
    /// Polls the keyboard with a 250 ms timeout and yields to the runtime
    /// between polls so a surrounding `select!` can observe OS signals.
    pub async fn run(mut self) -> io::Result<()> {
        let _guard = TerminalGuard::new()?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let tick_rate = Duration::from_millis(250);

        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            tokio::task::yield_now().await;
        }

        terminal.show_cursor()?;
        Ok(())
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Apply one key press to the application state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.tab = self.tab.next(),
            KeyCode::BackTab => self.tab = self.tab.previous(),
            KeyCode::Char(c @ '1'..='4') => {
                if let Some(tab) = Tab::from_digit(c) {
                    self.tab = tab;
                }
            }
            KeyCode::Right => self.dispatch(SelectionEvent::NextCategory),
            KeyCode::Left => self.dispatch(SelectionEvent::PreviousCategory),
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => {
                let last = self.snapshot.sub_categories.len().saturating_sub(1);
                self.cursor = (self.cursor + 1).min(last);
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(name) = self.snapshot.sub_categories.get(self.cursor).cloned() {
                    self.dispatch(SelectionEvent::ToggleSubCategory(name));
                }
            }
            KeyCode::Char('a') => self.dispatch(SelectionEvent::SelectAllSubCategories),
            KeyCode::Char('c') => self.dispatch(SelectionEvent::ClearSubCategories),
            KeyCode::Char('r') => self.dispatch(SelectionEvent::Refresh),
            KeyCode::Char('j') | KeyCode::PageDown => self.scroll(1),
            KeyCode::Char('k') | KeyCode::PageUp => self.scroll(-1),
            _ => {}
        }
    }

    fn dispatch(&mut self, event: SelectionEvent) {
        let category_before = self.snapshot.selection.category.clone();
        self.snapshot = self.session.handle(event);
        if self.snapshot.selection.category != category_before {
            self.cursor = 0;
        }
        debug!(
            selected = self.snapshot.metadata.records_selected,
            "selection updated"
        );
    }

    fn scroll(&mut self, step: isize) {
        let (offset, len) = match self.tab {
            Tab::Data => (&mut self.data_scroll, self.session.dataset().len()),
            Tab::ByMonth => (&mut self.month_scroll, self.snapshot.monthly_sales.len()),
            Tab::ByCategory | Tab::Selection => return,
        };
        *offset = offset
            .saturating_add_signed(step)
            .min(len.saturating_sub(1));
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let [header_area, tabs_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_header(frame, header_area);
        self.render_tabs(frame, tabs_area);

        match self.tab {
            Tab::Data => table_view::render_records_table(
                frame,
                body_area,
                self.session.dataset().records(),
                self.data_scroll,
                &self.theme,
            ),
            Tab::ByCategory => self.render_by_category(frame, body_area),
            Tab::ByMonth => self.render_by_month(frame, body_area),
            Tab::Selection => self.render_selection(frame, body_area),
        }

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(HELP, self.theme.dim))),
            footer_area,
        );
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let dataset = self.session.dataset();
        let range = dataset.date_range().map(|(first, last)| {
            (
                first.format("%Y-%m-%d").to_string(),
                last.format("%Y-%m-%d").to_string(),
            )
        });
        let header = Header::new(&self.source, dataset.len(), range, &self.theme);
        frame.render_widget(Paragraph::new(header.to_lines()), area);
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = Tab::ALL
            .iter()
            .map(|t| Line::from(format!("{} {}", t.index() + 1, t.title())))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.tab.index())
            .style(self.theme.tab_inactive)
            .highlight_style(self.theme.tab_active)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(tabs, area);
    }

    fn render_by_category(&self, frame: &mut Frame, area: Rect) {
        let [table_area, chart_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(area);
        table_view::render_category_table(
            frame,
            table_area,
            &self.snapshot.category_totals,
            &self.theme,
        );
        chart_view::render_category_bar_chart(
            frame,
            chart_area,
            &self.snapshot.category_totals,
            &self.theme,
        );
    }

    fn render_by_month(&self, frame: &mut Frame, area: Rect) {
        let [chart_area, table_area] =
            Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);
        chart_view::render_monthly_line_chart(
            frame,
            chart_area,
            "Sales by Month",
            &self.snapshot.monthly_sales,
            &self.theme,
        );
        table_view::render_monthly_table(
            frame,
            table_area,
            &self.snapshot.monthly_sales,
            self.month_scroll,
            &self.theme,
        );
    }

    fn render_selection(&self, frame: &mut Frame, area: Rect) {
        let [left, right] =
            Layout::horizontal([Constraint::Length(34), Constraint::Min(0)]).areas(area);
        let [category_area, list_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(left);
        let [chart_area, metrics_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(5)]).areas(right);

        let selection = &self.snapshot.selection;
        let selector = CategorySelector::new(
            &self.snapshot.categories,
            selection.category.as_deref(),
            &self.theme,
        );
        frame.render_widget(
            Paragraph::new(selector.to_line()).block(Block::default().borders(Borders::ALL)),
            category_area,
        );

        SubCategoryList::new(
            &self.snapshot.sub_categories,
            &selection.sub_categories,
            self.cursor,
            &self.theme,
        )
        .render(frame, list_area);

        match &self.snapshot.selection_view {
            SelectionView::Data { monthly_sales, .. } => chart_view::render_monthly_line_chart(
                frame,
                chart_area,
                "Selected Sales by Month",
                monthly_sales,
                &self.theme,
            ),
            SelectionView::NoData => table_view::render_no_data(
                frame,
                chart_area,
                "Selected Sales by Month",
                &metrics_view::no_data_message(),
                &self.theme,
            ),
        }

        metrics_view::render_metrics(
            frame,
            metrics_area,
            self.snapshot.selection_view.metrics(),
            &self.theme,
        );
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
