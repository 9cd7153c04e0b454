//! Category selector and sub-category multi-select.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::table_view::truncate_to_width;
use crate::themes::Theme;

/// Single-choice category picker shown as `Category: ◀ Furniture ▶ (1/3)`.
pub struct CategorySelector<'a> {
    pub categories: &'a [String],
    pub selected: Option<&'a str>,
    pub theme: &'a Theme,
}

impl<'a> CategorySelector<'a> {
    pub fn new(categories: &'a [String], selected: Option<&'a str>, theme: &'a Theme) -> Self {
        Self {
            categories,
            selected,
            theme,
        }
    }

    /// 1-based position of the selected category, if it is a candidate.
    pub fn position(&self) -> Option<usize> {
        let selected = self.selected?;
        self.categories
            .iter()
            .position(|c| c == selected)
            .map(|i| i + 1)
    }

    pub fn to_line(&self) -> Line<'a> {
        let name = self.selected.unwrap_or("(none)");
        let counter = match self.position() {
            Some(pos) => format!(" ({}/{})", pos, self.categories.len()),
            None => format!(" (-/{})", self.categories.len()),
        };

        Line::from(vec![
            Span::styled("Category: ", self.theme.label),
            Span::styled("◀ ", self.theme.dim),
            Span::styled(name, self.theme.value),
            Span::styled(" ▶", self.theme.dim),
            Span::styled(counter, self.theme.dim),
        ])
    }
}

/// Multi-select list of the sub-categories of the chosen category.
pub struct SubCategoryList<'a> {
    pub candidates: &'a [String],
    pub chosen: &'a [String],
    /// Index of the highlighted candidate.
    pub cursor: usize,
    pub theme: &'a Theme,
}

impl<'a> SubCategoryList<'a> {
    pub fn new(
        candidates: &'a [String],
        chosen: &'a [String],
        cursor: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            candidates,
            chosen,
            cursor,
            theme,
        }
    }

    /// `(checked, name)` for every candidate, in candidate order.
    pub fn entries(&self) -> Vec<(bool, &'a str)> {
        self.candidates
            .iter()
            .map(|c| (self.chosen.contains(c), c.as_str()))
            .collect()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let label_width = area.width.saturating_sub(8) as usize;
        let items: Vec<ListItem> = self
            .entries()
            .into_iter()
            .map(|(checked, name)| {
                let (mark, style) = if checked {
                    ("[x] ", self.theme.selector_checked)
                } else {
                    ("[ ] ", self.theme.text)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(mark, style),
                    Span::styled(truncate_to_width(name, label_width), style),
                ]))
            })
            .collect();

        let title = format!(
            " Sub-Categories ({}/{}) ",
            self.chosen.len(),
            self.candidates.len()
        );
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(self.theme.selector_cursor)
            .highlight_symbol("» ");

        let mut state = ListState::default();
        if !self.candidates.is_empty() {
            state.select(Some(self.cursor.min(self.candidates.len() - 1)));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
