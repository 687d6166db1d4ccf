//! Common UI components and utilities for the cartório TUI

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, ListState, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::models::StatusEscritura;

/// Common UI styles
pub struct Styles;

impl Styles {
    pub fn default() -> Style {
        Style::new()
    }

    pub fn selected() -> Style {
        Style::new()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title() -> Style {
        Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::new().fg(Color::Red)
    }

    pub fn success() -> Style {
        Style::new().fg(Color::Green)
    }

    pub fn warning() -> Style {
        Style::new().fg(Color::Yellow)
    }

    pub fn info() -> Style {
        Style::new().fg(Color::Cyan)
    }

    pub fn inactive() -> Style {
        Style::new().fg(Color::Gray)
    }

    pub fn active_border() -> Style {
        Style::new().fg(Color::Yellow)
    }

    pub fn inactive_border() -> Style {
        Style::new().fg(Color::Gray)
    }
}

/// Badge color for a review status. Approved is green, rejected is red,
/// everything in flight stays yellow.
pub fn status_style(status: StatusEscritura) -> Style {
    match status {
        StatusEscritura::Aprovada => Styles::success(),
        StatusEscritura::Rejeitada => Styles::error(),
        StatusEscritura::Processando
        | StatusEscritura::AguardandoRevisao
        | StatusEscritura::EmRevisao => Styles::warning(),
    }
}

/// Selectable list widget with state
pub struct SelectableList<T> {
    pub items: Vec<T>,
    pub state: ListState,
}

impl<T> SelectableList<T> {
    pub fn new(items: Vec<T>) -> Self {
        let selected = if items.is_empty() { None } else { Some(0) };
        Self {
            items,
            state: ListState::default().with_selected(selected),
        }
    }

    pub fn next(&mut self) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        let next = self
            .state
            .selected()
            .map(|i| (i + 1) % len)
            .unwrap_or(0);
        self.state.select(Some(next));
    }

    pub fn previous(&mut self) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        let prev = self
            .state
            .selected()
            .map(|i| i.checked_sub(1).unwrap_or(len - 1))
            .unwrap_or(0);
        self.state.select(Some(prev));
    }

    pub fn selected(&self) -> Option<&T> {
        self.state.selected().and_then(|i| self.items.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.state.select(index);
    }
}

/// Byte offset of the `char_idx`-th character, clamped to the string end.
/// All cursor positions in the TUI are character indexes, not byte indexes,
/// so accented input stays on UTF-8 boundaries.
pub(crate) fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Single-line input field widget
#[derive(Clone)]
pub struct InputField {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub is_focused: bool,
    pub cursor_position: usize,
}

impl InputField {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            placeholder: String::new(),
            is_focused: false,
            cursor_position: 0,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn showing_placeholder(&self) -> bool {
        self.value.is_empty() && !self.placeholder.is_empty()
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    pub fn insert_char(&mut self, c: char) {
        let idx = byte_index(&self.value, self.cursor_position);
        self.value.insert(idx, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        self.cursor_position -= 1;
        let idx = byte_index(&self.value, self.cursor_position);
        self.value.remove(idx);
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor_position < self.char_count() {
            let idx = byte_index(&self.value, self.cursor_position);
            self.value.remove(idx);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.char_count() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor_position = self.char_count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor_position = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Render the input field as a widget
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let (text, text_style) = if self.showing_placeholder() {
            (self.placeholder.as_str(), Styles::inactive())
        } else {
            (self.value.as_str(), Styles::default())
        };

        let border_style = if self.is_focused {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };

        let paragraph = Paragraph::new(text).style(text_style).block(
            Block::default()
                .title(self.label.as_str())
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        f.render_widget(paragraph, area);

        if self.is_focused {
            let prefix_width: usize = self
                .value
                .chars()
                .take(self.cursor_position)
                .map(|c| c.width().unwrap_or(0))
                .sum();
            let cursor_x = area.x + 1 + prefix_width as u16;
            if cursor_x < area.x + area.width - 1 {
                f.set_cursor(cursor_x, area.y + 1);
            }
        }
    }
}

/// Truncate a string to a display width (Unicode-aware), padding with
/// spaces so columns line up.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    let display_width = s.width();
    if display_width <= max_width {
        return format!("{}{}", s, " ".repeat(max_width - display_width));
    }

    // Leave one column for the ellipsis
    let target_width = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > target_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out.push_str(&" ".repeat(max_width - used - 1));
    out
}

/// Center a rectangle within another rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let rows = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(rows[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_field_edits_accented_text_on_char_boundaries() {
        let mut field = InputField::new("Partes");
        for c in "João".chars() {
            field.insert_char(c);
        }
        assert_eq!(field.value, "João");
        assert_eq!(field.cursor_position, 4);

        // Insert in the middle, just after the accented char
        field.move_cursor_left();
        field.insert_char('z');
        assert_eq!(field.value, "Joãzo");

        field.delete_char();
        assert_eq!(field.value, "João");

        field.move_cursor_to_start();
        field.delete_char_forward();
        assert_eq!(field.value, "oão");
    }

    #[test]
    fn truncate_pads_short_and_shortens_long() {
        assert_eq!(truncate_string("abc", 5), "abc  ");
        assert_eq!(truncate_string("abcdef", 5), "abcd…");
        // Truncated output keeps the requested display width
        assert_eq!(truncate_string("Escritura de Compra e Venda", 10).width(), 10);
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut list = SelectableList::new(vec!["a", "b", "c"]);
        assert_eq!(list.selected_index(), Some(0));
        list.previous();
        assert_eq!(list.selected_index(), Some(2));
        list.next();
        assert_eq!(list.selected_index(), Some(0));

        let mut empty: SelectableList<&str> = SelectableList::new(Vec::new());
        empty.next();
        assert_eq!(empty.selected_index(), None);
    }

    #[test]
    fn status_colors_follow_review_outcome() {
        assert_eq!(
            status_style(StatusEscritura::Aprovada).fg,
            Some(Color::Green)
        );
        assert_eq!(status_style(StatusEscritura::Rejeitada).fg, Some(Color::Red));
        assert_eq!(
            status_style(StatusEscritura::AguardandoRevisao).fg,
            Some(Color::Yellow)
        );
        assert_eq!(
            status_style(StatusEscritura::Processando).fg,
            Some(Color::Yellow)
        );
    }
}
