//! Multi-line text editing state for the review screen

use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use super::ui::{byte_index, Styles};

/// Cursor-addressable editor over the draft text. Rows and columns are
/// character positions, converted to byte offsets only at mutation time.
#[derive(Debug, Clone)]
pub struct TextEditor {
    lines: Vec<String>,
    cursor_row: usize,
    cursor_col: usize,
    scroll: usize,
}

impl TextEditor {
    pub fn from_text(text: &str) -> Self {
        let mut lines: Vec<String> = text.lines().map(|l| l.to_string()).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            lines,
            cursor_row: 0,
            cursor_col: 0,
            scroll: 0,
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn line_chars(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        let idx = byte_index(&self.lines[self.cursor_row], self.cursor_col);
        self.lines[self.cursor_row].insert(idx, c);
        self.cursor_col += 1;
    }

    pub fn insert_newline(&mut self) {
        let idx = byte_index(&self.lines[self.cursor_row], self.cursor_col);
        let rest = self.lines[self.cursor_row].split_off(idx);
        self.lines.insert(self.cursor_row + 1, rest);
        self.cursor_row += 1;
        self.cursor_col = 0;
    }

    pub fn backspace(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
            let idx = byte_index(&self.lines[self.cursor_row], self.cursor_col);
            self.lines[self.cursor_row].remove(idx);
        } else if self.cursor_row > 0 {
            // Join with the previous line
            let line = self.lines.remove(self.cursor_row);
            self.cursor_row -= 1;
            self.cursor_col = self.line_chars(self.cursor_row);
            self.lines[self.cursor_row].push_str(&line);
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor_col < self.line_chars(self.cursor_row) {
            let idx = byte_index(&self.lines[self.cursor_row], self.cursor_col);
            self.lines[self.cursor_row].remove(idx);
        } else if self.cursor_row + 1 < self.lines.len() {
            let line = self.lines.remove(self.cursor_row + 1);
            self.lines[self.cursor_row].push_str(&line);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.line_chars(self.cursor_row);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor_col < self.line_chars(self.cursor_row) {
            self.cursor_col += 1;
        } else if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.cursor_col.min(self.line_chars(self.cursor_row));
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = self.cursor_col.min(self.line_chars(self.cursor_row));
        }
    }

    pub fn move_line_start(&mut self) {
        self.cursor_col = 0;
    }

    pub fn move_line_end(&mut self) {
        self.cursor_col = self.line_chars(self.cursor_row);
    }

    /// Render the editor with the cursor kept in view
    pub fn render(&mut self, f: &mut Frame, area: Rect, title: &str) {
        let height = area.height.saturating_sub(2) as usize;
        if self.cursor_row < self.scroll {
            self.scroll = self.cursor_row;
        }
        if height > 0 && self.cursor_row >= self.scroll + height {
            self.scroll = self.cursor_row + 1 - height;
        }

        let visible: Vec<Line> = self
            .lines
            .iter()
            .skip(self.scroll)
            .take(height.max(1))
            .map(|l| Line::from(l.clone()))
            .collect();

        let widget = Paragraph::new(visible).block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Styles::active_border()),
        );
        f.render_widget(widget, area);

        let prefix_width: usize = self.lines[self.cursor_row]
            .chars()
            .take(self.cursor_col)
            .map(|c| c.width().unwrap_or(0))
            .sum();
        let cursor_x = area.x + 1 + prefix_width as u16;
        let cursor_y = area.y + 1 + (self.cursor_row - self.scroll) as u16;
        if cursor_x < area.x + area.width.saturating_sub(1)
            && cursor_y < area.y + area.height.saturating_sub(1)
        {
            f.set_cursor(cursor_x, cursor_y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_text() {
        let text = "ESCRITURA PÚBLICA\n\nPROTOCOLO: PROT-000000001";
        let editor = TextEditor::from_text(text);
        assert_eq!(editor.text(), text);
    }

    #[test]
    fn empty_text_has_one_editable_line() {
        let mut editor = TextEditor::from_text("");
        editor.insert_char('a');
        assert_eq!(editor.text(), "a");
    }

    #[test]
    fn inserts_accented_chars_mid_line() {
        let mut editor = TextEditor::from_text("Joo Silva");
        editor.move_right();
        editor.move_right();
        editor.insert_char('ã');
        assert_eq!(editor.text(), "João Silva");

        editor.backspace();
        assert_eq!(editor.text(), "Joo Silva");
    }

    #[test]
    fn newline_splits_and_backspace_joins() {
        let mut editor = TextEditor::from_text("abcd");
        editor.move_right();
        editor.move_right();
        editor.insert_newline();
        assert_eq!(editor.text(), "ab\ncd");

        editor.backspace();
        assert_eq!(editor.text(), "abcd");
    }

    #[test]
    fn vertical_moves_clamp_column() {
        let mut editor = TextEditor::from_text("uma linha comprida\ncurta");
        editor.move_line_end();
        editor.move_down();
        // Column clamps to the shorter line
        editor.insert_char('!');
        assert_eq!(editor.text(), "uma linha comprida\ncurta!");

        editor.move_up();
        editor.move_down();
        editor.delete_forward();
        assert_eq!(editor.text(), "uma linha comprida\ncurta!");
    }
}
