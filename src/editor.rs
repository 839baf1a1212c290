/// Multi-line editor backing the quick-notes drawer. Holds its own copy
/// of the text; the dashboard takes the buffer back on save and discards
/// it on cancel.
#[derive(Debug, Clone)]
pub struct NotesEditor {
    pub lines: Vec<String>,
    pub row: usize,
    pub col: usize,
    pub scroll: usize,
    pub dirty: bool,
}

impl NotesEditor {
    pub fn new(text: &str) -> Self {
        let lines = if text.is_empty() {
            vec![String::new()]
        } else {
            text.lines().map(str::to_string).collect()
        };
        NotesEditor {
            lines,
            row: 0,
            col: 0,
            scroll: 0,
            dirty: false,
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn insert_char(&mut self, c: char) {
        let line = &mut self.lines[self.row];
        let at = byte_offset(line, self.col);
        line.insert(at, c);
        self.col += 1;
        self.dirty = true;
    }

    pub fn insert_newline(&mut self) {
        let line = &mut self.lines[self.row];
        let at = byte_offset(line, self.col);
        let rest = line.split_off(at);
        self.row += 1;
        self.col = 0;
        self.lines.insert(self.row, rest);
        self.dirty = true;
    }

    pub fn backspace(&mut self) {
        if self.col > 0 {
            let line = &mut self.lines[self.row];
            let at = byte_offset(line, self.col - 1);
            line.remove(at);
            self.col -= 1;
            self.dirty = true;
        } else if self.row > 0 {
            let tail = self.lines.remove(self.row);
            self.row -= 1;
            self.col = char_len(&self.lines[self.row]);
            self.lines[self.row].push_str(&tail);
            self.dirty = true;
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = char_len(&self.lines[self.row]);
        }
    }

    pub fn move_right(&mut self) {
        if self.col < char_len(&self.lines[self.row]) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.clamp_col();
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.clamp_col();
        }
    }

    pub fn move_line_start(&mut self) {
        self.col = 0;
    }

    pub fn move_line_end(&mut self) {
        self.col = char_len(&self.lines[self.row]);
    }

    pub fn page_up(&mut self, page: usize) {
        self.row = self.row.saturating_sub(page.max(1));
        self.clamp_col();
    }

    pub fn page_down(&mut self, page: usize) {
        self.row = (self.row + page.max(1)).min(self.lines.len() - 1);
        self.clamp_col();
    }

    pub fn clear(&mut self) {
        self.lines = vec![String::new()];
        self.row = 0;
        self.col = 0;
        self.scroll = 0;
        self.dirty = true;
    }

    /// Keep the cursor row inside the visible window.
    pub fn adjust_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.row < self.scroll {
            self.scroll = self.row;
        } else if self.row >= self.scroll + visible_height {
            self.scroll = self.row - visible_height + 1;
        }
    }

    fn clamp_col(&mut self) {
        let len = char_len(&self.lines[self.row]);
        if self.col > len {
            self.col = len;
        }
    }
}

fn char_len(line: &str) -> usize {
    line.chars().count()
}

fn byte_offset(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::NotesEditor;

    #[test]
    fn typing_and_newlines_build_the_buffer() {
        let mut ed = NotesEditor::new("");
        for c in "milk".chars() {
            ed.insert_char(c);
        }
        ed.insert_newline();
        for c in "eggs".chars() {
            ed.insert_char(c);
        }
        assert_eq!(ed.text(), "milk\neggs");
        assert!(ed.dirty);
    }

    #[test]
    fn backspace_at_line_start_joins_lines() {
        let mut ed = NotesEditor::new("milk\neggs");
        ed.move_down();
        ed.move_line_start();
        ed.backspace();
        assert_eq!(ed.text(), "milkeggs");
        assert_eq!(ed.row, 0);
        assert_eq!(ed.col, 4);
    }

    #[test]
    fn vertical_movement_clamps_the_column() {
        let mut ed = NotesEditor::new("a longer line\nab");
        ed.move_line_end();
        ed.move_down();
        assert_eq!(ed.col, 2);
    }

    #[test]
    fn multibyte_text_edits_at_char_boundaries() {
        let mut ed = NotesEditor::new("héllo");
        ed.move_right();
        ed.move_right();
        ed.insert_char('x');
        assert_eq!(ed.text(), "héxllo");
        ed.backspace();
        assert_eq!(ed.text(), "héllo");
    }

    #[test]
    fn clear_resets_to_a_single_empty_line() {
        let mut ed = NotesEditor::new("some\nnotes");
        ed.clear();
        assert_eq!(ed.text(), "");
        assert_eq!((ed.row, ed.col), (0, 0));
    }
}
