//! `TextBuffer`: the ordered line sequence plus cursor and gutter state.

use std::path::{Path, PathBuf};

use super::line::Line;

/// Cursor movement directions dispatched by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    /// Move one column left (wrapping to the previous line end).
    Left,
    /// Move one column right (wrapping to the next line start).
    Right,
    /// Move one row up.
    Up,
    /// Move one row down.
    Down,
}

/// The in-memory document: lines, cursor, gutter, and the modified counter.
///
/// A buffer never holds fewer than one line. The cursor column `cx` lives in
/// character coordinates and is offset by the gutter width, so it always
/// satisfies `gutter <= cx <= gutter + current_line.size()`; the cursor can
/// never sit inside the line-number margin.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    /// Ordered line storage; never empty.
    rows: Vec<Line>,
    /// Cursor column in character coordinates (gutter-offset).
    cx: usize,
    /// Cursor row.
    cy: usize,
    /// Width of the line-number margin: digit count of the total line count
    /// plus one separator column.
    gutter: usize,
    /// Count of content and structural edits since the last save.
    modified: u64,
    /// Backing file, if any.
    filename: Option<PathBuf>,
}

impl TextBuffer {
    /// Create a buffer holding exactly one empty line.
    pub fn new() -> Self {
        let mut buffer = Self {
            rows: vec![Line::new()],
            cx: 0,
            cy: 0,
            gutter: 0,
            modified: 0,
            filename: None,
        };
        buffer.update_gutter();
        buffer.cx = buffer.gutter;
        buffer
    }

    /// Create a buffer from loaded lines. An empty load still yields one
    /// empty line.
    pub fn from_lines(rows: Vec<Line>, filename: Option<PathBuf>) -> Self {
        let mut buffer = Self::new();
        if !rows.is_empty() {
            buffer.rows = rows;
        }
        buffer.filename = filename;
        buffer.update_gutter();
        buffer.cx = buffer.gutter;
        buffer
    }

    /// The line rows.
    #[inline]
    pub fn rows(&self) -> &[Line] {
        &self.rows
    }

    /// Total line count; always at least 1.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Cursor column in character coordinates (gutter-offset).
    #[inline]
    pub const fn cx(&self) -> usize {
        self.cx
    }

    /// Cursor row.
    #[inline]
    pub const fn cy(&self) -> usize {
        self.cy
    }

    /// Current gutter width in columns.
    #[inline]
    pub const fn gutter(&self) -> usize {
        self.gutter
    }

    /// Edits since the last save.
    #[inline]
    pub const fn modified(&self) -> u64 {
        self.modified
    }

    /// Backing file path, if any.
    #[inline]
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Set the backing file path (save-as).
    pub fn set_filename(&mut self, path: PathBuf) {
        self.filename = Some(path);
    }

    /// Reset the modified counter after a successful save.
    pub fn mark_saved(&mut self) {
        self.modified = 0;
    }

    /// Whether the buffer is a brand-new single empty line.
    pub fn is_pristine(&self) -> bool {
        self.rows.len() == 1 && self.rows[0].is_empty() && self.modified == 0
    }

    /// Render column of the cursor, gutter-offset like `cx`.
    pub fn rx(&self) -> usize {
        self.rows.get(self.cy).map_or(self.gutter, |row| {
            self.gutter + row.cx_to_rx(self.cx - self.gutter)
        })
    }

    /// Character offset of the cursor within the current line.
    #[inline]
    fn char_offset(&self) -> usize {
        self.cx - self.gutter
    }

    /// Insert one byte at the cursor and advance it.
    ///
    /// On the virtual line past the last row, a new empty row is appended
    /// first.
    pub fn insert_char(&mut self, byte: u8) {
        if self.cy == self.rows.len() {
            self.rows.push(Line::new());
            self.update_gutter();
        }
        let at = self.char_offset();
        self.rows[self.cy].insert_byte(at, byte);
        self.cx += 1;
        self.modified += 1;
    }

    /// Delete the byte before the cursor, joining lines at a row start.
    ///
    /// A no-op at the very start of the buffer. Returns whether anything
    /// changed.
    pub fn delete_char(&mut self) -> bool {
        if self.cy == self.rows.len() {
            return false;
        }
        if self.cy == 0 && self.cx == self.gutter {
            return false;
        }

        if self.cx > self.gutter {
            let at = self.char_offset() - 1;
            self.rows[self.cy].delete_byte(at);
            self.cx -= 1;
        } else {
            // Start of a non-first row: join it onto the previous row.
            let row = self.rows.remove(self.cy);
            self.cy -= 1;
            let join_at = self.rows[self.cy].size();
            self.rows[self.cy].append(row.text());
            self.update_gutter();
            self.cx = self.gutter + join_at;
        }
        self.modified += 1;
        true
    }

    /// Split the current line at the cursor, or insert an empty row above
    /// when the cursor sits at the row start. The cursor moves to the start
    /// of the new row.
    pub fn insert_newline(&mut self) {
        if self.cy == self.rows.len() {
            self.rows.push(Line::new());
        } else if self.cx == self.gutter {
            self.rows.insert(self.cy, Line::new());
        } else {
            let at = self.char_offset();
            let tail = self.rows[self.cy].split_off(at);
            self.rows.insert(self.cy + 1, tail);
        }
        self.cy += 1;
        self.update_gutter();
        self.cx = self.gutter;
        self.modified += 1;
    }

    /// Move the cursor one step, with kilo-style line wrapping, then clamp
    /// the column to the new line's length.
    pub fn move_cursor(&mut self, arrow: Arrow) {
        match arrow {
            Arrow::Left => {
                if self.cx > self.gutter {
                    self.cx -= 1;
                } else if self.cy > 0 {
                    self.cy -= 1;
                    self.cx = self.gutter + self.rows[self.cy].size();
                }
            }
            Arrow::Right => {
                if let Some(row) = self.rows.get(self.cy) {
                    if self.cx < self.gutter + row.size() {
                        self.cx += 1;
                    } else {
                        self.cy += 1;
                        self.cx = self.gutter;
                    }
                }
            }
            Arrow::Up => {
                self.cy = self.cy.saturating_sub(1);
            }
            Arrow::Down => {
                if self.cy < self.rows.len() {
                    self.cy += 1;
                }
            }
        }
        self.clamp_cx();
    }

    /// Move the cursor to the start of the current line.
    pub fn move_home(&mut self) {
        self.cx = self.gutter;
    }

    /// Move the cursor past the last character of the current line.
    pub fn move_end(&mut self) {
        let len = self.rows.get(self.cy).map_or(0, Line::size);
        self.cx = self.gutter + len;
    }

    /// Place the cursor at an absolute position (search jumps). The column is
    /// clamped into the legal range for the target row.
    pub fn set_cursor(&mut self, cx: usize, cy: usize) {
        self.cy = cy.min(self.rows.len());
        self.cx = cx.max(self.gutter);
        self.clamp_cx();
    }

    /// All lines rejoined with a single `\n` terminator per line.
    pub fn contents(&self) -> Vec<u8> {
        let total: usize = self.rows.iter().map(|r| r.size() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for row in &self.rows {
            out.extend_from_slice(row.text());
            out.push(b'\n');
        }
        out
    }

    fn clamp_cx(&mut self) {
        let len = self.rows.get(self.cy).map_or(0, Line::size);
        self.cx = self.cx.clamp(self.gutter, self.gutter + len);
    }

    /// Recompute the gutter width from the line count, preserving the
    /// cursor's character offset when the digit width changes.
    fn update_gutter(&mut self) {
        let offset = self.cx.saturating_sub(self.gutter);
        self.gutter = digit_count(self.rows.len().max(1)) + 1;
        self.cx = self.gutter + offset;
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of decimal digits in `n`.
fn digit_count(n: usize) -> usize {
    let mut n = n;
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(buffer: &mut TextBuffer, text: &str) {
        for &b in text.as_bytes() {
            if b == b'\n' {
                buffer.insert_newline();
            } else {
                buffer.insert_char(b);
            }
        }
    }

    #[test]
    fn test_new_buffer_has_one_empty_line() {
        let buffer = TextBuffer::new();
        assert_eq!(buffer.num_rows(), 1);
        assert!(buffer.rows()[0].is_empty());
        assert_eq!(buffer.gutter(), 2); // one digit + separator
        assert_eq!(buffer.cx(), buffer.gutter());
    }

    #[test]
    fn test_insert_and_contents() {
        let mut buffer = TextBuffer::new();
        type_str(&mut buffer, "hello\nworld");
        assert_eq!(buffer.num_rows(), 2);
        assert_eq!(buffer.contents(), b"hello\nworld\n");
        assert_eq!(buffer.modified(), 11);
    }

    #[test]
    fn test_cursor_never_inside_gutter() {
        let mut buffer = TextBuffer::new();
        type_str(&mut buffer, "ab\ncd");
        for _ in 0..10 {
            buffer.move_cursor(Arrow::Left);
            assert!(buffer.cx() >= buffer.gutter());
        }
    }

    #[test]
    fn test_delete_at_buffer_start_is_noop() {
        let mut buffer = TextBuffer::new();
        assert!(!buffer.delete_char());
        assert_eq!(buffer.modified(), 0);
    }

    #[test]
    fn test_delete_only_char_leaves_one_empty_row() {
        let mut buffer = TextBuffer::new();
        buffer.insert_char(b'x');
        assert!(buffer.delete_char());
        assert_eq!(buffer.num_rows(), 1);
        assert!(buffer.rows()[0].is_empty());
    }

    #[test]
    fn test_delete_joins_lines() {
        let mut buffer = TextBuffer::new();
        type_str(&mut buffer, "ab\ncd");
        buffer.move_home();
        assert!(buffer.delete_char());
        assert_eq!(buffer.num_rows(), 1);
        assert_eq!(buffer.rows()[0].text(), b"abcd");
        // Cursor lands at the join point.
        assert_eq!(buffer.cx() - buffer.gutter(), 2);
        assert_eq!(buffer.cy(), 0);
    }

    #[test]
    fn test_newline_at_row_start_inserts_empty_row_above() {
        let mut buffer = TextBuffer::new();
        type_str(&mut buffer, "ab");
        buffer.move_home();
        buffer.insert_newline();
        assert_eq!(buffer.num_rows(), 2);
        assert!(buffer.rows()[0].is_empty());
        assert_eq!(buffer.rows()[1].text(), b"ab");
        assert_eq!(buffer.cy(), 1);
        assert_eq!(buffer.cx(), buffer.gutter());
    }

    #[test]
    fn test_newline_splits_line() {
        let mut buffer = TextBuffer::new();
        type_str(&mut buffer, "abcd");
        buffer.move_cursor(Arrow::Left);
        buffer.move_cursor(Arrow::Left);
        buffer.insert_newline();
        assert_eq!(buffer.rows()[0].text(), b"ab");
        assert_eq!(buffer.rows()[1].text(), b"cd");
        assert_eq!(buffer.cy(), 1);
        assert_eq!(buffer.cx(), buffer.gutter());
    }

    #[test]
    fn test_gutter_grows_at_ten_lines() {
        let mut buffer = TextBuffer::new();
        assert_eq!(buffer.gutter(), 2);
        for _ in 0..9 {
            buffer.insert_newline();
        }
        assert_eq!(buffer.num_rows(), 10);
        assert_eq!(buffer.gutter(), 3);
        // cx tracks the widened margin.
        assert_eq!(buffer.cx(), buffer.gutter());
    }

    #[test]
    fn test_gutter_shrinks_after_join() {
        let mut buffer = TextBuffer::new();
        for _ in 0..9 {
            buffer.insert_newline();
        }
        assert_eq!(buffer.gutter(), 3);
        buffer.delete_char();
        assert_eq!(buffer.num_rows(), 9);
        assert_eq!(buffer.gutter(), 2);
    }

    #[test]
    fn test_insert_on_virtual_last_line_appends_row() {
        let mut buffer = TextBuffer::new();
        type_str(&mut buffer, "ab");
        buffer.move_cursor(Arrow::Down); // onto the virtual line
        assert_eq!(buffer.cy(), 1);
        buffer.insert_char(b'x');
        assert_eq!(buffer.num_rows(), 2);
        assert_eq!(buffer.rows()[1].text(), b"x");
    }

    #[test]
    fn test_move_right_wraps_to_next_line() {
        let mut buffer = TextBuffer::new();
        type_str(&mut buffer, "ab\ncd");
        buffer.set_cursor(buffer.gutter() + 2, 0);
        buffer.move_cursor(Arrow::Right);
        assert_eq!(buffer.cy(), 1);
        assert_eq!(buffer.cx(), buffer.gutter());
    }

    #[test]
    fn test_move_left_wraps_to_previous_line_end() {
        let mut buffer = TextBuffer::new();
        type_str(&mut buffer, "ab\ncd");
        buffer.set_cursor(buffer.gutter(), 1);
        buffer.move_cursor(Arrow::Left);
        assert_eq!(buffer.cy(), 0);
        assert_eq!(buffer.cx(), buffer.gutter() + 2);
    }

    #[test]
    fn test_vertical_move_clamps_column() {
        let mut buffer = TextBuffer::new();
        type_str(&mut buffer, "long line\nab");
        buffer.set_cursor(buffer.gutter() + 9, 0);
        buffer.move_cursor(Arrow::Down);
        assert_eq!(buffer.cx(), buffer.gutter() + 2);
    }

    #[test]
    fn test_rx_accounts_for_tabs_and_gutter() {
        let mut buffer = TextBuffer::new();
        type_str(&mut buffer, "a\tb");
        // Cursor sits after 'b': render columns a=1, tab pads to 8, b=9.
        assert_eq!(buffer.rx() - buffer.gutter(), 9);
        buffer.move_cursor(Arrow::Left);
        assert_eq!(buffer.rx() - buffer.gutter(), 8);
    }

    #[test]
    fn test_digit_count() {
        assert_eq!(digit_count(1), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(99), 2);
        assert_eq!(digit_count(100), 3);
    }
}
