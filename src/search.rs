//! Incremental, wrap-around substring search.
//!
//! The engine runs inside the interactive prompt: every keystroke while the
//! prompt is open either adjusts direction, resets the match state, or ends
//! the search. Scanning walks whole rows from the last match in the current
//! direction, wrapping circularly and visiting each row at most once per
//! keystroke.

use crate::buffer::{Line, TextBuffer};
use crate::input::Key;
use crate::screen::Viewport;

/// Search state for one prompt session.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    /// Row of the most recent match, if any.
    last_match: Option<usize>,
    /// Scan direction; `false` scans backwards.
    forward: bool,
    /// Cursor column at search entry, restored on cancel.
    saved_cx: usize,
    /// Cursor row at search entry.
    saved_cy: usize,
    /// Viewport at search entry.
    saved_viewport: Viewport,
}

impl SearchEngine {
    /// Capture the cursor and viewport so a cancelled search can restore
    /// them.
    pub const fn begin(buffer: &TextBuffer, viewport: Viewport) -> Self {
        Self {
            last_match: None,
            forward: true,
            saved_cx: buffer.cx(),
            saved_cy: buffer.cy(),
            saved_viewport: viewport,
        }
    }

    /// React to one prompt keystroke.
    ///
    /// Enter keeps the found position; Escape restores the pre-search cursor
    /// and viewport; Right/Down and Left/Up set the direction; anything else
    /// resets the direction to forward and clears the last match. Every key
    /// except the two terminators then rescans with the current query.
    pub fn handle_key(
        &mut self,
        key: Key,
        query: &str,
        buffer: &mut TextBuffer,
        viewport: &mut Viewport,
    ) {
        match key {
            Key::Enter => return,
            Key::Esc => {
                buffer.set_cursor(self.saved_cx, self.saved_cy);
                *viewport = self.saved_viewport;
                return;
            }
            Key::Right | Key::Down => self.forward = true,
            Key::Left | Key::Up => self.forward = false,
            _ => {
                self.last_match = None;
                self.forward = true;
            }
        }

        if query.is_empty() {
            return;
        }
        if let Some((row, offset)) = self.scan(buffer.rows(), query.as_bytes()) {
            let cx = buffer.gutter() + buffer.rows()[row].rx_to_cx(offset);
            buffer.set_cursor(cx, row);
            viewport.force_recenter(buffer);
            log::debug!("search match for {query:?} at row {row}");
        }
    }

    /// Step through the rows in the current direction, wrapping circularly,
    /// until a row's render text contains the query. Returns the row and the
    /// byte offset of the match within the render image.
    fn scan(&mut self, rows: &[Line], query: &[u8]) -> Option<(usize, usize)> {
        // With no previous match the scan always proceeds forward from row 0.
        if self.last_match.is_none() {
            self.forward = true;
        }
        let direction: isize = if self.forward { 1 } else { -1 };

        #[allow(clippy::cast_possible_wrap)]
        let total = rows.len() as isize;
        #[allow(clippy::cast_possible_wrap)]
        let mut current = self.last_match.map_or(-1, |row| row as isize);

        for _ in 0..rows.len() {
            current += direction;
            if current < 0 {
                current = total - 1;
            } else if current == total {
                current = 0;
            }

            #[allow(clippy::cast_sign_loss)]
            let row = current as usize;
            if let Some(offset) = find(rows[row].render(), query) {
                self.last_match = Some(row);
                return Some((row, offset));
            }
        }
        None
    }
}

/// Byte offset of the first literal, case-sensitive occurrence of `needle`.
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
