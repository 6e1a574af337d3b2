//! Frame composition: viewport scrolling, text rows, gutter, status bar,
//! and the transient message bar.
//!
//! Every frame is drawn into an [`OutputBuffer`] with the cursor hidden, then
//! flushed by the caller in one write.

use crate::buffer::TextBuffer;
use crate::terminal::OutputBuffer;
use crate::VERSION;

/// Scroll offsets defining the visible window.
///
/// Reclamped every frame so the cursor is always inside the visible rows and
/// columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// Index of the topmost visible buffer row.
    pub rowoff: usize,
    /// Leftmost visible render column of the text area.
    pub coloff: usize,
}

impl Viewport {
    /// Clamp both offsets so the cursor stays visible.
    ///
    /// `text_rows` and `text_cols` are the dimensions of the text area, i.e.
    /// the screen minus the status lines and the gutter margin.
    pub fn scroll(&mut self, buffer: &TextBuffer, text_rows: usize, text_cols: usize) {
        let cy = buffer.cy();
        let rx = buffer.rx() - buffer.gutter();

        if cy < self.rowoff {
            self.rowoff = cy;
        }
        if cy >= self.rowoff + text_rows {
            self.rowoff = cy + 1 - text_rows;
        }
        if rx < self.coloff {
            self.coloff = rx;
        }
        if rx >= self.coloff + text_cols {
            self.coloff = rx + 1 - text_cols;
        }
    }

    /// Force the next [`Viewport::scroll`] to reposition the window from
    /// scratch (used after a search jump).
    pub fn force_recenter(&mut self, buffer: &TextBuffer) {
        self.rowoff = buffer.num_rows();
    }
}

/// Screen geometry and frame composition.
///
/// The bottom two rows are reserved for the status bar and the message bar;
/// everything above is the text area.
#[derive(Debug, Clone, Copy)]
pub struct Screen {
    text_rows: usize,
    cols: usize,
}

impl Screen {
    /// Create a screen from the full terminal dimensions.
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self {
            text_rows: rows.saturating_sub(2),
            cols,
        }
    }

    /// Rows available for text.
    #[inline]
    pub const fn text_rows(&self) -> usize {
        self.text_rows
    }

    /// Total columns.
    #[inline]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Compose one full frame.
    ///
    /// Reclamps the viewport, then draws the text rows, the status bar, and
    /// the message bar, and finally repositions and shows the cursor. All of
    /// it accumulates into `out`; nothing is written to the terminal here.
    pub fn refresh(
        &self,
        buffer: &TextBuffer,
        viewport: &mut Viewport,
        message: &str,
        out: &mut OutputBuffer,
    ) {
        let text_cols = self.cols.saturating_sub(buffer.gutter());
        viewport.scroll(buffer, self.text_rows, text_cols);

        out.cursor_hide();
        out.cursor_move(0, 0);

        self.draw_rows(buffer, *viewport, out);
        self.draw_status_bar(buffer, out);
        self.draw_message_bar(message, out);

        let y = buffer.cy() - viewport.rowoff;
        // rx is gutter-offset, so this lands to the right of the margin.
        let x = buffer.rx() - viewport.coloff;
        out.cursor_move(x, y);
        out.cursor_show();
    }

    fn draw_rows(&self, buffer: &TextBuffer, viewport: Viewport, out: &mut OutputBuffer) {
        for y in 0..self.text_rows {
            let filerow = y + viewport.rowoff;
            if filerow >= buffer.num_rows() {
                if buffer.is_pristine() && y == self.text_rows / 3 {
                    self.draw_banner(out);
                } else {
                    out.write_str("-");
                }
            } else {
                self.draw_text_row(buffer, filerow, viewport.coloff, out);
            }
            out.clear_line();
            out.write_str("\r\n");
        }
    }

    /// One-time centered version banner, shown only while the buffer is a
    /// single empty line.
    fn draw_banner(&self, out: &mut OutputBuffer) {
        let mut banner = format!("Quill editor --- version {VERSION}");
        banner.truncate(self.cols);

        let mut padding = (self.cols - banner.len()) / 2;
        if padding > 0 {
            out.write_str("-");
            padding -= 1;
        }
        for _ in 0..padding {
            out.write_str(" ");
        }
        out.write_str(&banner);
    }

    /// Right-aligned line number in the gutter, then the visible slice of the
    /// row's render image under the current column offset.
    fn draw_text_row(
        &self,
        buffer: &TextBuffer,
        filerow: usize,
        coloff: usize,
        out: &mut OutputBuffer,
    ) {
        let gutter = buffer.gutter();
        out.write_str(&format!("{:>width$} ", filerow + 1, width = gutter - 1));

        let row = &buffer.rows()[filerow];
        let text_cols = self.cols.saturating_sub(gutter);
        if coloff < row.rsize() {
            let end = row.rsize().min(coloff + text_cols);
            out.write_raw(&row.render()[coloff..end]);
        }
    }

    /// Reverse-video status line: filename, line count, modification count on
    /// the left; cursor row position right-justified where space allows.
    fn draw_status_bar(&self, buffer: &TextBuffer, out: &mut OutputBuffer) {
        out.reverse_video();

        let name = buffer
            .filename()
            .map_or_else(|| "[No Name]".to_owned(), |p| p.display().to_string());
        let name: String = name.chars().take(20).collect();

        let mut status = format!("{name} - {} lines", buffer.num_rows());
        if buffer.modified() > 0 {
            status.push_str(&format!(" ({} modifications)", buffer.modified()));
        }
        // Char-wise: a byte truncation could split a multi-byte filename.
        let status: String = status.chars().take(self.cols).collect();
        let rstatus = format!("{}/{}", buffer.cy() + 1, buffer.num_rows());

        out.write_str(&status);
        let mut len = status.chars().count();
        while len < self.cols {
            if self.cols - len == rstatus.len() {
                out.write_str(&rstatus);
                break;
            }
            out.write_str(" ");
            len += 1;
        }

        out.reset_attrs();
        out.write_str("\r\n");
    }

    /// Transient message line; the caller passes an empty string once the
    /// message has aged out.
    fn draw_message_bar(&self, message: &str, out: &mut OutputBuffer) {
        out.clear_line();
        let message: String = message.chars().take(self.cols).collect();
        out.write_str(&message);
    }
}
