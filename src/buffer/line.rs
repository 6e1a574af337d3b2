//! Line: one row of text and its tab-expanded render image.

use crate::TAB_STOP;

/// A single row of the buffer.
///
/// `text` is the stored content; `render` is the same content with every tab
/// expanded so the visual column advances to the next multiple of
/// [`TAB_STOP`]. `render` is recomputed synchronously after every mutation,
/// so a stale render image is never observable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    /// Stored content.
    text: Vec<u8>,
    /// Tab-expanded content used for drawing and search.
    render: Vec<u8>,
}

impl Line {
    /// Create an empty line.
    pub const fn new() -> Self {
        Self {
            text: Vec::new(),
            render: Vec::new(),
        }
    }

    /// Create a line from stored bytes.
    pub fn from_bytes(text: impl Into<Vec<u8>>) -> Self {
        let mut line = Self {
            text: text.into(),
            render: Vec::new(),
        };
        line.update_render();
        line
    }

    /// Length of the stored content in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.text.len()
    }

    /// Length of the render image in columns.
    #[inline]
    pub fn rsize(&self) -> usize {
        self.render.len()
    }

    /// Whether the stored content is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The stored content.
    #[inline]
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// The tab-expanded render image.
    #[inline]
    pub fn render(&self) -> &[u8] {
        &self.render
    }

    /// Insert a byte at character offset `at`, shifting trailing bytes right.
    ///
    /// Offsets past the end clamp to an append.
    pub fn insert_byte(&mut self, at: usize, byte: u8) {
        let at = at.min(self.text.len());
        self.text.insert(at, byte);
        self.update_render();
    }

    /// Delete the byte at character offset `at`. Out-of-range offsets are a
    /// no-op.
    pub fn delete_byte(&mut self, at: usize) {
        if at < self.text.len() {
            self.text.remove(at);
            self.update_render();
        }
    }

    /// Append raw bytes to the stored content (line join).
    pub fn append(&mut self, bytes: &[u8]) {
        self.text.extend_from_slice(bytes);
        self.update_render();
    }

    /// Split the line at character offset `at`, keeping the head and
    /// returning the tail as a new line.
    pub fn split_off(&mut self, at: usize) -> Self {
        let tail = self.text.split_off(at.min(self.text.len()));
        self.update_render();
        Self::from_bytes(tail)
    }

    /// Map a character column to its render column.
    ///
    /// Scanning left to right, a tab advances the render column to the next
    /// multiple of [`TAB_STOP`]; any other byte advances it by one.
    pub fn cx_to_rx(&self, cx: usize) -> usize {
        let mut rx = 0;
        for &byte in self.text.iter().take(cx) {
            if byte == b'\t' {
                rx += (TAB_STOP - 1) - (rx % TAB_STOP);
            }
            rx += 1;
        }
        rx
    }

    /// Map a render column back to a character column.
    ///
    /// Returns the smallest character column whose cumulative render column
    /// strictly exceeds `rx`. Together with [`Line::cx_to_rx`] this is
    /// monotone and order-preserving; columns inside an expanded tab map back
    /// to the tab's own character position.
    pub fn rx_to_cx(&self, rx: usize) -> usize {
        let mut cur = 0;
        for (cx, &byte) in self.text.iter().enumerate() {
            if byte == b'\t' {
                cur += (TAB_STOP - 1) - (cur % TAB_STOP);
            }
            cur += 1;
            if cur > rx {
                return cx;
            }
        }
        self.text.len()
    }

    /// Recompute the render image from the stored content.
    fn update_render(&mut self) {
        let tabs = self.text.iter().filter(|&&b| b == b'\t').count();
        self.render = Vec::with_capacity(self.text.len() + tabs * (TAB_STOP - 1));
        for &byte in &self.text {
            if byte == b'\t' {
                self.render.push(b' ');
                while self.render.len() % TAB_STOP != 0 {
                    self.render.push(b' ');
                }
            } else {
                self.render.push(byte);
            }
        }
    }
}
