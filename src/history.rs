//! Snapshot-based linear undo.
//!
//! Undo is a stack of whole-buffer deep copies. Each push clones the live
//! buffer and viewport, which costs time and memory proportional to the
//! total buffer size; that is acceptable at the in-memory scale this editor
//! targets. Moving backwards truncates all forward history, so there is no
//! redo.

use crate::buffer::TextBuffer;
use crate::screen::Viewport;

/// A complete, independent deep copy of buffer, cursor, and viewport state
/// at one instant. Never aliases the live buffer's storage.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Cloned buffer: lines, cursor, gutter, filename, modified counter.
    pub buffer: TextBuffer,
    /// Cloned scroll offsets.
    pub viewport: Viewport,
}

/// Result of an undo request.
#[derive(Debug, Clone)]
pub enum UndoOutcome {
    /// The live state should be replaced by this snapshot.
    Restored(Box<Snapshot>),
    /// Nothing to undo; the buffer already matches the disk state.
    AtDiskState,
}

/// A stack of snapshots with a single current index.
///
/// Grows by [`UndoStack::push`]; shrinks by truncation on undo and on save.
#[derive(Debug, Default)]
pub struct UndoStack {
    snapshots: Vec<Snapshot>,
    index: usize,
}

impl UndoStack {
    /// Create an empty stack.
    pub const fn new() -> Self {
        Self {
            snapshots: Vec::new(),
            index: 0,
        }
    }

    /// Number of snapshots currently held.
    #[inline]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether the stack holds no snapshots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Current snapshot index.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Deep-copy the live state onto the top of the stack and make it
    /// current.
    pub fn push(&mut self, buffer: &TextBuffer, viewport: Viewport) {
        self.snapshots.push(Snapshot {
            buffer: buffer.clone(),
            viewport,
        });
        self.index = self.snapshots.len() - 1;
    }

    /// Step back one snapshot, discarding all forward history.
    ///
    /// At index 0 (or with nothing recorded) the stack is left untouched and
    /// the caller is told the buffer matches the disk state.
    pub fn undo(&mut self) -> UndoOutcome {
        if self.index == 0 || self.snapshots.is_empty() {
            return UndoOutcome::AtDiskState;
        }
        self.index -= 1;
        self.snapshots.truncate(self.index + 1);
        UndoOutcome::Restored(Box::new(self.snapshots[self.index].clone()))
    }

    /// Collapse the stack to a single entry holding the just-saved state.
    pub fn on_save(&mut self, buffer: &TextBuffer, viewport: Viewport) {
        self.snapshots.clear();
        self.snapshots.push(Snapshot {
            buffer: buffer.clone(),
            viewport,
        });
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with(text: &str) -> TextBuffer {
        let mut buffer = TextBuffer::new();
        for &b in text.as_bytes() {
            if b == b'\n' {
                buffer.insert_newline();
            } else {
                buffer.insert_char(b);
            }
        }
        buffer
    }

    #[test]
    fn test_push_advances_index() {
        let mut stack = UndoStack::new();
        stack.push(&buffer_with(""), Viewport::default());
        stack.push(&buffer_with("a"), Viewport::default());
        stack.push(&buffer_with("ab"), Viewport::default());
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.index(), 2);
    }

    #[test]
    fn test_undo_truncates_forward_history() {
        let mut stack = UndoStack::new();
        stack.push(&buffer_with(""), Viewport::default());
        stack.push(&buffer_with("a"), Viewport::default());
        stack.push(&buffer_with("ab"), Viewport::default());

        let UndoOutcome::Restored(snapshot) = stack.undo() else {
            panic!("expected a restored snapshot");
        };
        assert_eq!(snapshot.buffer.contents(), b"a\n");
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.index(), 1);
    }

    #[test]
    fn test_undo_converges_to_disk_state() {
        let mut stack = UndoStack::new();
        stack.push(&buffer_with(""), Viewport::default());
        stack.push(&buffer_with("a"), Viewport::default());

        assert!(matches!(stack.undo(), UndoOutcome::Restored(_)));
        assert!(matches!(stack.undo(), UndoOutcome::AtDiskState));
        assert!(matches!(stack.undo(), UndoOutcome::AtDiskState));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.index(), 0);
    }

    #[test]
    fn test_undo_on_empty_stack_is_noop() {
        let mut stack = UndoStack::new();
        assert!(matches!(stack.undo(), UndoOutcome::AtDiskState));
    }

    #[test]
    fn test_save_collapses_to_single_entry() {
        let mut stack = UndoStack::new();
        stack.push(&buffer_with(""), Viewport::default());
        stack.push(&buffer_with("a"), Viewport::default());
        stack.push(&buffer_with("ab"), Viewport::default());

        let saved = buffer_with("ab");
        stack.on_save(&saved, Viewport::default());
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.index(), 0);
        // An undo right after save performs no content change.
        assert!(matches!(stack.undo(), UndoOutcome::AtDiskState));
    }

    #[test]
    fn test_snapshot_is_independent_of_live_buffer() {
        let mut stack = UndoStack::new();
        let mut live = buffer_with("ab");
        stack.push(&live, Viewport::default());
        live.insert_char(b'c');
        stack.push(&live, Viewport::default());

        let UndoOutcome::Restored(snapshot) = stack.undo() else {
            panic!("expected a restored snapshot");
        };
        assert_eq!(snapshot.buffer.contents(), b"ab\n");
        assert_eq!(live.contents(), b"abc\n");
    }
}
