//! Logical key events produced by the decoder.

/// A decoded keystroke.
///
/// This is the closed vocabulary the controller dispatches on: printable
/// bytes, folded control bytes, and the named keys resolved from escape
/// sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable byte (includes a literal tab).
    Char(u8),
    /// A control byte folded to its lowercase letter, e.g. `Ctrl(b'q')`.
    Ctrl(u8),
    /// Enter/Return.
    Enter,
    /// Backspace (DEL byte).
    Backspace,
    /// A bare or unresolved escape.
    Esc,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Forward delete.
    Delete,
}
