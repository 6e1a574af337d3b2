//! # Quill
//!
//! A single-write, zero-flicker terminal text editor.
//!
//! Quill reads raw keystrokes, keeps a line-oriented text buffer in memory,
//! and repaints a scrolling viewport each frame as one accumulated write.
//! Editing is backed by a snapshot-based linear undo stack and an
//! incremental, wrap-around search.
//!
//! ## Core Concepts
//!
//! - **Single-write frames**: every frame is composed into an [`OutputBuffer`]
//!   and flushed in one syscall, cursor hidden during composition
//! - **Character vs render columns**: tabs expand to the next multiple of
//!   [`TAB_STOP`]; [`buffer::Line`] keeps the expanded text in sync with the
//!   stored text after every mutation
//! - **Snapshot undo**: whole-buffer deep copies, truncated on undo and on
//!   save (undo-only, no redo)
//! - **Byte-level key decoding**: escape sequences are resolved from the raw
//!   byte stream with an inter-byte timeout
//!
//! ## Example
//!
//! ```rust,ignore
//! use quill::{Editor, EditorConfig};
//!
//! let mut editor = Editor::new(input, output, 24, 80, EditorConfig::default());
//! editor.open(Some(Path::new("notes.txt")))?;
//! editor.run()?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod editor;
pub mod error;
pub mod fileio;
pub mod history;
pub mod input;
pub mod screen;
pub mod search;
pub mod terminal;

// Re-exports for convenience
pub use buffer::{Line, TextBuffer};
pub use editor::{Editor, EditorConfig};
pub use error::{Error, Result};
pub use history::{Snapshot, UndoOutcome, UndoStack};
pub use input::{ByteSource, Key, KeyDecoder, StdinSource};
pub use screen::{Screen, Viewport};
pub use search::SearchEngine;
pub use terminal::OutputBuffer;

/// Crate version shown in the empty-buffer banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tab stop width: a tab advances the render column to the next multiple of
/// this value.
pub const TAB_STOP: usize = 8;
