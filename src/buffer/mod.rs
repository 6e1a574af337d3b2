//! Line-oriented text storage.
//!
//! A [`TextBuffer`] is an ordered, never-empty sequence of [`Line`]s plus the
//! cursor and gutter bookkeeping. Each line keeps a derived tab-expanded
//! `render` copy in sync with its stored text.

mod line;
mod text_buffer;

pub use line::Line;
pub use text_buffer::{Arrow, TextBuffer};
