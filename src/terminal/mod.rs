//! Terminal collaborators: the single-write output buffer and raw-mode
//! control.

mod output;
mod raw;

pub use output::OutputBuffer;
pub use raw::{window_size, RawMode};
