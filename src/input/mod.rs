//! Raw keystroke input.
//!
//! A [`ByteSource`] yields single bytes with a bounded inter-byte timeout;
//! the [`KeyDecoder`] resolves escape sequences from that stream into logical
//! [`Key`] events.

mod decoder;
mod key;
mod stdin;

pub use decoder::{ByteSource, KeyDecoder};
pub use key::Key;
pub use stdin::StdinSource;
