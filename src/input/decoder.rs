//! `KeyDecoder`: resolves the raw byte stream into logical keys.

use crate::error::Result;

use super::key::Key;

/// A source of single input bytes with a bounded inter-byte timeout.
///
/// `Ok(None)` means the timeout elapsed with no byte available. The decoder
/// relies on that to tell a bare Escape keypress apart from the head of an
/// escape sequence.
pub trait ByteSource {
    /// Read one byte, or `None` on timeout.
    fn read_byte(&mut self) -> Result<Option<u8>>;
}

/// Decoder from raw bytes to [`Key`] events.
///
/// A non-escape byte maps directly; an escape byte triggers up to two (for
/// `ESC [ <digit> ~` forms, three) further timed reads. Any timeout or
/// unrecognized sequence degrades to a bare [`Key::Esc`].
#[derive(Debug)]
pub struct KeyDecoder<S> {
    source: S,
}

impl<S: ByteSource> KeyDecoder<S> {
    /// Wrap a byte source.
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Consume the decoder and return the underlying source.
    pub fn into_inner(self) -> S {
        self.source
    }

    /// Block until the next logical key arrives.
    pub fn read_key(&mut self) -> Result<Key> {
        let byte = loop {
            if let Some(byte) = self.source.read_byte()? {
                break byte;
            }
        };

        Ok(match byte {
            b'\x1b' => self.read_escape()?,
            b'\r' => Key::Enter,
            0x7f => Key::Backspace,
            b'\t' => Key::Char(b'\t'),
            // Fold remaining C0 control bytes onto their letter.
            0x00..=0x1f => Key::Ctrl(byte | 0x60),
            _ => Key::Char(byte),
        })
    }

    /// Resolve the bytes following an ESC within the inter-byte timeout.
    fn read_escape(&mut self) -> Result<Key> {
        let Some(first) = self.source.read_byte()? else {
            return Ok(Key::Esc);
        };
        let Some(second) = self.source.read_byte()? else {
            return Ok(Key::Esc);
        };

        let key = match (first, second) {
            (b'[', b'0'..=b'9') => {
                let Some(b'~') = self.source.read_byte()? else {
                    return Ok(Key::Esc);
                };
                match second {
                    b'1' | b'7' => Key::Home,
                    b'3' => Key::Delete,
                    b'4' | b'8' => Key::End,
                    b'5' => Key::PageUp,
                    b'6' => Key::PageDown,
                    _ => Key::Esc,
                }
            }
            (b'[', b'A') => Key::Up,
            (b'[', b'B') => Key::Down,
            (b'[', b'C') => Key::Right,
            (b'[', b'D') => Key::Left,
            (b'[' | b'O', b'H') => Key::Home,
            (b'[' | b'O', b'F') => Key::End,
            _ => Key::Esc,
        };
        Ok(key)
    }
}
