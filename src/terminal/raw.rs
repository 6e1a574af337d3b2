//! Raw-mode control and window-size queries.

use std::io::Write;

use crossterm::terminal;

use crate::error::{Error, Result};
use crate::input::ByteSource;

/// RAII guard for terminal raw mode.
///
/// Raw mode is enabled on construction and restored on drop, which covers
/// every exit path including panics unwinding out of the main loop.
#[derive(Debug)]
pub struct RawMode {
    _private: (),
}

impl RawMode {
    /// Save the current terminal attributes and switch to raw
    /// (unbuffered, unechoed, non-canonical) input.
    pub fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Query the terminal size as `(rows, cols)`.
///
/// Falls back to repositioning the cursor to the bottom-right corner and
/// reading back the cursor-position report when the direct query fails.
pub fn window_size<S, W>(source: &mut S, out: &mut W) -> Result<(usize, usize)>
where
    S: ByteSource,
    W: Write,
{
    match terminal::size() {
        Ok((cols, rows)) if cols > 0 && rows > 0 => Ok((usize::from(rows), usize::from(cols))),
        _ => cursor_position_fallback(source, out),
    }
}

/// Push the cursor to the bottom-right corner, then ask the terminal where it
/// ended up (`ESC [ 6 n` -> `ESC [ rows ; cols R`).
fn cursor_position_fallback<S, W>(source: &mut S, out: &mut W) -> Result<(usize, usize)>
where
    S: ByteSource,
    W: Write,
{
    out.write_all(b"\x1b[999C\x1b[999B\x1b[6n")?;
    out.flush()?;

    let mut report = Vec::with_capacity(16);
    while report.len() < 32 {
        match source.read_byte()? {
            Some(b'R') | None => break,
            Some(byte) => report.push(byte),
        }
    }
    parse_cursor_report(&report).ok_or(Error::WindowSize)
}

/// Parse the body of a cursor-position report: `ESC [ rows ; cols`.
fn parse_cursor_report(report: &[u8]) -> Option<(usize, usize)> {
    let body = report.strip_prefix(b"\x1b[")?;
    let text = std::str::from_utf8(body).ok()?;
    let (rows, cols) = text.split_once(';')?;
    let rows = rows.parse().ok()?;
    let cols = cols.parse().ok()?;
    if rows == 0 || cols == 0 {
        return None;
    }
    Some((rows, cols))
}
