//! Timed single-byte reads from the terminal.
//!
//! Crossterm owns raw-mode toggling, but its event layer does its own escape
//! parsing; the decoder needs the bytes themselves. This source polls the
//! stdin descriptor with a short timeout and reads one byte at a time, which
//! is what bounds every blocking point in the main loop.

use std::io;
use std::os::unix::io::RawFd;
use std::time::Duration;

use crate::error::Result;

use super::decoder::ByteSource;

/// Default inter-byte timeout (matches a VTIME of 1, i.e. 100 ms).
const READ_TIMEOUT: Duration = Duration::from_millis(100);

/// Byte source backed by the process's stdin descriptor.
#[derive(Debug)]
pub struct StdinSource {
    fd: RawFd,
    timeout: Duration,
}

impl StdinSource {
    /// Create a source with the default 100 ms timeout.
    pub const fn new() -> Self {
        Self {
            fd: libc::STDIN_FILENO,
            timeout: READ_TIMEOUT,
        }
    }

    /// Create a source with a custom inter-byte timeout.
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self {
            fd: libc::STDIN_FILENO,
            timeout,
        }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteSource for StdinSource {
    #[allow(unsafe_code)]
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut pollfd = libc::pollfd {
            fd: self.fd,
            events: libc::POLLIN,
            revents: 0,
        };
        #[allow(clippy::cast_possible_truncation)]
        let timeout_ms = self.timeout.as_millis() as libc::c_int;

        let ready = unsafe { libc::poll(&mut pollfd, 1, timeout_ms) };
        if ready < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                return Ok(None);
            }
            return Err(err.into());
        }
        if ready == 0 {
            return Ok(None);
        }

        let mut byte = 0u8;
        let n = unsafe { libc::read(self.fd, std::ptr::addr_of_mut!(byte).cast(), 1) };
        match n {
            1 => Ok(Some(byte)),
            0 => Ok(None),
            _ => {
                let err = io::Error::last_os_error();
                match err.kind() {
                    io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock => Ok(None),
                    _ => Err(err.into()),
                }
            }
        }
    }
}
