//! Persistence collaborator: load a file into lines, save lines to disk.

use std::fs;
use std::io;
use std::path::Path;

use crate::buffer::{Line, TextBuffer};
use crate::error::{Error, Result};

/// Load a file as an ordered sequence of lines.
///
/// Trailing `\n`/`\r` terminators are stripped from every line, so the
/// buffer is line-ending agnostic. A missing file yields no lines: the
/// editor opens it as a new, empty buffer and the file is created on save.
pub fn load(path: &Path) -> Result<Vec<Line>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::info!("{}: new file", path.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(Error::File {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let mut lines: Vec<Line> = bytes
        .split(|&b| b == b'\n')
        .map(|line| {
            let mut end = line.len();
            while end > 0 && line[end - 1] == b'\r' {
                end -= 1;
            }
            Line::from_bytes(&line[..end])
        })
        .collect();
    // A trailing newline terminates the last line; it does not open a new one.
    if bytes.last() == Some(&b'\n') {
        lines.pop();
    }

    log::info!("{}: loaded {} lines", path.display(), lines.len());
    Ok(lines)
}

/// Write the buffer to `path`, rejoining all lines with a single `\n`
/// terminator each regardless of the original line-ending style.
///
/// Returns the number of bytes written.
pub fn save(path: &Path, buffer: &TextBuffer) -> Result<usize> {
    let contents = buffer.contents();
    fs::write(path, &contents).map_err(|source| Error::File {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("{}: wrote {} bytes", path.display(), contents.len());
    Ok(contents.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
        dir.path().join(name)
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let lines = load(&temp_path(&dir, "nope.txt")).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_load_strips_terminators() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "crlf.txt");
        fs::write(&path, b"one\r\ntwo\nthree").unwrap();

        let lines = load(&path).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].text(), b"one");
        assert_eq!(lines[1].text(), b"two");
        assert_eq!(lines[2].text(), b"three");
    }

    #[test]
    fn test_trailing_newline_does_not_add_a_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "nl.txt");
        fs::write(&path, b"one\ntwo\n").unwrap();
        assert_eq!(load(&path).unwrap().len(), 2);
    }

    #[test]
    fn test_save_reports_bytes_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "out.txt");
        let buffer = TextBuffer::from_lines(
            vec![Line::from_bytes(*b"ab"), Line::from_bytes(*b"cd")],
            None,
        );
        let written = save(&path, &buffer).unwrap();
        assert_eq!(written, 6);
        assert_eq!(fs::read(&path).unwrap(), b"ab\ncd\n");
    }

    #[test]
    fn test_open_then_save_normalizes_terminators_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "roundtrip.txt");
        fs::write(&path, b"alpha\r\nbeta\ngamma\r\n").unwrap();

        let buffer = TextBuffer::from_lines(load(&path).unwrap(), None);
        save(&path, &buffer).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"alpha\nbeta\ngamma\n");
    }

    #[test]
    fn test_save_to_unwritable_path_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "no/such/dir/out.txt");
        let err = save(&path, &TextBuffer::new()).unwrap_err();
        assert!(err.to_string().contains("out.txt"));
    }
}
