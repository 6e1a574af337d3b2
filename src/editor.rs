//! `Editor`: the top-level mode/state machine.
//!
//! Owns the buffer, viewport, undo stack, and status message, consumes
//! decoded keys, and drives one frame per dispatched action. Generic over the
//! byte source and the output writer so the whole pipeline can be driven by
//! scripted bytes in tests.

use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::buffer::{Arrow, TextBuffer};
use crate::error::Result;
use crate::fileio;
use crate::history::{UndoOutcome, UndoStack};
use crate::input::{ByteSource, Key, KeyDecoder};
use crate::screen::{Screen, Viewport};
use crate::search::SearchEngine;
use crate::terminal::OutputBuffer;

/// Tunables for the controller.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// How long a status message stays visible.
    pub message_timeout: Duration,
    /// A snapshot is pushed whenever `modified` is a multiple of this.
    pub undo_stride: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            message_timeout: Duration::from_secs(5),
            undo_stride: 3,
        }
    }
}

/// Transient status-bar message with its display age.
#[derive(Debug)]
struct StatusMessage {
    text: String,
    set_at: Instant,
}

impl StatusMessage {
    fn new() -> Self {
        Self {
            text: String::new(),
            set_at: Instant::now(),
        }
    }

    fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.set_at = Instant::now();
    }

    fn visible(&self, timeout: Duration) -> &str {
        if !self.text.is_empty() && self.set_at.elapsed() < timeout {
            &self.text
        } else {
            ""
        }
    }
}

/// The interactive editor: one of these owns all mutable state and is the
/// single mutator in the process.
pub struct Editor<S: ByteSource, W: Write> {
    decoder: KeyDecoder<S>,
    out: W,
    frame: OutputBuffer,
    screen: Screen,
    buffer: TextBuffer,
    viewport: Viewport,
    undo: UndoStack,
    /// Active only while the search prompt is open.
    search: Option<SearchEngine>,
    message: StatusMessage,
    config: EditorConfig,
    running: bool,
}

impl<S: ByteSource, W: Write> Editor<S, W> {
    /// Create an editor over a byte source and an output writer for a
    /// `rows x cols` terminal.
    pub fn new(source: S, out: W, rows: usize, cols: usize, config: EditorConfig) -> Self {
        Self {
            decoder: KeyDecoder::new(source),
            out,
            frame: OutputBuffer::new(),
            screen: Screen::new(rows, cols),
            buffer: TextBuffer::new(),
            viewport: Viewport::default(),
            undo: UndoStack::new(),
            search: None,
            message: StatusMessage::new(),
            config,
            running: true,
        }
    }

    /// The live buffer.
    pub const fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Whether the main loop is still running.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Number of undo snapshots currently held.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Current status message text, regardless of age.
    pub fn status_message(&self) -> &str {
        &self.message.text
    }

    /// Load the given file (or start with an empty buffer) and record the
    /// opening snapshot.
    pub fn open(&mut self, path: Option<&Path>) -> Result<()> {
        if let Some(path) = path {
            let lines = fileio::load(path)?;
            self.buffer = TextBuffer::from_lines(lines, Some(path.to_path_buf()));
        }
        self.undo.push(&self.buffer, self.viewport);
        self.message
            .set("HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-G = find | ESC = command");
        Ok(())
    }

    /// Main loop: render one frame, block on one key, dispatch, repeat.
    ///
    /// On exit the screen is cleared and the cursor parked at the top-left,
    /// leaving the terminal clean for the shell.
    pub fn run(&mut self) -> Result<()> {
        while self.running {
            self.refresh_screen()?;
            self.process_keypress()?;
        }
        self.frame.clear();
        self.frame.clear_screen();
        self.frame.cursor_move(0, 0);
        self.frame.flush_to(&mut self.out)?;
        Ok(())
    }

    /// Compose and flush one frame as a single write.
    fn refresh_screen(&mut self) -> Result<()> {
        self.frame.clear();
        let visible = self.message.visible(self.config.message_timeout);
        self.screen
            .refresh(&self.buffer, &mut self.viewport, visible, &mut self.frame);
        self.frame.flush_to(&mut self.out)?;
        Ok(())
    }

    /// Read one key and map it to exactly one action.
    fn process_keypress(&mut self) -> Result<()> {
        let key = self.decoder.read_key()?;
        match key {
            Key::Ctrl(b's') => self.save()?,
            Key::Ctrl(b'q') => self.quit(),
            Key::Ctrl(b'f') => self.running = false,
            Key::Ctrl(b'g') => self.find()?,
            Key::Esc => self.command_prompt()?,

            Key::Enter => {
                self.buffer.insert_newline();
                self.maybe_snapshot(None);
            }
            Key::Backspace | Key::Ctrl(b'h') => {
                if self.buffer.delete_char() {
                    self.maybe_snapshot(None);
                }
            }
            Key::Delete => {
                // Forward delete: step onto the following character first.
                self.buffer.move_cursor(Arrow::Right);
                if self.buffer.delete_char() {
                    self.maybe_snapshot(None);
                }
            }

            Key::Left => self.buffer.move_cursor(Arrow::Left),
            Key::Right => self.buffer.move_cursor(Arrow::Right),
            Key::Up => self.buffer.move_cursor(Arrow::Up),
            Key::Down => self.buffer.move_cursor(Arrow::Down),
            Key::Home => self.buffer.move_home(),
            Key::End => self.buffer.move_end(),
            Key::PageUp | Key::PageDown => self.page(key),

            Key::Char(byte) => {
                self.buffer.insert_char(byte);
                self.maybe_snapshot(Some(byte));
            }
            // Unbound control keys do nothing.
            Key::Ctrl(_) => {}
        }
        Ok(())
    }

    /// Push a snapshot on its triggers: a space insert, or the modification
    /// counter hitting a stride multiple.
    fn maybe_snapshot(&mut self, inserted: Option<u8>) {
        if inserted == Some(b' ') || self.buffer.modified() % self.config.undo_stride == 0 {
            self.undo.push(&self.buffer, self.viewport);
        }
    }

    /// Quit, refused with a warning while unsaved changes exist.
    fn quit(&mut self) {
        if self.buffer.modified() != 0 {
            self.message
                .set("Unsaved file changes! Save and quit or use Ctrl-F to force quit.");
            return;
        }
        self.running = false;
    }

    /// Save the buffer, prompting for a path when it has none.
    fn save(&mut self) -> Result<()> {
        if self.buffer.filename().is_none() {
            match self.prompt("Save as: {} (ESC to cancel)", |_, _, _| {})? {
                Some(name) => self.buffer.set_filename(name.into()),
                None => {
                    self.message.set("Save aborted");
                    return Ok(());
                }
            }
        }

        let Some(path) = self.buffer.filename().map(Path::to_path_buf) else {
            return Ok(());
        };
        match fileio::save(&path, &self.buffer) {
            Ok(written) => {
                self.buffer.mark_saved();
                self.undo.on_save(&self.buffer, self.viewport);
                self.message.set(format!("{written} bytes written to disk"));
            }
            Err(err) => {
                log::warn!("save failed: {err}");
                self.message.set(format!("Can't save! I/O error: {err}"));
            }
        }
        Ok(())
    }

    /// Replace the live state with the previous snapshot, if any.
    fn undo_command(&mut self) {
        match self.undo.undo() {
            UndoOutcome::Restored(snapshot) => {
                self.buffer = snapshot.buffer;
                self.viewport = snapshot.viewport;
                log::debug!("undo to snapshot {}", self.undo.index());
            }
            UndoOutcome::AtDiskState => {
                self.message.set("Buffer matches disk state");
            }
        }
    }

    /// Incremental search inside a prompt.
    fn find(&mut self) -> Result<()> {
        self.search = Some(SearchEngine::begin(&self.buffer, self.viewport));
        let _ = self.prompt("Search: {} (Use ESC/Arrows/Enter)", |editor, query, key| {
            if let Some(mut engine) = editor.search.take() {
                engine.handle_key(key, query, &mut editor.buffer, &mut editor.viewport);
                editor.search = Some(engine);
            }
        })?;
        self.search = None;
        Ok(())
    }

    /// One-line command prompt opened by a bare escape.
    fn command_prompt(&mut self) -> Result<()> {
        let Some(command) = self.prompt("Command: {} (q = quit, u = undo)", |_, _, _| {})? else {
            return Ok(());
        };
        match command.as_str() {
            "q" => self.running = false,
            "u" => self.undo_command(),
            other => self.message.set(format!("Unknown command: {other}")),
        }
        Ok(())
    }

    /// Interactive one-line prompt.
    ///
    /// `template` must contain `{}`, replaced by the accumulating input on
    /// every repaint. `on_key` is invoked once per keystroke with the input
    /// so far and the decoded key, before the next re-render. Returns `None`
    /// when cancelled with Escape.
    fn prompt<F>(&mut self, template: &str, mut on_key: F) -> Result<Option<String>>
    where
        F: FnMut(&mut Self, &str, Key),
    {
        let mut input = String::new();
        loop {
            self.message.set(template.replace("{}", &input));
            self.refresh_screen()?;

            let key = self.decoder.read_key()?;
            match key {
                Key::Esc => {
                    self.message.set("");
                    on_key(self, &input, key);
                    return Ok(None);
                }
                Key::Enter if !input.is_empty() => {
                    self.message.set("");
                    on_key(self, &input, key);
                    return Ok(Some(input));
                }
                Key::Backspace | Key::Ctrl(b'h') | Key::Delete => {
                    input.pop();
                }
                // ASCII printable only: widening a byte past 0x7f would
                // store a different byte sequence than the one typed.
                Key::Char(byte) if byte.is_ascii_graphic() || byte == b' ' => {
                    input.push(char::from(byte));
                }
                _ => {}
            }
            on_key(self, &input, key);
        }
    }

    /// Jump a full screen of rows, pinning the cursor to the window edge
    /// first the way kilo does.
    fn page(&mut self, key: Key) {
        let text_rows = self.screen.text_rows();
        let cy = if key == Key::PageUp {
            self.viewport.rowoff
        } else {
            (self.viewport.rowoff + text_rows.saturating_sub(1)).min(self.buffer.num_rows())
        };
        self.buffer.set_cursor(self.buffer.cx(), cy);

        let arrow = if key == Key::PageUp {
            Arrow::Up
        } else {
            Arrow::Down
        };
        for _ in 0..text_rows {
            self.buffer.move_cursor(arrow);
        }
    }
}
