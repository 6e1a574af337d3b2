//! Quill binary: wire the terminal, the byte source, and the editor core
//! together.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use quill::input::StdinSource;
use quill::terminal::{window_size, RawMode};
use quill::{Editor, EditorConfig};

/// A single-write, zero-flicker terminal text editor.
#[derive(Debug, Parser)]
#[command(name = "quill", version)]
struct Cli {
    /// File to edit; omitted to start with an empty buffer.
    file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // The raw-mode guard has already restored the terminal here.
            log::error!("fatal: {err}");
            eprintln!("quill: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> quill::Result<()> {
    let _raw = RawMode::enable()?;

    let mut source = StdinSource::new();
    let mut stdout = io::stdout();
    let (rows, cols) = window_size(&mut source, &mut stdout)?;

    let mut editor = Editor::new(source, stdout, rows, cols, EditorConfig::default());
    editor.open(cli.file.as_deref())?;
    editor.run()
}

/// Log to the file named by `QUILL_LOG`, if set. The screen owns stdout and
/// stderr, so there is nowhere else to log.
fn init_logging() {
    let Ok(path) = std::env::var("QUILL_LOG") else {
        return;
    };
    let Ok(file) = fern::log_file(&path) else {
        return;
    };
    let _ = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {message}",
                record.level(),
                record.target()
            ));
        })
        .level(log::LevelFilter::Debug)
        .chain(file)
        .apply();
}
