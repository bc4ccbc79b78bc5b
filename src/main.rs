//! metaview: inspect, search and annotate file metadata from the terminal.
//!
//! Talks to a metadata extraction service, flattens the per-tool results and
//! shows them as text, JSON, CSV, HTML or an interactive viewer.

use std::process::ExitCode;

use metaview::cli;

fn main() -> ExitCode {
    // Logging is initialized by cli::run from --log-level and --log-format
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");

            if std::env::var("RUST_BACKTRACE").is_ok() {
                if let Some(source) = std::error::Error::source(&e) {
                    eprintln!("Caused by: {source}");
                }
            }

            ExitCode::from(e.exit_code() as u8)
        }
    }
}
