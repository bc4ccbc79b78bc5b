//! Download command implementation.

use std::path::PathBuf;

use crate::cli::{Cli, DownloadArgs, OutputFormat};
use crate::error::Result;
use crate::session::Session;

use super::{block_on, service_client};

/// Run the download command.
pub fn run(cli: &Cli, args: &DownloadArgs) -> Result<()> {
    let config = cli.load_config()?;
    let mut session = Session::new(service_client(&config)?);
    session.select(args.file_id.clone());

    let dest = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
    let written = block_on(session.download_to(&dest))??;

    match cli.effective_output() {
        OutputFormat::Json => {
            let json = serde_json::json!({ "file_id": args.file_id, "path": written });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ if !cli.quiet => println!("Saved {}", written.display()),
        _ => {}
    }

    Ok(())
}
