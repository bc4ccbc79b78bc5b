//! Upload command implementation.

use crate::cli::{Cli, UploadArgs};
use crate::error::Result;
use crate::session::Session;

use super::{block_on, render_view, service_client};

/// Run the upload command.
pub fn run(cli: &Cli, args: &UploadArgs) -> Result<()> {
    let config = cli.load_config()?;
    let mut session = Session::new(service_client(&config)?);

    block_on(session.upload(&args.file))??;

    if !cli.quiet {
        if let Some(file_id) = session.file_id() {
            eprintln!("File id: {file_id}");
        }
    }

    render_view(cli, &args.view, &config, session.sections(), session.file_info())
}
