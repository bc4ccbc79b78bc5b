//! Fetch command implementation.

use crate::cli::{Cli, FetchArgs};
use crate::error::Result;
use crate::session::Session;

use super::{block_on, render_view, service_client};

/// Run the fetch command.
pub fn run(cli: &Cli, args: &FetchArgs) -> Result<()> {
    let config = cli.load_config()?;
    let mut session = Session::new(service_client(&config)?);

    block_on(session.open(args.file_id.clone()))??;

    render_view(cli, &args.view, &config, session.sections(), session.file_info())
}
