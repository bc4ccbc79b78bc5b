//! TUI command implementation.

use crate::cli::{Cli, TuiArgs};
use crate::error::Result;
use crate::flatten::flatten;
use crate::session::Session;
use crate::tui::{self, ViewerState};

use super::show::read_document;
use super::{block_on, service_client};

/// Run the tui command.
pub fn run(cli: &Cli, args: &TuiArgs) -> Result<()> {
    let config = cli.load_config()?;
    let theme = args.theme.as_deref().unwrap_or(&config.theme.name);

    let viewer = match (&args.remote, &args.input) {
        (Some(file_id), _) => {
            let mut session = Session::new(service_client(&config)?);
            block_on(session.open(file_id.clone()))??;
            ViewerState::new(
                session.sections().to_vec(),
                session.file_info().cloned(),
                file_id.clone(),
            )
        }
        (None, Some(path)) => {
            let document = read_document(path)?;
            ViewerState::new(flatten(&document), document.file_info(), path.display().to_string())
        }
        (None, None) => ViewerState::new(Vec::new(), None, "(empty)"),
    };

    tui::run(viewer.with_theme(theme)?)
}
