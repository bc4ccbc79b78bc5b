//! Delete command implementation.
//!
//! Asks for confirmation unless `--yes` is given.

use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::cli::{Cli, DeleteArgs, OutputFormat};
use crate::error::{MetaviewError, Result};
use crate::session::Session;

use super::{block_on, service_client};

/// Run the delete command.
pub fn run(cli: &Cli, args: &DeleteArgs) -> Result<()> {
    if !args.yes && !confirm(&args.file_id)? {
        if !cli.quiet {
            eprintln!("Cancelled");
        }
        return Ok(());
    }

    let config = cli.load_config()?;
    let mut session = Session::new(service_client(&config)?);
    session.select(args.file_id.clone());
    let message = block_on(session.delete())??;

    match cli.effective_output() {
        OutputFormat::Json => {
            let json = serde_json::json!({ "file_id": args.file_id, "message": message });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ if !cli.quiet => println!("{message}"),
        _ => {}
    }

    Ok(())
}

fn confirm(file_id: &str) -> Result<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Delete {file_id} from the server?"))
        .default(false)
        .interact()
        .map_err(prompt_error)
}

/// Ctrl-C at the prompt interrupts; any other failure means no terminal.
fn prompt_error(err: dialoguer::Error) -> MetaviewError {
    let err = std::io::Error::from(err);
    if err.kind() == std::io::ErrorKind::Interrupted {
        return MetaviewError::Interrupted;
    }
    MetaviewError::InvalidArgument {
        name: "yes".to_string(),
        reason: format!("confirmation unavailable ({err}); pass --yes to delete without prompting"),
    }
}
