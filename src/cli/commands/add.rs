//! Add command implementation.
//!
//! Validates the field locally, submits it, then re-fetches the file's
//! metadata so the printed result reflects what the service stored.

use crate::cli::{AddArgs, Cli, OutputFormat, ViewArgs};
use crate::error::Result;
use crate::session::Session;

use super::{block_on, field_input, render_view, service_client};

/// Run the add command.
pub fn run(cli: &Cli, args: &AddArgs) -> Result<()> {
    let config = cli.load_config()?;
    let input = field_input(&args.field, &config);

    // Fail on bad input before building a client
    let entry = input.validate()?;

    let mut session = Session::new(service_client(&config)?);
    session.select(args.file_id.clone());
    let outcome = block_on(session.add_field(&input))??;

    match cli.effective_output() {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "file_id": args.file_id,
                "key": entry.key,
                "value": entry.value,
                "message": outcome.message,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ if !cli.quiet => println!("{}: {} = {}", outcome.message, entry.key, entry.value),
        _ => {}
    }

    if args.show {
        render_view(cli, &ViewArgs::default(), &config, session.sections(), session.file_info())?;
    }

    Ok(())
}
