//! Check command implementation.
//!
//! Runs field validation only; nothing is sent anywhere.

use crate::cli::{Cli, FieldArgs, OutputFormat};
use crate::error::Result;

use super::field_input;

/// Run the check command.
pub fn run(cli: &Cli, args: &FieldArgs) -> Result<()> {
    let config = cli.load_config()?;
    let entry = field_input(args, &config).validate()?;

    match cli.effective_output() {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entry)?),
        OutputFormat::Tsv => println!("{}\t{}", entry.key, entry.value),
        OutputFormat::Compact => println!("{}={}", entry.key, entry.value),
        OutputFormat::Text => {
            if !cli.quiet {
                println!("Valid field");
            }
            println!("  Key:   {}", entry.key);
            println!("  Value: {}", entry.value);
        }
    }

    Ok(())
}
