//! Tools command implementation.

use crate::cli::{Cli, OutputFormat};
use crate::client::MetadataService;
use crate::error::Result;

use super::{block_on, service_client};

/// Run the tools command.
pub fn run(cli: &Cli) -> Result<()> {
    let config = cli.load_config()?;
    let client = service_client(&config)?;
    let status = block_on(client.tools_status())??;

    let available = status.values().filter(|&&ok| ok).count();

    match cli.effective_output() {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
        OutputFormat::Compact => println!("{available}/{}", status.len()),
        OutputFormat::Tsv => {
            for (tool, ok) in &status {
                println!("{tool}\t{ok}");
            }
        }
        OutputFormat::Text => {
            for (tool, ok) in &status {
                let mark = if *ok { "available" } else { "missing" };
                println!("  {tool:<12} {mark}");
            }
            if !cli.quiet {
                println!();
                println!("Tools Available: {available}/{}", status.len());
            }
        }
    }

    Ok(())
}
