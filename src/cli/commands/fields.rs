//! Fields command implementation.
//!
//! Lists preset field names for a category, from the service or offline.

use crate::cli::{Cli, FieldsArgs, OutputFormat};
use crate::client::MetadataService;
use crate::error::Result;

use super::{block_on, resolve_category, service_client};

/// Run the fields command.
pub fn run(cli: &Cli, args: &FieldsArgs) -> Result<()> {
    let config = cli.load_config()?;
    let category = resolve_category(args.category, &config);

    let fields: Vec<String> = if args.offline || category.is_custom() {
        category
            .builtin_presets()
            .iter()
            .map(|f| (*f).to_string())
            .collect()
    } else {
        let client = service_client(&config)?;
        block_on(client.supported_fields(category))??
    };

    match cli.effective_output() {
        OutputFormat::Json => {
            let json = serde_json::json!({ "category": category, "fields": fields });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Compact => println!("{}", fields.join(",")),
        OutputFormat::Tsv => {
            for field in &fields {
                println!("{category}\t{field}");
            }
        }
        OutputFormat::Text => {
            if category.is_custom() && !cli.quiet {
                println!("The custom category takes free-form keys (--key).");
            }
            for field in &fields {
                println!("{field}");
            }
        }
    }

    Ok(())
}
