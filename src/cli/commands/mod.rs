//! CLI command implementations.
//!
//! Each command is implemented in its own module with a `run` function
//! that handles the command logic.

pub mod add;
pub mod check;
pub mod config;
pub mod delete;
pub mod download;
pub mod fetch;
pub mod fields;
pub mod show;
pub mod tools;
pub mod tui;
pub mod upload;

use std::future::Future;
use std::io::Write;

use crate::cli::{CategoryArg, Cli, FieldArgs, OutputFormat, ViewArgs};
use crate::client::HttpMetadataClient;
use crate::config::Config;
use crate::error::{MetaviewError, Result};
use crate::export::{export_to_file, export_to_string, ExportFormat, ExportOptions};
use crate::model::{FieldCategory, FileInfo, ToolSection};
use crate::validate::FieldInput;

/// Run a future to completion on a runtime owned by the command.
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| MetaviewError::io("Failed to start async runtime", e))?;
    Ok(runtime.block_on(future))
}

/// HTTP client for the configured service.
pub fn service_client(config: &Config) -> Result<HttpMetadataClient> {
    HttpMetadataClient::from_config(&config.server)
}

/// Category from the command line, else from configuration.
pub fn resolve_category(arg: Option<CategoryArg>, config: &Config) -> FieldCategory {
    arg.map_or(config.fields.default_category, FieldCategory::from)
}

/// Form input described by `--key`/`--preset`/`--value`.
pub fn field_input(args: &FieldArgs, config: &Config) -> FieldInput {
    match &args.key {
        Some(key) => FieldInput::custom(key.clone(), args.value.clone()),
        None => FieldInput::preset(
            resolve_category(args.category, config),
            args.preset.clone().unwrap_or_default(),
            args.value.clone(),
        ),
    }
}

/// Export format for a view: `--format`, then `--json`, then configuration.
pub fn resolve_format(cli: &Cli, view: &ViewArgs, config: &Config) -> Result<ExportFormat> {
    if let Some(format) = view.format {
        return Ok(format.into());
    }
    if cli.effective_output() == OutputFormat::Json {
        return Ok(ExportFormat::Json);
    }
    ExportFormat::from_str(&config.display.format).ok_or_else(|| MetaviewError::InvalidConfig {
        message: format!("unknown display.format '{}'", config.display.format),
    })
}

/// Filter and write sections according to the view arguments.
pub fn render_view(
    cli: &Cli,
    view: &ViewArgs,
    config: &Config,
    sections: &[ToolSection],
    file_info: Option<&FileInfo>,
) -> Result<()> {
    let format = resolve_format(cli, view, config)?;
    let options = ExportOptions::default()
        .with_query(view.filter.clone().unwrap_or_default())
        .with_truncate_at(view.truncate.or_else(|| config.display.truncate_limit()))
        .with_errors(!view.no_errors);

    let show_info = config.display.show_file_info && !view.no_file_info && !cli.quiet;
    let file_info = file_info.filter(|_| show_info);

    match &view.output_file {
        Some(path) => {
            export_to_file(sections, file_info, path, format, &options)?;
            if !cli.quiet {
                eprintln!("Wrote {}", path.display());
            }
        }
        None => {
            let content = export_to_string(sections, file_info, format, &options)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
