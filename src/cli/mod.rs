//! Command-line interface for metaview.
//!
//! Local commands work on a metadata document on disk:
//! - `show`: flatten, filter and export a document
//! - `check`: validate a field without contacting the service
//!
//! Service commands talk to the extraction service:
//! - `upload`, `fetch`: extract and display metadata
//! - `add`: write a field into a stored file
//! - `fields`, `tools`: preset lists and tool availability
//! - `download`, `delete`: manage stored files
//!
//! `tui` opens the interactive viewer for either kind of source.

mod commands;

pub use commands::*;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::export::ExportFormat;
use crate::model::FieldCategory;

/// Inspect, search and annotate file metadata.
#[derive(Debug, Parser)]
#[command(name = "metaview")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the extraction service.
    #[arg(long, global = true, env = "METAVIEW_SERVER")]
    pub server: Option<String>,

    /// Output format for structured data.
    #[arg(short = 'o', long, global = true, default_value = "text", env = "METAVIEW_OUTPUT")]
    pub output: OutputFormat,

    /// Enable verbose output.
    #[arg(short = 'v', long, global = true, env = "METAVIEW_VERBOSE")]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short = 'q', long, global = true, env = "METAVIEW_QUIET")]
    pub quiet: bool,

    /// Output as JSON (shorthand for -o json).
    #[arg(long, global = true, env = "METAVIEW_JSON")]
    pub json: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn", env = "METAVIEW_LOG_LEVEL")]
    pub log_level: LogLevel,

    /// Log format (text, json, compact, pretty).
    #[arg(long, global = true, default_value = "text", env = "METAVIEW_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Path to custom configuration file.
    #[arg(long, global = true, env = "METAVIEW_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Log level options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    #[default]
    Warn,
    /// Errors, warnings, and informational messages.
    Info,
    /// All of the above plus debug messages.
    Debug,
    /// All messages including trace-level details.
    Trace,
}

/// Log format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format.
    #[default]
    Text,
    /// Structured JSON format for machine consumption.
    Json,
    /// Compact single-line format.
    Compact,
    /// Pretty format with full details.
    Pretty,
}

impl LogLevel {
    /// Convert to tracing filter level.
    #[must_use]
    pub fn to_filter_string(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl Cli {
    /// Get effective output format.
    #[must_use]
    pub fn effective_output(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.output
        }
    }

    /// Load configuration and apply command-line overrides.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_or_default(self.config.as_deref())?;
        config.apply_server_override(self.server.as_deref());
        Ok(config)
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Display a metadata document stored on disk.
    #[command(alias = "view")]
    Show(ShowArgs),

    /// Upload a file and display its metadata.
    #[command(alias = "up")]
    Upload(UploadArgs),

    /// Display metadata for a stored file.
    Fetch(FetchArgs),

    /// Add a metadata field to a stored file.
    Add(AddArgs),

    /// Validate a field without contacting the service.
    Check(FieldArgs),

    /// List preset field names for a category.
    Fields(FieldsArgs),

    /// Show which extraction tools the service has.
    Tools,

    /// Download a stored file.
    #[command(alias = "dl")]
    Download(DownloadArgs),

    /// Delete a stored file.
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// Launch interactive TUI.
    #[command(alias = "ui")]
    Tui(TuiArgs),

    /// View and initialize configuration.
    #[command(alias = "cfg")]
    Config(ConfigArgs),

    /// Generate shell completions.
    Completions(CompletionsArgs),
}

/// Arguments for the completions command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: CompletionShell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompletionShell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// PowerShell.
    Powershell,
    /// Elvish shell.
    Elvish,
}

impl From<CompletionShell> for Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => Shell::Bash,
            CompletionShell::Zsh => Shell::Zsh,
            CompletionShell::Fish => Shell::Fish,
            CompletionShell::Powershell => Shell::PowerShell,
            CompletionShell::Elvish => Shell::Elvish,
        }
    }
}

/// Generate shell completions and print to stdout.
pub fn generate_completions(shell: CompletionShell) {
    let mut cmd = Cli::command();
    let shell: Shell = shell.into();
    generate(shell, &mut cmd, "metaview", &mut io::stdout());
}

/// Output format for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// Tab-separated values.
    Tsv,
    /// Compact single-line output.
    Compact,
}

/// Export format argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormatArg {
    /// Grouped plain text.
    Text,
    /// Compact JSON.
    Json,
    /// Pretty-printed JSON.
    JsonPretty,
    /// Comma-separated values.
    Csv,
    /// Standalone HTML page.
    Html,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Text => Self::Text,
            ExportFormatArg::Json => Self::Json,
            ExportFormatArg::JsonPretty => Self::JsonPretty,
            ExportFormatArg::Csv => Self::Csv,
            ExportFormatArg::Html => Self::Html,
        }
    }
}

/// Field category argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    /// General-purpose fields.
    Common,
    /// Image fields.
    Image,
    /// Video fields.
    Video,
    /// Audio fields.
    Audio,
    /// Free-form keys.
    Custom,
}

impl From<CategoryArg> for FieldCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Common => Self::Common,
            CategoryArg::Image => Self::Image,
            CategoryArg::Video => Self::Video,
            CategoryArg::Audio => Self::Audio,
            CategoryArg::Custom => Self::Custom,
        }
    }
}

/// How metadata is filtered and written.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ViewArgs {
    /// Only show rows whose label or value contains this text.
    #[arg(short = 'F', long)]
    pub filter: Option<String>,

    /// Output format (default: `display.format` from config).
    #[arg(short = 'f', long)]
    pub format: Option<ExportFormatArg>,

    /// Write to this file instead of stdout.
    #[arg(short = 'O', long = "out")]
    pub output_file: Option<PathBuf>,

    /// Truncate values longer than this many characters.
    #[arg(long)]
    pub truncate: Option<usize>,

    /// Omit tools that failed.
    #[arg(long)]
    pub no_errors: bool,

    /// Omit the file information header.
    #[arg(long)]
    pub no_file_info: bool,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Metadata document (JSON), or `-` for stdin.
    pub input: PathBuf,

    /// Rendering options.
    #[command(flatten)]
    pub view: ViewArgs,
}

/// Arguments for the upload command.
#[derive(Debug, Parser)]
pub struct UploadArgs {
    /// File to upload.
    pub file: PathBuf,

    /// Rendering options.
    #[command(flatten)]
    pub view: ViewArgs,
}

/// Arguments for the fetch command.
#[derive(Debug, Parser)]
pub struct FetchArgs {
    /// Id of the stored file.
    pub file_id: String,

    /// Rendering options.
    #[command(flatten)]
    pub view: ViewArgs,
}

/// A field to add or check.
#[derive(Debug, Clone, clap::Args)]
pub struct FieldArgs {
    /// Free-form key (implies the custom category).
    #[arg(short = 'k', long, conflicts_with = "preset", required_unless_present = "preset")]
    pub key: Option<String>,

    /// Preset key from the selected category.
    #[arg(short = 'p', long)]
    pub preset: Option<String>,

    /// Field value.
    #[arg(long)]
    pub value: String,

    /// Category for `--preset` (default: `fields.default_category` from config).
    #[arg(short = 'c', long)]
    pub category: Option<CategoryArg>,
}

/// Arguments for the add command.
#[derive(Debug, Parser)]
pub struct AddArgs {
    /// Id of the stored file.
    pub file_id: String,

    /// Field to add.
    #[command(flatten)]
    pub field: FieldArgs,

    /// Print the refreshed metadata after saving.
    #[arg(long)]
    pub show: bool,
}

/// Arguments for the fields command.
#[derive(Debug, Parser)]
pub struct FieldsArgs {
    /// Category to list (default: `fields.default_category` from config).
    #[arg(short = 'c', long)]
    pub category: Option<CategoryArg>,

    /// Use the built-in lists instead of asking the service.
    #[arg(long)]
    pub offline: bool,
}

/// Arguments for the download command.
#[derive(Debug, Parser)]
pub struct DownloadArgs {
    /// Id of the stored file.
    pub file_id: String,

    /// Destination file or directory (default: current directory).
    #[arg(short = 'O', long = "out")]
    pub output: Option<PathBuf>,
}

/// Arguments for the delete command.
#[derive(Debug, Parser)]
pub struct DeleteArgs {
    /// Id of the stored file.
    pub file_id: String,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the TUI command.
#[derive(Debug, Parser)]
pub struct TuiArgs {
    /// Metadata document (JSON) to open.
    #[arg(conflicts_with = "remote", required_unless_present = "remote")]
    pub input: Option<PathBuf>,

    /// Open a stored file from the service instead.
    #[arg(short = 'r', long)]
    pub remote: Option<String>,

    /// Theme (default, dark, light, high-contrast).
    #[arg(long)]
    pub theme: Option<String>,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Config action.
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show effective configuration.
    Show,
    /// Show configuration file path.
    Path,
    /// Write a default configuration file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Initialize logging based on CLI options.
fn init_logging(cli: &Cli) {
    use tracing_subscriber::{
        fmt::{self, format::FmtSpan},
        layer::SubscriberExt,
        util::SubscriberInitExt,
        EnvFilter,
    };

    let level = if cli.verbose && cli.log_level == LogLevel::Warn {
        LogLevel::Info
    } else {
        cli.log_level
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_filter_string()));

    let result = match cli.log_format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_span_events(FmtSpan::CLOSE)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .pretty()
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
        LogFormat::Text => {
            let layer = fmt::layer().with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
    };

    if let Err(e) = result {
        eprintln!("Warning: Could not initialize logging: {e}");
    }
}

/// Run the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli);

    match &cli.command {
        Commands::Show(args) => commands::show::run(&cli, args),
        Commands::Upload(args) => commands::upload::run(&cli, args),
        Commands::Fetch(args) => commands::fetch::run(&cli, args),
        Commands::Add(args) => commands::add::run(&cli, args),
        Commands::Check(args) => commands::check::run(&cli, args),
        Commands::Fields(args) => commands::fields::run(&cli, args),
        Commands::Tools => commands::tools::run(&cli),
        Commands::Download(args) => commands::download::run(&cli, args),
        Commands::Delete(args) => commands::delete::run(&cli, args),
        Commands::Tui(args) => commands::tui::run(&cli, args),
        Commands::Config(args) => commands::config::run(&cli, args),
        Commands::Completions(args) => {
            generate_completions(args.shell);
            Ok(())
        }
    }
}
