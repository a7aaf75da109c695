mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use commands::{cmd_check, cmd_compile, cmd_format, cmd_validate};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Placement policy compiler.
#[derive(Parser)]
#[command(name = "placement", version, about = "Placement policy compiler")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log filter directive (e.g. "debug", "placement_core=trace")
    #[arg(long, global = true, env = "RUST_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile policy text to JSON
    Compile {
        /// Path to the policy source file ("-" for stdin)
        file: PathBuf,
    },

    /// Render a JSON policy as policy text
    Format {
        /// Path to the JSON policy ("-" for stdin)
        file: PathBuf,
    },

    /// Decode a JSON policy and check its selector and filter references
    Check {
        /// Path to the JSON policy ("-" for stdin)
        file: PathBuf,
    },

    /// Validate a JSON policy against the formal JSON Schema
    Validate {
        /// Path to the JSON policy ("-" for stdin)
        file: PathBuf,
    },
}

fn init_tracing(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Compile { file } => {
            cmd_compile(&file, cli.output, cli.quiet);
        }
        Commands::Format { file } => {
            cmd_format(&file, cli.output, cli.quiet);
        }
        Commands::Check { file } => {
            cmd_check(&file, cli.output, cli.quiet);
        }
        Commands::Validate { file } => {
            cmd_validate(&file, cli.output, cli.quiet);
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
