use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::tracing_config::LogFormat;

/// CLI arguments for the copyck binary.
#[derive(Parser, Debug)]
#[command(
    name = "copyck",
    version,
    about = "Copy-constructor inspections for Java-like class declarations"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Log binder and checker decisions to stderr; repeat for a full trace.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log line format. Overrides COPYCK_LOG_FORMAT.
    #[arg(long = "log-format", value_enum, global = true)]
    pub log_format: Option<LogFormat>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check every copy constructor in the given program files.
    Check(CheckArgs),
    /// Print a copy constructor for a class that lacks one.
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Program files (JSON) to check together.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format for diagnostics.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Colorize text output and indent JSON output.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub pretty: Option<bool>,

    /// Skip the superclass chaining inspection.
    #[arg(long = "no-chain-check")]
    pub no_chain_check: bool,

    /// Skip the field completeness inspection.
    #[arg(long = "no-completeness-check")]
    pub no_completeness_check: bool,

    /// Check classes on a thread pool.
    #[arg(long)]
    pub parallel: bool,

    /// Path to copyck.json. Defaults to copyck.json in the working directory.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Program file (JSON) declaring the class.
    pub file: PathBuf,

    /// Qualified or simple name of the class.
    #[arg(long)]
    pub class: String,

    /// Name of the generated constructor's parameter.
    #[arg(long = "parameter-name")]
    pub parameter_name: Option<String>,

    /// Path to copyck.json. Defaults to copyck.json in the working directory.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
