//! Log output for the `copyck` binary.
//!
//! Logging stays off unless asked for. A filter comes from `COPYCK_LOG`,
//! then `RUST_LOG`, then the `-v` count on the command line:
//!
//! ```bash
//! copyck -v check Point.json                 # binder and checker decisions
//! copyck -vv --log-format tree check a.json   # provenance trace as a span tree
//! COPYCK_LOG=copyck_checker::provenance=trace copyck check a.json
//! ```
//!
//! `--log-format` beats `COPYCK_LOG_FORMAT`. Diagnostics own stdout in
//! JSON mode, so every log line goes to stderr.

use clap::ValueEnum;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Flat lines, one per event.
    #[default]
    Text,
    /// Indented span hierarchy: program, class, constructor.
    Tree,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parse a `COPYCK_LOG_FORMAT` value. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "tree" => Some(Self::Tree),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Filter directives for `-v` repeated `verbose` times.
pub fn verbosity_directives(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("copyck_cli=debug,copyck_model=debug,copyck_checker=debug"),
        _ => Some("copyck_cli=trace,copyck_model=trace,copyck_checker=trace"),
    }
}

/// What the subscriber should be built from, before touching global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingSettings {
    /// `None` means logging stays off.
    pub directives: Option<String>,
    pub format: LogFormat,
}

impl TracingSettings {
    /// Combine command-line choices with the environment, read through `env`.
    pub fn resolve(
        verbose: u8,
        format: Option<LogFormat>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let directives = env("COPYCK_LOG")
            .or_else(|| env("RUST_LOG"))
            .or_else(|| verbosity_directives(verbose).map(str::to_string));
        let format = format
            .or_else(|| env("COPYCK_LOG_FORMAT").and_then(|value| LogFormat::parse(&value)))
            .unwrap_or_default();
        TracingSettings { directives, format }
    }

    pub fn from_env(verbose: u8, format: Option<LogFormat>) -> Self {
        Self::resolve(verbose, format, |name| std::env::var(name).ok())
    }
}

/// Install the global subscriber described by `settings`.
pub fn init_tracing(settings: &TracingSettings) {
    let Some(directives) = settings.directives.as_deref() else {
        return;
    };
    let filter = EnvFilter::builder().parse_lossy(directives);
    match settings.format {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .init();
        }
    }
}
