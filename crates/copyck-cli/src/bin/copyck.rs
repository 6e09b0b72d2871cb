#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::Path;

use copyck_cli::args::{CheckArgs, CliArgs, Command, GenerateArgs, OutputFormat};
use copyck_cli::driver::{self, GenerateOutcome};
use copyck_cli::reporter::{Reporter, render_json};
use copyck_cli::tracing_config::{TracingSettings, init_tracing};

const EXIT_SUCCESS: i32 = 0;
const EXIT_ADVISORIES_REPORTED: i32 = 1;
const EXIT_FAILURE: i32 = 2;

fn main() {
    let args = CliArgs::parse();
    init_tracing(&TracingSettings::from_env(args.verbose, args.log_format));

    let code = match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            EXIT_FAILURE
        }
    };
    std::process::exit(code);
}

fn run(args: &CliArgs) -> Result<i32> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    match &args.command {
        Command::Check(check) => run_check(check, &cwd),
        Command::Generate(generate) => run_generate(generate, &cwd),
    }
}

fn run_check(args: &CheckArgs, cwd: &Path) -> Result<i32> {
    let result = driver::check(args, cwd)?;

    match args.format {
        OutputFormat::Json => {
            let output = render_json(&result.diagnostics, args.pretty.unwrap_or(false))?;
            println!("{output}");
        }
        OutputFormat::Text => {
            if !result.diagnostics.is_empty() {
                let pretty = args
                    .pretty
                    .unwrap_or_else(|| std::io::stderr().is_terminal());
                let mut reporter = Reporter::new(pretty).with_arena_sources(&result.arena);
                // render() already ends with a newline
                eprint!("{}", reporter.render(&result.diagnostics));
            }
        }
    }

    if result.diagnostics.is_empty() {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_ADVISORIES_REPORTED)
    }
}

fn run_generate(args: &GenerateArgs, cwd: &Path) -> Result<i32> {
    match driver::generate(args, cwd)? {
        GenerateOutcome::Generated(text) => {
            println!("{text}");
            Ok(EXIT_SUCCESS)
        }
        GenerateOutcome::Refused(message) => {
            eprintln!("{message}");
            Ok(EXIT_ADVISORIES_REPORTED)
        }
    }
}
