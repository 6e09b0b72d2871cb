//! Loading, binding and checking program files.

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tracing::{debug, info_span};

use copyck_checker::diagnostics::{diagnostic_messages, format_message};
use copyck_checker::synthesizer::{ConstructorSynthesizer, Synthesis};
use copyck_checker::{CheckerContext, CheckerState};
use copyck_common::Diagnostic;
use copyck_model::{ClassId, NodeArena, ProgramSource, bind_program};

use crate::args::{CheckArgs, GenerateArgs};
use crate::config::{load_effective_config, resolve_check_options, resolve_parameter_name};

pub struct CheckResult {
    pub arena: NodeArena,
    pub diagnostics: Vec<Diagnostic>,
    pub files_read: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// Text of the new constructor.
    Generated(String),
    /// Why nothing was generated.
    Refused(String),
}

pub fn read_source(path: &Path) -> Result<ProgramSource> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read program file: {}", path.display()))?;
    ProgramSource::from_json(&text)
        .with_context(|| format!("failed to parse program file: {}", path.display()))
}

/// Read and bind all files as one program.
pub fn load_program(files: &[PathBuf], cwd: &Path) -> Result<NodeArena> {
    let _span = info_span!("load_program", files = files.len()).entered();
    let sources = files
        .iter()
        .map(|file| read_source(&cwd.join(file)))
        .collect::<Result<Vec<_>>>()?;
    let arena = bind_program(&sources).context("failed to bind program")?;
    debug!(classes = arena.class_count(), "program bound");
    Ok(arena)
}

pub fn check(args: &CheckArgs, cwd: &Path) -> Result<CheckResult> {
    let config = load_effective_config(args.config.as_deref(), cwd)?;
    let options = resolve_check_options(&config, args);
    let arena = load_program(&args.files, cwd)?;

    let diagnostics = {
        let _span = info_span!("collect_diagnostics", parallel = options.parallel).entered();
        CheckerState::new(CheckerContext::new(&arena), options.checker)
            .collect_diagnostics(options.parallel)
    };

    Ok(CheckResult {
        arena,
        diagnostics,
        files_read: args.files.clone(),
    })
}

pub fn generate(args: &GenerateArgs, cwd: &Path) -> Result<GenerateOutcome> {
    let config = load_effective_config(args.config.as_deref(), cwd)?;
    let arena = load_program(std::slice::from_ref(&args.file), cwd)?;
    let Some(class) = find_class(&arena, &args.class) else {
        bail!("class '{}' not found in {}", args.class, args.file.display());
    };

    let synthesis = ConstructorSynthesizer::new(&arena)
        .with_parameter_name(resolve_parameter_name(&config, args))
        .synthesize(class);
    match synthesis {
        Synthesis::Generated(text) => Ok(GenerateOutcome::Generated(text)),
        Synthesis::AlreadyExists(_) => Ok(GenerateOutcome::Refused(format_message(
            diagnostic_messages::COPY_CONSTRUCTOR_ALREADY_EXISTS,
            &[],
        ))),
        Synthesis::UnknownClass => bail!("class '{}' has no declaration", args.class),
    }
}

/// Qualified name first, then an unambiguous simple name.
fn find_class(arena: &NodeArena, name: &str) -> Option<ClassId> {
    arena
        .lookup_class(name)
        .or_else(|| arena.lookup_class_by_simple_name(name))
}
