use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use copyck_checker::CheckerOptions;
use copyck_checker::synthesizer::DEFAULT_PARAMETER_NAME;

use crate::args::{CheckArgs, GenerateArgs};

pub const CONFIG_FILE_NAME: &str = "copyck.json";

/// Contents of `copyck.json`. Every key is optional.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CopyckConfig {
    #[serde(default)]
    pub checks: ChecksConfig,
    #[serde(default)]
    pub parameter_name: Option<String>,
    #[serde(default)]
    pub parallel: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChecksConfig {
    #[serde(default)]
    pub completeness: Option<bool>,
    #[serde(default)]
    pub superclass_chain: Option<bool>,
}

/// Effective settings for `copyck check`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCheckOptions {
    pub checker: CheckerOptions,
    pub parallel: bool,
}

pub fn parse_config(source: &str) -> Result<CopyckConfig> {
    let config = serde_json::from_str(source).context("failed to parse copyck.json")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<CopyckConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// `copyck.json` in `cwd`, if present.
pub fn find_config(cwd: &Path) -> Option<PathBuf> {
    let candidate = cwd.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Load the explicit config, else the discovered one, else defaults.
pub fn load_effective_config(explicit: Option<&Path>, cwd: &Path) -> Result<CopyckConfig> {
    match explicit {
        Some(path) => load_config(path),
        None => match find_config(cwd) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using discovered config");
                load_config(&path)
            }
            None => Ok(CopyckConfig::default()),
        },
    }
}

/// Flags override the config file; the config file overrides defaults.
pub fn resolve_check_options(config: &CopyckConfig, args: &CheckArgs) -> ResolvedCheckOptions {
    let defaults = CheckerOptions::default();
    let checker = CheckerOptions {
        check_completeness: !args.no_completeness_check
            && config
                .checks
                .completeness
                .unwrap_or(defaults.check_completeness),
        check_superclass_chain: !args.no_chain_check
            && config
                .checks
                .superclass_chain
                .unwrap_or(defaults.check_superclass_chain),
    };
    ResolvedCheckOptions {
        checker,
        parallel: args.parallel || config.parallel.unwrap_or(false),
    }
}

pub fn resolve_parameter_name(config: &CopyckConfig, args: &GenerateArgs) -> String {
    args.parameter_name
        .clone()
        .or_else(|| config.parameter_name.clone())
        .unwrap_or_else(|| DEFAULT_PARAMETER_NAME.to_string())
}
