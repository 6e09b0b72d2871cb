use clap::Parser;

use super::args::CliArgs;
use super::tracing_config::{LogFormat, TracingSettings, verbosity_directives};

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let pairs: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| {
        pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }
}

#[test]
fn logging_is_off_without_filter_or_verbosity() {
    let settings = TracingSettings::resolve(0, None, env_of(&[]));
    assert_eq!(settings.directives, None);
    assert_eq!(settings.format, LogFormat::Text);
}

#[test]
fn verbosity_targets_copyck_crates() {
    let settings = TracingSettings::resolve(1, None, env_of(&[]));
    assert_eq!(settings.directives.as_deref(), verbosity_directives(1));
    let directives = settings.directives.unwrap();
    assert!(directives.contains("copyck_checker=debug"));
    assert!(verbosity_directives(3).unwrap().contains("copyck_checker=trace"));
}

#[test]
fn copyck_log_wins_over_rust_log_and_verbosity() {
    let env = env_of(&[("COPYCK_LOG", "copyck_model=trace"), ("RUST_LOG", "warn")]);
    let settings = TracingSettings::resolve(2, None, env);
    assert_eq!(settings.directives.as_deref(), Some("copyck_model=trace"));

    let settings = TracingSettings::resolve(0, None, env_of(&[("RUST_LOG", "warn")]));
    assert_eq!(settings.directives.as_deref(), Some("warn"));
}

#[test]
fn log_format_flag_wins_over_environment() {
    let env = env_of(&[("COPYCK_LOG_FORMAT", "json")]);
    assert_eq!(TracingSettings::resolve(1, None, &env).format, LogFormat::Json);
    assert_eq!(
        TracingSettings::resolve(1, Some(LogFormat::Tree), &env).format,
        LogFormat::Tree
    );
}

#[test]
fn unknown_log_format_falls_back_to_text() {
    assert_eq!(LogFormat::parse(" TREE "), Some(LogFormat::Tree));
    assert_eq!(LogFormat::parse("yaml"), None);
    let settings = TracingSettings::resolve(1, None, env_of(&[("COPYCK_LOG_FORMAT", "yaml")]));
    assert_eq!(settings.format, LogFormat::Text);
}

#[test]
fn logging_flags_parse_on_either_side_of_subcommand() {
    let args = CliArgs::try_parse_from(["copyck", "-vv", "check", "a.json", "--log-format", "tree"])
        .expect("args parse");
    assert_eq!(args.verbose, 2);
    assert_eq!(args.log_format, Some(LogFormat::Tree));

    let args = CliArgs::try_parse_from(["copyck", "check", "a.json"]).expect("args parse");
    assert_eq!(args.verbose, 0);
    assert_eq!(args.log_format, None);
}
