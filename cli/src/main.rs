//! paramguard: command-line parameter checking
//!
//! Validates parameter documents against a paramguard specification and
//! prints the normalized result.
//!
//! Usage:
//!   paramguard lint --spec spec.toml
//!   paramguard check --spec spec.toml --params params.json [--allow-extra]
//!   paramguard request --file request.json
//!
//! Spec documents may reference the callbacks listed in `builtins`.

mod builtins;

use std::path::{Path, PathBuf};

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use paramguard_contracts::{
    error::{ParamError, ParamResult},
    request::{ParameterMap, ValidateOptions},
};
use paramguard_engine::{load_document, ParameterValidator};

use crate::builtins::BUILTINS;

// ── CLI definition ────────────────────────────────────────────────────────────

/// paramguard: validate loosely-typed parameters against a declarative spec.
///
/// Documents ending in `.toml` are read as TOML, everything else as JSON.
#[derive(Parser)]
#[command(
    name = "paramguard",
    about = "Validate parameter documents against a paramguard specification",
    long_about = "Checks field specifications for authoring errors, then validates\n\
                  parameters against them and prints the normalized mapping as JSON."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that every field spec in a specification is well-formed.
    Lint {
        /// Specification document.
        #[arg(long)]
        spec: PathBuf,
    },
    /// Validate a parameter document against a specification.
    Check {
        /// Specification document.
        #[arg(long)]
        spec: PathBuf,
        /// Parameter document (an object of field name to value).
        #[arg(long)]
        params: PathBuf,
        /// Accept parameters the specification does not declare.
        #[arg(long)]
        allow_extra: bool,
    },
    /// Validate a request record holding `params`, `spec` and `allow_extra`.
    Request {
        #[arg(long)]
        file: PathBuf,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug to trace spec compilation and field checks.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let matches = cli_command().get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };
    let validator = ParameterValidator::with_callbacks(builtins::registry());

    let result = match cli.command {
        Command::Lint { spec } => lint(&validator, &spec).map(|count| {
            println!("spec OK: {count} field(s)");
        }),
        Command::Check {
            spec,
            params,
            allow_extra,
        } => check(&validator, &spec, &params, ValidateOptions { allow_extra })
            .and_then(|result| print_result(&result)),
        Command::Request { file } => {
            request(&validator, &file).and_then(|result| print_result(&result))
        }
    };

    if let Err(e) = result {
        eprintln!("paramguard: {e}");
        std::process::exit(1);
    }
}

/// The clap command with the built-in callbacks listed after the help text.
fn cli_command() -> clap::Command {
    Cli::command().after_help(callbacks_help())
}

fn callbacks_help() -> String {
    let mut help = String::from("Callbacks available to `callbacks` tables:\n");
    for (name, description) in BUILTINS {
        help.push_str(&format!("  {name:<16}{description}\n"));
    }
    help
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn lint(validator: &ParameterValidator, spec: &Path) -> ParamResult<usize> {
    let spec = load_document(spec)?;
    let fields = validator.compile(&spec)?;
    Ok(fields.len())
}

fn check(
    validator: &ParameterValidator,
    spec: &Path,
    params: &Path,
    options: ValidateOptions,
) -> ParamResult<ParameterMap> {
    let spec = load_document(spec)?;
    let params = load_document(params)?;
    debug!(allow_extra = options.allow_extra, "validating parameter document");
    validator.validate(&params, &spec, options)
}

fn request(validator: &ParameterValidator, file: &Path) -> ParamResult<ParameterMap> {
    let record = load_document(file)?;
    validator.validate_with(&record)
}

fn print_result(result: &ParameterMap) -> ParamResult<()> {
    let rendered = serde_json::to_string_pretty(&Value::Object(result.clone())).map_err(|e| {
        ParamError::ConfigError {
            reason: format!("failed to render result: {e}"),
        }
    })?;
    println!("{rendered}");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use clap::Parser;
    use serde_json::json;
    use tempfile::TempDir;

    use paramguard_contracts::{error::ParamError, request::ValidateOptions};
    use paramguard_engine::ParameterValidator;

    use super::{builtins, check, cli_command, lint, print_result, request, Cli, Command};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn validator() -> ParameterValidator {
        ParameterValidator::with_callbacks(builtins::registry())
    }

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    const TAGS_SPEC: &str = r#"
        [name]
        type = "str"

        [tags]
        type = "list"
        optional = true
        default = []

        [tags.callbacks]
        "has no blanks" = "no_blank_items"
    "#;

    // ── Commands ──────────────────────────────────────────────────────────────

    #[test]
    fn lint_accepts_spec_using_builtin_callback() {
        let dir = tempfile::tempdir().unwrap();
        let spec = write(&dir, "spec.toml", TAGS_SPEC);

        assert_eq!(lint(&validator(), &spec).unwrap(), 2);
    }

    #[test]
    fn lint_rejects_unknown_callback() {
        let dir = tempfile::tempdir().unwrap();
        let spec = write(
            &dir,
            "spec.json",
            r#"{"first": {"callbacks": {"check": "no_such_callback"}}}"#,
        );

        let err = lint(&validator(), &spec).unwrap_err();
        assert!(err.is_schema_error());
        assert!(err
            .to_string()
            .contains("callback [check] is not callable for spec [first]"));
    }

    #[test]
    fn check_returns_normalized_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let spec = write(&dir, "spec.toml", TAGS_SPEC);
        let params = write(&dir, "params.json", r#"{"name": "svc", "tags": ["a", "b"]}"#);

        let result = check(&validator(), &spec, &params, ValidateOptions::default()).unwrap();
        assert_eq!(
            serde_json::Value::Object(result.clone()),
            json!({"name": "svc", "tags": ["a", "b"]})
        );
        print_result(&result).unwrap();

        let params = write(&dir, "defaults.json", r#"{"name": "svc"}"#);
        let result = check(&validator(), &spec, &params, ValidateOptions::default()).unwrap();
        assert_eq!(result["tags"], json!([]));
    }

    #[test]
    fn check_reports_failed_builtin_callback() {
        let dir = tempfile::tempdir().unwrap();
        let spec = write(&dir, "spec.toml", TAGS_SPEC);
        let params = write(&dir, "params.json", r#"{"name": "svc", "tags": ["a", " "]}"#);

        let err = check(&validator(), &spec, &params, ValidateOptions::default()).unwrap_err();
        assert!(err.is_data_error());
        assert!(err
            .to_string()
            .contains("callback [has no blanks] failed for argument [tags]"));
    }

    #[test]
    fn check_honours_allow_extra() {
        let dir = tempfile::tempdir().unwrap();
        let spec = write(&dir, "spec.toml", TAGS_SPEC);
        let params = write(&dir, "params.json", r#"{"name": "svc", "owner": "ops"}"#);

        let err = check(&validator(), &spec, &params, ValidateOptions::default()).unwrap_err();
        assert!(err.to_string().contains("extra arguments found: [owner]"));

        let result = check(&validator(), &spec, &params, ValidateOptions::allow_extra()).unwrap();
        assert_eq!(result["owner"], json!("ops"));
    }

    #[test]
    fn request_validates_record_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(
            &dir,
            "request.json",
            r#"{
                "params": {"retries": 2},
                "spec": {"retries": {"type": "int", "callbacks": {"at least one": "positive"}}}
            }"#,
        );

        let result = request(&validator(), &file).unwrap();
        assert_eq!(result["retries"], json!(2));
    }

    #[test]
    fn missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("absent.toml");

        for result in [
            lint(&validator(), &absent).map(|_| ()),
            check(&validator(), &absent, Path::new("p.json"), ValidateOptions::default())
                .map(|_| ()),
            request(&validator(), &absent).map(|_| ()),
        ] {
            match result {
                Err(ParamError::ConfigError { reason }) => {
                    assert!(reason.contains("absent.toml"), "unexpected reason: {reason}");
                }
                other => panic!("expected ConfigError, got {:?}", other),
            }
        }
    }

    #[test]
    fn help_lists_builtin_callbacks() {
        let help = cli_command().render_long_help().to_string();
        for name in ["non_empty", "no_blank_items", "positive", "non_negative"] {
            assert!(help.contains(name), "help is missing {name}: {help}");
        }
    }

    // ── Argument parsing ──────────────────────────────────────────────────────

    #[test]
    fn parses_check_command() {
        let cli = Cli::try_parse_from([
            "paramguard",
            "check",
            "--spec",
            "spec.toml",
            "--params",
            "params.json",
            "--allow-extra",
        ])
        .unwrap();

        match cli.command {
            Command::Check {
                spec,
                params,
                allow_extra,
            } => {
                assert_eq!(spec.to_str(), Some("spec.toml"));
                assert_eq!(params.to_str(), Some("params.json"));
                assert!(allow_extra);
            }
            _ => panic!("expected check command"),
        }
    }

    #[test]
    fn allow_extra_defaults_off() {
        let cli = Cli::try_parse_from([
            "paramguard",
            "check",
            "--spec",
            "s.json",
            "--params",
            "p.json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Check { allow_extra: false, .. }));
    }

    #[test]
    fn check_requires_params() {
        assert!(Cli::try_parse_from(["paramguard", "check", "--spec", "s.json"]).is_err());
    }

    #[test]
    fn parses_lint_and_request() {
        let cli = Cli::try_parse_from(["paramguard", "lint", "--spec", "s.toml"]).unwrap();
        assert!(matches!(cli.command, Command::Lint { .. }));

        let cli = Cli::try_parse_from(["paramguard", "request", "--file", "r.json"]).unwrap();
        assert!(matches!(cli.command, Command::Request { .. }));
    }
}
