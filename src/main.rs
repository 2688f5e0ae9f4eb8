//! Purpose: `deployconf` CLI entry point and command dispatch.
//! Role: Binary crate root; reads a service definition, normalizes and checks its deployment field.
//! Invariants: `check` emits a single JSON report on stdout.
//! Invariants: Errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
#![allow(clippy::result_large_err)]
use std::ffi::OsString;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueHint, error::ErrorKind as ClapErrorKind};
use deployconf::api::{
    DeploymentConfig, DeploymentInput, Error, ErrorKind, convert_to_deployment_config,
    to_exit_code,
};
use serde_json::{Map, Value, json};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run(std::env::args_os()) {
        Ok(outcome) => outcome.exit_code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

#[derive(Parser)]
#[command(
    name = "deployconf",
    version,
    about = "Normalize and validate the deployment field of edge service definitions",
    long_about = None,
    after_help = r#"EXAMPLES
  $ deployconf check service.json
  $ deployconf show --summary service.json
  $ cat deployment.json | deployconf check --raw"#,
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Validate that the deployment can start and stop its services")]
    Check(SourceArgs),
    #[command(about = "Print the normalized deployment")]
    Show {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long, conflicts_with = "json", help = "Print only the service names")]
        summary: bool,
        #[arg(long, help = "Print the canonical JSON form")]
        json: bool,
    },
}

#[derive(Args)]
struct SourceArgs {
    #[arg(
        help = "Service definition file (reads stdin when omitted or `-`)",
        value_hint = ValueHint::FilePath
    )]
    input: Option<PathBuf>,
    #[arg(
        long,
        default_value = "deployment",
        help = "Name of the deployment field in the definition"
    )]
    field: String,
    #[arg(long, help = "Treat the whole input as the deployment field itself")]
    raw: bool,
}

fn run<I>(args: I) -> Result<RunOutcome, Error>
where
    I: IntoIterator<Item = OsString>,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(clap_error_summary(&err))
                    .with_hint("Try `deployconf --help`."));
            }
        },
    };

    match cli.command {
        Command::Check(source) => {
            let config = load_deployment(&source)?;
            let report = check_report(config.as_ref());
            emit_json(&report);
            if report["status"] == "ok" {
                Ok(RunOutcome::ok())
            } else {
                Ok(RunOutcome::with_code(to_exit_code(ErrorKind::Validation)))
            }
        }
        Command::Show {
            source,
            summary,
            json,
        } => {
            let Some(config) = load_deployment(&source)? else {
                println!("no deployment configuration");
                return Ok(RunOutcome::ok());
            };
            if json {
                emit_json(&serde_json::to_value(&config).map_err(|err| {
                    Error::new(ErrorKind::Internal)
                        .with_message("failed to encode deployment")
                        .with_source(err)
                })?);
            } else if summary {
                println!("{}", config.cli_string());
            } else {
                println!("{config}");
            }
            Ok(RunOutcome::ok())
        }
    }
}

fn load_deployment(source: &SourceArgs) -> Result<Option<DeploymentConfig>, Error> {
    let text = read_input(source.input.as_deref())?;
    let document: Value = serde_json::from_str(&text).map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message("input is not valid JSON")
            .with_source(err)
    })?;
    let input = if source.raw {
        DeploymentInput::from(document)
    } else {
        deployment_field(document, &source.field)?
    };
    debug!(field = %source.field, raw = source.raw, "loaded deployment input");
    convert_to_deployment_config(&input)
}

fn deployment_field(document: Value, field: &str) -> Result<DeploymentInput, Error> {
    match document {
        Value::Object(mut map) => Ok(DeploymentInput::from(map.remove(field))),
        _ => Err(Error::new(ErrorKind::Usage)
            .with_message("service definition is not a JSON object")
            .with_hint("Pass --raw to treat the input as the deployment field itself.")),
    }
}

fn read_input(path: Option<&Path>) -> Result<String, Error> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message(format!("failed to read {}", path.display()))
                .with_source(err)
        }),
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to read stdin")
                    .with_source(err)
            })?;
            Ok(text)
        }
    }
}

fn check_report(config: Option<&DeploymentConfig>) -> Value {
    let Some(config) = config else {
        return json!({
            "configured": false,
            "status": "ok",
            "summary": null,
            "issue_count": 0,
            "issues": [],
        });
    };
    let mut report = config.validation_report().to_json();
    if let Value::Object(map) = &mut report {
        map.insert("configured".to_string(), json!(true));
        map.insert("summary".to_string(), json!(config.cli_string()));
    }
    report
}

fn emit_json(value: &Value) {
    let json = serde_json::to_string(value).unwrap_or_else(|_| "null".to_string());
    println!("{json}");
}

fn emit_error(err: &Error) {
    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::Conversion => "conversion failed".to_string(),
        ErrorKind::Validation => "validation failed".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = std::error::Error::source(err);
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(service) = err.service() {
        inner.insert("service".to_string(), json!(service));
    }
    if let Some(input) = err.input() {
        inner.insert("input".to_string(), json!(input));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}
