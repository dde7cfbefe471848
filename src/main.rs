//! Purpose: `yaml2json` CLI entry point.
//! Role: Binary crate root; parses args, translates one YAML stream, emits JSON on stdout.
//! Invariants: Stdout carries only JSON documents, one per line-terminated record.
//! Invariants: Diagnostics go to stderr as text (default) or JSON (`--error-format json`).
//! Invariants: Exit code is 0 on success and `api::to_exit_code` (1) on any failure.
use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use yaml2json::api::{
    DEFAULT_MAX_DEPTH, Error, ErrorKind, Layout, MAX_DEPTH_LIMIT, StringMode, Summary,
    TranslateOptions, to_exit_code, translate_reader,
};
use yaml2json::diagnostic::{diagnostic_json, diagnostic_text};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }
}

#[derive(Copy, Clone, Debug)]
struct ReportMode {
    format: ErrorFormat,
    color: ColorMode,
}

impl Default for ReportMode {
    fn default() -> Self {
        Self {
            format: ErrorFormat::Text,
            color: ColorMode::Auto,
        }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, report)) => {
            emit_error(&err, report);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ReportMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ReportMode::default(),
                    )
                })?;
                return Ok(RunOutcome::ok());
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint("Try `yaml2json --help`."),
                    ReportMode::default(),
                ));
            }
        },
    };

    let report = ReportMode {
        format: cli.error_format,
        color: cli.color,
    };
    let options = cli.translate_options();
    debug!(?options, input = ?cli.input, "starting translation");

    let summary = match cli.input.as_deref() {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path).map_err(|err| {
                (
                    Error::new(ErrorKind::Read)
                        .with_message("input could not be opened")
                        .with_offset(0)
                        .with_path(path)
                        .with_source(err),
                    report,
                )
            })?;
            translate_to_stdout(file, &options).map_err(|err| (err.with_path(path), report))?
        }
        _ => translate_to_stdout(io::stdin().lock(), &options).map_err(|err| (err, report))?,
    };
    debug!(
        documents = summary.documents,
        events = summary.events,
        max_depth = summary.max_depth_seen,
        "translation complete"
    );
    Ok(RunOutcome::ok())
}

fn translate_to_stdout<R: io::Read>(
    reader: R,
    options: &TranslateOptions,
) -> Result<Summary, Error> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = translate_reader(reader, &mut out, options);
    let flushed = out.flush().map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to flush output")
            .with_source(err)
    });
    let summary = result?;
    flushed?;
    Ok(summary)
}

#[derive(Parser)]
#[command(
    name = "yaml2json",
    version,
    about = "Translate a YAML stream into JSON",
    help_template = r#"{about-with-newline}
USAGE
  {usage}

ARGUMENTS
{positionals}

OPTIONS
{options}

{after-help}
"#,
    long_about = None,
    after_help = r#"EXAMPLES
  $ echo 'a: [1, 2]' | yaml2json              # { "a": [ 1, 2 ] }
  $ yaml2json -c config.yaml                  # {"a":[1,2]}
  $ yaml2json --legacy < old.yaml             # historical byte-for-byte output

NOTES
  Each YAML document becomes one line of JSON. Every document must have a
  mapping or sequence at its root. Anchors and aliases are not supported.
  Set RUST_LOG=debug to trace translation on stderr."#
)]
struct Cli {
    #[arg(
        value_name = "INPUT",
        value_hint = ValueHint::FilePath,
        help = "YAML file to read; `-` or omitted reads stdin"
    )]
    input: Option<PathBuf>,

    #[arg(short = 'c', long, help = "Emit compact JSON without padding spaces")]
    canonical: bool,

    #[arg(short = 'u', long, help = "Output unescaped non-ASCII characters")]
    unicode: bool,

    #[arg(
        long,
        help = "Copy scalars byte-for-byte without JSON escaping (historical output)"
    )]
    legacy: bool,

    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_MAX_DEPTH as u32,
        value_parser = clap::value_parser!(u32).range(1..=MAX_DEPTH_LIMIT as i64),
        help = "Maximum container nesting depth (1-255)"
    )]
    max_depth: u32,

    #[arg(
        long,
        value_enum,
        default_value = "text",
        help = "Diagnostic format on stderr: text|json"
    )]
    error_format: ErrorFormat,

    #[arg(
        long,
        value_enum,
        default_value = "auto",
        help = "Colorize text diagnostics: auto|always|never"
    )]
    color: ColorMode,
}

impl Cli {
    fn translate_options(&self) -> TranslateOptions {
        let layout = if self.canonical {
            Layout::Compact
        } else {
            Layout::Spaced
        };
        let strings = if self.legacy {
            StringMode::Legacy
        } else {
            StringMode::Escaped
        };
        TranslateOptions::new()
            .with_layout(layout)
            .with_strings(strings)
            .with_ascii_only(!self.unicode)
            .with_max_depth(self.max_depth as usize)
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ErrorFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn emit_error(err: &Error, report: ReportMode) {
    match report.format {
        ErrorFormat::Text => {
            let use_color = report.color.use_color(io::stderr().is_terminal());
            eprintln!("{}", diagnostic_text(err, use_color));
        }
        ErrorFormat::Json => {
            let value = diagnostic_json(err);
            let json = serde_json::to_string(&value).unwrap_or_else(|_| {
                "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}"
                    .to_string()
            });
            eprintln!("{json}");
        }
    }
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
