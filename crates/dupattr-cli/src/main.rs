use clap::{Parser, ValueEnum};
use dupattr_lint::Linter;
use dupattr_report::{Format, ReportError};
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "dupattr")]
#[command(about = "dupattr — report attributes declared more than once on the same tag")]
#[command(version)]
struct Cli {
    /// Markup source file to scan (`-` reads standard input)
    path: String,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// How malformed tags and attributes are treated
    #[arg(long, value_enum, default_value_t = WarningPolicy::Show)]
    warnings: WarningPolicy,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Format::Text,
            OutputFormat::Json => Format::Json,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum WarningPolicy {
    /// Report warnings; they do not affect the exit status
    Show,
    /// Leave warnings out of the report
    Hide,
    /// Report warnings and fail when there are any
    Deny,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("file not found: {0}")]
    NotFound(String),

    #[error("cannot read {path}: {source}")]
    InputUnavailable {
        path: String,
        source: std::io::Error,
    },

    #[error("{0} is not valid UTF-8")]
    InvalidEncoding(String),

    #[error(transparent)]
    Report(#[from] ReportError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Scan, print the report, and return whether the run passed.
fn run(cli: &Cli) -> Result<bool, CliError> {
    let source = read_source(&cli.path)?;
    let result = Linter::scan(&source);

    let show_warnings = cli.warnings != WarningPolicy::Hide;
    let report = dupattr_report::render(&result, cli.format.into(), show_warnings)?;
    println!("{report}");

    let denied = cli.warnings == WarningPolicy::Deny && result.has_warnings();
    Ok(!result.has_duplicates() && !denied)
}

const STDIN_NAME: &str = "<stdin>";

fn read_source(path: &str) -> Result<String, CliError> {
    let mut bytes = Vec::new();
    let name = if path == "-" { STDIN_NAME } else { path };
    if path == "-" {
        std::io::stdin()
            .read_to_end(&mut bytes)
            .map_err(|source| CliError::InputUnavailable {
                path: name.into(),
                source,
            })?;
    } else {
        let p = Path::new(path);
        if !p.exists() {
            return Err(CliError::NotFound(path.into()));
        }
        bytes = std::fs::read(p).map_err(|source| CliError::InputUnavailable {
            path: path.into(),
            source,
        })?;
    }
    String::from_utf8(bytes).map_err(|_| CliError::InvalidEncoding(name.into()))
}
