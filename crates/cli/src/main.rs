// schoolpath CLI - enrich school records with the one-dragon relationship flag

mod exit_codes;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use schoolpath_enrich::config::DEFAULT_CONFIG_FILE;
use schoolpath_enrich::{EnrichConfig, EnrichError, RunReport};

use exit_codes::{enrich_exit_code, EXIT_ERROR, EXIT_SUCCESS};

#[derive(Parser)]
#[command(name = "schoolpath")]
#[command(about = "Mark kindergartens with a one-dragon pathway in the merged school dataset")]
#[command(version)]
#[command(after_help = "\
With no arguments, reads Xia-Zai.csv and merged.json from the current directory
and writes merged_updated.json. A schoolpath.toml in the current directory is
picked up automatically.

Examples:
  schoolpath
  schoolpath --dataset data/merged.json --output data/merged_updated.json
  schoolpath --config enrich.toml --json
  RUST_LOG=debug schoolpath")]
struct Cli {
    /// TOML config file (default: ./schoolpath.toml if present)
    #[arg(long, short = 'c', env = "SCHOOLPATH_CONFIG")]
    config: Option<PathBuf>,

    /// Reference CSV with the school name and one-dragon mode columns
    #[arg(long)]
    lookup: Option<PathBuf>,

    /// School records JSON array
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Where to write the enriched JSON
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Print the run report as JSON on stdout instead of the human summary
    #[arg(long)]
    json: bool,

    /// Suppress the human summary
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();

    match cmd_enrich(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

/// Logs go to stderr, filtered by RUST_LOG (default: warn).
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<EnrichError> for CliError {
    fn from(err: EnrichError) -> Self {
        let hint = match &err {
            EnrichError::FileNotFound { .. } => {
                Some("run from the directory holding the inputs, or pass --lookup / --dataset".to_string())
            }
            EnrichError::MissingColumn { .. } => {
                Some("set [lookup] name_column / mode_column in the config file".to_string())
            }
            _ => None,
        };
        Self { code: enrich_exit_code(&err), message: err.to_string(), hint }
    }
}

// ============================================================================
// enrich
// ============================================================================

fn cmd_enrich(cli: Cli) -> Result<(), CliError> {
    let mut config = load_config(cli.config.as_deref())?;

    if let Some(lookup) = cli.lookup {
        config.files.lookup = lookup;
    }
    if let Some(dataset) = cli.dataset {
        config.files.dataset = dataset;
    }
    if let Some(output) = cli.output {
        config.files.output = output;
    }

    tracing::debug!(
        lookup = %config.files.lookup.display(),
        dataset = %config.files.dataset.display(),
        output = %config.files.output.display(),
        "resolved input and output files"
    );

    let report = schoolpath_enrich::run(&config)?;

    if cli.json {
        let json = serde_json::to_string(&report)
            .map_err(|e| CliError::internal(format!("JSON serialization error: {e}")))?;
        println!("{json}");
    } else if !cli.quiet {
        print_summary(&report);
    }

    Ok(())
}

fn load_config(explicit: Option<&Path>) -> Result<EnrichConfig, CliError> {
    if let Some(path) = explicit {
        return EnrichConfig::from_file(path).map_err(|e| {
            CliError::from(e).with_hint(format!("config file: {}", path.display()))
        });
    }

    let implicit = Path::new(DEFAULT_CONFIG_FILE);
    if implicit.is_file() {
        tracing::debug!("using {}", implicit.display());
        return Ok(EnrichConfig::from_file(implicit)?);
    }

    Ok(EnrichConfig::default())
}

fn print_summary(report: &RunReport) {
    let s = &report.summary;
    println!("{} 已生成，共 {} 筆資料", report.output, s.records);
    eprintln!(
        "{} related, {} without a lookup row ({} lookup rows, {} duplicate names overwritten)",
        s.related, s.unmatched, report.lookup.rows, report.lookup.overwritten,
    );
}
