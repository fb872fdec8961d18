#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use citegraph_core::config::{AnalysisConfig, resolve_config};
use citegraph_core::error::ErrorCode;
use citegraph_core::{DateRangeError, RecordError, UnknownMetric};
use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "cg: citation graph analysis over JSON-lines paper records",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (pretty, text, json).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true)]
    json: bool,

    /// Read settings from this TOML file instead of the usual locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Analysis",
        about = "Rank authors by cumulative metric",
        long_about = "Build the citation graph from a JSON-lines dump and rank authors by their cumulative citation count or PageRank score.",
        after_help = "EXAMPLES:\n    # Top 20 authors by citations\n    cg authors records.jsonl\n\n    # Split credit among co-authors, restricted to a decade\n    cg authors records.jsonl --normalize --from 2000-01-01 --to 2010-01-01\n\n    # Rank by PageRank score\n    cg authors records.jsonl --metric pagerank --top 10\n\n    # Emit machine-readable output\n    cg authors records.jsonl --json"
    )]
    Authors(cmd::authors::AuthorsArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Bar chart of cumulative metric by author",
        long_about = "Describe (or draw, on a terminal) the top-N author bar chart with its title and axis labels.",
        after_help = "EXAMPLES:\n    # Draw the chart in the terminal\n    cg chart records.jsonl --top 15\n\n    # Emit the chart description for an external renderer\n    cg chart records.jsonl --json"
    )]
    Chart(cmd::authors::AuthorsArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Group authors by debut year",
        long_about = "Group authors by the year of their earliest admitted record.",
        after_help = "EXAMPLES:\n    # Authors per debut year\n    cg debut records.jsonl\n\n    # Emit machine-readable output\n    cg debut records.jsonl --json"
    )]
    Debut(cmd::debut::DebutArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Summarize the citation graph",
        long_about = "Report ingest counts (admitted, rejected by reason, out of range) and graph structure.",
        after_help = "EXAMPLES:\n    # Graph summary\n    cg graph records.jsonl\n\n    # Tolerate broken lines\n    cg graph records.jsonl --skip-malformed"
    )]
    Graph(cmd::graph::GraphArgs),

    #[command(
        next_help_heading = "Tooling",
        about = "Generate shell completions",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    cg completions bash\n\n    # Generate zsh completions\n    cg completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("CITEGRAPH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "citegraph_core=debug,citegraph_metrics=debug,cg=debug,info"
        } else {
            "citegraph_core=info,citegraph_metrics=info,cg=info,warn"
        })
    });

    let format = env::var("CITEGRAPH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Map an error chain to the most specific stable code.
fn classify(err: &anyhow::Error) -> ErrorCode {
    for cause in err.chain() {
        if cause.downcast_ref::<RecordError>().is_some() {
            return ErrorCode::MalformedRecord;
        }
        if cause.downcast_ref::<DateRangeError>().is_some() {
            return ErrorCode::InvalidDateRange;
        }
        if cause.downcast_ref::<UnknownMetric>().is_some() {
            return ErrorCode::UnknownMetric;
        }
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            return match io.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::InputNotFound,
                std::io::ErrorKind::BrokenPipe | std::io::ErrorKind::WriteZero => {
                    ErrorCode::OutputWriteFailed
                }
                _ => ErrorCode::InternalUnexpected,
            };
        }
    }
    ErrorCode::InternalUnexpected
}

/// Map a config resolution error: a missing file or an unreadable one.
fn classify_config(err: &anyhow::Error) -> ErrorCode {
    match classify(err) {
        ErrorCode::InputNotFound => ErrorCode::ConfigNotFound,
        _ => ErrorCode::ConfigParseError,
    }
}

fn fail(mode: OutputMode, code: ErrorCode, err: &anyhow::Error) -> ExitCode {
    let error = CliError::from_code(code, &format!("{err:#}"));
    if render_error(mode, &error).is_err() {
        eprintln!("error[{}]: {err:#}", code.code());
    }
    ExitCode::FAILURE
}

fn dispatch(cli: Cli, config: &AnalysisConfig, output: OutputMode) -> anyhow::Result<()> {
    match cli.command {
        Commands::Authors(ref args) => cmd::authors::run_authors(args, config, output),
        Commands::Chart(ref args) => cmd::authors::run_chart(args, config, output),
        Commands::Debut(ref args) => cmd::debut::run_debut(args, config, output),
        Commands::Graph(ref args) => cmd::graph::run_graph(args, config, output),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            let mut out = std::io::stdout().lock();
            cmd::completions::write_completions(args.shell, &mut command, &mut out)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();

    let resolved = match env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| resolve_config(cli.config.as_deref(), &cwd))
    {
        Ok(resolved) => resolved,
        Err(err) => return fail(output, classify_config(&err), &err),
    };
    if let Some(ref source) = resolved.source {
        debug!(path = %source.display(), "using config file");
    }

    match dispatch(cli, &resolved.config, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = classify(&err);
            fail(output, code, &err)
        }
    }
}
