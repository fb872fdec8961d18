//! Input options shared by every analysis command.

use std::path::PathBuf;

use anyhow::Result;
use citegraph_core::DateRange;
use citegraph_core::config::{AnalysisConfig, FilterConfig};
use citegraph_metrics::pipeline::{IngestOptions, MalformedPolicy, build_from_path};
use citegraph_metrics::BuildOutput;
use clap::Args;
use tracing::{debug, warn};

/// Input file and record filters.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// JSON-lines file with one record per line.
    pub input: PathBuf,

    /// Exclusive lower date bound (e.g. 2000-01-01).
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// Exclusive upper date bound (e.g. 2010-01-01).
    #[arg(long, requires = "from")]
    pub to: Option<String>,

    /// Skip malformed lines with a warning instead of failing.
    #[arg(long)]
    pub skip_malformed: bool,
}

impl InputArgs {
    /// Merge flags over the file configuration. A window given on the
    /// command line replaces the configured one as a whole.
    pub fn filter(&self, config: &AnalysisConfig) -> FilterConfig {
        let mut filter = config.filter.clone();
        if self.from.is_some() || self.to.is_some() {
            filter.from.clone_from(&self.from);
            filter.to.clone_from(&self.to);
        }
        filter.skip_malformed |= self.skip_malformed;
        filter
    }
}

/// A built graph plus the window it was built with.
pub struct Loaded {
    pub output: BuildOutput,
    pub range: Option<DateRange>,
}

impl Loaded {
    /// Short description of the date filter, used in chart titles.
    pub fn constraint(&self) -> String {
        describe_range(self.range.as_ref())
    }
}

pub fn describe_range(range: Option<&DateRange>) -> String {
    range.map_or_else(
        || "all dates".to_string(),
        |r| {
            format!(
                "{} to {}",
                r.lower.format("%Y-%m-%d"),
                r.upper.format("%Y-%m-%d")
            )
        },
    )
}

/// Read the input file into a citation graph and metadata table.
pub fn load(args: &InputArgs, config: &AnalysisConfig) -> Result<Loaded> {
    let filter = args.filter(config);
    let range = filter.date_range()?;
    if range.as_ref().is_some_and(DateRange::is_empty) {
        warn!("date range is empty; no record can be admitted");
    }

    let options = IngestOptions {
        date_range: range,
        malformed: if filter.skip_malformed {
            MalformedPolicy::Skip
        } else {
            MalformedPolicy::Fail
        },
    };
    debug!(input = %args.input.display(), ?options, "building citation graph");

    let output = build_from_path(&args.input, &options)?;
    Ok(Loaded { output, range })
}
