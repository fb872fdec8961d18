//! `cg authors` and `cg chart` — cumulative metric by author.
//!
//! Both commands build the graph, optionally run PageRank (when the metric
//! is `score`), and reduce the metadata table per author. `authors` lists
//! the ranking; `chart` emits the bar-chart description for a renderer.

use std::io::Write;

use anyhow::Result;
use citegraph_core::Metric;
use citegraph_core::config::AnalysisConfig;
use citegraph_metrics::chart::{ChartData, author_chart};
use citegraph_metrics::rank::{PageRankConfig, apply_scores, pagerank};
use citegraph_metrics::{AuthorMetric, aggregate, top_n};
use clap::Args;
use serde::Serialize;

use super::common::{InputArgs, load};
use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode};

/// Arguments for `cg authors` and `cg chart`.
#[derive(Args, Debug, Clone)]
pub struct AuthorsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Metric to accumulate: citations, score (alias: pagerank).
    #[arg(long, value_name = "METRIC")]
    pub metric: Option<String>,

    /// Split each record's value evenly among its authors.
    #[arg(long, overrides_with = "no_normalize")]
    pub normalize: bool,

    /// Credit every author with the full value, even if the config normalizes.
    #[arg(long, overrides_with = "normalize")]
    pub no_normalize: bool,

    /// Number of authors to show.
    #[arg(long)]
    pub top: Option<usize>,
}

/// Fully resolved aggregation settings.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Settings {
    metric: Metric,
    normalize: bool,
    top: usize,
}

impl AuthorsArgs {
    /// `Some` when a normalization flag was given; the last one wins.
    const fn normalize_flag(&self) -> Option<bool> {
        if self.no_normalize {
            Some(false)
        } else if self.normalize {
            Some(true)
        } else {
            None
        }
    }

    /// Merge flags over the file configuration.
    pub(crate) fn settings(&self, config: &AnalysisConfig) -> Result<Settings> {
        let metric = match self.metric.as_deref() {
            Some(name) => name.parse::<Metric>()?,
            None => config.aggregate.metric,
        };
        Ok(Settings {
            metric,
            normalize: self.normalize_flag().unwrap_or(config.aggregate.normalize),
            top: self.top.unwrap_or(config.aggregate.top),
        })
    }
}

/// Report payload for `cg authors`.
#[derive(Debug, Serialize)]
pub struct AuthorReport {
    pub metric: Metric,
    pub normalize: bool,
    pub constraint: String,
    /// Authors with any credit, before truncation.
    pub author_count: usize,
    pub authors: Vec<RankedAuthor>,
}

#[derive(Debug, Serialize)]
pub struct RankedAuthor {
    pub rank: usize,
    pub author: String,
    pub value: f64,
}

/// Build, score if needed, and aggregate. Returns the full sorted list and
/// the constraint description.
fn ranked(
    args: &AuthorsArgs,
    config: &AnalysisConfig,
    settings: Settings,
) -> Result<(Vec<AuthorMetric>, String)> {
    let mut loaded = load(&args.input, config)?;

    if settings.metric == Metric::Score {
        let result = pagerank(&loaded.output.graph, &PageRankConfig::from(&config.pagerank));
        apply_scores(&mut loaded.output.table, &result);
    }

    let list = aggregate(&loaded.output.table, settings.metric, settings.normalize);
    let mut constraint = loaded.constraint();
    if settings.normalize {
        constraint.push_str(", normalized");
    }
    Ok((list, constraint))
}

/// Execute `cg authors`.
pub fn run_authors(args: &AuthorsArgs, config: &AnalysisConfig, output: OutputMode) -> Result<()> {
    let settings = args.settings(config)?;
    let (list, constraint) = ranked(args, config, settings)?;

    let report = AuthorReport {
        metric: settings.metric,
        normalize: settings.normalize,
        constraint,
        author_count: list.len(),
        authors: top_n(&list, settings.top)
            .iter()
            .enumerate()
            .map(|(i, m)| RankedAuthor {
                rank: i + 1,
                author: m.author.clone(),
                value: m.value,
            })
            .collect(),
    };

    render_mode(output, &report, render_authors_text, render_authors_pretty)
}

fn render_authors_text(report: &AuthorReport, w: &mut dyn Write) -> std::io::Result<()> {
    for row in &report.authors {
        writeln!(w, "{}\t{}\t{}", row.rank, row.author, format_value(row.value))?;
    }
    Ok(())
}

fn render_authors_pretty(report: &AuthorReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(
        w,
        &format!("Cumulative {} by author", report.metric.label()),
    )?;
    pretty_kv(w, "Constraint", &report.constraint)?;
    pretty_kv(
        w,
        "Showing",
        format!("{} of {} authors", report.authors.len(), report.author_count),
    )?;
    pretty_rule(w)?;
    for row in &report.authors {
        writeln!(w, "{:>4}  {:<40} {:>12}", row.rank, row.author, format_value(row.value))?;
    }
    Ok(())
}

/// Execute `cg chart`.
pub fn run_chart(args: &AuthorsArgs, config: &AnalysisConfig, output: OutputMode) -> Result<()> {
    let settings = args.settings(config)?;
    let (list, constraint) = ranked(args, config, settings)?;
    let chart = author_chart(&list, settings.metric.label(), &constraint, settings.top);
    render_mode(output, &chart, render_chart_text, render_chart_pretty)
}

fn render_chart_text(chart: &ChartData, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "{}", chart.title)?;
    for (label, value) in chart.categories.iter().zip(&chart.values) {
        writeln!(w, "{label}\t{}", format_value(*value))?;
    }
    Ok(())
}

/// Horizontal bar rendering for terminals.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn render_chart_pretty(chart: &ChartData, w: &mut dyn Write) -> std::io::Result<()> {
    const BAR_WIDTH: usize = 40;

    pretty_section(w, &chart.title)?;
    let max = chart.values.iter().copied().fold(0.0_f64, f64::max);
    let label_width = chart
        .categories
        .iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0)
        .min(32);

    for (label, value) in chart.categories.iter().zip(&chart.values) {
        let len = if max > 0.0 {
            ((value / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        writeln!(
            w,
            "{label:<label_width$}  {:<bar_width$} {}",
            "█".repeat(len),
            format_value(*value),
            bar_width = BAR_WIDTH,
        )?;
    }
    pretty_rule(w)?;
    writeln!(w, "{} (x) / {} (y)", chart.x_label, chart.y_label)
}

/// Integers print without a fractional part; everything else with 4 decimals.
#[allow(clippy::float_cmp)]
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.4}")
    }
}
