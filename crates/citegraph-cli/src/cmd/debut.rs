//! `cg debut` — authors grouped by the year of their first admitted record.

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;
use citegraph_core::config::AnalysisConfig;
use citegraph_metrics::temporal::group_authors_by_debut_year;
use clap::Args;
use serde::Serialize;

use super::common::{InputArgs, load};
use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode};

/// Arguments for `cg debut`.
#[derive(Args, Debug, Clone)]
pub struct DebutArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Report payload for `cg debut`.
#[derive(Debug, Serialize)]
pub struct DebutReport {
    pub constraint: String,
    pub author_count: usize,
    pub years: BTreeMap<i32, Vec<String>>,
}

/// Execute `cg debut`.
pub fn run_debut(args: &DebutArgs, config: &AnalysisConfig, output: OutputMode) -> Result<()> {
    let loaded = load(&args.input, config)?;
    let years = group_authors_by_debut_year(&loaded.output.table);

    let report = DebutReport {
        constraint: loaded.constraint(),
        author_count: years.values().map(Vec::len).sum(),
        years,
    };

    render_mode(output, &report, render_debut_text, render_debut_pretty)
}

fn render_debut_text(report: &DebutReport, w: &mut dyn Write) -> std::io::Result<()> {
    for (year, authors) in &report.years {
        writeln!(w, "{year}\t{}\t{}", authors.len(), authors.join(", "))?;
    }
    Ok(())
}

fn render_debut_pretty(report: &DebutReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Authors by debut year")?;
    pretty_kv(w, "Constraint", &report.constraint)?;
    pretty_kv(w, "Authors", report.author_count.to_string())?;
    pretty_rule(w)?;
    for (year, authors) in &report.years {
        writeln!(w, "{year}  ({:>3})  {}", authors.len(), authors.join(", "))?;
    }
    Ok(())
}
