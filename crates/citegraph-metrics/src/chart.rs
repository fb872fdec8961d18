//! Bar-chart description for the author histogram.
//!
//! Rendering is left to the caller; this module only decides what the
//! chart shows.

use serde::Serialize;

use crate::aggregate::{AuthorMetric, top_n};

/// Everything a renderer needs to draw a bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Bar labels, left to right.
    pub categories: Vec<String>,
    /// Bar heights, aligned with `categories`.
    pub values: Vec<f64>,
}

/// Cumulative-measure-by-author chart over the top `n` authors.
///
/// `constraint` describes the filter applied (e.g. a date window) and is
/// appended to the title in parentheses.
#[must_use]
pub fn author_chart(
    metrics: &[AuthorMetric],
    measure_name: &str,
    constraint: &str,
    n: usize,
) -> ChartData {
    let shown = top_n(metrics, n);
    ChartData {
        title: format!("Cumulative {measure_name} by Author ({constraint})"),
        x_label: "Author".to_string(),
        y_label: format!("Cumulative {measure_name}"),
        categories: shown.iter().map(|m| m.author.clone()).collect(),
        values: shown.iter().map(|m| m.value).collect(),
    }
}
