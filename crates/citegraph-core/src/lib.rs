#![forbid(unsafe_code)]
//! citegraph-core library.
//!
//! Record model and the per-record admission rules shared by the graph
//! builder and the CLI.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums for record/date failures, `anyhow::Result`
//!   for configuration loading.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod date;
pub mod error;
pub mod metric;
pub mod record;
pub mod validate;

pub use date::{DateRange, DateRangeError, in_range, parse_date_or_default};
pub use metric::{Metric, UnknownMetric};
pub use record::{Record, RecordError, RecordId};
pub use validate::{Rejection, is_admissible};
