use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::date::{DateRange, DateRangeError};
use crate::metric::Metric;

/// File name looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "citegraph.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub aggregate: AggregateConfig,
    #[serde(default)]
    pub pagerank: PageRankSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Exclusive lower date bound.
    #[serde(default)]
    pub from: Option<String>,
    /// Exclusive upper date bound.
    #[serde(default)]
    pub to: Option<String>,
    /// Skip malformed lines with a warning instead of failing.
    #[serde(default)]
    pub skip_malformed: bool,
}

impl FilterConfig {
    /// Parse the configured window. Either both bounds are set or neither.
    ///
    /// # Errors
    ///
    /// Returns an error if only one bound is set or a bound is unparseable.
    pub fn date_range(&self) -> Result<Option<DateRange>, DateRangeError> {
        match (self.from.as_deref(), self.to.as_deref()) {
            (None, None) => Ok(None),
            (Some(lo), Some(hi)) => DateRange::parse(lo, hi).map(Some),
            (None, Some(_)) => Err(DateRangeError::MissingBound { which: "lower" }),
            (Some(_), None) => Err(DateRangeError::MissingBound { which: "upper" }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateConfig {
    #[serde(default)]
    pub metric: Metric,
    /// Split each record's value evenly among its authors.
    #[serde(default)]
    pub normalize: bool,
    /// Number of authors kept for display.
    #[serde(default = "default_top")]
    pub top: usize,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            metric: Metric::default(),
            normalize: false,
            top: default_top(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRankSettings {
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
}

impl Default for PageRankSettings {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            tolerance: default_tolerance(),
            max_iter: default_max_iter(),
        }
    }
}

const fn default_top() -> usize {
    20
}

const fn default_damping() -> f64 {
    0.85
}

const fn default_tolerance() -> f64 {
    1e-6
}

const fn default_max_iter() -> usize {
    100
}

/// A loaded configuration and the file it came from, if any.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: AnalysisConfig,
    pub source: Option<PathBuf>,
}

/// Parse a config file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_config_file(path: &Path) -> Result<AnalysisConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<AnalysisConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve the effective configuration.
///
/// Lookup order: `explicit` (must exist), `<cwd>/citegraph.toml`, the user
/// config dir (`citegraph/config.toml`), then built-in defaults.
///
/// # Errors
///
/// Returns an error if the chosen file cannot be read or parsed.
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<ResolvedConfig> {
    if let Some(path) = explicit {
        let config = load_config_file(path)?;
        return Ok(ResolvedConfig {
            config,
            source: Some(path.to_path_buf()),
        });
    }

    let candidates = std::iter::once(cwd.join(PROJECT_CONFIG_FILE))
        .chain(dirs::config_dir().map(|dir| dir.join("citegraph/config.toml")));

    for path in candidates {
        if path.exists() {
            debug!(path = %path.display(), "loading config");
            let config = load_config_file(&path)?;
            return Ok(ResolvedConfig {
                config,
                source: Some(path),
            });
        }
    }

    Ok(ResolvedConfig {
        config: AnalysisConfig::default(),
        source: None,
    })
}
