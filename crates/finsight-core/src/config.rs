//! Analytics configuration
//!
//! Thresholds for the four analyzers. Defaults reproduce the reporting
//! screen's fixed constants; a TOML file can tune them.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Explicit path, or the override in the data dir
//!    (~/.local/share/finsight/config/analytics.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analytics.toml");

/// How a regression slope is turned into a trend label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendMode {
    /// Slope (currency per month) against a fixed threshold
    #[default]
    Absolute,
    /// Slope divided by the category's historical average
    Relative,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictorConfig {
    pub months_ahead: u32,
    pub min_months: usize,
    pub confidence_per_month: f64,
    pub max_confidence: f64,
    pub trend_mode: TrendMode,
    pub trend_threshold: f64,
    pub relative_trend_threshold: f64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            months_ahead: 3,
            min_months: 2,
            confidence_per_month: 0.15,
            max_confidence: 0.9,
            trend_mode: TrendMode::Absolute,
            trend_threshold: 5.0,
            relative_trend_threshold: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparatorConfig {
    pub months_to_compare: usize,
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            months_to_compare: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlowConfig {
    /// Most recent days kept in the series
    pub days: usize,
}

impl Default for CashFlowConfig {
    fn default() -> Self {
        Self { days: 30 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyConfig {
    /// Categories with fewer expenses than this are never analyzed
    pub min_observations: usize,
    /// Deviation must exceed this to be flagged
    pub z_threshold: f64,
    /// Above this: medium
    pub medium_threshold: f64,
    /// Above this: high
    pub high_threshold: f64,
    pub max_results: usize,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            min_observations: 5,
            z_threshold: 2.0,
            medium_threshold: 2.5,
            high_threshold: 3.0,
            max_results: 10,
        }
    }
}

/// Complete analytics configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalyticsConfig {
    pub predictor: PredictorConfig,
    pub comparator: ComparatorConfig,
    pub cash_flow: CashFlowConfig,
    pub anomalies: AnomalyConfig,
}

impl AnalyticsConfig {
    /// Load from the default override location, else the embedded defaults
    pub fn load() -> Result<Self> {
        load_config(None)
    }

    /// Load from an explicit file (embedded defaults if it does not exist)
    pub fn from_path(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    /// Parse a TOML document over the built-in defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }

    /// Reject settings the analyzers cannot work with
    pub fn validate(&self) -> Result<()> {
        let p = &self.predictor;
        if p.min_months < 2 {
            return Err(Error::Config(
                "predictor.min_months must be at least 2".into(),
            ));
        }
        if !(0.0..=1.0).contains(&p.max_confidence) || p.confidence_per_month < 0.0 {
            return Err(Error::Config(
                "predictor confidence settings must lie in [0, 1]".into(),
            ));
        }
        if p.trend_threshold < 0.0 || p.relative_trend_threshold < 0.0 {
            return Err(Error::Config(
                "predictor trend thresholds must not be negative".into(),
            ));
        }
        if self.comparator.months_to_compare == 0 {
            return Err(Error::Config(
                "comparator.months_to_compare must be at least 1".into(),
            ));
        }
        if self.cash_flow.days == 0 {
            return Err(Error::Config("cash_flow.days must be at least 1".into()));
        }

        let a = &self.anomalies;
        if a.min_observations < 2 {
            return Err(Error::Config(
                "anomalies.min_observations must be at least 2".into(),
            ));
        }
        if a.z_threshold <= 0.0 {
            return Err(Error::Config(
                "anomalies.z_threshold must be positive".into(),
            ));
        }
        if !(a.z_threshold < a.medium_threshold && a.medium_threshold <= a.high_threshold) {
            return Err(Error::Config(format!(
                "anomaly thresholds must satisfy z ({}) < medium ({}) <= high ({})",
                a.z_threshold, a.medium_threshold, a.high_threshold
            )));
        }
        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("finsight").join("config").join("analytics.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<AnalyticsConfig> {
    let path = match override_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    };

    let content = match path {
        Some(path) if path.exists() => {
            debug!(path = %path.display(), "Loading analytics config");
            fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?
        }
        _ => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    predictor: Option<RawPredictor>,
    comparator: Option<RawComparator>,
    cash_flow: Option<RawCashFlow>,
    anomalies: Option<RawAnomalies>,
}

#[derive(Debug, Deserialize)]
struct RawPredictor {
    months_ahead: Option<u32>,
    min_months: Option<usize>,
    confidence_per_month: Option<f64>,
    max_confidence: Option<f64>,
    trend_mode: Option<TrendMode>,
    trend_threshold: Option<f64>,
    relative_trend_threshold: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawComparator {
    months_to_compare: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawCashFlow {
    days: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawAnomalies {
    min_observations: Option<usize>,
    z_threshold: Option<f64>,
    medium_threshold: Option<f64>,
    high_threshold: Option<f64>,
    max_results: Option<usize>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<AnalyticsConfig> {
    let raw: RawConfig = toml::from_str(content)?;
    let mut config = AnalyticsConfig::default();

    if let Some(p) = raw.predictor {
        let target = &mut config.predictor;
        if let Some(v) = p.months_ahead {
            target.months_ahead = v;
        }
        if let Some(v) = p.min_months {
            target.min_months = v;
        }
        if let Some(v) = p.confidence_per_month {
            target.confidence_per_month = v;
        }
        if let Some(v) = p.max_confidence {
            target.max_confidence = v;
        }
        if let Some(v) = p.trend_mode {
            target.trend_mode = v;
        }
        if let Some(v) = p.trend_threshold {
            target.trend_threshold = v;
        }
        if let Some(v) = p.relative_trend_threshold {
            target.relative_trend_threshold = v;
        }
    }

    if let Some(c) = raw.comparator {
        if let Some(v) = c.months_to_compare {
            config.comparator.months_to_compare = v;
        }
    }

    if let Some(c) = raw.cash_flow {
        if let Some(v) = c.days {
            config.cash_flow.days = v;
        }
    }

    if let Some(a) = raw.anomalies {
        let target = &mut config.anomalies;
        if let Some(v) = a.min_observations {
            target.min_observations = v;
        }
        if let Some(v) = a.z_threshold {
            target.z_threshold = v;
        }
        if let Some(v) = a.medium_threshold {
            target.medium_threshold = v;
        }
        if let Some(v) = a.high_threshold {
            target.high_threshold = v;
        }
        if let Some(v) = a.max_results {
            target.max_results = v;
        }
    }

    config.validate()?;
    Ok(config)
}
