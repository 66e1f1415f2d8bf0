use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional in `config.toml`; omitted sections and keys
/// take the defaults below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: Paths,
    pub generator: GeneratorSettings,
    pub analysis: AnalysisSettings,
    pub charts: ChartSettings,
    pub logging: LoggingSettings,
}

/// Where the flat-file artifacts live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paths {
    /// Output of the generator and input of the analyzer.
    pub raw_data: PathBuf,
    /// The restored series written (and re-read) by the analyzer.
    pub clean_data: PathBuf,
    /// Optional JSON summary of an analysis run.
    pub report: Option<PathBuf>,
}

/// Parameters of the synthetic revenue process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub seed: u64,
    /// The calendar year to cover, Jan 1 through Dec 31.
    pub year: i32,
    pub mean: f64,
    pub std_dev: f64,
    /// Lower clip applied to every draw. There is no upper clip.
    pub min_revenue: f64,
    /// Days removed entirely from the output.
    pub missing_days: usize,
    pub spike_days: usize,
    pub spike_factor: f64,
    pub drop_days: usize,
    pub drop_factor: f64,
}

/// Parameters of the exploratory analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// `k` in `[Q1 - k*IQR, Q3 + k*IQR]`.
    pub iqr_multiplier: f64,
    /// Trailing window length of the trend line, in rows.
    pub rolling_window: usize,
    /// Minimum non-empty observations in a window for it to yield a value.
    pub rolling_min_periods: usize,
    /// Rows shown in the console preview of the raw data.
    pub preview_rows: usize,
}

/// Chart output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub enabled: bool,
    pub width: u32,
    pub height: u32,
    pub raw_chart: PathBuf,
    pub anomaly_chart: PathBuf,
    pub trend_chart: PathBuf,
}

/// How log lines are rendered on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, used when `RUST_LOG` is not set.
    pub level: String,
    pub format: LogFormat,
    /// When set, logs are also written to a daily-rotated file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

// --- Default Implementations ---
// Running with no config file uses exactly these values.

impl Default for Paths {
    fn default() -> Self {
        Self {
            raw_data: PathBuf::from("data/raw/daily_revenue_raw.csv"),
            clean_data: PathBuf::from("data/processed/daily_revenue_clean.csv"),
            report: None,
        }
    }
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            seed: 42,
            year: 2023,
            mean: 1000.0,
            std_dev: 200.0,
            min_revenue: 100.0,
            missing_days: 20,
            spike_days: 5,
            spike_factor: 8.0,
            drop_days: 5,
            drop_factor: 0.1,
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            iqr_multiplier: 1.5,
            rolling_window: 7,
            rolling_min_periods: 1,
            preview_rows: 5,
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 1200,
            height: 600,
            raw_chart: PathBuf::from("reports/figures/raw_revenue.png"),
            anomaly_chart: PathBuf::from("reports/figures/revenue_anomalies.png"),
            trend_chart: PathBuf::from("reports/figures/revenue_trend.png"),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Full,
            directory: None,
            file_prefix: "revenue-eda.log".to_string(),
        }
    }
}

impl Config {
    /// Rejects combinations that would make the pipeline meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generator.validate()?;
        self.analysis.validate()?;
        self.charts.validate()?;
        Ok(())
    }
}

impl GeneratorSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.std_dev.is_finite() || self.std_dev <= 0.0 {
            return Err(ConfigError::ValidationError(
                "generator.std_dev must be a positive number".to_string(),
            ));
        }
        for (name, value) in [
            ("mean", self.mean),
            ("min_revenue", self.min_revenue),
            ("spike_factor", self.spike_factor),
            ("drop_factor", self.drop_factor),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::ValidationError(format!(
                    "generator.{name} must be finite"
                )));
            }
        }
        Ok(())
    }
}

impl AnalysisSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rolling_window == 0 {
            return Err(ConfigError::ValidationError(
                "analysis.rolling_window must be at least 1".to_string(),
            ));
        }
        if self.rolling_min_periods == 0 || self.rolling_min_periods > self.rolling_window {
            return Err(ConfigError::ValidationError(format!(
                "analysis.rolling_min_periods must be within 1..={}",
                self.rolling_window
            )));
        }
        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier < 0.0 {
            return Err(ConfigError::ValidationError(
                "analysis.iqr_multiplier must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}

impl ChartSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ValidationError(
                "charts.width and charts.height must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
