//! Configuration types for kal.
//!
//! [`Config::load`] layers an optional user TOML file on top of the embedded
//! defaults. [`Config::defaults`] returns the same defaults without touching
//! the filesystem (useful in tests). CLI flags are applied by the binary on
//! the loaded value, followed by [`Config::validate`].

use crate::error::ConfigError;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[input]
path = "kube-apiserver.log"

[output]
path = "output.csv"

[pipeline]
workers        = 1000
flush_every    = 100000
queue_factor   = 20
latency_format = "text"
exclude_watch  = false

[reference_date]
year  = 2019
month = 1
day   = 1
"#;

/// Years whose timestamps still fit in a signed 64-bit nanosecond count.
const MIN_REFERENCE_YEAR: i32 = 1678;
const MAX_REFERENCE_YEAR: i32 = 2261;

/// Upper bound on `workers * queue_factor`, the capacity of each data queue.
pub const MAX_QUEUE_CAPACITY: usize = 1 << 24;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level run configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub reference_date: ReferenceDate,
}

/// `[input]` section. `path = "-"` reads stdin.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_input_path")]
    pub path: String,
}

/// `[output]` section. `path = "-"` writes stdout.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
}

/// `[pipeline]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Number of concurrent extraction workers.
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// The sink flushes and reports progress every this many records.
    #[serde(default = "default_flush_every")]
    pub flush_every: u64,
    /// Queue capacity is `workers * queue_factor`.
    #[serde(default = "default_queue_factor")]
    pub queue_factor: usize,
    #[serde(default)]
    pub latency_format: LatencyFormat,
    /// Drop `watch=true` requests instead of writing them.
    #[serde(default)]
    pub exclude_watch: bool,
}

/// `[reference_date]` section: the calendar day applied to the bare
/// time-of-day found in apiserver log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ReferenceDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// How the `Latency` column is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatencyFormat {
    /// Go duration text, e.g. `5ms`, `1m30s`.
    #[default]
    Text,
    /// Integer nanoseconds, e.g. `5000000`.
    Nanos,
}

fn default_input_path() -> String { "kube-apiserver.log".to_string() }
fn default_output_path() -> String { "output.csv".to_string() }
fn default_workers() -> usize { 1000 }
fn default_flush_every() -> u64 { 100_000 }
fn default_queue_factor() -> usize { 20 }

impl Default for InputConfig {
    fn default() -> Self {
        Self { path: default_input_path() }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { path: default_output_path() }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            flush_every: default_flush_every(),
            queue_factor: default_queue_factor(),
            latency_format: LatencyFormat::default(),
            exclude_watch: false,
        }
    }
}

impl Default for ReferenceDate {
    fn default() -> Self {
        Self { year: 2019, month: 1, day: 1 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the embedded defaults, overlaid with `file` when given.
    /// A missing file is an error: it was asked for explicitly.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Check the invariants the pipeline relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipeline.workers == 0 {
            return Err(ConfigError::Invalid("pipeline.workers must be at least 1".into()));
        }
        if self.pipeline.flush_every == 0 {
            return Err(ConfigError::Invalid("pipeline.flush_every must be at least 1".into()));
        }
        if self.pipeline.queue_factor == 0 {
            return Err(ConfigError::Invalid("pipeline.queue_factor must be at least 1".into()));
        }
        match self.pipeline.workers.checked_mul(self.pipeline.queue_factor) {
            Some(capacity) if capacity <= MAX_QUEUE_CAPACITY => {}
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "pipeline.workers * pipeline.queue_factor must not exceed {MAX_QUEUE_CAPACITY}"
                )))
            }
        }
        self.reference_date.to_naive_date()?;
        Ok(())
    }
}

impl ReferenceDate {
    /// Convert to a calendar date, rejecting days that do not exist and
    /// years outside the nanosecond-timestamp range.
    pub fn to_naive_date(self) -> Result<NaiveDate, ConfigError> {
        if !(MIN_REFERENCE_YEAR..=MAX_REFERENCE_YEAR).contains(&self.year) {
            return Err(ConfigError::Invalid(format!(
                "reference_date.year {} is outside {MIN_REFERENCE_YEAR}..={MAX_REFERENCE_YEAR}",
                self.year
            )));
        }
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .ok_or_else(|| ConfigError::Invalid(format!("reference_date {self} is not a valid date")))
    }
}

impl fmt::Display for ReferenceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for ReferenceDate {
    type Err = ConfigError;

    /// Parse `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| ConfigError::Invalid(format!("reference date {s:?}: {e}")))?;
        let parsed = Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        };
        parsed.to_naive_date()?;
        Ok(parsed)
    }
}

impl FromStr for LatencyFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "nanos" => Ok(Self::Nanos),
            other => Err(ConfigError::Invalid(format!(
                "latency format {other:?} (expected \"text\" or \"nanos\")"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
