//! # CLI Configuration
//!
//! Settings for the `cpq` binary.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CPQ_CATALOG=./catalog.json                                         │
//! │     CPQ_OUTPUT=json                                                    │
//! │     CPQ_LOG=debug                                                      │
//! │     CPQ_CURRENCY_SYMBOL=€                                              │
//! │     CPQ_DECIMAL_PLACES=2                                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config PATH, else CPQ_CONFIG, else                               │
//! │     ~/.config/cpq/cpq.toml (Linux)                                     │
//! │     ~/Library/Application Support/com.cpq.cpq/cpq.toml (macOS)         │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # cpq.toml
//! catalog_path = "/srv/cpq/catalog.json"
//! output = "pretty"        # pretty | json
//! log_filter = "warn"      # e.g. "info,cpq=debug" to trace pricing
//! currency_symbol = "$"
//! decimal_places = 2       # display rounding only, 0..=6
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default `EnvFilter` directive when neither `RUST_LOG` nor `CPQ_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Upper bound for `decimal_places`.
pub const MAX_DECIMAL_PLACES: u8 = 6;

// =============================================================================
// Output Format
// =============================================================================

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable, amounts rounded for display.
    #[default]
    Pretty,

    /// The raw result as JSON, amounts unrounded.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Pretty => write!(f, "pretty"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(OutputFormat::Pretty),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::InvalidValue(format!(
                "output '{}' (valid options: pretty, json)",
                other
            ))),
        }
    }
}

// =============================================================================
// Config Error
// =============================================================================

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

// =============================================================================
// CLI Config
// =============================================================================

/// Complete `cpq` configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Catalog used by `quote` and `check` when `--catalog` is not given.
    pub catalog_path: Option<PathBuf>,

    pub output: OutputFormat,

    /// `tracing_subscriber::EnvFilter` directive. `RUST_LOG` wins over it.
    pub log_filter: String,

    pub currency_symbol: String,

    /// Digits after the decimal point in pretty output.
    pub decimal_places: u8,

    /// File the settings were read from, if any. Loading happens before
    /// the subscriber is installed, so `main` logs this afterwards.
    #[serde(skip)]
    pub loaded_from: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            output: OutputFormat::Pretty,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            currency_symbol: "$".to_string(),
            decimal_places: 2,
            loaded_from: None,
        }
    }
}

impl CliConfig {
    /// Loads configuration with the priority documented above.
    ///
    /// A missing file at the platform default location is fine; a missing
    /// file that was asked for explicitly is an error.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let explicit = config_path.or_else(|| std::env::var_os("CPQ_CONFIG").map(PathBuf::from));

        let mut config = match explicit {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path)),
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&contents)?;
        config.loaded_from = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parses a `cpq.toml` document. Missing keys take their defaults.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(ConfigError::InvalidValue(format!(
                "decimal_places: {} (must be at most {})",
                self.decimal_places, MAX_DECIMAL_PLACES
            )));
        }

        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::InvalidValue("log_filter: must not be empty".into()));
        }

        Ok(())
    }

    /// Applies `CPQ_*` overrides read through `lookup`.
    ///
    /// `lookup` is `std::env::var` in production and a map in tests.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(path) = lookup("CPQ_CATALOG") {
            self.catalog_path = Some(PathBuf::from(path));
        }

        if let Some(output) = lookup("CPQ_OUTPUT") {
            self.output = output.parse()?;
        }

        if let Some(filter) = lookup("CPQ_LOG") {
            self.log_filter = filter;
        }

        if let Some(symbol) = lookup("CPQ_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(places) = lookup("CPQ_DECIMAL_PLACES") {
            self.decimal_places = places
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("CPQ_DECIMAL_PLACES: '{}'", places)))?;
        }

        Ok(())
    }

    /// Returns the platform-specific config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "cpq", "cpq").map(|dirs| dirs.config_dir().join("cpq.toml"))
    }
}
