//! # CLI Error Types
//!
//! Everything that can stop a `cpq` command before it produces a result.
//!
//! ## Exit Codes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Exit Codes                                     │
//! │                                                                         │
//! │  0  command ran, result is valid                                       │
//! │  1  command failed (CliError): bad config, unreadable file, bad JSON   │
//! │  2  command ran, but the configuration or template is invalid          │
//! │     (result is still printed)                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use cpq_core::CpqError;
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `cpq` commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cpq(#[from] CpqError),

    /// A file (or stdin) could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Price input is not valid JSON for the input schema.
    #[error("Invalid price input: {0}")]
    Input(#[source] serde_json::Error),

    /// Writing JSON output failed.
    #[error("Failed to serialize output: {0}")]
    Output(#[source] serde_json::Error),

    /// Neither `--catalog`, `CPQ_CATALOG` nor `catalog_path` was given.
    #[error("No catalog given: pass --catalog, set CPQ_CATALOG or catalog_path in cpq.toml")]
    NoCatalog,
}

pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Machine-readable code for `--json` error output.
    pub fn code(&self) -> ErrorCode {
        match self {
            CliError::Config(_) => ErrorCode::ConfigError,
            CliError::Cpq(CpqError::TemplateNotFound(_) | CpqError::PresetNotFound(_)) => ErrorCode::NotFound,
            CliError::Cpq(CpqError::InvalidSelection { .. }) => ErrorCode::InvalidSelection,
            CliError::Cpq(CpqError::Catalog(_)) => ErrorCode::InvalidCatalog,
            CliError::Cpq(CpqError::Validation(_)) => ErrorCode::ValidationError,
            CliError::Read { .. } => ErrorCode::IoError,
            CliError::Input(_) => ErrorCode::InvalidInput,
            CliError::Output(_) => ErrorCode::Internal,
            CliError::NoCatalog => ErrorCode::NoCatalog,
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

/// Error codes for `--json` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ConfigError,
    NotFound,
    InvalidSelection,
    InvalidCatalog,
    InvalidInput,
    ValidationError,
    IoError,
    NoCatalog,
    Internal,
}

/// What `--json` prints to stderr when a command fails.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let err = CliError::from(CpqError::TemplateNotFound("t-1".into()));
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.to_string(), "Template not found: t-1");

        assert_eq!(CliError::NoCatalog.code(), ErrorCode::NoCatalog);

        let err = CliError::from(CpqError::PresetNotFound("pro".into()));
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[test]
    fn test_report_serialization() {
        let report = CliError::from(ConfigError::InvalidValue("CPQ_OUTPUT".into())).report();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["code"], "CONFIG_ERROR");
        assert_eq!(json["message"], "Configuration error: Invalid value for CPQ_OUTPUT");
    }
}
