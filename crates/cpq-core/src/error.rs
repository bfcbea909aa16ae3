//! # Error Types
//!
//! Domain-specific error types for cpq-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cpq-core errors (this file)                                           │
//! │  ├── CpqError         - Catalog lookups, selection parsing             │
//! │  └── ValidationError  - Authoring input validation failures            │
//! │                                                                         │
//! │  cpq-cli errors (separate crate)                                       │
//! │  └── CliError         - Config, I/O, exit codes                        │
//! │                                                                         │
//! │  The pricing engine itself has NO error type: it is total over its    │
//! │  input domain and reports odd inputs numerically (negative totals).    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised around the pricing engine (never inside it).
#[derive(Debug, Error)]
pub enum CpqError {
    /// No template with this id exists in the catalog.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// The template has no preset with this id.
    #[error("Preset not found: {0}")]
    PresetNotFound(String),

    /// A selection expression could not be parsed.
    ///
    /// ## When This Occurs
    /// - `--select Size` (missing `=`)
    /// - `--select =opt-1` (empty group id)
    /// - `--select Size=` (no option ids)
    #[error("Invalid selection '{input}': {reason}")]
    InvalidSelection { input: String, reason: String },

    /// Catalog document is not valid JSON for the catalog schema.
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for catalog authoring.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A cross-field rule was violated.
    #[error("{field}: {reason}")]
    Inconsistent { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CpqError.
pub type CpqResult<T> = Result<T, CpqError>;
