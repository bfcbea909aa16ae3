//! # cpq-core: Pure Pricing Logic for Configure-Price-Quote
//!
//! This crate is the **heart** of the CPQ subsystem. It turns a product
//! template and a buyer's selections into a price, as pure functions with
//! zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CPQ Architecture                                 │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │        Callers (configurator UI, quote builder, cpq-cli)        │   │
//! │  │    load catalog ──► collect selections ──► show / save price    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cpq-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │  catalog  │  │   rules   │  │ validation│  │   │
//! │  │   │ compute_  │  │ templates │  │ tiers     │  │ authoring │  │   │
//! │  │   │  price    │  │ resolve   │  │ configure │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Pricing input/output types (modifiers, discounts, results)
//! - [`pricing`] - The pricing engine
//! - [`catalog`] - Templates, option groups, presets, selection resolution, quotes
//! - [`rules`] - Price tiers, configuration rules, publish checks
//! - [`validation`] - Catalog authoring validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use cpq_core::pricing::compute_price;
//! use cpq_core::{Discount, OptionModifier, PriceInput, PriceModifier};
//!
//! let input = PriceInput::new(100.0)
//!     .with_option(OptionModifier::new("g1", "Extras", "o1", "Extra", PriceModifier::Add(50.0)))
//!     .with_quantity(3);
//!
//! let result = compute_price(&input);
//! assert_eq!(result.per_unit_price, 150.0);
//! assert_eq!(result.total, 450.0);
//!
//! // Discounts larger than the subtotal are NOT clamped
//! let result = compute_price(&PriceInput::new(100.0).with_discount(Discount::fixed_amount(200.0)));
//! assert_eq!(result.total, -100.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod pricing;
pub mod rules;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{quote, Catalog, ProductTemplate, Quote, Selection, Selections, TemplatePreset};
pub use error::{CpqError, CpqResult, ValidationError};
pub use pricing::compute_price;
pub use rules::{ValidationReport, ValidationMessage};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Quantity used when none (or zero) is given.
pub const DEFAULT_QUANTITY: i64 = 1;

/// Maximum length of template, group, option and rule names.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length of an option SKU.
pub const MAX_SKU_LENGTH: usize = 100;

/// Maximum length of a rule's custom error message.
pub const MAX_ERROR_MESSAGE_LENGTH: usize = 500;
