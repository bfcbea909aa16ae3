//! # Validation Module
//!
//! Input validation for catalog authoring: templates, option groups,
//! options and rules as they are created or imported.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Authoring (THIS MODULE)                                      │
//! │  ├── Field checks: names, lengths, references, non-negative base price │
//! │  └── Cross-field checks: selection bounds, category sources            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Configuration (rules module)                                 │
//! │  ├── Required groups, min/max selections                               │
//! │  └── requires / conflicts / hides / auto_select                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing (pricing module)                                     │
//! │  └── NO validation: every input is priced literally                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cpq_core::validation::{validate_base_price, validate_name};
//!
//! assert!(validate_name("name", "Standing Desk").is_ok());
//! assert!(validate_base_price(-1.0).is_err());
//! ```

use std::fmt;

use crate::catalog::{CatalogOption, OptionGroup, ProductTemplate, SelectionType, SourceType, TemplatePreset};
use crate::error::ValidationError;
use crate::rules::{ConfigurationRule, RuleType};
use crate::{MAX_ERROR_MESSAGE_LENGTH, MAX_NAME_LENGTH, MAX_SKU_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a display name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 200 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates an optional SKU (at most 100 characters).
pub fn validate_sku(sku: Option<&str>) -> ValidationResult<()> {
    match sku {
        Some(sku) if sku.chars().count() > MAX_SKU_LENGTH => Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: MAX_SKU_LENGTH,
        }),
        _ => Ok(()),
    }
}

/// Validates a template base price.
///
/// ## Rules
/// - Must be a finite number
/// - Must be non-negative (zero is allowed)
///
/// ## Example
/// ```rust
/// use cpq_core::validation::validate_base_price;
///
/// assert!(validate_base_price(1099.0).is_ok());
/// assert!(validate_base_price(0.0).is_ok());
/// assert!(validate_base_price(-100.0).is_err());
/// assert!(validate_base_price(f64::NAN).is_err());
/// ```
pub fn validate_base_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "basePrice".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::Negative {
            field: "basePrice".to_string(),
        });
    }

    Ok(())
}

/// Validates a UUID string.
///
/// ## Example
/// ```rust
/// use cpq_core::validation::validate_uuid;
///
/// assert!(validate_uuid("id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("id", "not-a-uuid").is_err());
/// ```
pub fn validate_uuid(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates a reference to another entity, when one is set.
fn validate_reference(field: &str, id: Option<&str>) -> ValidationResult<()> {
    match id {
        Some(id) => validate_uuid(field, id),
        None => Ok(()),
    }
}

/// Validates an option: name, SKU, linked product and a finite modifier
/// amount.
///
/// The option's own id is assigned by storage and is not checked.
pub fn validate_option(option: &CatalogOption) -> ValidationResult<()> {
    validate_name("name", &option.name)?;
    validate_sku(option.sku.as_deref())?;
    validate_reference("productId", option.product_id.as_deref())?;

    if !option.price_modifier_amount.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "priceModifierAmount".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    Ok(())
}

/// Validates an option group's own fields (not its options).
///
/// ## Rules
/// - `maxSelections`, when set, is at least 1
/// - For `multiple` groups, `maxSelections >= minSelections`
/// - `category` groups name a source category and a price mode
pub fn validate_option_group(group: &OptionGroup) -> ValidationResult<()> {
    validate_name("name", &group.name)?;

    if group.max_selections == Some(0) {
        return Err(ValidationError::OutOfRange {
            field: "maxSelections".to_string(),
            min: 1,
            max: u32::MAX as i64,
        });
    }

    if group.selection_type == SelectionType::Multiple && group.min_selections > 0 {
        if let Some(max) = group.max_selections {
            if max < group.min_selections {
                return Err(ValidationError::Inconsistent {
                    field: "maxSelections".to_string(),
                    reason: "Max selections must be ≥ min selections".to_string(),
                });
            }
        }
    }

    if group.source_type == SourceType::Category {
        if group.source_category_id.as_deref().map_or(true, str::is_empty) {
            return Err(ValidationError::Inconsistent {
                field: "sourceCategoryId".to_string(),
                reason: "Category source requires a source category".to_string(),
            });
        }
        if let Some(category_id) = group.source_category_id.as_deref() {
            validate_uuid("sourceCategoryId", category_id)?;
        }
        if group.category_price_mode.is_none() {
            return Err(ValidationError::Inconsistent {
                field: "categoryPriceMode".to_string(),
                reason: "Category source requires a price mode".to_string(),
            });
        }
    }

    Ok(())
}

/// Validates a configuration rule.
///
/// ## Rules
/// - Name 1..=200 characters, error message at most 500
/// - Logic rules need at least one IF condition and one THEN target
/// - Every IF/THEN reference that is set is a UUID
/// - Price tiers need a minimum quantity of at least 1 and a discount type
pub fn validate_rule(rule: &ConfigurationRule) -> ValidationResult<()> {
    validate_name("name", &rule.name)?;

    validate_reference("ifOptionId", rule.if_option_id.as_deref())?;
    validate_reference("ifGroupId", rule.if_group_id.as_deref())?;
    validate_reference("ifProductId", rule.if_product_id.as_deref())?;
    validate_reference("thenOptionId", rule.then_option_id.as_deref())?;
    validate_reference("thenGroupId", rule.then_group_id.as_deref())?;
    validate_reference("thenProductId", rule.then_product_id.as_deref())?;

    if let Some(message) = rule.error_message.as_deref() {
        if message.chars().count() > MAX_ERROR_MESSAGE_LENGTH {
            return Err(ValidationError::TooLong {
                field: "errorMessage".to_string(),
                max: MAX_ERROR_MESSAGE_LENGTH,
            });
        }
    }

    if rule.rule_type == RuleType::PriceTier {
        match rule.quantity_min {
            None => {
                return Err(ValidationError::Required {
                    field: "quantityMin".to_string(),
                })
            }
            Some(min) if min < 1 => {
                return Err(ValidationError::OutOfRange {
                    field: "quantityMin".to_string(),
                    min: 1,
                    max: i64::MAX,
                })
            }
            Some(_) => {}
        }
        if rule.discount_type.is_none() {
            return Err(ValidationError::Required {
                field: "discountType".to_string(),
            });
        }
        return Ok(());
    }

    let has_condition =
        rule.if_option_id.is_some() || rule.if_group_id.is_some() || rule.if_product_id.is_some();
    if !has_condition {
        return Err(ValidationError::Inconsistent {
            field: "if".to_string(),
            reason: "At least one IF condition is required".to_string(),
        });
    }

    let has_target = rule.then_option_id.is_some()
        || rule.then_group_id.is_some()
        || rule.then_product_id.is_some();
    if !has_target {
        return Err(ValidationError::Inconsistent {
            field: "then".to_string(),
            reason: "At least one THEN target is required".to_string(),
        });
    }

    Ok(())
}

/// Validates a preset: name, and group/option references in its selections.
pub fn validate_preset(preset: &TemplatePreset) -> ValidationResult<()> {
    validate_name("name", &preset.name)?;

    for (group_id, selection) in &preset.selected_options {
        validate_uuid("selectedOptions", group_id)?;
        for option_id in selection.ids() {
            validate_uuid("selectedOptions", option_id)?;
        }
    }

    Ok(())
}

// =============================================================================
// Template Validation
// =============================================================================

/// One validation failure and where in the template it was found.
#[derive(Debug)]
pub struct Finding {
    /// Path such as `template`, `group "Size"`, `group "Size" / option "XL"`.
    pub location: String,
    pub error: ValidationError,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.error)
    }
}

/// Runs every authoring check over a template and collects all failures.
///
/// Each entity reports at most its first failure, so one bad group does
/// not hide problems in the next.
pub fn validate_template(template: &ProductTemplate) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut check = |location: String, result: ValidationResult<()>| {
        if let Err(error) = result {
            findings.push(Finding { location, error });
        }
    };

    check(
        "template".to_string(),
        validate_name("name", &template.name)
            .and_then(|_| validate_base_price(template.base_price)),
    );

    for group in &template.option_groups {
        let group_location = format!("group \"{}\"", group.name);
        check(group_location.clone(), validate_option_group(group));

        for option in &group.options {
            check(
                format!("{} / option \"{}\"", group_location, option.name),
                validate_option(option),
            );
        }
    }

    for rule in &template.rules {
        check(format!("rule \"{}\"", rule.name), validate_rule(rule));
    }

    for preset in &template.presets {
        check(format!("preset \"{}\"", preset.name), validate_preset(preset));
    }

    findings
}

// =============================================================================
// Unit Tests
// =============================================================================
