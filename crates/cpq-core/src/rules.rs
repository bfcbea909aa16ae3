//! # Configuration Rules
//!
//! Template rules and the checks built on them: price tier discounts,
//! configuration validation, and the pre-publish check.
//!
//! ## Rule Types
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  IF (any of)                 rule_type      THEN                        │
//! │  ─────────────────────────   ───────────    ──────────────────────────  │
//! │  if_option_id is selected    requires       then option / group must    │
//! │  if_group_id has a choice                   be selected (optionally     │
//! │  if_product_id is selected                  from allowed_options)       │
//! │                              conflicts      then option must NOT be     │
//! │                                             selected; it is disabled    │
//! │                              hides          hide then option / group    │
//! │                              auto_select    preselect then option in    │
//! │                                             then group                  │
//! │  (no condition)              price_tier     discount once quantity      │
//! │                                             reaches quantity_min        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rules run in ascending `priority`; inactive rules are ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::catalog::{OptionGroup, ProductTemplate, SelectionType, Selections};
use crate::types::{Discount, DiscountKind};

/// Rule id used for messages raised by built-in checks.
pub const SYSTEM_RULE_ID: &str = "system";

/// Rule id used for messages raised by the publish check.
pub const PUBLISH_RULE_ID: &str = "publish";

// =============================================================================
// Configuration Rule
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    Requires,
    Conflicts,
    Hides,
    AutoSelect,
    PriceTier,
}

fn default_true() -> bool {
    true
}

/// A rule attached to a product template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationRule {
    pub id: String,
    pub rule_type: RuleType,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Shown instead of the rule name when the rule fails.
    #[serde(default)]
    pub error_message: Option<String>,

    #[serde(default)]
    pub if_option_id: Option<String>,
    #[serde(default)]
    pub if_group_id: Option<String>,
    /// Product-backed option (category groups) that triggers the rule.
    #[serde(default)]
    pub if_product_id: Option<String>,
    #[serde(default)]
    pub then_option_id: Option<String>,
    #[serde(default)]
    pub then_group_id: Option<String>,
    #[serde(default)]
    pub then_product_id: Option<String>,
    /// For `requires` on a group: the options that satisfy it.
    #[serde(default)]
    pub allowed_options: Vec<String>,

    /// For `price_tier`: smallest quantity the tier applies to.
    #[serde(default)]
    pub quantity_min: Option<i64>,
    #[serde(default)]
    pub discount_type: Option<DiscountKind>,
    #[serde(default)]
    pub discount_value: Option<f64>,

    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl ConfigurationRule {
    pub fn new(id: impl Into<String>, name: impl Into<String>, rule_type: RuleType) -> Self {
        ConfigurationRule {
            id: id.into(),
            rule_type,
            name: name.into(),
            description: None,
            error_message: None,
            if_option_id: None,
            if_group_id: None,
            if_product_id: None,
            then_option_id: None,
            then_group_id: None,
            then_product_id: None,
            allowed_options: Vec::new(),
            quantity_min: None,
            discount_type: None,
            discount_value: None,
            priority: 0,
            is_active: true,
        }
    }

    /// A quantity break: `kind`/`value` discount from `quantity_min` units.
    pub fn price_tier(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity_min: i64,
        kind: DiscountKind,
        value: f64,
    ) -> Self {
        ConfigurationRule {
            quantity_min: Some(quantity_min),
            discount_type: Some(kind),
            discount_value: Some(value),
            ..ConfigurationRule::new(id, name, RuleType::PriceTier)
        }
    }

    pub fn when_option(mut self, option_id: impl Into<String>) -> Self {
        self.if_option_id = Some(option_id.into());
        self
    }

    pub fn when_group(mut self, group_id: impl Into<String>) -> Self {
        self.if_group_id = Some(group_id.into());
        self
    }

    pub fn when_product(mut self, product_id: impl Into<String>) -> Self {
        self.if_product_id = Some(product_id.into());
        self
    }

    pub fn then_option(mut self, option_id: impl Into<String>) -> Self {
        self.then_option_id = Some(option_id.into());
        self
    }

    pub fn then_group(mut self, group_id: impl Into<String>) -> Self {
        self.then_group_id = Some(group_id.into());
        self
    }

    pub fn with_allowed_options(mut self, options: &[&str]) -> Self {
        self.allowed_options = options.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    fn failure_message(&self) -> String {
        self.error_message.clone().unwrap_or_else(|| self.name.clone())
    }

    /// True when any IF target is satisfied by `selections`.
    fn condition_met(&self, selections: &Selections) -> bool {
        is_option_selected(self.if_option_id.as_deref(), selections)
            || is_group_selected(self.if_group_id.as_deref(), selections)
            || is_option_selected(self.if_product_id.as_deref(), selections)
    }
}

// =============================================================================
// Selection Helpers
// =============================================================================

/// True when `option_id` is selected in any group.
pub fn is_option_selected(option_id: Option<&str>, selections: &Selections) -> bool {
    let Some(option_id) = option_id else {
        return false;
    };
    selections
        .values()
        .any(|selection| selection.contains(option_id))
}

/// True when `group_id` has a non-empty selection.
pub fn is_group_selected(group_id: Option<&str>, selections: &Selections) -> bool {
    group_id
        .and_then(|id| selections.get(id))
        .is_some_and(|selection| !selection.is_empty())
}

// =============================================================================
// Price Tiers
// =============================================================================

/// Picks the quantity-break discount for `quantity`.
///
/// Among active `price_tier` rules with `1 <= quantity_min <= quantity`, the
/// highest `quantity_min` wins; on a tie the earlier rule wins. A tier with
/// a zero minimum is never applied. A tier with no discount type, or a
/// zero/missing value, yields no discount.
///
/// ## User Workflow
/// ```text
/// Tiers: "5+" 10%, "10+" 20%
///
/// quantity 3  ──► no tier       ──► None
/// quantity 7  ──► "5+"          ──► Percentage(10)
/// quantity 12 ──► "10+" (best)  ──► Percentage(20)
/// ```
pub fn select_tier_discount(rules: &[ConfigurationRule], quantity: i64) -> Option<Discount> {
    let tier = rules
        .iter()
        .filter(|rule| rule.is_active && rule.rule_type == RuleType::PriceTier)
        .filter_map(|rule| rule.quantity_min.map(|min| (min, rule)))
        .filter(|(min, _)| *min > 0 && *min <= quantity)
        .fold(None::<(i64, &ConfigurationRule)>, |best, (min, rule)| match best {
            Some((best_min, _)) if best_min >= min => best,
            _ => Some((min, rule)),
        })
        .map(|(_, rule)| rule)?;

    let kind = tier.discount_type?;
    let value = tier.discount_value.filter(|value| *value != 0.0)?;

    debug!(rule_id = %tier.id, %kind, value, quantity, "Price tier selected");
    Some(Discount {
        kind,
        value,
        name: Some(tier.name.clone()),
    })
}

// =============================================================================
// Validation Report
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// One finding of a configuration or publish check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMessage {
    pub rule_id: String,
    pub rule_name: String,
    pub message: String,
    pub group_id: Option<String>,
    pub option_id: Option<String>,
    pub severity: Severity,
}

impl ValidationMessage {
    fn error(rule_id: &str, rule_name: &str, message: impl Into<String>) -> Self {
        ValidationMessage {
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            message: message.into(),
            group_id: None,
            option_id: None,
            severity: Severity::Error,
        }
    }

    fn warning(rule_id: &str, rule_name: &str, message: impl Into<String>) -> Self {
        ValidationMessage {
            severity: Severity::Warning,
            ..ValidationMessage::error(rule_id, rule_name, message)
        }
    }

    fn in_group(mut self, group_id: Option<&str>) -> Self {
        self.group_id = group_id.map(str::to_string);
        self
    }

    fn for_option(mut self, option_id: Option<&str>) -> Self {
        self.option_id = option_id.map(str::to_string);
        self
    }
}

/// Outcome of a configuration or publish check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationMessage>,
    pub warnings: Vec<ValidationMessage>,
    /// Group id → option the configurator should preselect.
    pub auto_selections: BTreeMap<String, String>,
    pub hidden_options: Vec<String>,
    pub hidden_groups: Vec<String>,
    pub disabled_options: Vec<String>,
}

impl ValidationReport {
    fn finish(mut self) -> Self {
        self.is_valid = self.errors.is_empty();
        self
    }
}

fn push_unique(list: &mut Vec<String>, id: &str) {
    if !list.iter().any(|existing| existing == id) {
        list.push(id.to_string());
    }
}

// =============================================================================
// Configuration Validation
// =============================================================================

/// Checks a buyer's selections against a template's groups and rules.
///
/// ## Checks, in order
/// 1. Every required group has a selection.
/// 2. Multiple-choice groups respect `min_selections` / `max_selections`.
/// 3. Active rules, by ascending priority, whose IF condition holds.
pub fn validate_configuration(
    groups: &[OptionGroup],
    selections: &Selections,
    rules: &[ConfigurationRule],
) -> ValidationReport {
    let mut report = ValidationReport::default();

    for group in groups {
        if group.is_required && !is_group_selected(Some(group.id.as_str()), selections) {
            report.errors.push(
                ValidationMessage::error(
                    SYSTEM_RULE_ID,
                    "Required group",
                    format!("{} is required", group.name),
                )
                .in_group(Some(group.id.as_str())),
            );
        }
    }

    for group in groups {
        if group.selection_type != SelectionType::Multiple {
            continue;
        }
        let Some(selection) = selections.get(&group.id).filter(|s| !s.is_empty()) else {
            continue;
        };

        let count = selection.count();
        if count < group.min_selections as usize {
            report.errors.push(
                ValidationMessage::error(
                    SYSTEM_RULE_ID,
                    "Min selections",
                    format!(
                        "{} requires at least {} selection(s)",
                        group.name, group.min_selections
                    ),
                )
                .in_group(Some(group.id.as_str())),
            );
        }

        if let Some(max) = group.max_selections.filter(|max| *max > 0) {
            if count > max as usize {
                report.errors.push(
                    ValidationMessage::error(
                        SYSTEM_RULE_ID,
                        "Max selections",
                        format!("{} allows at most {} selection(s)", group.name, max),
                    )
                    .in_group(Some(group.id.as_str())),
                );
            }
        }
    }

    let mut active: Vec<&ConfigurationRule> = rules.iter().filter(|rule| rule.is_active).collect();
    active.sort_by_key(|rule| rule.priority);

    for rule in active {
        if !rule.condition_met(selections) {
            continue;
        }
        apply_rule(rule, groups, selections, &mut report);
    }

    let report = report.finish();
    debug!(
        is_valid = report.is_valid,
        errors = report.errors.len(),
        "Configuration validated"
    );
    report
}

fn apply_rule(
    rule: &ConfigurationRule,
    groups: &[OptionGroup],
    selections: &Selections,
    report: &mut ValidationReport,
) {
    let then_option = rule.then_option_id.as_deref();
    let then_group = rule.then_group_id.as_deref();
    let failed = || {
        ValidationMessage::error(&rule.id, &rule.name, rule.failure_message()).in_group(then_group)
    };

    match rule.rule_type {
        RuleType::Requires => {
            if then_option.is_some() && !is_option_selected(then_option, selections) {
                report.errors.push(failed().for_option(then_option));
            }

            if let Some(group_id) = then_group {
                match selections.get(group_id).filter(|s| !s.is_empty()) {
                    None => report.errors.push(failed()),
                    Some(selection) if !rule.allowed_options.is_empty() => {
                        let disallowed = selection
                            .ids()
                            .iter()
                            .filter(|id| !id.is_empty())
                            .find(|id| !rule.allowed_options.contains(*id));
                        if let Some(option_id) = disallowed {
                            report.errors.push(failed().for_option(Some(option_id.as_str())));
                        }
                    }
                    Some(_) => {}
                }
            }
        }
        RuleType::Conflicts => {
            if let Some(option_id) = then_option {
                if is_option_selected(Some(option_id), selections) {
                    let owning_group = groups
                        .iter()
                        .find(|group| group.has_option(option_id))
                        .map(|group| group.id.as_str());

                    report.errors.push(
                        ValidationMessage::error(&rule.id, &rule.name, rule.failure_message())
                            .in_group(owning_group)
                            .for_option(Some(option_id)),
                    );
                    push_unique(&mut report.disabled_options, option_id);
                }
            }
        }
        RuleType::Hides => {
            if let Some(option_id) = then_option {
                push_unique(&mut report.hidden_options, option_id);
            }
            if let Some(group_id) = then_group {
                push_unique(&mut report.hidden_groups, group_id);
            }
        }
        RuleType::AutoSelect => {
            if let (Some(option_id), Some(group_id)) = (then_option, then_group) {
                report
                    .auto_selections
                    .insert(group_id.to_string(), option_id.to_string());
            }
        }
        // Price tiers affect pricing only; see `select_tier_discount`.
        RuleType::PriceTier => {}
    }
}

// =============================================================================
// Publish Check
// =============================================================================

/// Checks that a template is ready to be made active.
///
/// ## Rules
/// - At least one option group (error)
/// - Every required group has at least one option (error)
/// - At least one configuration rule (warning)
pub fn validate_for_publish(template: &ProductTemplate) -> ValidationReport {
    let mut report = ValidationReport::default();

    if template.option_groups.is_empty() {
        report.errors.push(ValidationMessage::error(
            PUBLISH_RULE_ID,
            "No option groups",
            "Template must have at least one option group",
        ));
    }

    for group in &template.option_groups {
        if group.is_required && group.options.is_empty() {
            report.errors.push(
                ValidationMessage::error(
                    PUBLISH_RULE_ID,
                    "Empty required group",
                    format!("Required group \"{}\" has no options", group.name),
                )
                .in_group(Some(group.id.as_str())),
            );
        }
    }

    if template.rules.is_empty() {
        report.warnings.push(ValidationMessage::warning(
            PUBLISH_RULE_ID,
            "No rules",
            "Template has no configuration rules",
        ));
    }

    report.finish()
}

// =============================================================================
// Unit Tests
// =============================================================================
