//! # Catalog
//!
//! Product templates, their option groups, and the bridge from a buyer's
//! selections to the ordered modifier list the pricing engine consumes.
//!
//! ## Quote Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Quote Flow                                     │
//! │                                                                         │
//! │  ProductTemplate ──┐                                                    │
//! │  (base price,      │                                                    │
//! │   groups, rules)   ├──► resolve_selections() ──► [OptionModifier]       │
//! │                    │                                   │                │
//! │  Selections ───────┤                                   ▼                │
//! │  {group: option}   ├──► select_tier_discount() ──► compute_price()      │
//! │                    │                                   │                │
//! │  quantity ─────────┘                                   ▼                │
//! │                    └──► validate_configuration()   PriceResult          │
//! │                                   │                    │                │
//! │                                   └────────► Quote ◄───┘                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog is read-only input here. Loading it from storage is the
//! caller's job; [`Catalog::from_json`] only parses an already-read document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::error::{CpqError, CpqResult};
use crate::pricing::{compute_price, effective_quantity};
use crate::rules::{select_tier_discount, validate_configuration, ConfigurationRule, ValidationReport};
use crate::types::{ModifierType, OptionModifier, PriceInput, PriceModifier, PriceResult};

// =============================================================================
// Enumerations
// =============================================================================

/// How the configurator presents a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    SinglePage,
    Wizard,
}

/// Whether a group accepts one option or several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SelectionType {
    #[default]
    Single,
    Multiple,
}

/// Where a group's options come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Options are authored by hand with their own modifiers.
    #[default]
    Manual,
    /// Options are products of a category; each adds its list price.
    Category,
}

/// Price basis for category-sourced groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CategoryPriceMode {
    ListPrice,
    CostPlus,
    Explicit,
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Catalog Option
// =============================================================================

/// A selectable choice inside an option group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogOption {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    /// Linked product (category-sourced options).
    #[serde(default)]
    pub product_id: Option<String>,
    pub price_modifier_type: ModifierType,
    /// For category-sourced options this is the product's list price.
    #[serde(default)]
    pub price_modifier_amount: f64,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub display_order: i32,
}

impl CatalogOption {
    /// The modifier this option contributes inside a group of `source`.
    ///
    /// Category options always add their amount: the stored type only
    /// applies to hand-authored options.
    pub fn modifier(&self, source: SourceType) -> PriceModifier {
        match source {
            SourceType::Manual => {
                PriceModifier::new(self.price_modifier_type, self.price_modifier_amount)
            }
            SourceType::Category => PriceModifier::Add(self.price_modifier_amount),
        }
    }
}

// =============================================================================
// Option Group
// =============================================================================

/// A configuration dimension (e.g., "Size") with its options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OptionGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub selection_type: SelectionType,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub min_selections: u32,
    #[serde(default)]
    pub max_selections: Option<u32>,
    #[serde(default)]
    pub source_type: SourceType,
    #[serde(default)]
    pub source_category_id: Option<String>,
    #[serde(default)]
    pub category_price_mode: Option<CategoryPriceMode>,
    #[serde(default)]
    pub options: Vec<CatalogOption>,
}

impl OptionGroup {
    pub fn find_option(&self, option_id: &str) -> Option<&CatalogOption> {
        self.options.iter().find(|option| option.id == option_id)
    }

    pub fn has_option(&self, option_id: &str) -> bool {
        self.find_option(option_id).is_some()
    }
}

// =============================================================================
// Product Template
// =============================================================================

/// A configurable product: base price, option groups and rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub base_price: f64,
    #[serde(default)]
    pub display_mode: DisplayMode,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub option_groups: Vec<OptionGroup>,
    #[serde(default)]
    pub rules: Vec<ConfigurationRule>,
    #[serde(default)]
    pub presets: Vec<TemplatePreset>,
}

impl ProductTemplate {
    pub fn group(&self, group_id: &str) -> Option<&OptionGroup> {
        self.option_groups.iter().find(|group| group.id == group_id)
    }

    /// Groups sorted by `display_order`; ties keep declaration order.
    pub fn groups_in_order(&self) -> Vec<&OptionGroup> {
        let mut groups: Vec<&OptionGroup> = self.option_groups.iter().collect();
        groups.sort_by_key(|group| group.display_order);
        groups
    }

    /// Looks up a preset by id.
    pub fn preset(&self, preset_id: &str) -> CpqResult<&TemplatePreset> {
        self.presets
            .iter()
            .find(|preset| preset.id == preset_id)
            .ok_or_else(|| CpqError::PresetNotFound(preset_id.to_string()))
    }

    /// First available default option of every group that has one.
    pub fn default_selections(&self) -> Selections {
        self.option_groups
            .iter()
            .filter_map(|group| {
                group
                    .options
                    .iter()
                    .find(|option| option.is_default && option.is_available)
                    .map(|option| (group.id.clone(), Selection::One(option.id.clone())))
            })
            .collect()
    }
}

// =============================================================================
// Template Preset
// =============================================================================

/// A named, ready-made configuration of a template ("Starter", "Pro").
///
/// Applying a preset replaces the current selections wholesale; the buyer
/// can then change individual groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePreset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub selected_options: Selections,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

// =============================================================================
// Catalog
// =============================================================================

/// A set of product templates, typically one tenant's CPQ catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub templates: Vec<ProductTemplate>,
}

impl Catalog {
    /// Parses a catalog document.
    pub fn from_json(json: &str) -> CpqResult<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        debug!(templates = catalog.templates.len(), "Parsed catalog");
        Ok(catalog)
    }

    /// Looks up a template by id.
    pub fn template(&self, template_id: &str) -> CpqResult<&ProductTemplate> {
        self.templates
            .iter()
            .find(|template| template.id == template_id)
            .ok_or_else(|| CpqError::TemplateNotFound(template_id.to_string()))
    }
}

// =============================================================================
// Selections
// =============================================================================

/// The option(s) chosen in one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum Selection {
    One(String),
    Many(Vec<String>),
}

impl Selection {
    /// Selected option ids, in selection order.
    pub fn ids(&self) -> &[String] {
        match self {
            Selection::One(id) => std::slice::from_ref(id),
            Selection::Many(ids) => ids,
        }
    }

    /// Number of non-empty ids.
    pub fn count(&self) -> usize {
        self.ids().iter().filter(|id| !id.is_empty()).count()
    }

    /// An empty string or an empty list counts as "nothing selected".
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn contains(&self, option_id: &str) -> bool {
        self.ids().iter().any(|id| id == option_id)
    }
}

/// Group id → selected option(s).
pub type Selections = BTreeMap<String, Selection>;

/// Parses `GROUP=OPTION[,OPTION...]`.
///
/// ## Example
/// ```rust
/// use cpq_core::catalog::{parse_selection, Selection};
///
/// let (group, selection) = parse_selection("size=large").unwrap();
/// assert_eq!(group, "size");
/// assert_eq!(selection, Selection::One("large".to_string()));
///
/// let (_, selection) = parse_selection("extras=case,film").unwrap();
/// assert_eq!(selection.ids().len(), 2);
///
/// assert!(parse_selection("size").is_err());
/// ```
pub fn parse_selection(expr: &str) -> CpqResult<(String, Selection)> {
    let invalid = |reason: &str| CpqError::InvalidSelection {
        input: expr.to_string(),
        reason: reason.to_string(),
    };

    let (group, options) = expr
        .split_once('=')
        .ok_or_else(|| invalid("expected GROUP=OPTION[,OPTION...]"))?;

    let group = group.trim();
    if group.is_empty() {
        return Err(invalid("group id is empty"));
    }

    let mut ids: Vec<String> = options
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    let selection = match ids.len() {
        0 => return Err(invalid("no option ids")),
        1 => Selection::One(ids.remove(0)),
        _ => Selection::Many(ids),
    };

    Ok((group.to_string(), selection))
}

// =============================================================================
// Resolution
// =============================================================================

/// Turns selections into the ordered modifier list for [`compute_price`].
///
/// ## Ordering
/// Groups are walked in display order, and options within a group in the
/// order they were selected. The order of `selections` itself never matters,
/// so the same configuration always prices the same way even when it
/// contains several `replace` options.
///
/// Selected ids that are not in the catalog are skipped with a warning, as
/// are selections for groups the template does not have.
pub fn resolve_selections(template: &ProductTemplate, selections: &Selections) -> Vec<OptionModifier> {
    for group_id in selections.keys() {
        if template.group(group_id).is_none() {
            warn!(template_id = %template.id, %group_id, "Selection for unknown group skipped");
        }
    }

    let mut options = Vec::new();
    for group in template.groups_in_order() {
        let Some(selection) = selections.get(&group.id) else {
            continue;
        };

        for option_id in selection.ids().iter().filter(|id| !id.is_empty()) {
            match group.find_option(option_id) {
                Some(option) => options.push(OptionModifier::new(
                    group.id.clone(),
                    group.name.clone(),
                    option.id.clone(),
                    option.name.clone(),
                    option.modifier(group.source_type),
                )),
                None => warn!(
                    template_id = %template.id,
                    group_id = %group.id,
                    %option_id,
                    "Selected option not in catalog, skipped"
                ),
            }
        }
    }

    debug!(template_id = %template.id, resolved = options.len(), "Resolved selections");
    options
}

// =============================================================================
// Quote
// =============================================================================

/// Price and configuration check for one template and set of selections.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub template_id: String,
    pub template_name: String,
    pub selections: Selections,
    pub validation: ValidationReport,
    pub price: PriceResult,
}

/// Prices a configuration of `template`.
///
/// `auto_select` rules fire first: their picks replace the selection of
/// the target group, and the merged selections are what gets validated,
/// priced and returned. The price tier discount is chosen from the
/// template's rules for the effective quantity. An invalid configuration is
/// still priced: whether to accept it is the caller's call.
pub fn quote(template: &ProductTemplate, selections: &Selections, quantity: Option<i64>) -> Quote {
    let quantity = effective_quantity(quantity);
    let (selections, validation) = apply_auto_selections(template, selections);

    let input = PriceInput {
        base_price: template.base_price,
        options: resolve_selections(template, &selections),
        quantity: Some(quantity),
        discount: select_tier_discount(&template.rules, quantity),
    };

    if !validation.is_valid {
        debug!(
            template_id = %template.id,
            errors = validation.errors.len(),
            "Configuration has validation errors"
        );
    }

    Quote {
        template_id: template.id.clone(),
        template_name: template.name.clone(),
        selections,
        validation,
        price: compute_price(&input),
    }
}

/// Validates, merges the resulting auto-selections and re-validates until
/// the selections settle.
///
/// An auto-selection can satisfy the condition of another rule, so one
/// pass is not always enough. Rules that fight over a group would never
/// settle; the pass count is capped at the number of rules.
fn apply_auto_selections(template: &ProductTemplate, selections: &Selections) -> (Selections, ValidationReport) {
    let mut current = selections.clone();
    let mut validation = validate_configuration(&template.option_groups, &current, &template.rules);

    for _ in 0..template.rules.len() {
        let mut changed = false;
        for (group_id, option_id) in &validation.auto_selections {
            let selection = Selection::One(option_id.clone());
            if current.get(group_id) != Some(&selection) {
                debug!(template_id = %template.id, %group_id, %option_id, "Auto-selected option");
                current.insert(group_id.clone(), selection);
                changed = true;
            }
        }

        if !changed {
            break;
        }
        validation = validate_configuration(&template.option_groups, &current, &template.rules);
    }

    (current, validation)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleType;
    use crate::types::DiscountKind;

    fn option(id: &str, kind: ModifierType, amount: f64) -> CatalogOption {
        CatalogOption {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: None,
            sku: None,
            product_id: None,
            price_modifier_type: kind,
            price_modifier_amount: amount,
            is_default: false,
            is_available: true,
            display_order: 0,
        }
    }

    fn group(id: &str, order: i32, options: Vec<CatalogOption>) -> OptionGroup {
        OptionGroup {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: None,
            display_order: order,
            selection_type: SelectionType::Single,
            is_required: false,
            min_selections: 0,
            max_selections: None,
            source_type: SourceType::Manual,
            source_category_id: None,
            category_price_mode: None,
            options,
        }
    }

    fn template() -> ProductTemplate {
        let mut extras = group(
            "extras",
            2,
            vec![
                option("case", ModifierType::Add, 50.0),
                option("film", ModifierType::Add, 30.0),
            ],
        );
        extras.selection_type = SelectionType::Multiple;

        ProductTemplate {
            id: "tmpl-1".to_string(),
            name: "Laptop".to_string(),
            description: None,
            base_price: 1000.0,
            display_mode: DisplayMode::SinglePage,
            is_active: true,
            option_groups: vec![
                extras,
                group("size", 0, vec![option("large", ModifierType::Add, 200.0)]),
                group("finish", 1, vec![option("gold", ModifierType::Multiply, 2.0)]),
            ],
            rules: Vec::new(),
            presets: Vec::new(),
        }
    }

    fn selections(pairs: &[(&str, Selection)]) -> Selections {
        pairs
            .iter()
            .map(|(group, selection)| (group.to_string(), selection.clone()))
            .collect()
    }

    fn one(id: &str) -> Selection {
        Selection::One(id.to_string())
    }

    #[test]
    fn test_resolve_follows_display_order() {
        let template = template();
        let chosen = selections(&[
            ("extras", Selection::Many(vec!["film".into(), "case".into()])),
            ("finish", one("gold")),
            ("size", one("large")),
        ]);

        let options = resolve_selections(&template, &chosen);
        let ids: Vec<&str> = options.iter().map(|o| o.option_id.as_str()).collect();
        assert_eq!(ids, vec!["large", "gold", "film", "case"]);
        assert_eq!(options[0].group_name, "SIZE");
        assert_eq!(options[1].modifier, PriceModifier::Multiply(2.0));
    }

    #[test]
    fn test_resolve_skips_unknown_options_and_groups() {
        let template = template();
        let chosen = selections(&[
            ("size", one("huge")),
            ("color", one("red")),
            ("finish", one("gold")),
        ]);

        let options = resolve_selections(&template, &chosen);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].option_id, "gold");
    }

    #[test]
    fn test_category_options_always_add() {
        let mut template = template();
        template.option_groups[1].source_type = SourceType::Category;
        template.option_groups[1].options[0].price_modifier_type = ModifierType::Replace;

        let options = resolve_selections(&template, &selections(&[("size", one("large"))]));
        assert_eq!(options[0].modifier, PriceModifier::Add(200.0));
    }

    #[test]
    fn test_quote_prices_resolved_configuration() {
        let template = template();
        let chosen = selections(&[("size", one("large")), ("finish", one("gold"))]);

        let quote = quote(&template, &chosen, None);
        assert_eq!(quote.price.subtotal, 2400.0);
        assert_eq!(quote.price.total, 2400.0);
        assert_eq!(quote.price.quantity, 1);
        assert!(quote.validation.is_valid);
        assert_eq!(quote.template_name, "Laptop");
    }

    #[test]
    fn test_quote_applies_best_price_tier() {
        let mut template = template();
        template.rules = vec![
            ConfigurationRule::price_tier("r1", "5+", 5, DiscountKind::Percentage, 10.0),
            ConfigurationRule::price_tier("r2", "10+", 10, DiscountKind::Percentage, 20.0),
        ];

        let quote = quote(&template, &Selections::new(), Some(10));
        assert_eq!(quote.price.discount_amount, 200.0);
        assert_eq!(quote.price.per_unit_price, 800.0);
        assert_eq!(quote.price.total, 8000.0);
        assert_eq!(quote.price.discounts[0].name.as_deref(), Some("10+"));
        assert_eq!(template.rules[0].rule_type, RuleType::PriceTier);
    }

    #[test]
    fn test_quote_prices_invalid_configuration_anyway() {
        let mut template = template();
        template.option_groups[1].is_required = true;

        let quote = quote(&template, &Selections::new(), Some(2));
        assert!(!quote.validation.is_valid);
        assert_eq!(quote.price.total, 2000.0);
    }

    #[test]
    fn test_quote_applies_auto_selections() {
        let mut template = template();
        template.rules = vec![ConfigurationRule::new("r1", "Gold with large", RuleType::AutoSelect)
            .when_option("large")
            .then_group("finish")
            .then_option("gold")];

        let quote = quote(&template, &selections(&[("size", one("large"))]), None);

        assert_eq!(quote.selections["finish"], one("gold"));
        assert_eq!(quote.validation.auto_selections["finish"], "gold");
        assert_eq!(quote.price.breakdown.len(), 2);
        assert_eq!(quote.price.subtotal, 2400.0);
        assert_eq!(quote.price.total, 2400.0);
    }

    #[test]
    fn test_auto_selection_replaces_group_choice_and_chains() {
        let mut template = template();
        template.option_groups[0].options.push(option("stand", ModifierType::Add, 70.0));
        template.rules = vec![
            ConfigurationRule::new("r1", "Gold with large", RuleType::AutoSelect)
                .when_option("large")
                .then_group("finish")
                .then_option("gold"),
            ConfigurationRule::new("r2", "Stand with gold", RuleType::AutoSelect)
                .when_option("gold")
                .then_group("extras")
                .then_option("stand"),
        ];
        let chosen = selections(&[
            ("size", one("large")),
            ("extras", Selection::Many(vec!["case".into(), "film".into()])),
        ]);

        let quote = quote(&template, &chosen, None);

        assert_eq!(quote.selections["extras"], one("stand"));
        assert_eq!(quote.selections["finish"], one("gold"));
        // (1000 + 200 + 70) * 2
        assert_eq!(quote.price.subtotal, 2540.0);
    }

    #[test]
    fn test_fighting_auto_selections_stop() {
        let mut template = template();
        template.option_groups[1].options.push(option("small", ModifierType::Add, 0.0));
        template.rules = vec![
            ConfigurationRule::new("r1", "Large flips to small", RuleType::AutoSelect)
                .when_option("large")
                .then_group("size")
                .then_option("small"),
            ConfigurationRule::new("r2", "Small flips to large", RuleType::AutoSelect)
                .when_option("small")
                .then_group("size")
                .then_option("large"),
        ];

        // large -> small -> large, then the pass cap is reached
        let quote = quote(&template, &selections(&[("size", one("large"))]), None);
        assert_eq!(quote.selections["size"], one("large"));
        assert_eq!(quote.price.subtotal, 1200.0);
    }

    #[test]
    fn test_preset_lookup() {
        let mut template = template();
        template.presets.push(TemplatePreset {
            id: "pro".to_string(),
            name: "Pro".to_string(),
            description: None,
            selected_options: selections(&[("size", one("large"))]),
            display_order: 0,
            is_active: true,
        });

        let preset = template.preset("pro").unwrap();
        assert_eq!(preset.selected_options["size"], one("large"));
        assert!(matches!(
            template.preset("basic"),
            Err(CpqError::PresetNotFound(_))
        ));
    }

    #[test]
    fn test_default_selections_skip_unavailable() {
        let mut template = template();
        template.option_groups[0].options[0].is_default = true;
        template.option_groups[0].options[0].is_available = false;
        template.option_groups[0].options[1].is_default = true;

        assert_eq!(template.default_selections()["extras"], one("film"));

        template.option_groups[0].options[1].is_available = false;
        assert!(!template.default_selections().contains_key("extras"));
    }

    #[test]
    fn test_default_selections() {
        let mut template = template();
        template.option_groups[0].options[1].is_default = true;
        template.option_groups[1].options[0].is_default = true;

        let defaults = template.default_selections();
        assert_eq!(defaults.len(), 2);
        assert_eq!(defaults["extras"], one("film"));
        assert_eq!(defaults["size"], one("large"));
    }

    #[test]
    fn test_selection_helpers() {
        assert!(one("").is_empty());
        assert!(Selection::Many(Vec::new()).is_empty());
        assert!(!one("a").is_empty());

        let many = Selection::Many(vec!["a".into(), "b".into()]);
        assert_eq!(many.count(), 2);
        assert!(many.contains("b"));
        assert!(!many.contains("c"));
    }

    #[test]
    fn test_selection_parses_string_or_list() {
        let parsed: Selections =
            serde_json::from_str(r#"{"size": "large", "extras": ["case", "film"]}"#).unwrap();
        assert_eq!(parsed["size"], one("large"));
        assert_eq!(parsed["extras"].count(), 2);
    }

    #[test]
    fn test_parse_selection_rejects_malformed() {
        assert!(parse_selection("size").is_err());
        assert!(parse_selection("=large").is_err());
        assert!(parse_selection("size=").is_err());
        assert!(parse_selection("size= , ").is_err());
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = Catalog {
            templates: vec![template()],
        };
        assert!(catalog.template("tmpl-1").is_ok());
        assert!(matches!(
            catalog.template("missing"),
            Err(CpqError::TemplateNotFound(_))
        ));
    }

    #[test]
    fn test_catalog_from_json() {
        let json = r#"{
            "templates": [{
                "id": "t1",
                "name": "Desk",
                "basePrice": 300,
                "optionGroups": [{
                    "id": "g1",
                    "name": "Top",
                    "options": [
                        {"id": "oak", "name": "Oak", "priceModifierType": "add", "priceModifierAmount": 120}
                    ]
                }]
            }]
        }"#;

        let catalog = Catalog::from_json(json).unwrap();
        let template = catalog.template("t1").unwrap();
        assert_eq!(template.option_groups[0].options[0].price_modifier_amount, 120.0);
        assert!(template.option_groups[0].options[0].is_available);
        assert!(template.presets.is_empty());
        assert_eq!(template.option_groups[0].selection_type, SelectionType::Single);

        assert!(matches!(
            Catalog::from_json("{\"templates\": 3}"),
            Err(CpqError::Catalog(_))
        ));
    }
}
