//! # Pricing Types
//!
//! Input and output types of the pricing engine.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Pricing Types                                   │
//! │                                                                         │
//! │  INPUT                                  OUTPUT                          │
//! │  ┌─────────────────────┐                ┌─────────────────────┐         │
//! │  │    PriceInput       │                │    PriceResult      │         │
//! │  │  base_price         │                │  base_price         │         │
//! │  │  options ───────────┼──┐             │  options_total      │         │
//! │  │  quantity?          │  │             │  subtotal           │         │
//! │  │  discount? ──────┐  │  │             │  discount_amount    │         │
//! │  └──────────────────┼──┘  │             │  per_unit_price     │         │
//! │                     │     │             │  total, quantity    │         │
//! │  ┌──────────────────▼─┐ ┌─▼───────────┐ │  breakdown ─────────┼──┐      │
//! │  │     Discount       │ │OptionModifier│ │  discounts         │  │      │
//! │  │  Percentage(10)    │ │ ids + names  │ └────────────────────┘  │      │
//! │  │  FixedAmount(150)  │ │ PriceModifier│ ┌─────────────────────┐ │      │
//! │  └────────────────────┘ │  Add(200)    │ │   BreakdownLine     │◄┘      │
//! │                         │  Multiply(2) │ │  ... + line_total   │        │
//! │                         │  Replace(5k) │ └─────────────────────┘        │
//! │                         └──────────────┘                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! All types serialize as camelCase JSON. An option modifier travels flat:
//! `{"groupId", "groupName", "optionId", "optionName", "modifierType",
//! "modifierAmount"}`. In memory the type tag and amount are one
//! [`PriceModifier`] value so a tag without an amount cannot exist.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Modifier Type
// =============================================================================

/// The tag of a price modifier, as it appears on the wire and in breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ModifierType {
    /// Amount is summed into the options total.
    Add,
    /// Amount multiplies `(base + options total)`.
    Multiply,
    /// Amount becomes the new base price.
    Replace,
}

impl std::fmt::Display for ModifierType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModifierType::Add => write!(f, "add"),
            ModifierType::Multiply => write!(f, "multiply"),
            ModifierType::Replace => write!(f, "replace"),
        }
    }
}

// =============================================================================
// Price Modifier
// =============================================================================

/// A single option's effect on price.
///
/// ## Effects
/// ```text
/// Add(a)       options_total  += a
/// Multiply(f)  factor         *= f
/// Replace(p)   base_price      = p   (last one wins)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceModifier {
    Add(f64),
    Multiply(f64),
    Replace(f64),
}

impl PriceModifier {
    /// Builds a modifier from its wire tag and amount.
    pub const fn new(kind: ModifierType, amount: f64) -> Self {
        match kind {
            ModifierType::Add => PriceModifier::Add(amount),
            ModifierType::Multiply => PriceModifier::Multiply(amount),
            ModifierType::Replace => PriceModifier::Replace(amount),
        }
    }

    /// Returns the wire tag.
    pub const fn kind(&self) -> ModifierType {
        match self {
            PriceModifier::Add(_) => ModifierType::Add,
            PriceModifier::Multiply(_) => ModifierType::Multiply,
            PriceModifier::Replace(_) => ModifierType::Replace,
        }
    }

    /// Returns the raw amount carried by the modifier.
    pub const fn amount(&self) -> f64 {
        match self {
            PriceModifier::Add(amount)
            | PriceModifier::Multiply(amount)
            | PriceModifier::Replace(amount) => *amount,
        }
    }

    /// The additive contribution shown on a breakdown line.
    ///
    /// Only `Add` contributes; multiplicative and replacement effects are
    /// visible through the modifier type and amount but show `0` here.
    pub const fn line_total(&self) -> f64 {
        match self {
            PriceModifier::Add(amount) => *amount,
            PriceModifier::Multiply(_) | PriceModifier::Replace(_) => 0.0,
        }
    }
}

// =============================================================================
// Option Modifier
// =============================================================================

/// One selected configuration option and its price modifier.
///
/// Group and option identifiers are informational; they never enter the
/// arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "OptionModifierRecord", into = "OptionModifierRecord")]
pub struct OptionModifier {
    pub group_id: String,
    pub group_name: String,
    pub option_id: String,
    pub option_name: String,
    pub modifier: PriceModifier,
}

impl OptionModifier {
    pub fn new(
        group_id: impl Into<String>,
        group_name: impl Into<String>,
        option_id: impl Into<String>,
        option_name: impl Into<String>,
        modifier: PriceModifier,
    ) -> Self {
        OptionModifier {
            group_id: group_id.into(),
            group_name: group_name.into(),
            option_id: option_id.into(),
            option_name: option_name.into(),
            modifier,
        }
    }
}

/// Flat wire form of [`OptionModifier`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, rename = "OptionModifier")]
#[serde(rename_all = "camelCase")]
pub struct OptionModifierRecord {
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub group_name: String,
    #[serde(default)]
    pub option_id: String,
    #[serde(default)]
    pub option_name: String,
    pub modifier_type: ModifierType,
    pub modifier_amount: f64,
}

impl From<OptionModifierRecord> for OptionModifier {
    fn from(record: OptionModifierRecord) -> Self {
        OptionModifier {
            group_id: record.group_id,
            group_name: record.group_name,
            option_id: record.option_id,
            option_name: record.option_name,
            modifier: PriceModifier::new(record.modifier_type, record.modifier_amount),
        }
    }
}

impl From<OptionModifier> for OptionModifierRecord {
    fn from(option: OptionModifier) -> Self {
        OptionModifierRecord {
            modifier_type: option.modifier.kind(),
            modifier_amount: option.modifier.amount(),
            group_id: option.group_id,
            group_name: option.group_name,
            option_id: option.option_id,
            option_name: option.option_name,
        }
    }
}

// =============================================================================
// Discount
// =============================================================================

/// How a discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// `value` is a percentage of the subtotal (10 = 10%).
    Percentage,
    /// `value` is subtracted as-is, in the base price's currency unit.
    FixedAmount,
}

impl std::fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscountKind::Percentage => write!(f, "percentage"),
            DiscountKind::FixedAmount => write!(f, "fixed_amount"),
        }
    }
}

/// A per-unit discount applied after modifiers.
///
/// No range checks: a negative value or a percentage above 100 is applied
/// literally. Business limits belong to the approval workflow that issues
/// the discount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    pub value: f64,
    /// Label shown next to the discount (e.g., the price tier name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub name: Option<String>,
}

impl Discount {
    pub fn percentage(value: f64) -> Self {
        Discount {
            kind: DiscountKind::Percentage,
            value,
            name: None,
        }
    }

    pub fn fixed_amount(value: f64) -> Self {
        Discount {
            kind: DiscountKind::FixedAmount,
            value,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Computes the discount against a subtotal.
    ///
    /// ## Example
    /// ```rust
    /// use cpq_core::Discount;
    ///
    /// assert_eq!(Discount::percentage(10.0).amount_for(1000.0), 100.0);
    /// assert_eq!(Discount::fixed_amount(150.0).amount_for(1000.0), 150.0);
    /// ```
    pub fn amount_for(&self, subtotal: f64) -> f64 {
        match self.kind {
            DiscountKind::Percentage => subtotal * (self.value / 100.0),
            DiscountKind::FixedAmount => self.value,
        }
    }
}

// =============================================================================
// Price Input
// =============================================================================

/// Everything the engine needs for one computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceInput {
    pub base_price: f64,

    /// Selected options, in the order their effects must apply.
    #[serde(default)]
    #[ts(as = "Vec<OptionModifierRecord>")]
    pub options: Vec<OptionModifier>,

    /// Units ordered. `None` and `Some(0)` both mean one unit.
    #[serde(default)]
    #[ts(optional)]
    pub quantity: Option<i64>,

    #[serde(default)]
    #[ts(optional)]
    pub discount: Option<Discount>,
}

impl PriceInput {
    pub fn new(base_price: f64) -> Self {
        PriceInput {
            base_price,
            options: Vec::new(),
            quantity: None,
            discount: None,
        }
    }

    pub fn with_option(mut self, option: OptionModifier) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_options(mut self, options: impl IntoIterator<Item = OptionModifier>) -> Self {
        self.options.extend(options);
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_discount(mut self, discount: Discount) -> Self {
        self.discount = Some(discount);
        self
    }
}

// =============================================================================
// Price Result
// =============================================================================

/// One line of the breakdown, echoing an input option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownLine {
    pub group_id: String,
    pub group_name: String,
    pub option_id: String,
    pub option_name: String,
    pub modifier_type: ModifierType,
    pub modifier_amount: f64,
    /// `modifier_amount` for `add`, `0` otherwise.
    pub line_total: f64,
}

impl From<&OptionModifier> for BreakdownLine {
    fn from(option: &OptionModifier) -> Self {
        BreakdownLine {
            group_id: option.group_id.clone(),
            group_name: option.group_name.clone(),
            option_id: option.option_id.clone(),
            option_name: option.option_name.clone(),
            modifier_type: option.modifier.kind(),
            modifier_amount: option.modifier.amount(),
            line_total: option.modifier.line_total(),
        }
    }
}

/// A discount as it was applied to a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountDetail {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    pub value: f64,
    /// Per-unit amount subtracted from the subtotal.
    pub amount: f64,
}

/// Output of [`crate::pricing::compute_price`].
///
/// ## Invariants
/// - `subtotal == (base_price + options_total) * Π multiply amounts`
/// - `per_unit_price == subtotal - discount_amount` (never clamped)
/// - `total == per_unit_price * quantity`
/// - `breakdown.len()` equals the number of input options, same order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceResult {
    /// Base after `replace` modifiers (may differ from the input).
    pub base_price: f64,
    /// Sum of `add` amounts only.
    pub options_total: f64,
    pub subtotal: f64,
    pub discount_amount: f64,
    /// May be negative when the discount exceeds the subtotal.
    pub per_unit_price: f64,
    pub total: f64,
    /// Effective quantity after defaulting.
    pub quantity: i64,
    pub breakdown: Vec<BreakdownLine>,
    /// Zero or one entry describing the applied discount.
    #[serde(default)]
    pub discounts: Vec<DiscountDetail>,
}

impl PriceResult {
    /// True when the discount pushed the unit price below zero.
    pub fn is_negative(&self) -> bool {
        self.per_unit_price < 0.0
    }
}
