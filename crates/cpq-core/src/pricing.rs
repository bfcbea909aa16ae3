//! # Pricing Engine
//!
//! Turns a base price plus selected option modifiers (and an optional
//! discount) into per-unit and total prices with a line-item breakdown.
//!
//! ## Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │     T = ((B + ΣO_add) × ΠM_mult − D) × Q                                │
//! │                                                                         │
//! │  B       base price, overwritten by each `replace` (last one wins)     │
//! │  ΣO_add  sum of every `add` amount, regardless of group                │
//! │  ΠM_mult product of every `multiply` amount (×1.5 ×1.5 = ×2.25)        │
//! │  D       percentage of the subtotal, or a fixed amount                 │
//! │  Q       quantity, 1 when absent or zero                               │
//! │                                                                         │
//! │  No rounding at any step. No clamping: D > subtotal gives a negative   │
//! │  price, which is reported as-is for the calling layer to act on.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Order Sensitivity
//! Options are folded left to right. `add` and `multiply` commute among
//! themselves, but `replace` does not: a later `replace` overwrites an
//! earlier one. Callers resolve options in a stable order (see
//! [`crate::catalog::resolve_selections`]).

use tracing::debug;

use crate::types::{BreakdownLine, DiscountDetail, PriceInput, PriceModifier, PriceResult};
use crate::DEFAULT_QUANTITY;

// =============================================================================
// Accumulator
// =============================================================================

/// Running state of the left-to-right pass.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Accumulator {
    base_price: f64,
    additive_total: f64,
    multiplicative_factor: f64,
}

impl Accumulator {
    fn new(base_price: f64) -> Self {
        Accumulator {
            base_price,
            additive_total: 0.0,
            multiplicative_factor: 1.0,
        }
    }

    /// Returns the state after one more modifier.
    fn apply(self, modifier: PriceModifier) -> Self {
        match modifier {
            PriceModifier::Add(amount) => Accumulator {
                additive_total: self.additive_total + amount,
                ..self
            },
            PriceModifier::Multiply(factor) => Accumulator {
                multiplicative_factor: self.multiplicative_factor * factor,
                ..self
            },
            PriceModifier::Replace(price) => Accumulator {
                base_price: price,
                ..self
            },
        }
    }

    fn subtotal(&self) -> f64 {
        (self.base_price + self.additive_total) * self.multiplicative_factor
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Resolves the quantity the way the quoting flow always has: a missing or
/// zero quantity means a single unit. Negative quantities pass through.
///
/// ## Example
/// ```rust
/// use cpq_core::pricing::effective_quantity;
///
/// assert_eq!(effective_quantity(None), 1);
/// assert_eq!(effective_quantity(Some(0)), 1);
/// assert_eq!(effective_quantity(Some(3)), 3);
/// assert_eq!(effective_quantity(Some(-2)), -2);
/// ```
pub fn effective_quantity(quantity: Option<i64>) -> i64 {
    match quantity {
        None | Some(0) => DEFAULT_QUANTITY,
        Some(qty) => qty,
    }
}

/// Computes the price of one configuration.
///
/// Pure and total: no I/O, no shared state, and no input makes it fail.
/// Negative prices, negative or oversized discounts and negative quantities
/// all flow through the formula and show up in the result.
///
/// ## Example
/// ```rust
/// use cpq_core::pricing::compute_price;
/// use cpq_core::{Discount, OptionModifier, PriceInput, PriceModifier};
///
/// let input = PriceInput::new(1000.0)
///     .with_option(OptionModifier::new("g1", "Material", "o1", "Steel", PriceModifier::Add(200.0)))
///     .with_option(OptionModifier::new("g2", "Finish", "o2", "Gold", PriceModifier::Multiply(2.0)))
///     .with_discount(Discount::percentage(10.0))
///     .with_quantity(2);
///
/// let result = compute_price(&input);
/// assert_eq!(result.subtotal, 2400.0);       // (1000 + 200) × 2
/// assert_eq!(result.discount_amount, 240.0); // 10%
/// assert_eq!(result.per_unit_price, 2160.0);
/// assert_eq!(result.total, 4320.0);
/// ```
///
/// ## User Workflow
/// ```text
/// Configurator selections
///      │
///      ▼
/// resolve_selections() ──► [OptionModifier, ...]
///      │
///      ▼
/// compute_price() ← THIS FUNCTION
///      │
///      ▼
/// PriceResult ──► price summary / saved configuration / quote line
/// ```
pub fn compute_price(input: &PriceInput) -> PriceResult {
    let quantity = effective_quantity(input.quantity);

    let (state, breakdown) = input.options.iter().fold(
        (
            Accumulator::new(input.base_price),
            Vec::with_capacity(input.options.len()),
        ),
        |(state, mut breakdown), option| {
            breakdown.push(BreakdownLine::from(option));
            (state.apply(option.modifier), breakdown)
        },
    );

    let subtotal = state.subtotal();

    let (discount_amount, discounts) = match &input.discount {
        Some(discount) => {
            let amount = discount.amount_for(subtotal);
            let detail = DiscountDetail {
                name: discount.name.clone(),
                kind: discount.kind,
                value: discount.value,
                amount,
            };
            (amount, vec![detail])
        }
        None => (0.0, Vec::new()),
    };

    let per_unit_price = subtotal - discount_amount;
    let total = per_unit_price * quantity as f64;

    debug!(
        base_price = state.base_price,
        options = breakdown.len(),
        subtotal,
        discount_amount,
        quantity,
        total,
        "Computed configuration price"
    );

    PriceResult {
        base_price: state.base_price,
        options_total: state.additive_total,
        subtotal,
        discount_amount,
        per_unit_price,
        total,
        quantity,
        breakdown,
        discounts,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
