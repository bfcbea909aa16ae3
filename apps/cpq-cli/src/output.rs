//! Output formatting for the CLI.
//!
//! Pretty output rounds amounts to `decimal_places` for display only; JSON
//! output always carries the engine's unrounded values.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use cpq_core::rules::Severity;
use cpq_core::{ModifierType, PriceResult, Quote, ValidationMessage, ValidationReport};
use serde::Serialize;

use crate::config::{CliConfig, OutputFormat};
use crate::error::{CliError, CliResult};

// =============================================================================
// Reports
// =============================================================================

/// A quote as printed by `cpq quote`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteReport {
    #[serde(flatten)]
    pub quote: Quote,
    pub generated_at: DateTime<Utc>,
}

impl QuoteReport {
    pub fn new(quote: Quote) -> Self {
        Self {
            quote,
            generated_at: Utc::now(),
        }
    }
}

/// Result of `cpq check` for one template.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateCheck {
    pub template_id: String,
    pub template_name: String,
    /// Authoring validation failures, as `location: message`.
    pub findings: Vec<String>,
    pub publish: ValidationReport,
}

impl TemplateCheck {
    pub fn is_valid(&self) -> bool {
        self.findings.is_empty() && self.publish.is_valid
    }
}

// =============================================================================
// Output Handler
// =============================================================================

/// Renders command results in the configured format.
#[derive(Debug, Clone)]
pub struct Output {
    format: OutputFormat,
    currency_symbol: String,
    decimal_places: usize,
}

impl Output {
    /// `json` forces JSON regardless of the configured format.
    pub fn new(config: &CliConfig, json: bool) -> Self {
        Self {
            format: if json { OutputFormat::Json } else { config.output },
            currency_symbol: config.currency_symbol.clone(),
            decimal_places: usize::from(config.decimal_places),
        }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Formats an amount, e.g. `1234.5` → `$1234.50`, `-7` → `-$7.00`.
    pub fn money(&self, amount: f64) -> String {
        let sign = if amount < 0.0 { "-" } else { "" };
        format!(
            "{}{}{:.*}",
            sign,
            self.currency_symbol,
            self.decimal_places,
            amount.abs()
        )
    }

    pub fn render_price(&self, result: &PriceResult) -> CliResult<String> {
        if self.is_json() {
            return to_json(result);
        }
        Ok(self.price_text(result))
    }

    pub fn render_quote(&self, report: &QuoteReport) -> CliResult<String> {
        if self.is_json() {
            return to_json(report);
        }

        let quote = &report.quote;
        let mut out = String::new();
        let _ = writeln!(out, "Quote: {} ({})", quote.template_name, quote.template_id);
        let _ = writeln!(out, "Generated: {}", report.generated_at.to_rfc3339());
        let _ = writeln!(out);
        out.push_str(&self.price_text(&quote.price));
        out.push_str(&report_text(&quote.validation));
        Ok(out)
    }

    pub fn render_checks(&self, checks: &[TemplateCheck]) -> CliResult<String> {
        if self.is_json() {
            return to_json(&checks);
        }

        let mut out = String::new();
        for check in checks {
            let status = if check.is_valid() { "ok" } else { "FAILED" };
            let _ = writeln!(out, "{} ({}): {}", check.template_name, check.template_id, status);
            for finding in &check.findings {
                let _ = writeln!(out, "  error: {}", finding);
            }
            for message in check.publish.errors.iter().chain(&check.publish.warnings) {
                let _ = writeln!(out, "  {}", message_line(message));
            }
        }
        Ok(out)
    }

    fn price_text(&self, result: &PriceResult) -> String {
        let mut out = String::new();
        let mut row = |label: &str, value: String| {
            let _ = writeln!(out, "{:<32}{:>16}", label, value);
        };

        row("Base price", self.money(result.base_price));
        for line in &result.breakdown {
            let label = format!("  {} / {}", line.group_name, line.option_name);
            let value = match line.modifier_type {
                ModifierType::Add => format!("+{}", self.money(line.modifier_amount)),
                ModifierType::Multiply => format!("x{}", line.modifier_amount),
                ModifierType::Replace => format!("={}", self.money(line.modifier_amount)),
            };
            row(&label, value);
        }
        row("Options total", self.money(result.options_total));
        row("Subtotal", self.money(result.subtotal));
        for discount in &result.discounts {
            let label = match &discount.name {
                Some(name) => format!("Discount ({})", name),
                None => format!("Discount ({})", discount.kind),
            };
            row(&label, self.money(-discount.amount));
        }
        row("Per unit", self.money(result.per_unit_price));
        row("Quantity", result.quantity.to_string());
        row("Total", self.money(result.total));
        out
    }
}

fn report_text(report: &ValidationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    if report.is_valid {
        let _ = writeln!(out, "Configuration is valid");
    } else {
        let _ = writeln!(out, "Configuration is INVALID");
    }
    for message in report.errors.iter().chain(&report.warnings) {
        let _ = writeln!(out, "  {}", message_line(message));
    }
    for (group, option) in &report.auto_selections {
        let _ = writeln!(out, "  auto-select: {} = {}", group, option);
    }
    out
}

fn message_line(message: &ValidationMessage) -> String {
    let level = match message.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "info",
    };
    format!("{}: {}", level, message.message)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value).map_err(CliError::Output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpq_core::{compute_price, Discount, OptionModifier, PriceInput, PriceModifier};

    fn pretty() -> Output {
        Output::new(&CliConfig::default(), false)
    }

    #[test]
    fn test_money_rounds_for_display() {
        let output = pretty();
        assert_eq!(output.money(150.0), "$150.00");
        assert_eq!(output.money(0.1 + 0.2), "$0.30");
        assert_eq!(output.money(-100.0), "-$100.00");

        let config = CliConfig {
            currency_symbol: "€".into(),
            decimal_places: 0,
            ..CliConfig::default()
        };
        assert_eq!(Output::new(&config, false).money(99.6), "€100");
    }

    #[test]
    fn test_json_flag_overrides_config() {
        assert!(Output::new(&CliConfig::default(), true).is_json());
        assert!(!pretty().is_json());
    }

    #[test]
    fn test_pretty_price() {
        let input = PriceInput::new(100.0)
            .with_option(OptionModifier::new("g1", "Extras", "o1", "Case", PriceModifier::Add(50.0)))
            .with_quantity(3)
            .with_discount(Discount::percentage(10.0).with_name("Volume"));
        let text = pretty().render_price(&compute_price(&input)).unwrap();

        assert!(text.contains("Extras / Case"));
        assert!(text.contains("+$50.00"));
        assert!(text.contains("Discount (Volume)"));
        assert!(text.contains("-$15.00"));
        assert!(text.contains("$405.00"));
    }

    #[test]
    fn test_negative_discount_shows_single_sign() {
        let input = PriceInput::new(100.0).with_discount(Discount::fixed_amount(-20.0));
        let text = pretty().render_price(&compute_price(&input)).unwrap();

        assert!(text.contains("$20.00"));
        assert!(!text.contains("--$"));
        assert!(!text.contains("-$20.00"));
        assert!(text.contains("$120.00"));
    }

    #[test]
    fn test_json_price_is_unrounded() {
        let input = PriceInput::new(0.1).with_option(OptionModifier::new(
            "g1",
            "Extras",
            "o1",
            "Tiny",
            PriceModifier::Add(0.2),
        ));
        let output = Output::new(&CliConfig::default(), true);
        let json: serde_json::Value =
            serde_json::from_str(&output.render_price(&compute_price(&input)).unwrap()).unwrap();

        assert_eq!(json["subtotal"].as_f64(), Some(0.1 + 0.2));
        assert_eq!(json["perUnitPrice"].as_f64(), Some(0.1 + 0.2));
    }

    #[test]
    fn test_check_status() {
        let check = TemplateCheck {
            template_id: "t-1".into(),
            template_name: "Laptop".into(),
            findings: vec!["template: name is required".into()],
            publish: ValidationReport {
                is_valid: true,
                ..ValidationReport::default()
            },
        };
        assert!(!check.is_valid());

        let text = pretty().render_checks(&[check]).unwrap();
        assert!(text.contains("Laptop (t-1): FAILED"));
        assert!(text.contains("error: template: name is required"));
    }
}
