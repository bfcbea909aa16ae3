//! `cpq` subcommands.
//!
//! Each command loads what it needs from disk, calls into cpq-core and
//! returns the rendered text plus an [`Outcome`]. Printing happens in
//! `main`.

use std::io::Read as _;
use std::path::{Path, PathBuf};

use clap::Args;
use cpq_core::catalog::parse_selection;
use cpq_core::rules::validate_for_publish;
use cpq_core::validation::validate_template;
use cpq_core::{compute_price, quote, Catalog, PriceInput, ProductTemplate};
use tracing::{debug, info};

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{Output, QuoteReport, TemplateCheck};

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Args)]
pub struct PriceArgs {
    /// PriceInput JSON file, or `-` for stdin
    #[arg(default_value = "-")]
    pub input: String,
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Template id
    #[arg(short, long)]
    pub template: String,

    /// Selection as GROUP=OPTION[,OPTION...]; repeat for several groups
    #[arg(short, long = "select", value_name = "GROUP=OPT[,OPT]")]
    pub select: Vec<String>,

    /// Quantity (0 or absent means 1)
    #[arg(short, long, allow_negative_numbers = true)]
    pub quantity: Option<i64>,

    /// Catalog JSON file (overrides CPQ_CATALOG / catalog_path)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Start from this preset instead of the default options
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Do not preselect the template's default options
    #[arg(long, conflicts_with = "preset")]
    pub no_defaults: bool,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Only check this template
    #[arg(short, long)]
    pub template: Option<String>,

    /// Catalog JSON file (overrides CPQ_CATALOG / catalog_path)
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

// =============================================================================
// Context and Outcome
// =============================================================================

/// What every command gets: loaded config and the output handler.
pub struct Context {
    pub config: CliConfig,
    pub output: Output,
}

impl Context {
    pub fn new(config: CliConfig, json: bool) -> Self {
        let output = Output::new(&config, json);
        Self { config, output }
    }

    /// `--catalog` if given, else the configured catalog path.
    fn catalog_path(&self, flag: Option<PathBuf>) -> CliResult<PathBuf> {
        flag.or_else(|| self.config.catalog_path.clone())
            .ok_or(CliError::NoCatalog)
    }

    fn load_catalog(&self, flag: Option<PathBuf>) -> CliResult<Catalog> {
        let path = self.catalog_path(flag)?;
        let contents = read_source(&path)?;
        let catalog = Catalog::from_json(&contents)?;
        info!(path = %path.display(), templates = catalog.templates.len(), "Catalog loaded");
        Ok(catalog)
    }
}

/// Whether the command's result passed its checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Valid,
    Invalid,
}

impl Outcome {
    fn from_valid(valid: bool) -> Self {
        if valid {
            Outcome::Valid
        } else {
            Outcome::Invalid
        }
    }
}

/// Rendered output of a command.
pub struct Rendered {
    pub text: String,
    pub outcome: Outcome,
}

// =============================================================================
// Commands
// =============================================================================

/// `cpq price`: prices a raw [`PriceInput`].
pub fn price(args: PriceArgs, ctx: &Context) -> CliResult<Rendered> {
    let contents = if args.input == "-" {
        read_stdin()?
    } else {
        read_source(Path::new(&args.input))?
    };

    let input: PriceInput = serde_json::from_str(&contents).map_err(CliError::Input)?;
    let result = compute_price(&input);

    Ok(Rendered {
        text: ctx.output.render_price(&result)?,
        outcome: Outcome::Valid,
    })
}

/// `cpq quote`: prices a template configuration.
///
/// Starts from the preset (`--preset`), else the template defaults unless
/// `--no-defaults`. Each `--select` then replaces its group's selection.
pub fn quote_template(args: QuoteArgs, ctx: &Context) -> CliResult<Rendered> {
    let catalog = ctx.load_catalog(args.catalog)?;
    let template = catalog.template(&args.template)?;

    let mut selections = match &args.preset {
        Some(preset_id) => template.preset(preset_id)?.selected_options.clone(),
        None if args.no_defaults => Default::default(),
        None => template.default_selections(),
    };
    for expr in &args.select {
        let (group, selection) = parse_selection(expr)?;
        selections.insert(group, selection);
    }
    debug!(template = %template.id, ?selections, "Quoting");

    let report = QuoteReport::new(quote(template, &selections, args.quantity));
    let outcome = Outcome::from_valid(report.quote.validation.is_valid);

    Ok(Rendered {
        text: ctx.output.render_quote(&report)?,
        outcome,
    })
}

/// `cpq check`: authoring and publish validation.
pub fn check(args: CheckArgs, ctx: &Context) -> CliResult<Rendered> {
    let catalog = ctx.load_catalog(args.catalog)?;

    let templates: Vec<&ProductTemplate> = match &args.template {
        Some(id) => vec![catalog.template(id)?],
        None => catalog.templates.iter().collect(),
    };

    let checks: Vec<TemplateCheck> = templates.into_iter().map(check_template).collect();
    let outcome = Outcome::from_valid(checks.iter().all(TemplateCheck::is_valid));

    Ok(Rendered {
        text: ctx.output.render_checks(&checks)?,
        outcome,
    })
}

fn check_template(template: &ProductTemplate) -> TemplateCheck {
    TemplateCheck {
        template_id: template.id.clone(),
        template_name: template.name.clone(),
        findings: validate_template(template)
            .iter()
            .map(ToString::to_string)
            .collect(),
        publish: validate_for_publish(template),
    }
}

// =============================================================================
// File Helpers
// =============================================================================

fn read_source(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_stdin() -> CliResult<String> {
    let mut contents = String::new();
    std::io::stdin()
        .read_to_string(&mut contents)
        .map_err(|source| CliError::Read {
            path: PathBuf::from("<stdin>"),
            source,
        })?;
    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    const CATALOG: &str = r#"{
        "templates": [{
            "id": "4f1c2a9e-1b7d-4c3e-9a51-0d6b2f8e7c10",
            "name": "Laptop",
            "basePrice": 1000.0,
            "isActive": true,
            "optionGroups": [
                {
                    "id": "9b2e4d71-5a3c-4f08-8e6d-1c7a9f3b2e54",
                    "name": "Memory",
                    "displayOrder": 0,
                    "selectionType": "single",
                    "isRequired": true,
                    "options": [
                        { "id": "3e5a1f0c-8d2b-4a67-9c14-5b7e2d9f0a31", "name": "16 GB", "priceModifierType": "add", "priceModifierAmount": 0.0, "isDefault": true },
                        { "id": "7c9d2e41-6b3a-4f58-a0e7-1d4c8b2f9e65", "name": "32 GB", "priceModifierType": "add", "priceModifierAmount": 200.0 }
                    ]
                },
                {
                    "id": "c7d85f20-3e9a-4b61-a2f4-6e0b8d1c5a93",
                    "name": "Warranty",
                    "displayOrder": 1,
                    "selectionType": "single",
                    "options": [
                        { "id": "e2b7c4a9-0f3d-4e81-b6a5-8c1d9f2e7b40", "name": "3 years", "priceModifierType": "multiply", "priceModifierAmount": 1.1 }
                    ]
                }
            ],
            "rules": [
                { "id": "tier-10", "ruleType": "price_tier", "name": "10+ units", "quantityMin": 10, "discountType": "percentage", "discountValue": 5.0 }
            ],
            "presets": [
                {
                    "id": "pro",
                    "name": "Pro",
                    "selectedOptions": { "9b2e4d71-5a3c-4f08-8e6d-1c7a9f3b2e54": "7c9d2e41-6b3a-4f58-a0e7-1d4c8b2f9e65" }
                },
                {
                    "id": "covered",
                    "name": "Covered",
                    "selectedOptions": { "c7d85f20-3e9a-4b61-a2f4-6e0b8d1c5a93": "e2b7c4a9-0f3d-4e81-b6a5-8c1d9f2e7b40" }
                }
            ]
        }]
    }"#;

    const TEMPLATE_ID: &str = "4f1c2a9e-1b7d-4c3e-9a51-0d6b2f8e7c10";
    const MEMORY: &str = "9b2e4d71-5a3c-4f08-8e6d-1c7a9f3b2e54";
    const RAM_16: &str = "3e5a1f0c-8d2b-4a67-9c14-5b7e2d9f0a31";
    const RAM_32: &str = "7c9d2e41-6b3a-4f58-a0e7-1d4c8b2f9e65";

    fn catalog_file(contents: &str, name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("cpq-cli-{}-{}.json", name, std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn json_ctx() -> Context {
        Context::new(CliConfig::default(), true)
    }

    fn quote_args(catalog: PathBuf, select: &[&str], quantity: Option<i64>) -> QuoteArgs {
        QuoteArgs {
            template: TEMPLATE_ID.to_string(),
            select: select.iter().map(|s| s.to_string()).collect(),
            quantity,
            catalog: Some(catalog),
            preset: None,
            no_defaults: false,
        }
    }

    #[test]
    fn test_price_from_file() {
        let path = catalog_file(
            r#"{ "basePrice": 100, "options": [
                { "groupId": "g", "groupName": "G", "optionId": "o", "optionName": "O",
                  "modifierType": "add", "modifierAmount": 50 } ],
                "quantity": 2 }"#,
            "price",
        );

        let rendered = price(PriceArgs { input: path.display().to_string() }, &json_ctx()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered.text).unwrap();

        assert_eq!(json["total"].as_f64(), Some(300.0));
        assert_eq!(rendered.outcome, Outcome::Valid);
    }

    #[test]
    fn test_price_rejects_bad_input() {
        let path = catalog_file(r#"{ "options": [] }"#, "bad-price");
        let result = price(PriceArgs { input: path.display().to_string() }, &json_ctx());
        assert!(matches!(result, Err(CliError::Input(_))));
    }

    #[test]
    fn test_quote_uses_defaults_and_tiers() {
        let path = catalog_file(CATALOG, "quote");
        let rendered = quote_template(quote_args(path, &[], Some(10)), &json_ctx()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered.text).unwrap();

        // Default 16 GB selected, 5% tier discount at 10 units
        assert_eq!(json["price"]["subtotal"].as_f64(), Some(1000.0));
        assert_eq!(json["price"]["discountAmount"].as_f64(), Some(50.0));
        assert_eq!(json["price"]["total"].as_f64(), Some(9500.0));
        assert!(json["generatedAt"].is_string());
        assert_eq!(rendered.outcome, Outcome::Valid);
    }

    #[test]
    fn test_quote_select_overrides_default() {
        let path = catalog_file(CATALOG, "quote-select");
        let select = format!("{}={}", MEMORY, RAM_32);
        let rendered = quote_template(quote_args(path, &[&select], None), &json_ctx()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered.text).unwrap();

        assert_eq!(json["price"]["subtotal"].as_f64(), Some(1200.0));
        assert_eq!(json["price"]["quantity"].as_i64(), Some(1));
    }

    #[test]
    fn test_quote_missing_required_group_is_invalid() {
        let path = catalog_file(CATALOG, "quote-invalid");
        let mut args = quote_args(path, &[], None);
        args.no_defaults = true;

        let rendered = quote_template(args, &json_ctx()).unwrap();
        assert_eq!(rendered.outcome, Outcome::Invalid);

        // Still priced
        let json: serde_json::Value = serde_json::from_str(&rendered.text).unwrap();
        assert_eq!(json["price"]["total"].as_f64(), Some(1000.0));
    }

    #[test]
    fn test_quote_unknown_template() {
        let path = catalog_file(CATALOG, "quote-unknown");
        let mut args = quote_args(path, &[], None);
        args.template = "missing".into();

        assert!(matches!(
            quote_template(args, &json_ctx()),
            Err(CliError::Cpq(cpq_core::CpqError::TemplateNotFound(_)))
        ));
    }

    #[test]
    fn test_quote_without_catalog() {
        let args = QuoteArgs {
            template: TEMPLATE_ID.into(),
            select: vec![],
            quantity: None,
            catalog: None,
            preset: None,
            no_defaults: false,
        };
        assert!(matches!(quote_template(args, &json_ctx()), Err(CliError::NoCatalog)));
    }

    #[test]
    fn test_check_catalog() {
        let path = catalog_file(CATALOG, "check");
        let rendered = check(
            CheckArgs {
                template: None,
                catalog: Some(path),
            },
            &json_ctx(),
        )
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered.text).unwrap();

        assert_eq!(json.as_array().map(Vec::len), Some(1));
        assert_eq!(json[0]["templateName"], "Laptop");
        assert_eq!(json[0]["findings"].as_array().map(Vec::len), Some(0));
        assert_eq!(rendered.outcome, Outcome::Valid);
    }

    #[test]
    fn test_check_demo_catalog_passes() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/catalog.json");
        let rendered = check(
            CheckArgs {
                template: None,
                catalog: Some(path),
            },
            &json_ctx(),
        )
        .unwrap();

        assert_eq!(rendered.outcome, Outcome::Valid, "{}", rendered.text);
    }

    #[test]
    fn test_check_reports_bad_rule_reference() {
        let broken = CATALOG.replace(
            r#"{ "id": "tier-10""#,
            r#"{ "id": "needs", "ruleType": "requires", "name": "Needs memory", "ifOptionId": "dock", "thenGroupId": "9b2e4d71-5a3c-4f08-8e6d-1c7a9f3b2e54" },
                { "id": "tier-10""#,
        );
        let path = catalog_file(&broken, "check-broken");
        let rendered = check(
            CheckArgs {
                template: Some(TEMPLATE_ID.into()),
                catalog: Some(path),
            },
            &json_ctx(),
        )
        .unwrap();

        assert_eq!(rendered.outcome, Outcome::Invalid);
        assert!(rendered.text.contains("ifOptionId"));
    }

    #[test]
    fn test_quote_from_preset() {
        let path = catalog_file(CATALOG, "quote-preset");
        let mut args = quote_args(path, &[], None);
        args.preset = Some("pro".into());

        let rendered = quote_template(args, &json_ctx()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered.text).unwrap();
        assert_eq!(json["price"]["subtotal"].as_f64(), Some(1200.0));
        assert_eq!(json["selections"][MEMORY], RAM_32);
    }

    #[test]
    fn test_quote_select_overrides_preset() {
        let path = catalog_file(CATALOG, "quote-preset-select");
        let select = format!("{}={}", MEMORY, RAM_16);
        let mut args = quote_args(path, &[&select], None);
        args.preset = Some("pro".into());

        let rendered = quote_template(args, &json_ctx()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered.text).unwrap();
        assert_eq!(json["price"]["subtotal"].as_f64(), Some(1000.0));
    }

    #[test]
    fn test_preset_replaces_defaults() {
        let path = catalog_file(CATALOG, "quote-preset-no-defaults");
        let mut args = quote_args(path, &[], None);
        args.preset = Some("covered".into());

        // The default memory option is not carried over, so the required group is empty
        let rendered = quote_template(args, &json_ctx()).unwrap();
        assert_eq!(rendered.outcome, Outcome::Invalid);
    }

    #[test]
    fn test_quote_unknown_preset() {
        let path = catalog_file(CATALOG, "quote-preset-unknown");
        let mut args = quote_args(path, &[], None);
        args.preset = Some("enterprise".into());

        assert!(matches!(
            quote_template(args, &json_ctx()),
            Err(CliError::Cpq(cpq_core::CpqError::PresetNotFound(_)))
        ));
    }
}
