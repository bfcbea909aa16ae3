//! # cpq - Configure-Price-Quote Command Line
//!
//! Commands:
//! - `cpq price [FILE|-]` - Price a raw PriceInput JSON document
//! - `cpq quote --template ID --select GROUP=OPT` - Quote a catalog template
//! - `cpq check [--template ID]` - Validate catalog templates
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          cpq Startup                                    │
//! │                                                                         │
//! │  1. Parse arguments (clap)                                             │
//! │  2. Load CliConfig (env > cpq.toml > defaults)                         │
//! │  3. Install tracing subscriber (stderr, RUST_LOG > log_filter)         │
//! │  4. Run the command, print its output to stdout                        │
//! │  5. Exit 0 (valid), 2 (invalid configuration), 1 (error)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod commands;
mod config;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, Context, Outcome, PriceArgs, QuoteArgs};
use config::CliConfig;
use error::{CliError, CliResult};

/// Price product configurations from a CPQ catalog
#[derive(Parser)]
#[command(name = "cpq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a PriceInput JSON document
    Price(PriceArgs),

    /// Quote a template from the catalog
    Quote(QuoteArgs),

    /// Run authoring and publish checks on catalog templates
    Check(CheckArgs),
}

/// Exit code when the command ran but its result failed validation.
const EXIT_INVALID: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    match run(cli) {
        Ok(Outcome::Valid) => ExitCode::SUCCESS,
        Ok(Outcome::Invalid) => ExitCode::from(EXIT_INVALID),
        Err(e) => {
            report_error(&e, json);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<Outcome> {
    let config = CliConfig::load(cli.config)?;
    init_tracing(&config.log_filter);

    debug!(
        file = ?config.loaded_from,
        catalog = ?config.catalog_path,
        output = %config.output,
        json = cli.json,
        "Configuration loaded"
    );
    let ctx = Context::new(config, cli.json);

    let rendered = match cli.command {
        Commands::Price(args) => commands::price(args, &ctx)?,
        Commands::Quote(args) => commands::quote_template(args, &ctx)?,
        Commands::Check(args) => commands::check(args, &ctx)?,
    };

    println!("{}", rendered.text.trim_end());
    Ok(rendered.outcome)
}

/// Logs go to stderr so JSON on stdout stays parseable.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn report_error(err: &CliError, json: bool) {
    if json {
        match serde_json::to_string(&err.report()) {
            Ok(line) => eprintln!("{}", line),
            Err(_) => eprintln!("{}", err),
        }
        return;
    }

    eprintln!("error: {}", err);
}
