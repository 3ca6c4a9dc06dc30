//! CLI tool for card data validation.
//!
//! # Usage
//!
//! ```bash
//! # Validate a card record
//! ccvalidator validate --number 4111111111111111 --name "John Smith" \
//!     --month 1 --year 2030 --cvv 123
//!
//! # Validate a JSON card record with a JSON policy
//! ccvalidator validate --card card.json --policy policy.json --output json
//!
//! # Detect the provider of a number
//! ccvalidator detect 378282246310005
//!
//! # Check the Luhn checksum
//! ccvalidator luhn 4111111111111111
//!
//! # Mask a number
//! ccvalidator mask 4111111111111111
//! ```
//!
//! Set `RUST_LOG=cardcheck=debug` to see the pipeline's log events.

use std::path::PathBuf;
use std::process::ExitCode;

use cardcheck::{detect_provider, luhn, mask, CardData, CardValidator, DefaultTranslator, Policy};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ccvalidator")]
#[command(author, version, about = "Payment card data validation tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a full card record
    Validate(ValidateArgs),

    /// Detect the provider from a card number
    Detect {
        /// Card number (digits only)
        card_number: String,
    },

    /// Check if a card number passes the Luhn algorithm
    Luhn {
        /// Card number (digits only)
        card_number: String,
    },

    /// Mask all but the last four characters of a card number
    Mask {
        /// Card number to mask
        card_number: String,
    },
}

#[derive(Args)]
struct ValidateArgs {
    /// JSON file with the card record; flags below override its fields
    #[arg(long)]
    card: Option<PathBuf>,

    /// Card number
    #[arg(long)]
    number: Option<String>,

    /// Name on card
    #[arg(long)]
    name: Option<String>,

    /// Expiration month (1-12)
    #[arg(long, allow_negative_numbers = true)]
    month: Option<i32>,

    /// Expiration year (four digits)
    #[arg(long, allow_negative_numbers = true)]
    year: Option<i32>,

    /// Verification value (CVV/CVC)
    #[arg(long)]
    cvv: Option<String>,

    /// Provider name, e.g. visa or american_express
    #[arg(long)]
    provider: Option<String>,

    /// Start month (switch/solo)
    #[arg(long, allow_negative_numbers = true)]
    start_month: Option<i32>,

    /// Start year (switch/solo)
    #[arg(long, allow_negative_numbers = true)]
    start_year: Option<i32>,

    /// Issue number (switch/solo)
    #[arg(long)]
    issue_number: Option<String>,

    /// JSON policy file
    #[arg(long)]
    policy: Option<PathBuf>,

    /// Accept a blank verification value
    #[arg(long)]
    no_verification_value: bool,

    /// Do not derive the provider from the number
    #[arg(long)]
    no_derive: bool,

    /// Comma-separated list of supported providers
    #[arg(long, value_delimiter = ',')]
    supported: Option<Vec<String>>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    output: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate(args) => cmd_validate(args),
        Commands::Detect { card_number } => cmd_detect(&card_number),
        Commands::Luhn { card_number } => cmd_luhn(&card_number),
        Commands::Mask { card_number } => cmd_mask(&card_number),
    }
}

fn build_policy(args: &ValidateArgs) -> Result<Policy, cardcheck::PolicyError> {
    let mut policy = match &args.policy {
        Some(path) => Policy::load(path)?,
        None => Policy::default(),
    };
    if args.no_verification_value {
        policy = policy.require_verification_value(false);
    }
    if args.no_derive {
        policy = policy.auto_derive_provider_name(false);
    }
    if let Some(names) = &args.supported {
        policy = policy.with_supported_providers(names);
    }
    Ok(policy)
}

fn build_card(args: &ValidateArgs) -> Result<CardData, String> {
    let mut card = match &args.card {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
            serde_json::from_str(&json)
                .map_err(|e| format!("invalid card record {}: {}", path.display(), e))?
        }
        None => CardData::new(),
    };

    if let Some(number) = &args.number {
        card.set_number(number.as_str());
    }
    if let Some(name) = &args.name {
        card.set_name_on_card(name.as_str());
    }
    if args.month.is_some() {
        card.set_expiration_month(args.month);
    }
    if args.year.is_some() {
        card.set_expiration_year(args.year);
    }
    if let Some(cvv) = &args.cvv {
        card.set_verification_value(cvv.as_str());
    }
    if let Some(provider) = &args.provider {
        card.set_provider_name(provider);
    }
    if args.start_month.is_some() {
        card.set_start_month(args.start_month);
    }
    if args.start_year.is_some() {
        card.set_start_year(args.start_year);
    }
    if let Some(issue) = &args.issue_number {
        card.set_issue_number(issue.as_str());
    }
    Ok(card)
}

fn cmd_validate(args: ValidateArgs) -> ExitCode {
    let policy = match build_policy(&args) {
        Ok(policy) => policy,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };
    let card = match build_card(&args) {
        Ok(card) => card,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let report = CardValidator::new(policy).validate(&card);
    let messages = report.errors().full_messages(&DefaultTranslator);

    match args.output {
        OutputFormat::Text => {
            println!("Valid: {}", if report.is_valid() { "yes" } else { "no" });
            println!("Provider: {}", display_or_dash(report.provider_name()));
            println!(
                "Masked: {}",
                card.masked_number().unwrap_or_else(|| "-".to_string())
            );
            println!(
                "Last four: {}",
                mask::last_four(card.card_number()).unwrap_or_else(|| "-".to_string())
            );
            for message in &messages {
                println!("Error: {}", message);
            }
        }
        OutputFormat::Json => {
            let body = serde_json::json!({
                "valid": report.is_valid(),
                "provider_name": report.provider_name(),
                "masked_number": card.masked_number(),
                "last_four": mask::last_four(card.card_number()),
                "errors": report.errors(),
                "messages": messages,
            });
            match serde_json::to_string_pretty(&body) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::from(2);
                }
            }
        }
    }

    if report.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn cmd_detect(card_number: &str) -> ExitCode {
    match detect_provider(card_number) {
        Some(provider) => {
            println!("Detected Provider: {}", provider);
            println!("Pattern: {}", provider.pattern());
            ExitCode::SUCCESS
        }
        None => {
            println!("Detected Provider: Unknown");
            ExitCode::FAILURE
        }
    }
}

fn cmd_luhn(card_number: &str) -> ExitCode {
    if luhn::validate_str(card_number) {
        println!("Luhn check: PASS");
        ExitCode::SUCCESS
    } else {
        println!("Luhn check: FAIL");
        ExitCode::FAILURE
    }
}

fn cmd_mask(card_number: &str) -> ExitCode {
    match mask::mask_number(card_number) {
        Some(masked) => {
            println!("{}", masked);
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("Error: Card number too short");
            ExitCode::FAILURE
        }
    }
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
