//! # Partnership Pricing CLI
//!
//! Terminal front end for `pricing_core`: quote a school from command-line
//! flags, inspect or export the rate card, or walk through a single-program
//! quote interactively.
//!
//! Logs go to stderr (`-v`, `-vv`, `-vvv`); stdout carries only the report
//! or JSON so it can be piped.

mod report;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Month;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, trace};

use pricing_core::file_io::{save_rate_card, RateCardFormat};
use pricing_core::rate_card::DEFAULT_RATE_CARD;
use pricing_core::{
    calculate_quote, load_rate_card, PaymentTerms, PricingError, ProgramCategory, ProgramRequest, QuoteRequest,
    RateCard, SchoolSchedule,
};

/// Exit status when a quote is computed but fails the margin gate
const EXIT_BELOW_GATE: u8 = 2;

/// Quote multi-program school partnerships
#[derive(Parser)]
#[command(name = "pricing_cli")]
#[command(about = "Staffing and pricing quotes for school partnership programs", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price one school's program selection
    Quote(QuoteArgs),
    /// Show or export the effective rate card
    Rates {
        /// Rate card file to load instead of the built-in card
        #[arg(long)]
        rates: Option<PathBuf>,

        /// Output format when printing
        #[arg(long, value_enum, default_value = "toml")]
        format: OutputFormat,

        /// Write the card to this path (.toml or .json) instead of printing
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Prompt for a single program and print its quote
    Interactive {
        /// Rate card file to load instead of the built-in card
        #[arg(long)]
        rates: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct QuoteArgs {
    /// Name of the school
    #[arg(long)]
    school: String,

    /// Email of the partnerships representative preparing the quote
    #[arg(long)]
    prepared_by: String,

    /// School's email
    #[arg(long)]
    school_email: String,

    /// Program as <category>:<students>:<section size>, e.g. stem:600:30 (repeatable)
    #[arg(short, long = "program", value_parser = parse_program, required = true)]
    programs: Vec<ProgramRequest>,

    /// School week: 5 or 6 days
    #[arg(long, value_parser = parse_schedule, default_value = "5")]
    schedule: SchoolSchedule,

    /// Discount percent (0-40)
    #[arg(long, default_value = "0")]
    discount: u32,

    /// Payment month (repeatable); one month means full payment in advance
    #[arg(long = "payment-month", value_parser = parse_month)]
    payment_months: Vec<Month>,

    /// Rate card file to load instead of the built-in card
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Print the quote as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Toml,
    Json,
}

fn parse_program(s: &str) -> Result<ProgramRequest, String> {
    let parts: Vec<&str> = s.split(':').collect();
    let [name, students, size] = parts.as_slice() else {
        return Err(format!("expected <category>:<students>:<section size>, got '{}'", s));
    };
    let program = ProgramCategory::from_str_flexible(name).map_err(|e| e.to_string())?;
    let students = students
        .trim()
        .parse()
        .map_err(|_| format!("student count '{}' is not a whole number", students))?;
    let size = size
        .trim()
        .parse()
        .map_err(|_| format!("section size '{}' is not a whole number", size))?;
    Ok(ProgramRequest::new(program, students, size))
}

fn parse_schedule(s: &str) -> Result<SchoolSchedule, String> {
    SchoolSchedule::from_str_flexible(s).map_err(|e| e.to_string())
}

fn parse_month(s: &str) -> Result<Month, String> {
    s.trim().parse::<Month>().map_err(|_| format!("unknown month '{}'", s))
}

/// Initialize tracing with the requested verbosity, writing to stderr
fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(io::stderr)
        .with_target(verbose >= 2)
        .with_line_number(verbose >= 3)
        .init();

    debug!("pricing_cli started with verbosity level: {}", verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
}

fn load_rates(path: Option<&Path>) -> Result<RateCard> {
    match path {
        Some(path) => load_rate_card(path).with_context(|| format!("loading rate card {}", path.display())),
        None => Ok(DEFAULT_RATE_CARD.clone()),
    }
}

fn run_quote(args: QuoteArgs) -> Result<ExitCode> {
    let rates = load_rates(args.rates.as_deref())?;

    let payment = if args.payment_months.is_empty() {
        PaymentTerms::default()
    } else {
        PaymentTerms::from_months(args.payment_months)?
    };

    let mut request = QuoteRequest::new(args.school, args.prepared_by, args.school_email)
        .with_schedule(args.schedule)
        .with_discount(args.discount)
        .with_payment(payment);
    request.programs = args.programs;

    let quote = match calculate_quote(&request, &rates) {
        Ok(quote) => quote,
        Err(e) => {
            if args.json {
                eprintln!("{}", serde_json::to_string_pretty(&e)?);
            }
            return Err(e).context("quote rejected");
        }
    };

    let commercial = match quote.commercial_breakdown(&rates) {
        Ok(summary) => Some(summary),
        Err(e) if e.is_business_outcome() => None,
        Err(e) => return Err(e.into()),
    };

    if args.json {
        let report = report::QuoteReport::new(&quote, commercial.as_ref());
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report::render_quote(&quote, commercial.as_ref())?);
    }

    if quote.is_deliverable() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_BELOW_GATE))
    }
}

fn run_rates(rates: Option<PathBuf>, format: OutputFormat, output: Option<PathBuf>) -> Result<ExitCode> {
    let card = load_rates(rates.as_deref())?;

    if let Some(path) = output {
        save_rate_card(&card, &path).with_context(|| format!("writing rate card {}", path.display()))?;
        println!("Rate card written to {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let format = match format {
        OutputFormat::Toml => RateCardFormat::Toml,
        OutputFormat::Json => RateCardFormat::Json,
    };
    println!("{}", format.render(&card)?);
    Ok(ExitCode::SUCCESS)
}

fn prompt_line(prompt: &str, default: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default.to_string();
    }

    let input = input.trim();
    if input.is_empty() {
        default.to_string()
    } else {
        input.to_string()
    }
}

fn prompt_u32(prompt: &str, default: u32) -> u32 {
    prompt_line(prompt, &default.to_string()).parse().unwrap_or(default)
}

fn run_interactive(rates: Option<PathBuf>) -> Result<ExitCode> {
    let rates = load_rates(rates.as_deref())?;

    println!("Partnership Pricing - Quick Quote");
    println!("=================================");
    println!();

    let school = prompt_line("School name [Demo School]: ", "Demo School");
    let program = prompt_line("Program (comm / fl / stem) [stem]: ", "stem");
    let program = ProgramCategory::from_str_flexible(&program)?;
    let students = prompt_u32("Students [600]: ", 600);
    let section_size = prompt_u32("Section size [30]: ", 30);
    let schedule = prompt_line("Days per week (5 / 6) [5]: ", "5");
    let schedule = SchoolSchedule::from_str_flexible(&schedule)?;
    let discount = prompt_u32("Discount % [0]: ", 0);
    println!();

    let request = QuoteRequest::new(school, "quick-quote@localhost.local", "school@localhost.local")
        .with_schedule(schedule)
        .with_discount(discount)
        .with_program(ProgramRequest::new(program, students, section_size));

    let quote = calculate_quote(&request, &rates)?;
    let commercial = quote.commercial_breakdown(&rates).ok();
    print!("{}", report::render_quote(&quote, commercial.as_ref())?);

    if quote.is_deliverable() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_BELOW_GATE))
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Quote(args) => run_quote(args),
        Commands::Rates { rates, format, output } => run_rates(rates, format, output),
        Commands::Interactive { rates } => run_interactive(rates),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(pricing) = e.downcast_ref::<PricingError>() {
                eprintln!("Code: {}", pricing.error_code());
            }
            ExitCode::FAILURE
        }
    }
}
