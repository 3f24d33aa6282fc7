mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::deal::DealArgs;

/// Rental property deal analysis
#[derive(Parser)]
#[command(
    name = "deal",
    version,
    about = "Rental property deal analysis",
    long_about = "Analyse a single rental property purchase with decimal precision: \
                  loan sizing, NOI, mortgage payment, cash flow, cap rate, \
                  cash-on-cash return and DSCR. Input comes from a JSON/YAML file, \
                  stdin, or individual flags applied over the default deal."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter used when RUST_LOG is unset (e.g. "debug", "deal_analyzer_core=debug")
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Full analysis: metrics, expense breakdown, cash flow and warnings
    Analyze(DealArgs),
    /// Year-one metrics only
    Metrics(DealArgs),
    /// Reconcile the down-payment percent and amount
    Reconcile(DealArgs),
    /// Print the default deal as an input template
    Defaults,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::deal::run_analyze(args),
        Commands::Metrics(args) => commands::deal::run_metrics(args),
        Commands::Reconcile(args) => commands::deal::run_reconcile(args),
        Commands::Defaults => commands::deal::run_defaults(),
        Commands::Version => {
            println!("deal {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
