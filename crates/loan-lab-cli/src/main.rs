mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::amortization::{AmortizeArgs, PaymentArgs};
use commands::payoff_lab::LabArgs;
use commands::refinance::RefinanceArgs;

/// Loan amortization, extra-principal and refinance scenarios
#[derive(Parser)]
#[command(
    name = "loanlab",
    version,
    about = "Loan amortization, extra-principal and refinance scenarios",
    long_about = "A CLI for month-by-month loan amortization with decimal precision. \
                  Supports level payments, recurring extra principal, lump sums, \
                  refinance scenarios, and baseline-vs-scenario comparisons."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Emit debug diagnostics on stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Level monthly payment for a fully amortizing loan
    Payment(PaymentArgs),
    /// Month-by-month amortization schedule with optional extras
    Amortize(AmortizeArgs),
    /// Stitched schedule for refinancing partway through a loan
    Refinance(RefinanceArgs),
    /// Baseline vs scenario comparison (Loans & Payoff Lab)
    Lab(LabArgs),
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

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("loan_lab_core=debug,loanlab=debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::amortization::run_payment(args),
        Commands::Amortize(args) => commands::amortization::run_amortize(args),
        Commands::Refinance(args) => commands::refinance::run_refinance(args),
        Commands::Lab(args) => commands::payoff_lab::run_lab(args),
        Commands::Version => {
            println!("loanlab {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    tracing::debug!(format = ?cli.output, ok = result.is_ok(), "Command finished");

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
