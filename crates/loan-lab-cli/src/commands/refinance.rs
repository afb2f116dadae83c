use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_lab_core::amortization::SimulationLimits;
use loan_lab_core::refinance::{self, RefinanceInput};

use crate::input;

/// Arguments for a refinance scenario
#[derive(Args)]
pub struct RefinanceArgs {
    /// Outstanding balance of the current loan
    #[arg(long)]
    pub balance: Option<Decimal>,

    /// Current APR in percent
    #[arg(long)]
    pub apr: Option<Decimal>,

    /// Years remaining on the current loan
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Current monthly payment (defaults to the level payment)
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Years until the refinance closes (decimals allowed)
    #[arg(long)]
    pub refi_years: Option<Decimal>,

    /// APR of the new loan in percent
    #[arg(long)]
    pub new_apr: Option<Decimal>,

    /// Term of the new loan in years
    #[arg(long)]
    pub new_term_years: Option<Decimal>,

    /// Closing costs rolled into the new loan (default 0)
    #[arg(long, conflicts_with = "estimate_costs")]
    pub costs: Option<Decimal>,

    /// Roll in estimated closing costs: 2% of the balance, within [1000, 6000]
    #[arg(long)]
    pub estimate_costs: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_refinance(args: RefinanceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let refi_input: RefinanceInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin::<RefinanceInput>()? {
        data
    } else {
        input_from_flags(&args)?
    };

    let result = refinance::run_refinance_scenario(&refi_input);
    Ok(serde_json::to_value(result)?)
}

fn input_from_flags(args: &RefinanceArgs) -> Result<RefinanceInput, String> {
    let balance = args
        .balance
        .ok_or("--balance is required (or provide --input)")?;
    let costs = if args.estimate_costs {
        refinance::estimate_refinance_costs(balance)
    } else {
        args.costs.unwrap_or_default()
    };
    Ok(RefinanceInput {
        balance,
        apr: args.apr.ok_or("--apr is required (or provide --input)")?,
        years_remaining: args
            .years
            .ok_or("--years is required (or provide --input)")?,
        current_payment: args.payment,
        refi_years: args
            .refi_years
            .ok_or("--refi-years is required (or provide --input)")?,
        new_apr: args
            .new_apr
            .ok_or("--new-apr is required (or provide --input)")?,
        new_term_years: args
            .new_term_years
            .ok_or("--new-term-years is required (or provide --input)")?,
        costs,
        limits: SimulationLimits::default(),
    })
}
