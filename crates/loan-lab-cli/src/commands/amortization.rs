use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_lab_core::amortization::{
    self, AmortizationInput, LoanTerm, LumpSum, RecurringExtra, SimulationLimits,
};
use loan_lab_core::time_value;
use loan_lab_core::LoanLabError;

use crate::input;

/// Arguments for the level-payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    /// Outstanding balance
    #[arg(long)]
    pub balance: Decimal,

    /// Annual percentage rate in percent (e.g. 6.5 for 6.5%)
    #[arg(long)]
    pub apr: Decimal,

    /// Term in months
    #[arg(long, conflicts_with = "years")]
    pub months: Option<u32>,

    /// Term in years (fractional years round to whole months)
    #[arg(long)]
    pub years: Option<Decimal>,
}

/// Arguments for an amortization schedule
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AmortizeArgs {
    /// Outstanding balance
    #[arg(long)]
    pub balance: Option<Decimal>,

    /// Annual percentage rate in percent (e.g. 6.5 for 6.5%)
    #[arg(long)]
    pub apr: Option<Decimal>,

    /// Remaining term in months
    #[arg(long, conflicts_with = "years")]
    pub months: Option<u32>,

    /// Remaining term in years
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Current monthly payment (defaults to the level payment)
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Extra principal paid every month
    #[arg(long)]
    pub extra_monthly: Option<Decimal>,

    /// First month the recurring extra applies to
    #[arg(long, default_value = "1")]
    pub extra_start_month: u32,

    /// One-time lump sum as MONTH:AMOUNT (repeatable)
    #[arg(long = "lump", value_parser = parse_lump)]
    pub lumps: Vec<LumpSum>,

    /// Hard cap on simulated months
    #[arg(long)]
    pub limit_months: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Parse a `MONTH:AMOUNT` lump-sum flag.
pub fn parse_lump(raw: &str) -> Result<LumpSum, String> {
    let (month, amount) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected MONTH:AMOUNT, got '{raw}'"))?;
    let month: u32 = month
        .trim()
        .parse()
        .map_err(|_| format!("invalid lump-sum month '{month}'"))?;
    if month == 0 {
        return Err("lump-sum month is 1-based".into());
    }
    let amount: Decimal = amount
        .trim()
        .parse()
        .map_err(|_| format!("invalid lump-sum amount '{amount}'"))?;
    Ok(LumpSum { month, amount })
}

fn term_from_flags(months: Option<u32>, years: Option<Decimal>) -> Result<LoanTerm, String> {
    match (months, years) {
        (Some(m), _) => Ok(LoanTerm::Months(m)),
        (None, Some(y)) => Ok(LoanTerm::Years(y)),
        (None, None) => Err("--months or --years is required".into()),
    }
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let months = term_from_flags(args.months, args.years)?.months();
    let summary = time_value::loan_payment_for_months(args.balance, args.apr, months)
        .ok_or_else(|| {
            LoanLabError::InfeasibleSchedule(format!(
                "no level payment for balance {} over {} months",
                args.balance, months
            ))
        })?;
    Ok(serde_json::to_value(summary)?)
}

pub fn run_amortize(args: AmortizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let amort_input: AmortizationInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin::<AmortizationInput>()? {
        data
    } else {
        let mut limits = SimulationLimits::default();
        if let Some(limit) = args.limit_months {
            limits.limit_months = limit;
        }
        AmortizationInput {
            balance: args
                .balance
                .ok_or("--balance is required (or provide --input)")?,
            apr: args.apr.ok_or("--apr is required (or provide --input)")?,
            term: term_from_flags(args.months, args.years)?,
            current_payment: args.payment,
            recurring_extra: args.extra_monthly.map(|amount| RecurringExtra {
                amount,
                start_month: args.extra_start_month,
            }),
            lump_sums: args.lumps,
            limits,
        }
    };

    let schedule = amortization::run_amortization(&amort_input);
    Ok(serde_json::to_value(schedule)?)
}
