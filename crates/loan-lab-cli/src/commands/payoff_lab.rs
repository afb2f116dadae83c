use clap::Args;
use serde_json::Value;

use loan_lab_core::payoff_lab::{self, PayoffLabInput};

use crate::input;

/// Arguments for a baseline vs scenario comparison
#[derive(Args)]
pub struct LabArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_lab(args: LabArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let lab_input: PayoffLabInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin::<PayoffLabInput>()? {
        data
    } else {
        return Err("--input <file.json> or stdin required for the payoff lab".into());
    };
    let result = payoff_lab::analyze_payoff(&lab_input)?;
    Ok(serde_json::to_value(result)?)
}
