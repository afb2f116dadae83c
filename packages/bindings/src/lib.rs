use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use loan_lab_core::amortization::{self, AmortizationInput, Schedule};
use loan_lab_core::refinance::{self, RefinanceInput};
use loan_lab_core::payoff_lab::{self, PayoffLabInput};
use loan_lab_core::time_value;
use loan_lab_core::{Money, Percent};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Payment formula
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PaymentRequest {
    balance: Money,
    apr: Percent,
    months: u32,
}

/// Level monthly payment as a decimal string, or `null` when it cannot be computed.
#[napi]
pub fn compute_payment(input_json: String) -> NapiResult<String> {
    let req: PaymentRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let payment = time_value::compute_payment(req.balance, req.apr, req.months);
    serde_json::to_string(&payment).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Schedules
// ---------------------------------------------------------------------------

#[napi]
pub fn run_amortization(input_json: String) -> NapiResult<String> {
    let input: AmortizationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let schedule = amortization::run_amortization(&input);
    serde_json::to_string(&schedule).map_err(to_napi_error)
}

#[napi]
pub fn run_refinance_scenario(input_json: String) -> NapiResult<String> {
    let input: RefinanceInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let result = refinance::run_refinance_scenario(&input);
    serde_json::to_string(&result).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct CompareRequest {
    baseline: Schedule,
    scenario: Schedule,
}

/// Interest and months saved between two previously computed schedules.
#[napi]
pub fn compare_schedules(input_json: String) -> NapiResult<String> {
    let req: CompareRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let comparison = amortization::compare_schedules(&req.baseline, &req.scenario);
    serde_json::to_string(&comparison).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Payoff lab
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_payoff(input_json: String) -> NapiResult<String> {
    let input: PayoffLabInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = payoff_lab::analyze_payoff(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
