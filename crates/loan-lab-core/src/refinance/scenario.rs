use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::{
    run_amortization, AmortizationInput, LoanTerm, Schedule, ScheduleRow, SimulationLimits,
};
use crate::time_value::{compute_payment, years_to_months};
use crate::types::{Money, Percent, Years};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Original loan plus the terms of the loan that replaces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinanceInput {
    pub balance: Money,
    pub apr: Percent,
    pub years_remaining: Years,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_payment: Option<Money>,
    /// Time until the refinance closes; fractional years round to months.
    pub refi_years: Years,
    pub new_apr: Percent,
    pub new_term_years: Years,
    /// Closing costs, rolled into the new balance. Negative values count as zero.
    #[serde(default)]
    pub costs: Money,
    #[serde(default)]
    pub limits: SimulationLimits,
}

/// Stitched pre- and post-refinance schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinanceResult {
    #[serde(flatten)]
    pub schedule: Schedule,
    /// Original balance at the refinance month plus closing costs.
    pub balance_at_refinance: Option<Money>,
    pub new_monthly_payment: Option<Money>,
}

impl RefinanceResult {
    pub fn infeasible() -> Self {
        Self {
            schedule: Schedule::infeasible(),
            balance_at_refinance: None,
            new_monthly_payment: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Run the original loan up to the refinance month, then the new loan on the
/// remaining balance plus costs, and join the two into one timeline.
///
/// Post-refinance months continue numbering from the last pre-refinance row
/// and cumulative interest/principal carry over without resetting.
pub fn run_refinance_scenario(input: &RefinanceInput) -> RefinanceResult {
    let base_months = years_to_months(input.years_remaining);
    let base_payment = input
        .current_payment
        .or_else(|| compute_payment(input.balance, input.apr, base_months));
    let refi_months = years_to_months(input.refi_years);

    let pre_limits = SimulationLimits {
        limit_months: refi_months.min(input.limits.limit_months),
        ..input.limits
    };
    let pre = run_amortization(
        &AmortizationInput::new(input.balance, input.apr, LoanTerm::Months(base_months))
            .with_payment(base_payment)
            .with_limits(pre_limits),
    );

    let snapshot = match pre.last_row() {
        Some(row) => row.clone(),
        None => {
            tracing::debug!(
                refi_months,
                "Pre-refinance leg produced no rows; nothing to splice"
            );
            return RefinanceResult::infeasible();
        }
    };

    let balance_at_refinance = snapshot.balance.saturating_add(input.costs.max(Decimal::ZERO));
    let new_months = years_to_months(input.new_term_years);
    let new_payment = compute_payment(balance_at_refinance, input.new_apr, new_months);

    let post = run_amortization(
        &AmortizationInput::new(
            balance_at_refinance,
            input.new_apr,
            LoanTerm::Months(new_months),
        )
        .with_payment(new_payment)
        .with_limits(input.limits),
    );

    let negative_amortization =
        pre.negative_amortization_detected || post.negative_amortization_detected;
    let rows = stitch(pre.rows, &snapshot, post.rows);

    tracing::debug!(
        refi_month = snapshot.month,
        balance_at_refinance = %balance_at_refinance,
        total_months = rows.len(),
        "Refinance legs stitched"
    );

    RefinanceResult {
        schedule: Schedule::from_rows(rows, negative_amortization),
        balance_at_refinance: Some(balance_at_refinance),
        new_monthly_payment: new_payment,
    }
}

/// Append the post-refinance rows after `pre`, offsetting month numbers and
/// carrying the cumulative totals forward from `splice`.
fn stitch(
    mut pre: Vec<ScheduleRow>,
    splice: &ScheduleRow,
    post: Vec<ScheduleRow>,
) -> Vec<ScheduleRow> {
    let offset = pre.len() as u32;
    pre.reserve(post.len());
    for row in post {
        pre.push(ScheduleRow {
            month: offset + row.month,
            extra_monthly: Decimal::ZERO,
            extra_lump: Decimal::ZERO,
            cumulative_interest: splice
                .cumulative_interest
                .saturating_add(row.cumulative_interest),
            cumulative_principal: splice
                .cumulative_principal
                .saturating_add(row.cumulative_principal),
            ..row
        });
    }
    pre
}
