use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{
    compare_schedules, run_amortization, AmortizationInput, LoanTerm, LumpSum, RecurringExtra,
    ScenarioComparison, Schedule, SimulationLimits,
};
use crate::error::LoanLabError;
use crate::refinance::{
    estimate_refinance_costs, run_refinance_scenario, RefinanceInput, RefinanceResult,
};
use crate::time_value::{compute_payment, years_to_months};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Years};
use crate::LoanLabResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// How much of the user's own input the lab trusts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabMode {
    /// Payment derived from the loan terms; refinance costs estimated.
    #[default]
    Simple,
    /// Custom current payment and refinance costs are honoured.
    Advanced,
}

/// Recurring extra principal, starting `start_years` into the loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringExtraSpec {
    pub amount: Money,
    #[serde(default)]
    pub start_years: Years,
}

/// One-time extra principal paid `at_years` into the loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LumpSumSpec {
    pub amount: Money,
    pub at_years: Years,
}

/// The what-if compared against the baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PayoffScenario {
    AdditionalPrincipal {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        recurring: Option<RecurringExtraSpec>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        lump_sums: Vec<LumpSumSpec>,
    },
    Refinance {
        refi_years: Years,
        new_apr: Percent,
        new_term_years: Years,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        costs: Option<Money>,
    },
}

impl PayoffScenario {
    fn label(&self) -> &'static str {
        match self {
            PayoffScenario::AdditionalPrincipal { .. } => "additional_principal",
            PayoffScenario::Refinance { .. } => "refinance",
        }
    }
}

/// Top-level input for `analyze_payoff`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffLabInput {
    pub balance: Money,
    pub apr: Percent,
    pub years_remaining: Years,
    #[serde(default)]
    pub mode: LabMode,
    /// Only used in `Advanced` mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_payment: Option<Money>,
    pub scenario: PayoffScenario,
    #[serde(default)]
    pub limits: SimulationLimits,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Scenario schedule; a refinance also carries its new-loan figures.
/// Serialized with a `kind` tag next to the schedule fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioSchedule {
    Refinance(RefinanceResult),
    AdditionalPrincipal(Schedule),
}

impl ScenarioSchedule {
    pub fn schedule(&self) -> &Schedule {
        match self {
            ScenarioSchedule::Refinance(r) => &r.schedule,
            ScenarioSchedule::AdditionalPrincipal(s) => s,
        }
    }
}

/// Baseline vs scenario, side by side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffLabOutput {
    pub baseline_payment: Option<Money>,
    pub scenario_payment: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refinance_costs: Option<Money>,
    pub baseline: Schedule,
    pub scenario: ScenarioSchedule,
    pub comparison: ScenarioComparison,
    pub negative_amortization_warning: bool,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Build the baseline schedule (no extras) and the chosen scenario, then
/// derive interest and months saved.
pub fn analyze_payoff(input: &PayoffLabInput) -> LoanLabResult<ComputationOutput<PayoffLabOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate(input)?;

    let base_months = years_to_months(input.years_remaining);
    let payment_override = match input.mode {
        LabMode::Advanced => input.current_payment,
        LabMode::Simple => None,
    };
    let baseline_payment =
        payment_override.or_else(|| compute_payment(input.balance, input.apr, base_months));

    let baseline = run_amortization(
        &AmortizationInput::new(input.balance, input.apr, LoanTerm::Months(base_months))
            .with_payment(baseline_payment)
            .with_limits(input.limits),
    );

    let (scenario, scenario_payment, refinance_costs) = match &input.scenario {
        PayoffScenario::AdditionalPrincipal {
            recurring,
            lump_sums,
        } => {
            let extra = AmortizationInput {
                balance: input.balance,
                apr: input.apr,
                term: LoanTerm::Months(base_months),
                current_payment: baseline_payment,
                recurring_extra: recurring
                    .as_ref()
                    .filter(|r| r.amount > Decimal::ZERO)
                    .map(|r| RecurringExtra {
                        amount: r.amount,
                        start_month: years_to_months(r.start_years),
                    }),
                lump_sums: lump_sums
                    .iter()
                    .filter(|l| l.amount > Decimal::ZERO)
                    .map(|l| LumpSum {
                        month: years_to_months(l.at_years),
                        amount: l.amount,
                    })
                    .collect(),
                limits: input.limits,
            };
            let schedule = run_amortization(&extra);
            (
                ScenarioSchedule::AdditionalPrincipal(schedule),
                baseline_payment,
                None,
            )
        }
        PayoffScenario::Refinance {
            refi_years,
            new_apr,
            new_term_years,
            costs,
        } => {
            let costs_used = match input.mode {
                LabMode::Simple => estimate_refinance_costs(input.balance),
                LabMode::Advanced => costs.unwrap_or(Decimal::ZERO).max(Decimal::ZERO),
            };
            let result = run_refinance_scenario(&RefinanceInput {
                balance: input.balance,
                apr: input.apr,
                years_remaining: input.years_remaining,
                current_payment: payment_override,
                refi_years: *refi_years,
                new_apr: *new_apr,
                new_term_years: *new_term_years,
                costs: costs_used,
                limits: input.limits,
            });
            if let Some(at_refi) = result.balance_at_refinance {
                if at_refi - costs_used <= input.limits.payoff_epsilon {
                    warnings.push(
                        "Loan is paid off before the refinance month; nothing left to refinance"
                            .into(),
                    );
                }
            }
            let new_payment = result.new_monthly_payment;
            (
                ScenarioSchedule::Refinance(result),
                new_payment,
                Some(costs_used),
            )
        }
    };

    collect_schedule_warnings("Baseline", &baseline, &input.limits, &mut warnings);
    collect_schedule_warnings("Scenario", scenario.schedule(), &input.limits, &mut warnings);

    let negative_amortization_warning = baseline.negative_amortization_detected
        || scenario.schedule().negative_amortization_detected;
    if negative_amortization_warning {
        warnings.push("Payment appears too low to cover interest (negative amortization)".into());
    }

    let comparison = compare_schedules(&baseline, scenario.schedule());

    tracing::debug!(
        scenario = input.scenario.label(),
        baseline_months = ?baseline.payoff_month,
        scenario_months = ?scenario.schedule().payoff_month,
        months_saved = ?comparison.months_saved,
        "Payoff lab analysis complete"
    );

    let output = PayoffLabOutput {
        baseline_payment,
        scenario_payment,
        refinance_costs,
        baseline,
        scenario,
        comparison,
        negative_amortization_warning,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment amortization with baseline vs scenario comparison",
        &serde_json::json!({
            "balance": input.balance.to_string(),
            "apr": input.apr.to_string(),
            "term_months": base_months,
            "mode": input.mode,
            "scenario": input.scenario.label(),
            "limit_months": input.limits.limit_months,
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn validate(input: &PayoffLabInput) -> LoanLabResult<()> {
    if input.apr < Decimal::ZERO {
        return Err(LoanLabError::InvalidInput {
            field: "apr".into(),
            reason: "APR must be non-negative".into(),
        });
    }
    if let PayoffScenario::Refinance { new_apr, .. } = &input.scenario {
        if *new_apr < Decimal::ZERO {
            return Err(LoanLabError::InvalidInput {
                field: "new_apr".into(),
                reason: "New APR must be non-negative".into(),
            });
        }
    }
    Ok(())
}

fn collect_schedule_warnings(
    label: &str,
    schedule: &Schedule,
    limits: &SimulationLimits,
    warnings: &mut Vec<String>,
) {
    if !schedule.is_feasible() {
        warnings.push(format!(
            "{label} payment cannot be computed; check balance, term and payment"
        ));
    } else if schedule.stopped_before_payoff(limits.payoff_epsilon) {
        let months = schedule.payoff_month.unwrap_or_default();
        let residual = schedule.final_balance().unwrap_or_default();
        warnings.push(format!(
            "{label} schedule stopped at the {months}-month safety cap with {} outstanding",
            residual.round_dp(2)
        ));
    }
}
