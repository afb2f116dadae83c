use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::time_value::years_to_months;
use crate::types::{Money, Years};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Hard ceiling on simulated months unless the caller overrides it.
pub const DEFAULT_LIMIT_MONTHS: u32 = 1200;

/// Balance at or below which the loan is considered fully paid.
pub const DEFAULT_PAYOFF_EPSILON: Decimal = dec!(0.01);

/// Months added to twice the term when bounding a run.
const CAP_HEADROOM_MONTHS: u32 = 240;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Remaining term of a loan, either in exact months or in (fractional) years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanTerm {
    Months(u32),
    Years(Years),
}

impl LoanTerm {
    /// Whole number of months, never less than one.
    pub fn months(&self) -> u32 {
        match self {
            LoanTerm::Months(m) => (*m).max(1),
            LoanTerm::Years(y) => years_to_months(*y),
        }
    }
}

/// Extra principal paid every month from `start_month` (inclusive) onwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecurringExtra {
    pub amount: Money,
    pub start_month: u32,
}

/// One-time principal payment applied in `month`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LumpSum {
    pub month: u32,
    pub amount: Money,
}

/// Safety valves for a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationLimits {
    #[serde(default = "default_limit_months")]
    pub limit_months: u32,
    #[serde(default = "default_payoff_epsilon")]
    pub payoff_epsilon: Money,
}

fn default_limit_months() -> u32 {
    DEFAULT_LIMIT_MONTHS
}

fn default_payoff_epsilon() -> Money {
    DEFAULT_PAYOFF_EPSILON
}

impl Default for SimulationLimits {
    fn default() -> Self {
        Self {
            limit_months: DEFAULT_LIMIT_MONTHS,
            payoff_epsilon: DEFAULT_PAYOFF_EPSILON,
        }
    }
}

impl SimulationLimits {
    /// Maximum months a run on a `term_months` loan may simulate:
    /// `min(limit_months, 2 * term + 240)`.
    pub fn iteration_cap(&self, term_months: u32) -> u32 {
        let bound = term_months
            .saturating_mul(2)
            .saturating_add(CAP_HEADROOM_MONTHS);
        self.limit_months.min(bound)
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// A single simulated month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub month: u32,
    pub interest: Money,
    /// Scheduled principal plus extras, clamped to the remaining balance.
    pub principal: Money,
    /// Nominal scheduled payment.
    pub payment: Money,
    pub extra_monthly: Money,
    pub extra_lump: Money,
    /// Balance after this month's principal.
    pub balance: Money,
    pub cumulative_interest: Money,
    pub cumulative_principal: Money,
}

/// Month-by-month schedule plus summary figures.
///
/// `payoff_month` and `total_interest` are `None` when the configuration
/// is infeasible (no positive payment could be resolved).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub rows: Vec<ScheduleRow>,
    pub payoff_month: Option<u32>,
    pub total_interest: Option<Money>,
    pub negative_amortization_detected: bool,
}

impl Schedule {
    /// Empty result signalling that no schedule can be produced.
    pub fn infeasible() -> Self {
        Self {
            rows: Vec::new(),
            payoff_month: None,
            total_interest: None,
            negative_amortization_detected: true,
        }
    }

    pub(crate) fn from_rows(rows: Vec<ScheduleRow>, negative_amortization: bool) -> Self {
        let total_interest = rows
            .last()
            .map(|r| r.cumulative_interest)
            .unwrap_or(Decimal::ZERO);
        Self {
            payoff_month: Some(rows.len() as u32),
            total_interest: Some(total_interest),
            rows,
            negative_amortization_detected: negative_amortization,
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.payoff_month.is_some()
    }

    pub fn last_row(&self) -> Option<&ScheduleRow> {
        self.rows.last()
    }

    /// Balance left after the last simulated month.
    pub fn final_balance(&self) -> Option<Money> {
        self.last_row().map(|r| r.balance)
    }

    /// True when the run ended with more than `epsilon` still outstanding,
    /// i.e. it was stopped by the iteration cap rather than by payoff.
    pub fn stopped_before_payoff(&self, epsilon: Money) -> bool {
        self.final_balance().is_some_and(|b| b > epsilon)
    }
}
