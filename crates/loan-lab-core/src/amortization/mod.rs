//! Month-by-month loan amortization.
//!
//! Level-payment schedules with optional recurring extra principal and
//! one-time lump sums, plus the baseline-vs-scenario comparator. All math in
//! `rust_decimal::Decimal`; infeasible configurations are reported through
//! `Option` fields rather than errors.

pub mod comparison;
pub mod schedule;
pub mod simulator;

pub use comparison::{compare_schedules, ScenarioComparison};
pub use schedule::{
    LoanTerm, LumpSum, RecurringExtra, Schedule, ScheduleRow, SimulationLimits,
    DEFAULT_LIMIT_MONTHS, DEFAULT_PAYOFF_EPSILON,
};
pub use simulator::{run_amortization, AmortizationInput};
