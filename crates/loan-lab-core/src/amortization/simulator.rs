use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::schedule::{LoanTerm, LumpSum, RecurringExtra, Schedule, ScheduleRow, SimulationLimits};
use crate::time_value::{compute_payment, monthly_rate};
use crate::types::{Money, Percent};

/// Parameters for a single amortization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationInput {
    pub balance: Money,
    pub apr: Percent,
    pub term: LoanTerm,
    /// Explicit monthly payment; derived from balance, APR and term if absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_payment: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_extra: Option<RecurringExtra>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lump_sums: Vec<LumpSum>,
    #[serde(default)]
    pub limits: SimulationLimits,
}

impl AmortizationInput {
    pub fn new(balance: Money, apr: Percent, term: LoanTerm) -> Self {
        Self {
            balance,
            apr,
            term,
            current_payment: None,
            recurring_extra: None,
            lump_sums: Vec::new(),
            limits: SimulationLimits::default(),
        }
    }

    pub fn with_payment(mut self, payment: Option<Money>) -> Self {
        self.current_payment = payment;
        self
    }

    pub fn with_recurring_extra(mut self, amount: Money, start_month: u32) -> Self {
        self.recurring_extra = Some(RecurringExtra {
            amount,
            start_month,
        });
        self
    }

    pub fn with_lump_sum(mut self, month: u32, amount: Money) -> Self {
        self.lump_sums.push(LumpSum { month, amount });
        self
    }

    pub fn with_limits(mut self, limits: SimulationLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Payment the run will use: the override if supplied, else the level payment.
    pub fn resolved_payment(&self) -> Option<Money> {
        self.current_payment
            .or_else(|| compute_payment(self.balance, self.apr, self.term.months()))
    }
}

/// Simulate a loan month by month until payoff or the iteration cap.
///
/// Each month interest accrues on the opening balance, the payment net of
/// interest (plus any active recurring extra) goes to principal, and lump
/// sums targeting that month are added on top. A payment that does not
/// cover interest sets `negative_amortization_detected` and contributes no
/// principal; the balance itself never grows.
pub fn run_amortization(input: &AmortizationInput) -> Schedule {
    let term_months = input.term.months();
    let payment = match input.resolved_payment() {
        Some(p) if p > Decimal::ZERO => p,
        _ => {
            tracing::debug!(
                balance = %input.balance,
                apr = %input.apr,
                term_months,
                "No positive payment; schedule is infeasible"
            );
            return Schedule::infeasible();
        }
    };

    let rate = monthly_rate(input.apr);
    let cap = input.limits.iteration_cap(term_months);
    let epsilon = input.limits.payoff_epsilon;

    let mut rows = Vec::new();
    let mut balance = input.balance;
    let mut cumulative_interest = Decimal::ZERO;
    let mut cumulative_principal = Decimal::ZERO;
    let mut negative_amortization = false;
    let mut month: u32 = 0;

    while balance > epsilon && month < cap {
        month += 1;

        let interest = balance.saturating_mul(rate);
        let extra_monthly = match input.recurring_extra {
            Some(extra) if month >= extra.start_month => extra.amount.max(Decimal::ZERO),
            _ => Decimal::ZERO,
        };
        let mut scheduled = payment.saturating_sub(interest).saturating_add(extra_monthly);

        let extra_lump: Money = input
            .lump_sums
            .iter()
            .filter(|l| l.month == month && l.amount > Decimal::ZERO)
            .fold(Decimal::ZERO, |acc, l| acc.saturating_add(l.amount));

        if scheduled < Decimal::ZERO {
            negative_amortization = true;
            scheduled = Decimal::ZERO;
        }

        let principal = scheduled.saturating_add(extra_lump).min(balance);
        balance = (balance - principal).max(Decimal::ZERO);
        cumulative_interest = cumulative_interest.saturating_add(interest.max(Decimal::ZERO));
        cumulative_principal = cumulative_principal.saturating_add(principal);

        rows.push(ScheduleRow {
            month,
            interest,
            principal,
            payment,
            extra_monthly,
            extra_lump,
            balance,
            cumulative_interest,
            cumulative_principal,
        });
    }

    tracing::debug!(
        months = month,
        cap,
        residual = %balance,
        negative_amortization,
        "Amortization run complete"
    );

    Schedule::from_rows(rows, negative_amortization)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn mortgage() -> AmortizationInput {
        AmortizationInput::new(dec!(300000), dec!(6.5), LoanTerm::Years(dec!(28)))
    }

    #[test]
    fn test_baseline_pays_off_on_term() {
        let schedule = run_amortization(&mortgage());
        assert_eq!(schedule.payoff_month, Some(336));
        assert_eq!(schedule.rows.len(), 336);
        assert!(schedule.final_balance().unwrap() <= dec!(0.01));
        assert!(!schedule.negative_amortization_detected);
        let total_interest = schedule.total_interest.unwrap();
        assert!(
            (total_interest - dec!(352192.21)).abs() < dec!(1),
            "got {total_interest}"
        );
    }

    #[test]
    fn test_zero_rate_ten_months() {
        let input = AmortizationInput::new(dec!(10000), dec!(0), LoanTerm::Months(10));
        let schedule = run_amortization(&input);
        assert_eq!(schedule.rows.len(), 10);
        assert!(schedule.rows.iter().all(|r| r.interest.is_zero()));
        assert!(schedule.rows.iter().all(|r| r.principal == dec!(1000)));
        assert_eq!(schedule.final_balance(), Some(Decimal::ZERO));
        assert_eq!(schedule.total_interest, Some(Decimal::ZERO));
    }

    #[test]
    fn test_recurring_extra_respects_start_month() {
        let input = mortgage().with_recurring_extra(dec!(200), 13);
        let schedule = run_amortization(&input);
        assert!(schedule.rows[..12].iter().all(|r| r.extra_monthly.is_zero()));
        assert!(schedule.rows[12..].iter().all(|r| r.extra_monthly == dec!(200)));
    }

    #[test]
    fn test_negative_recurring_extra_is_ignored() {
        let base = run_amortization(&mortgage());
        let negative = run_amortization(&mortgage().with_recurring_extra(dec!(-500), 1));
        assert_eq!(base.payoff_month, negative.payoff_month);
        assert_eq!(base.total_interest, negative.total_interest);
    }

    #[test]
    fn test_lump_sums_same_month_are_summed() {
        let input = mortgage()
            .with_lump_sum(12, dec!(5000))
            .with_lump_sum(12, dec!(2500))
            .with_lump_sum(12, dec!(-100));
        let schedule = run_amortization(&input);
        assert_eq!(schedule.rows[11].extra_lump, dec!(7500));
        assert!(schedule.rows[10].extra_lump.is_zero());
    }

    #[test]
    fn test_lump_sum_clamped_to_balance() {
        let input = AmortizationInput::new(dec!(5000), dec!(6), LoanTerm::Months(60))
            .with_lump_sum(2, dec!(100000));
        let schedule = run_amortization(&input);
        assert_eq!(schedule.payoff_month, Some(2));
        let last = schedule.last_row().unwrap();
        assert_eq!(last.balance, Decimal::ZERO);
        assert!(last.principal < dec!(5000));
        assert!((last.cumulative_principal - dec!(5000)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_payment_below_interest_flags_negative_amortization() {
        // Monthly interest on 300k at 6.5% is 1625
        let input = mortgage().with_payment(Some(dec!(1000)));
        let schedule = run_amortization(&input);
        assert!(schedule.negative_amortization_detected);
        // Balance never grows, so the run ends at the safety cap
        assert_eq!(schedule.payoff_month, Some(912));
        assert!(schedule.rows.iter().all(|r| r.balance == dec!(300000)));
        assert!(schedule.stopped_before_payoff(dec!(0.01)));
    }

    #[test]
    fn test_lump_sum_still_reduces_balance_under_negative_amortization() {
        let input = mortgage()
            .with_payment(Some(dec!(1000)))
            .with_lump_sum(3, dec!(10000));
        let schedule = run_amortization(&input);
        assert!(schedule.negative_amortization_detected);
        assert_eq!(schedule.rows[2].principal, dec!(10000));
        assert_eq!(schedule.rows[2].balance, dec!(290000));
    }

    #[test]
    fn test_non_positive_payment_is_infeasible() {
        for payment in [dec!(0), dec!(-50)] {
            let schedule = run_amortization(&mortgage().with_payment(Some(payment)));
            assert!(schedule.rows.is_empty());
            assert!(schedule.payoff_month.is_none());
            assert!(schedule.total_interest.is_none());
            assert!(schedule.negative_amortization_detected);
        }
    }

    #[test]
    fn test_non_positive_balance_without_override_is_infeasible() {
        let input = AmortizationInput::new(dec!(0), dec!(5), LoanTerm::Months(12));
        assert!(!run_amortization(&input).is_feasible());
    }

    #[test]
    fn test_limit_months_caps_the_run() {
        let input = mortgage().with_limits(SimulationLimits {
            limit_months: 24,
            ..SimulationLimits::default()
        });
        let schedule = run_amortization(&input);
        assert_eq!(schedule.payoff_month, Some(24));
        assert!(schedule.final_balance().unwrap() > dec!(250000));
    }

    #[test]
    fn test_huge_balance_saturates_instead_of_overflowing() {
        let input = AmortizationInput::new(
            dec!(10000000000000000000000000000),
            dec!(100),
            LoanTerm::Months(360),
        );
        let schedule = run_amortization(&input);
        assert!(!schedule.rows.is_empty());
        for pair in schedule.rows.windows(2) {
            assert!(pair[1].cumulative_interest >= pair[0].cumulative_interest);
            assert!(pair[1].balance <= pair[0].balance);
        }
        // lifetime interest is far beyond the representable range
        assert_eq!(
            schedule.last_row().unwrap().cumulative_interest,
            Decimal::MAX
        );
    }

    #[test]
    fn test_negative_apr_on_huge_balance_does_not_overflow() {
        let input = AmortizationInput::new(Decimal::MAX, dec!(-50), LoanTerm::Months(12))
            .with_payment(Some(Decimal::MAX));
        let schedule = run_amortization(&input);
        assert_eq!(schedule.payoff_month, Some(1));
        assert_eq!(schedule.total_interest, Some(Decimal::ZERO));
    }
}
