use loan_lab_core::amortization::{
    compare_schedules, run_amortization, AmortizationInput, LoanTerm, Schedule, SimulationLimits,
};
use loan_lab_core::time_value::compute_payment;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn assert_monotone(schedule: &Schedule) {
    let mut prev_balance: Option<Decimal> = None;
    let mut prev_interest = Decimal::ZERO;
    let mut prev_principal = Decimal::ZERO;
    for (idx, row) in schedule.rows.iter().enumerate() {
        assert_eq!(row.month, idx as u32 + 1);
        assert!(row.balance >= Decimal::ZERO, "negative balance at {}", row.month);
        if let Some(prev) = prev_balance {
            assert!(row.balance <= prev, "balance rose at month {}", row.month);
        }
        assert!(row.cumulative_interest >= prev_interest);
        assert!(row.cumulative_principal >= prev_principal);
        prev_balance = Some(row.balance);
        prev_interest = row.cumulative_interest;
        prev_principal = row.cumulative_principal;
    }
}

// ===========================================================================
// Payment formula
// ===========================================================================

#[test]
fn test_zero_rate_payment_is_exact() {
    assert_eq!(compute_payment(dec!(10000), dec!(0), 10), Some(dec!(1000)));
    let pmt = compute_payment(dec!(12345), dec!(0), 7).unwrap();
    assert!((pmt * dec!(7) - dec!(12345)).abs() < dec!(0.0000001));
}

#[test]
fn test_payment_round_trip_pays_off_on_term() {
    let cases = [
        (dec!(300000), dec!(6.5), 336u32),
        (dec!(25000), dec!(9.9), 60),
        (dec!(180000), dec!(3.25), 180),
        (dec!(1500), dec!(18), 12),
    ];
    for (balance, apr, months) in cases {
        let pmt = compute_payment(balance, apr, months).unwrap();
        let schedule = run_amortization(
            &AmortizationInput::new(balance, apr, LoanTerm::Months(months))
                .with_payment(Some(pmt)),
        );
        let payoff = schedule.payoff_month.unwrap();
        assert!(
            payoff.abs_diff(months) <= 1,
            "{balance} @ {apr}% over {months}: paid off in {payoff}"
        );
        assert!(schedule.final_balance().unwrap() <= dec!(0.01));
    }
}

// ===========================================================================
// Simulator properties
// ===========================================================================

#[test]
fn test_schedules_are_monotone() {
    let inputs = [
        AmortizationInput::new(dec!(300000), dec!(6.5), LoanTerm::Years(dec!(28))),
        AmortizationInput::new(dec!(300000), dec!(6.5), LoanTerm::Years(dec!(28)))
            .with_recurring_extra(dec!(350), 6)
            .with_lump_sum(24, dec!(15000))
            .with_lump_sum(60, dec!(20000)),
        AmortizationInput::new(dec!(300000), dec!(6.5), LoanTerm::Years(dec!(28)))
            .with_payment(Some(dec!(900)))
            .with_lump_sum(10, dec!(50000)),
        AmortizationInput::new(dec!(8000), dec!(0), LoanTerm::Months(16)),
    ];
    for input in &inputs {
        assert_monotone(&run_amortization(input));
    }
}

#[test]
fn test_concrete_mortgage_with_extra_principal() {
    let base_input = AmortizationInput::new(dec!(300000), dec!(6.5), LoanTerm::Years(dec!(28)));
    let base = run_amortization(&base_input);
    let extra = run_amortization(&base_input.clone().with_recurring_extra(dec!(200), 1));

    assert_eq!(base.payoff_month, Some(336));
    assert!(extra.payoff_month.unwrap() < 336);
    assert!(extra.total_interest.unwrap() < base.total_interest.unwrap());

    let pmt = base.rows[0].payment;
    assert!((pmt - dec!(1941.05)).abs() < dec!(0.01), "got {pmt}");
}

#[test]
fn test_concrete_zero_rate_loan() {
    let schedule = run_amortization(&AmortizationInput::new(
        dec!(10000),
        dec!(0),
        LoanTerm::Months(10),
    ));
    assert_eq!(schedule.rows.len(), 10);
    assert_eq!(schedule.payoff_month, Some(10));
    for row in &schedule.rows {
        assert_eq!(row.interest, Decimal::ZERO);
        assert_eq!(row.payment, dec!(1000));
    }
}

#[test]
fn test_extras_never_make_things_worse() {
    let base_input = AmortizationInput::new(dec!(220000), dec!(5.75), LoanTerm::Years(dec!(25)));
    let base = run_amortization(&base_input);

    let scenarios = [
        base_input.clone().with_recurring_extra(dec!(1), 1),
        base_input.clone().with_recurring_extra(dec!(500), 120),
        base_input.clone().with_lump_sum(1, dec!(1000)),
        base_input.clone().with_lump_sum(299, dec!(1000)),
        base_input
            .clone()
            .with_recurring_extra(dec!(75), 36)
            .with_lump_sum(48, dec!(10000)),
    ];
    for input in &scenarios {
        let alt = run_amortization(input);
        let cmp = compare_schedules(&base, &alt);
        assert!(cmp.months_saved.unwrap() >= 0);
        assert!(cmp.interest_saved.unwrap() >= Decimal::ZERO);
    }
}

#[test]
fn test_payment_below_interest_flags_negative_amortization() {
    // First month's interest on 200k at 7.2% is 1200
    let input = AmortizationInput::new(dec!(200000), dec!(7.2), LoanTerm::Months(360))
        .with_payment(Some(dec!(1199.99)));
    let schedule = run_amortization(&input);
    assert!(schedule.negative_amortization_detected);
    assert_monotone(&schedule);
}

#[test]
fn test_payment_covering_interest_does_not_flag() {
    let input = AmortizationInput::new(dec!(200000), dec!(7.2), LoanTerm::Months(360))
        .with_payment(Some(dec!(1200)));
    let schedule = run_amortization(&input);
    assert!(!schedule.negative_amortization_detected);
}

#[test]
fn test_infeasible_payment_returns_empty_schedule() {
    let input = AmortizationInput::new(dec!(-1), dec!(5), LoanTerm::Months(12));
    let schedule = run_amortization(&input);
    assert_eq!(schedule, Schedule::infeasible());
}

#[test]
fn test_already_paid_off_with_explicit_payment() {
    let input = AmortizationInput::new(dec!(0.005), dec!(5), LoanTerm::Months(12))
        .with_payment(Some(dec!(100)));
    let schedule = run_amortization(&input);
    assert!(schedule.rows.is_empty());
    assert_eq!(schedule.payoff_month, Some(0));
    assert_eq!(schedule.total_interest, Some(Decimal::ZERO));
    assert!(!schedule.negative_amortization_detected);
}

#[test]
fn test_custom_payoff_epsilon() {
    let limits = SimulationLimits {
        payoff_epsilon: dec!(5000),
        ..SimulationLimits::default()
    };
    let input = AmortizationInput::new(dec!(10000), dec!(0), LoanTerm::Months(10))
        .with_limits(limits);
    // stops once the balance reaches 5000
    assert_eq!(run_amortization(&input).payoff_month, Some(5));
}

#[test]
fn test_input_deserializes_from_json() {
    let json = r#"{
        "balance": "300000",
        "apr": 6.5,
        "term": { "years": "28" },
        "recurring_extra": { "amount": "200", "start_month": 1 },
        "lump_sums": [{ "month": 12, "amount": "5000" }]
    }"#;
    let input: AmortizationInput = serde_json::from_str(json).unwrap();
    assert_eq!(input.term.months(), 336);
    assert_eq!(input.limits, SimulationLimits::default());
    let schedule = run_amortization(&input);
    assert!(schedule.payoff_month.unwrap() < 336);
}
