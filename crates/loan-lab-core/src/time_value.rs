use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent, Rate, Years};

/// Monthly periodic rate for an APR quoted in percent (6.5 -> 0.0054166...).
pub fn monthly_rate(apr: Percent) -> Rate {
    apr / dec!(100) / dec!(12)
}

/// Convert a (possibly fractional) number of years into whole months.
///
/// Rounds half away from zero and never returns less than one month, so a
/// term of `0.02` years still resolves to a single payment period.
pub fn years_to_months(years: Years) -> u32 {
    let months = years
        .checked_mul(dec!(12))
        .unwrap_or(if years.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    if months.is_sign_negative() {
        return 1;
    }
    months.to_u32().unwrap_or(u32::MAX).max(1)
}

/// Compute (1 + r)^n by repeated squaring (avoids Decimal::powd drift).
/// Returns `None` when the growth factor no longer fits in a Decimal.
fn checked_compound(one_plus_r: Decimal, n: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    let mut base = one_plus_r;
    let mut exp = n;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result.checked_mul(base)?;
        }
        exp >>= 1;
        if exp > 0 {
            base = base.checked_mul(base)?;
        }
    }
    Some(result)
}

/// Level monthly payment that fully amortizes `balance` over `months`.
///
/// Returns `None` when the payment cannot be computed: a non-positive
/// balance or a zero-month term. A zero APR degenerates to straight-line
/// repayment.
pub fn compute_payment(balance: Money, apr: Percent, months: u32) -> Option<Money> {
    if balance <= Decimal::ZERO || months == 0 {
        return None;
    }

    let i = monthly_rate(apr);
    if i.is_zero() {
        return Some(balance / Decimal::from(months));
    }

    // (1 + i)^-n underflows to zero for very long, high-rate terms
    let discount = match checked_compound(Decimal::ONE + i, months) {
        Some(growth) => Decimal::ONE.checked_div(growth)?,
        None => Decimal::ZERO,
    };
    let annuity_factor = Decimal::ONE - discount;
    if annuity_factor.is_zero() {
        return None;
    }

    balance.checked_mul(i)?.checked_div(annuity_factor)
}

/// Headline figures for a fixed-rate loan held to term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanPaymentSummary {
    pub payment: Money,
    pub months: u32,
    pub total_paid: Money,
    pub total_interest: Money,
}

/// Payment, total paid and total interest for a loan quoted in years.
pub fn loan_payment(balance: Money, apr: Percent, years: Years) -> Option<LoanPaymentSummary> {
    loan_payment_for_months(balance, apr, years_to_months(years))
}

/// As [`loan_payment`], for a term already expressed in months.
pub fn loan_payment_for_months(
    balance: Money,
    apr: Percent,
    months: u32,
) -> Option<LoanPaymentSummary> {
    let payment = compute_payment(balance, apr, months)?;
    let total_paid = payment.checked_mul(Decimal::from(months))?;
    Some(LoanPaymentSummary {
        payment,
        months,
        total_paid,
        total_interest: total_paid - balance,
    })
}
