use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Money, Rate};

/// Closing costs as a share of the balance being refinanced.
const COST_RATE: Rate = dec!(0.02);
const MIN_COSTS: Money = dec!(1000);
const MAX_COSTS: Money = dec!(6000);

/// Rule-of-thumb closing costs: 2% of the balance, clamped to [1,000, 6,000].
pub fn estimate_refinance_costs(balance: Money) -> Money {
    (balance.max(Decimal::ZERO) * COST_RATE).clamp(MIN_COSTS, MAX_COSTS)
}
