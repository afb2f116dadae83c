use serde::{Deserialize, Serialize};

use super::schedule::Schedule;
use crate::types::Money;

/// Savings of a scenario relative to the baseline schedule.
///
/// Positive values mean the scenario is cheaper or shorter. Either field is
/// `None` when one of the two schedules could not be computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub interest_saved: Option<Money>,
    pub months_saved: Option<i64>,
}

pub fn compare_schedules(baseline: &Schedule, scenario: &Schedule) -> ScenarioComparison {
    let interest_saved = match (baseline.total_interest, scenario.total_interest) {
        (Some(base), Some(alt)) => Some(base - alt),
        _ => None,
    };
    let months_saved = match (baseline.payoff_month, scenario.payoff_month) {
        (Some(base), Some(alt)) => Some(i64::from(base) - i64::from(alt)),
        _ => None,
    };
    ScenarioComparison {
        interest_saved,
        months_saved,
    }
}
