//! Refinance scenarios: run the original loan up to the refinance month,
//! capitalise closing costs into a new loan, and stitch both legs into one
//! continuous timeline.

pub mod costs;
pub mod scenario;

pub use costs::estimate_refinance_costs;
pub use scenario::{run_refinance_scenario, RefinanceInput, RefinanceResult};
