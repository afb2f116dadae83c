//! Loans & Payoff Lab: a baseline schedule compared against one what-if
//! scenario (extra principal or a refinance).

pub mod lab;

pub use lab::{
    analyze_payoff, LabMode, LumpSumSpec, PayoffLabInput, PayoffLabOutput, PayoffScenario,
    RecurringExtraSpec, ScenarioSchedule,
};
