pub mod amortization;
pub mod payoff_lab;
pub mod refinance;
