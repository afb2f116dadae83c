pub mod amortization;
pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "refinance")]
pub mod refinance;

#[cfg(feature = "payoff_lab")]
pub mod payoff_lab;

pub use error::LoanLabError;
pub use types::*;

/// Standard result type for all loan-lab operations
pub type LoanLabResult<T> = Result<T, LoanLabError>;
