use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanLabError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Infeasible schedule: {0}")]
    InfeasibleSchedule(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LoanLabError {
    fn from(e: serde_json::Error) -> Self {
        LoanLabError::SerializationError(e.to_string())
    }
}
