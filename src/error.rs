use thiserror::Error;

/// Input errors raised while turning user-supplied text into a filter
/// selection. The pipeline itself cannot fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DashboardError {
    #[error("unknown department: {0}")]
    UnknownDepartment(String),

    #[error("unknown DFG: {0}")]
    UnknownDfg(String),

    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("unknown user: {0}")]
    UnknownUser(String),

    #[error("unknown dimension: {0} (expected dept, dfg or role)")]
    UnknownDimension(String),

    #[error("invalid date {value}: expected YYYY-MM-DD")]
    InvalidDate { value: String },
}

pub type DashboardResult<T> = Result<T, DashboardError>;
