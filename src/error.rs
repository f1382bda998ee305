use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Construction failures of the activation-time model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("value out of range: {0}")]
    Range(String),

    #[error("invalid argument combination: {0}")]
    Argument(String),

    #[error("start must be strictly before end: {0}")]
    Order(String),

    #[error("element has the wrong shape: {0}")]
    TypeArgument(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("cannot parse clock value: {0}")]
    Parse(String),
}
