use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid excuse context: {0}")]
    InvalidContext(String),

    #[error("invalid urgency level: {0}")]
    InvalidUrgency(String),

    #[error("invalid believability level: {0}")]
    InvalidBelievability(String),
}
