use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsensusError {
    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    #[error("Invalid Parameter: {0}")]
    InvalidParameter(String),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ConsensusResult<T> = Result<T, ConsensusError>;

pub(crate) fn invalid_input(msg: impl Into<String>) -> ConsensusError {
    ConsensusError::InvalidInput(msg.into())
}

pub(crate) fn invalid_parameter(msg: impl Into<String>) -> ConsensusError {
    ConsensusError::InvalidParameter(msg.into())
}
