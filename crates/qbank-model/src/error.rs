use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown content kind: {0}")]
    UnknownKind(String),
    #[error("unknown exercise type: {0}")]
    UnknownExerciseType(String),
    #[error("unknown level: {0}")]
    UnknownLevel(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
