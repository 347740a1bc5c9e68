use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Unknown square")]
    UnknownSquare,
    #[error("Select at least one times table to practice")]
    MissingTimesTables,
    #[error("No target can be generated for the current board")]
    NoTarget,
    #[error("Could not write to storage")]
    Storage,
    #[error("Could not serialize value for storage")]
    Serialization,
}

pub type Result<T> = core::result::Result<T, GameError>;
