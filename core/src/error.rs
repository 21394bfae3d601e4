use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Unknown difficulty {0:?}, expected EASY, MEDIUM or HARD")]
    UnknownDifficulty(String),
    #[error("Too many mines")]
    TooManyMines,
    #[error("Invalid coordinates")]
    InvalidCoords,
}

pub type Result<T> = std::result::Result<T, GameError>;
