//! Errors for textual input (face names, directions, move notation)
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown face `{0}` (expected front, back, left, right, up, down or F/B/L/R/U/D)")]
    UnknownFace(String),

    #[error("unknown turn direction `{0}` (expected cw or ccw)")]
    UnknownDirection(String),

    #[error("unknown sticker colour `{0}`")]
    UnknownColor(String),

    #[error("invalid move `{token}` at offset {offset}")]
    InvalidMove { token: String, offset: usize },
}
