use crate::transfers::Side;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NegotiationError {
    #[error("invalid negotiation config: {0}")]
    InvalidConfig(String),
    #[error("invalid weight profile '{name}': {reason}")]
    InvalidProfile { name: String, reason: String },
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),
    #[error("club '{0}' has no players")]
    EmptySquad(String),
    #[error("invalid squad: {0}")]
    InvalidSquad(#[from] SquadError),
}

pub type NegotiationResult<T> = Result<T, NegotiationError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SquadError {
    #[error("{side} squad has {actual} slots, expected {expected}")]
    SizeMismatch {
        side: Side,
        expected: usize,
        actual: usize,
    },
    #[error("{side} squad references slot {index}, pool has {size}")]
    IndexOutOfRange { side: Side, index: usize, size: usize },
    #[error("{side} squad uses slot {index} more than once")]
    DuplicateIndex { side: Side, index: usize },
    #[error("player {id} is listed more than once by {club}")]
    DuplicatePlayer { club: String, id: u32 },
}
