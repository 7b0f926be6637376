//! Error type shared by the desktop and the memory game.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeskError {
    /// The session already holds the maximum number of live windows.
    #[error("window capacity exceeded: at most {cap} windows may be open")]
    CapacityExceeded { cap: usize },
    /// A memory board needs an even number of cards, at least four.
    #[error("invalid board {rows}x{columns}: card count must be even, from 4 to 1024")]
    InvalidBoard { rows: u16, columns: u16 },
    /// A drag payload could not be decoded.
    #[error("malformed drag payload: {0:?}")]
    MalformedTransfer(String),
    #[error("no live window with id {0}")]
    UnknownWindow(String),
}

pub type DeskResult<T> = Result<T, DeskError>;
