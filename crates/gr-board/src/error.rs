//! Board error type.

use thiserror::Error;

use gr_core::Position;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("position {0} is outside the board")]
    OutOfBounds(Position),

    #[error("cannot take gold from an empty tile at {0}")]
    TakeFromEmpty(Position),

    #[error("cannot take gold from a deposit tile at {0}")]
    TakeFromDeposit(Position),

    #[error("cannot add gold to a deposit tile at {0}")]
    AddToDeposit(Position),

    #[error("cannot deposit onto a plain tile at {0}")]
    DepositOnPlain(Position),
}

pub type BoardResult<T> = Result<T, BoardError>;
