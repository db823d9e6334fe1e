use gr_board::BoardError;
use gr_core::{Position, RobotId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match roster size {expected}")]
    RosterMismatch { expected: usize, got: usize, what: &'static str },

    #[error("board error: {0}")]
    Board(#[from] BoardError),

    /// A fatal invariant violation: partner positions diverged. Per the
    /// error-handling design, this aborts the run rather than being
    /// recovered from inline.
    #[error("partnership ({leader}, {follower}) diverged: {leader} at {leader_pos}, {follower} at {follower_pos}")]
    PartnerDesync { leader: RobotId, follower: RobotId, leader_pos: Position, follower_pos: Position },
}

pub type SimResult<T> = Result<T, SimError>;
