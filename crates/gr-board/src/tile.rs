//! Board tile types.
//!
//! A plain tile holds a non-negative gold count; a deposit tile belongs to
//! one team and accumulates a running `sink_total` of gold ever deposited on
//! it. Modeled as a closed enum rather than the teacher's base/subclass tile
//! split — matching the REDESIGN note that pattern-match dispatch is
//! preferred over virtual dispatch once there are only two tile kinds.

use gr_core::Team;

use crate::error::BoardError;
use gr_core::Position;

#[derive(Copy, Clone, Debug)]
pub enum Tile {
    Plain { gold_count: u32 },
    Deposit { team: Team, sink_total: u32 },
}

impl Tile {
    pub fn plain() -> Self {
        Tile::Plain { gold_count: 0 }
    }

    pub fn deposit(team: Team) -> Self {
        Tile::Deposit { team, sink_total: 0 }
    }

    #[inline]
    pub fn gold_count(&self) -> u32 {
        match self {
            Tile::Plain { gold_count } => *gold_count,
            Tile::Deposit { .. } => 0,
        }
    }

    /// Remove one unit of gold from a plain tile. Fails on an empty tile or
    /// a deposit tile (gold is never picked back up off a deposit).
    pub fn take(&mut self, at: Position) -> Result<(), BoardError> {
        match self {
            Tile::Plain { gold_count } if *gold_count > 0 => {
                *gold_count -= 1;
                Ok(())
            }
            Tile::Plain { .. } => Err(BoardError::TakeFromEmpty(at)),
            Tile::Deposit { .. } => Err(BoardError::TakeFromDeposit(at)),
        }
    }

    /// Add one unit of gold to a plain tile (used at board construction to
    /// scatter the initial supply).
    pub fn add(&mut self, at: Position) -> Result<(), BoardError> {
        match self {
            Tile::Plain { gold_count } => {
                *gold_count += 1;
                Ok(())
            }
            Tile::Deposit { .. } => Err(BoardError::AddToDeposit(at)),
        }
    }

    /// Record a successful deposit. Only valid on a deposit tile belonging
    /// to the depositing team.
    pub fn deposit_gold(&mut self, at: Position, amount: u32) -> Result<(), BoardError> {
        match self {
            Tile::Deposit { sink_total, .. } => {
                *sink_total += amount;
                Ok(())
            }
            Tile::Plain { .. } => Err(BoardError::DepositOnPlain(at)),
        }
    }

    #[inline]
    pub fn is_deposit_for(&self, team: Team) -> bool {
        matches!(self, Tile::Deposit { team: t, .. } if *t == team)
    }
}
