//! Shared observation payload.
//!
//! `ObservedTile` is produced by an agent's fan-shaped scan each step and
//! carried verbatim inside an `Observations` bus message (`gr-bus`), then
//! consumed to update the receiver's local map (`gr-agent`). It lives in
//! `gr-core` rather than either of those crates because both depend on it.

use crate::Position;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ObservedTile {
    pub pos: Position,
    pub gold_count: u32,
    pub same_team_count: u32,
}
