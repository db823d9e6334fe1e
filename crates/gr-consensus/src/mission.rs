//! Consensus values: proposal identifiers and missions.

use gr_core::{Position, RobotId};

/// A totally ordered Paxos proposal identifier: `(counter, robot_id)`.
/// Ordering compares `counter` first, then `robot_id` — this is exactly
/// tuple ordering, giving every agent a distinct, comparable proposal
/// number without any coordination.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ProposalId {
    pub counter: u64,
    pub robot_id: RobotId,
}

impl ProposalId {
    pub fn new(counter: u64, robot_id: RobotId) -> Self {
        Self { counter, robot_id }
    }
}

impl std::fmt::Display for ProposalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.counter, self.robot_id)
    }
}

/// A candidate mission, proposed but not yet bound to a follower.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Mission {
    pub target_tile: Position,
    pub cost: u32,
}

/// A mission with leader and follower bound — the value a Paxos round
/// actually agrees on. Derives `Eq + Hash` directly: every field is `Copy`
/// and comparable, so structural equality already gives the "canonical,
/// stable encoding" the tally needs to treat identical values from
/// different senders as the same key.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct FullMission {
    pub target_tile: Position,
    pub cost: u32,
    pub leader_id: RobotId,
    pub follower_id: RobotId,
}
