//! `gr-agent` — per-robot exploration, Paxos proposal, and cooperative-carry
//! state machine.
//!
//! # Crate layout
//!
//! | Module     | Contents                                               |
//! |------------|---------------------------------------------------------|
//! | [`action`] | `Action`, the closed set of per-step robot actions      |
//! | [`fsm`]    | `AgentState`                                            |
//! | [`sensed`] | `SensedTile`, `LocalMap`, `ExplorationWeights`          |
//! | [`path`]   | `plan_path`, greedy Manhattan pathfinding               |
//! | [`agent`]  | `Agent`, the state machine tying it all together        |
//! | [`error`]  | `AgentError`, `AgentResult<T>`                          |
//!
//! Each `Agent` runs its own `gr_consensus::PaxosHandler` and its own
//! `LocalMap`; the simulation controller in `gr-sim` owns the `Vec<Agent>`
//! and is the only thing that ever holds two agents at once.

pub mod action;
pub mod agent;
pub mod error;
pub mod fsm;
pub mod path;
pub mod sensed;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use agent::{Agent, AWAITING_PARTNER_TIMEOUT};
pub use error::{AgentError, AgentResult};
pub use fsm::AgentState;
pub use path::{plan_path, PathStep};
pub use sensed::{ExplorationWeights, LocalMap, SensedTile};
