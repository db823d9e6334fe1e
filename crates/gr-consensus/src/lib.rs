//! `gr-consensus` — single-decree Paxos consensus for cooperative missions.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                 |
//! |-------------|------------------------------------------------------------|
//! | [`mission`] | `ProposalId`, `Mission`, `FullMission`                    |
//! | [`handler`] | `PaxosHandler` and the four Paxos message bodies          |
//!
//! # Protocol shape
//!
//! Every agent runs one `PaxosHandler`, acting as proposer, acceptor, and
//! learner at once over its own team of ten. `gr-agent`'s FSM is responsible
//! for deciding *when* to start an election and for turning the handler's
//! outputs into bus messages; this crate only knows the voting rules.

pub mod handler;
pub mod mission;

#[cfg(test)]
mod tests;

pub use handler::{
    AcceptRequest, AcceptResponse, PaxosHandler, PrepareRequest, PrepareResponse,
    ProposalFailure, PROPOSAL_TIMEOUT,
};
pub use mission::{FullMission, Mission, ProposalId};
