//! Wire payloads carried by the message bus.

use gr_core::{Direction, ObservedTile, Position, RobotId, Step};

use gr_consensus::{AcceptRequest, AcceptResponse, PrepareRequest, PrepareResponse, ProposalId};

/// Everything an agent can say to another agent.
///
/// `Observations`/`GoldConsumed` are cooperative-sensing chatter broadcast by
/// an exploring agent to its whole team; `Turn`/`MissionAbort`/
/// `MissionComplete` coordinate a bound leader/follower pair; the four
/// `Prepare*`/`Accept*` variants are the Paxos protocol messages defined by
/// `gr-consensus` and simply ride the bus unchanged.
#[derive(Clone, Debug)]
pub enum Payload {
    /// Tiles sensed this step within the sender's observation fan.
    Observations(Vec<ObservedTile>),
    /// The sender picked up the last unit of gold at `Position` — team-mates
    /// tracking it in their local map must drop it unconditionally.
    GoldConsumed(Position),
    /// Leader tells its follower which way to face/step next.
    Turn(Direction),
    /// Leader or follower is giving up on the current mission.
    MissionAbort,
    /// The bound pair has finished depositing; both sides may return to
    /// exploring.
    MissionComplete,
    PrepareRequest(PrepareRequest),
    /// `in_reply_to` names the proposal this response concerns — distinct
    /// from the response body's own `paxos_id`, which is the acceptor's
    /// *previously accepted* id (if any), not the one being promised.
    PrepareResponse { in_reply_to: ProposalId, body: PrepareResponse },
    AcceptRequest(AcceptRequest),
    AcceptResponse(AcceptResponse),
}

/// One message in flight: `sender` authored it at `step`, `receiver` is
/// `None` for a team-wide broadcast (delivered to every team-mate including
/// the sender — mirrors the original simulator's self-delivery behaviour).
#[derive(Clone, Debug)]
pub struct Envelope {
    pub sender: RobotId,
    pub receiver: Option<RobotId>,
    pub step: Step,
    pub payload: Payload,
}
