//! Per-agent Paxos role: proposer, acceptor, and learner combined.
//!
//! Every agent on a team runs one `PaxosHandler`, simultaneously playing all
//! three Paxos roles over the team's ten members. `gr-agent`'s FSM drives
//! this handler from incoming bus messages and reads back outgoing
//! requests/responses to place on the outbox.

use std::collections::{HashMap, HashSet};

use gr_core::{Position, RobotId, Step};

use crate::mission::{FullMission, Mission, ProposalId};

/// Steps a proposer waits for majority before giving up and backing off.
pub const PROPOSAL_TIMEOUT: u64 = 75;

#[derive(Copy, Clone, Debug)]
pub struct PrepareRequest {
    pub paxos_id: ProposalId,
    pub mission: Mission,
}

#[derive(Copy, Clone, Debug)]
pub struct PrepareResponse {
    pub paxos_id: Option<ProposalId>,
    pub value: Option<FullMission>,
    pub follower_bid: u32,
}

#[derive(Copy, Clone, Debug)]
pub struct AcceptRequest {
    pub paxos_id: ProposalId,
    pub mission: FullMission,
}

#[derive(Copy, Clone, Debug)]
pub struct AcceptResponse {
    pub paxos_id: ProposalId,
    pub mission: FullMission,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ProposalFailure {
    TimedOut,
    Preempted,
}

pub struct PaxosHandler {
    robot_id: RobotId,
    team_size: usize,
    proposal_counter: u64,

    // Acceptor state.
    promised_id: Option<ProposalId>,
    accepted_id: Option<ProposalId>,
    accepted_value: Option<FullMission>,

    // Proposer state.
    is_proposing: bool,
    proposal_id: Option<ProposalId>,
    proposed_mission: Option<Mission>,
    proposal_start_step: Option<Step>,
    preempted: bool,
    promises: Vec<(RobotId, PrepareResponse)>,

    // Learner state.
    seen_accept_votes: HashSet<(RobotId, ProposalId)>,
    accept_tally: HashMap<FullMission, u32>,
    consensus_reached: bool,
    final_value: Option<FullMission>,
}

impl PaxosHandler {
    pub fn new(robot_id: RobotId, team_size: usize) -> Self {
        Self {
            robot_id,
            team_size,
            proposal_counter: 0,
            promised_id: None,
            accepted_id: None,
            accepted_value: None,
            is_proposing: false,
            proposal_id: None,
            proposed_mission: None,
            proposal_start_step: None,
            preempted: false,
            promises: Vec::new(),
            seen_accept_votes: HashSet::new(),
            accept_tally: HashMap::new(),
            consensus_reached: false,
            final_value: None,
        }
    }

    #[inline]
    pub fn majority(&self) -> usize {
        self.team_size / 2 + 1
    }

    pub fn is_proposing(&self) -> bool {
        self.is_proposing
    }

    pub fn consensus_reached(&self) -> bool {
        self.consensus_reached
    }

    pub fn final_value(&self) -> Option<FullMission> {
        self.final_value
    }

    /// Clear proposer bookkeeping. Called on timeout, preemption, or when
    /// this agent's own proposal concludes — never touches acceptor or
    /// learner state.
    pub fn reset_proposer_state(&mut self) {
        self.is_proposing = false;
        self.proposal_id = None;
        self.proposed_mission = None;
        self.proposal_start_step = None;
        self.promises.clear();
    }

    /// Clear the promise this agent has made as an acceptor. Only used when
    /// a `MissionComplete`/`MissionAbort` is *received* for the round this
    /// agent participated in as acceptor — self-detected completion at the
    /// deposit only resets proposer state (see `gr-agent`'s FSM).
    pub fn reset_acceptor_state(&mut self) {
        self.promised_id = None;
        self.accepted_id = None;
        self.accepted_value = None;
    }

    pub fn start_election(&mut self, mission: Mission, step: Step) -> PrepareRequest {
        self.reset_proposer_state();
        self.proposal_counter += 1;
        let paxos_id = ProposalId::new(self.proposal_counter, self.robot_id);
        self.is_proposing = true;
        self.proposal_id = Some(paxos_id);
        self.proposed_mission = Some(mission);
        self.proposal_start_step = Some(step);
        PrepareRequest { paxos_id, mission }
    }

    /// Checks whether the proposal currently outstanding (if any) has timed
    /// out or was preempted since the last call. Resets proposer state on
    /// timeout; preemption is already reset at the point it was detected
    /// (see `handle_prepare_request`/`handle_accept_request`), this only
    /// surfaces the event once.
    pub fn check_proposal_failure(&mut self, step: Step) -> Option<ProposalFailure> {
        if !self.is_proposing {
            return std::mem::take(&mut self.preempted).then_some(ProposalFailure::Preempted);
        }
        if let Some(start) = self.proposal_start_step {
            if step.since(start) > PROPOSAL_TIMEOUT {
                self.reset_proposer_state();
                return Some(ProposalFailure::TimedOut);
            }
        }
        None
    }

    /// Acceptor role: `PrepareRequest` handler. `self_pos` is this agent's
    /// current board position, needed to compute `follower_bid`.
    pub fn handle_prepare_request(
        &mut self,
        req: &PrepareRequest,
        self_pos: Position,
    ) -> Option<PrepareResponse> {
        let accept = match self.promised_id {
            None => true,
            Some(promised) => req.paxos_id >= promised,
        };
        if !accept {
            return None;
        }
        self.promised_id = Some(req.paxos_id);

        if self.is_proposing {
            if let Some(my_id) = self.proposal_id {
                if req.paxos_id > my_id {
                    self.reset_proposer_state();
                    self.preempted = true;
                }
            }
        }

        let follower_bid = self_pos.manhattan_distance(req.mission.target_tile);
        Some(PrepareResponse {
            paxos_id: self.accepted_id,
            value: self.accepted_value,
            follower_bid,
        })
    }

    /// Proposer role: fold in one `PrepareResponse`. Returns `Some` once a
    /// majority has been collected for the proposal this agent is still
    /// running; a response for a stale or unrelated proposal is ignored.
    pub fn handle_prepare_response(
        &mut self,
        sender_id: RobotId,
        paxos_id: ProposalId,
        resp: PrepareResponse,
    ) -> Option<AcceptRequest> {
        if !self.is_proposing || Some(paxos_id) != self.proposal_id {
            return None;
        }
        self.promises.push((sender_id, resp));
        if self.promises.len() < self.majority() {
            return None;
        }

        // Paxos value-pickup rule: if any acceptor already accepted a value
        // under some earlier proposal, that value must win — re-propose the
        // one with the highest accepted-id among respondents.
        let picked_prior_value = self
            .promises
            .iter()
            .filter_map(|(_, r)| r.paxos_id.zip(r.value))
            .max_by_key(|(id, _)| *id)
            .map(|(_, value)| value);

        let mission = self
            .proposed_mission
            .expect("handle_prepare_response called without an outstanding proposal");

        let full = picked_prior_value.unwrap_or_else(|| {
            let (follower_id, _bid) = self
                .promises
                .iter()
                .map(|(sender, r)| (*sender, r.follower_bid))
                .min_by_key(|(sender, bid)| (*bid, *sender))
                .expect("majority implies at least one promise");
            FullMission {
                target_tile: mission.target_tile,
                cost: mission.cost,
                leader_id: self.robot_id,
                follower_id,
            }
        });

        self.is_proposing = false;
        Some(AcceptRequest { paxos_id, mission: full })
    }

    /// Acceptor role: `AcceptRequest` handler.
    pub fn handle_accept_request(&mut self, req: &AcceptRequest) -> Option<AcceptResponse> {
        if let Some(promised) = self.promised_id {
            if req.paxos_id < promised {
                return None;
            }
        }
        self.promised_id = Some(req.paxos_id);
        self.accepted_id = Some(req.paxos_id);
        self.accepted_value = Some(req.mission);
        Some(AcceptResponse {
            paxos_id: req.paxos_id,
            mission: req.mission,
        })
    }

    /// Learner role: fold in one `AcceptResponse`, deduplicating by
    /// `(sender_id, paxos_id)` so a re-sent vote cannot inflate the tally —
    /// the spec leaves this to the implementer and recommends exactly this
    /// key.
    pub fn handle_accept_response(&mut self, sender_id: RobotId, resp: AcceptResponse) {
        if self.consensus_reached {
            return;
        }
        if !self.seen_accept_votes.insert((sender_id, resp.paxos_id)) {
            return;
        }
        let count = self.accept_tally.entry(resp.mission).or_insert(0);
        *count += 1;
        if *count as usize >= self.majority() {
            self.consensus_reached = true;
            self.final_value = Some(resp.mission);
        }
    }
}
