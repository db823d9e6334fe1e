//! The per-robot state machine: exploration, Paxos proposal, cooperative
//! carry, and delivery, all driven by one `decide` call per step.

use std::collections::VecDeque;

use gr_bus::{Envelope, Payload};
use gr_consensus::{FullMission, Mission, PaxosHandler, ProposalFailure};
use gr_core::{Direction, ObservedTile, Position, RobotId, Step, Team, TeamRoster};

use crate::action::Action;
use crate::fsm::AgentState;
use crate::path::{plan_path, PathStep};
use crate::sensed::{ExplorationWeights, LocalMap};

/// Steps an agent will wait at the gold tile for its partner before giving
/// up on the mission.
pub const AWAITING_PARTNER_TIMEOUT: u32 = 500;

fn timeout_backoff(failures: u32) -> u64 {
    2u64.saturating_pow(failures).min(50)
}

fn preemption_backoff(failures: u32) -> u64 {
    if failures == 0 {
        0
    } else {
        2u64.saturating_pow(failures - 1).min(30)
    }
}

pub struct Agent {
    pub robot_id: RobotId,
    pub team: Team,
    pub pos: Position,
    pub facing: Direction,
    pub partner_id: Option<RobotId>,
    deposit_pos: Position,
    board_width: i32,
    board_height: i32,
    inbox: VecDeque<Envelope>,
    outbox: Vec<(Option<RobotId>, Payload)>,
    local_map: LocalMap,
    state: AgentState,
    paxos: PaxosHandler,
    weights: ExplorationWeights,
    current_mission: Option<FullMission>,
    path: VecDeque<PathStep>,
    exploration_target: Option<Position>,
    awaiting_partner_timer: u32,
    failed_proposal_count: u32,
    backoff_until_step: Step,
}

impl Agent {
    pub fn new(
        robot_id: RobotId,
        team: Team,
        pos: Position,
        facing: Direction,
        deposit_pos: Position,
        board_width: i32,
        board_height: i32,
        team_size: usize,
    ) -> Self {
        Self {
            robot_id,
            team,
            pos,
            facing,
            partner_id: None,
            deposit_pos,
            board_width,
            board_height,
            inbox: VecDeque::new(),
            outbox: Vec::new(),
            local_map: LocalMap::new(),
            state: AgentState::Exploring,
            paxos: PaxosHandler::new(robot_id, team_size),
            weights: ExplorationWeights::default(),
            current_mission: None,
            path: VecDeque::new(),
            exploration_target: None,
            awaiting_partner_timer: 0,
            failed_proposal_count: 0,
            backoff_until_step: Step::ZERO,
        }
    }

    pub fn with_weights(mut self, weights: ExplorationWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn current_mission(&self) -> Option<FullMission> {
        self.current_mission
    }

    /// Queue a message delivered by the bus this step. The controller calls
    /// this once per envelope routed to this robot before calling `decide`.
    pub fn receive(&mut self, envelope: Envelope) {
        self.inbox.push_back(envelope);
    }

    /// Drain and return every outbound message queued by the last `decide`
    /// call, for the controller to hand to the bus.
    pub fn drain_outbox(&mut self) -> Vec<(Option<RobotId>, Payload)> {
        std::mem::take(&mut self.outbox)
    }

    /// Produce this step's action. `fan` is the set of in-bounds cells this
    /// robot can currently see (position, gold, occupants), as reported by
    /// `Board::observe_fan`; `roster` lets this robot tell same-team
    /// occupants apart when building its own `ObservedTile`s.
    pub fn decide(&mut self, step: Step, fan: &[(Position, u32, Vec<RobotId>)], roster: &TeamRoster) -> Action {
        self.sense_and_broadcast(step, fan, roster);
        self.drain_inbox();
        self.try_adopt_consensus();

        match self.state {
            AgentState::Exploring => self.act_exploring(step),
            AgentState::Proposing => self.act_proposing(step),
            AgentState::Executing => self.act_executing(step),
            AgentState::AwaitingPartner => self.act_awaiting_partner(step),
            AgentState::Delivering => self.act_delivering(step),
        }
    }

    fn sense_and_broadcast(&mut self, step: Step, fan: &[(Position, u32, Vec<RobotId>)], roster: &TeamRoster) {
        if fan.is_empty() {
            return;
        }
        let mut observed = Vec::with_capacity(fan.len());
        for (pos, gold_count, occupants) in fan {
            let same_team_count = occupants
                .iter()
                .filter(|robot| roster.team_of(**robot) == Some(self.team))
                .count() as u32;
            let tile = ObservedTile {
                pos: *pos,
                gold_count: *gold_count,
                same_team_count,
            };
            self.local_map.observe(tile, step);
            observed.push(tile);
        }
        self.outbox.push((None, Payload::Observations(observed)));
    }

    fn drain_inbox(&mut self) {
        let inbox = std::mem::take(&mut self.inbox);
        for envelope in inbox {
            self.handle_message(envelope);
        }
    }

    fn handle_message(&mut self, envelope: Envelope) {
        let sender = envelope.sender;
        match envelope.payload {
            Payload::Observations(tiles) => {
                for tile in tiles {
                    self.local_map.observe(tile, envelope.step);
                }
            }
            Payload::GoldConsumed(pos) => {
                self.local_map.mark_consumed(pos, envelope.step);
            }
            Payload::Turn(new_direction) => {
                if self.state == AgentState::AwaitingPartner && self.partner_id.is_none() {
                    self.facing = new_direction;
                }
            }
            Payload::MissionAbort | Payload::MissionComplete => {
                self.reset_to_exploring();
            }
            Payload::PrepareRequest(req) => {
                if let Some(body) = self.paxos.handle_prepare_request(&req, self.pos) {
                    self.outbox.push((
                        Some(sender),
                        Payload::PrepareResponse { in_reply_to: req.paxos_id, body },
                    ));
                }
            }
            Payload::PrepareResponse { in_reply_to, body } => {
                if let Some(accept_req) = self.paxos.handle_prepare_response(sender, in_reply_to, body) {
                    self.outbox.push((None, Payload::AcceptRequest(accept_req)));
                }
            }
            Payload::AcceptRequest(req) => {
                if let Some(resp) = self.paxos.handle_accept_request(&req) {
                    self.outbox.push((None, Payload::AcceptResponse(resp)));
                }
            }
            Payload::AcceptResponse(resp) => {
                self.paxos.handle_accept_response(sender, resp);
            }
        }
    }

    /// If consensus has just latched on a mission this robot is party to,
    /// and it hasn't already adopted one, bind to it and switch to
    /// EXECUTING. No-op for everyone else.
    fn try_adopt_consensus(&mut self) {
        if self.current_mission.is_some() {
            return;
        }
        let Some(mission) = self.paxos.final_value() else {
            return;
        };
        if mission.leader_id != self.robot_id && mission.follower_id != self.robot_id {
            return;
        }
        self.current_mission = Some(mission);
        self.state = AgentState::Executing;
        self.exploration_target = None;
        self.path = plan_path(self.pos, mission.target_tile, self.facing);
    }

    fn is_leader(&self) -> bool {
        self.current_mission.map(|m| m.leader_id == self.robot_id).unwrap_or(false)
    }

    fn reset_to_exploring(&mut self) {
        self.state = AgentState::Exploring;
        self.current_mission = None;
        self.partner_id = None;
        self.path.clear();
        self.exploration_target = None;
        self.awaiting_partner_timer = 0;
        self.paxos.reset_proposer_state();
    }

    fn act_exploring(&mut self, step: Step) -> Action {
        if step >= self.backoff_until_step {
            if let Some((target, cost)) = self.local_map.best_mission_candidate(self.pos, self.deposit_pos, step) {
                let mission = Mission { target_tile: target, cost };
                let req = self.paxos.start_election(mission, step);
                self.outbox.push((None, Payload::PrepareRequest(req)));
                self.path = plan_path(self.pos, target, self.facing);
                self.exploration_target = None;
                self.state = AgentState::Proposing;
                return self.next_path_action();
            }
        }

        let target = self.local_map.best_exploration_target(
            self.pos,
            self.facing,
            step,
            &self.weights,
            self.board_width,
            self.board_height,
        );
        if self.path.is_empty() || self.exploration_target != Some(target) {
            self.path = plan_path(self.pos, target, self.facing);
            self.exploration_target = Some(target);
        }
        self.next_path_action()
    }

    fn act_proposing(&mut self, step: Step) -> Action {
        match self.paxos.check_proposal_failure(step) {
            Some(ProposalFailure::TimedOut) => {
                self.failed_proposal_count += 1;
                self.backoff_until_step = step + timeout_backoff(self.failed_proposal_count);
                self.reset_to_exploring();
                return Action::Wait { robot_id: self.robot_id };
            }
            Some(ProposalFailure::Preempted) => {
                self.failed_proposal_count += 1;
                self.backoff_until_step = step + preemption_backoff(self.failed_proposal_count);
                self.reset_to_exploring();
                return Action::Wait { robot_id: self.robot_id };
            }
            None => {}
        }
        self.next_path_action()
    }

    fn act_executing(&mut self, _step: Step) -> Action {
        if self.path.is_empty() {
            self.state = AgentState::AwaitingPartner;
            self.awaiting_partner_timer = AWAITING_PARTNER_TIMEOUT;
            return Action::Wait { robot_id: self.robot_id };
        }
        self.next_path_action()
    }

    fn act_awaiting_partner(&mut self, _step: Step) -> Action {
        let Some(mission) = self.current_mission else {
            self.reset_to_exploring();
            return Action::Wait { robot_id: self.robot_id };
        };

        if let Some(partner) = self.partner_id {
            self.outbox.push((None, Payload::GoldConsumed(mission.target_tile)));
            if self.is_leader() {
                self.outbox.push((
                    None,
                    Payload::Observations(vec![ObservedTile {
                        pos: mission.target_tile,
                        gold_count: 0,
                        same_team_count: 2,
                    }]),
                ));
            }
            self.state = AgentState::Delivering;
            self.path = plan_path(self.pos, self.deposit_pos, self.facing);
            let _ = partner;
            return self.next_path_action();
        }

        if self.awaiting_partner_timer == 0 {
            self.outbox.push((None, Payload::MissionAbort));
            self.reset_to_exploring();
            return Action::Wait { robot_id: self.robot_id };
        }
        self.awaiting_partner_timer -= 1;

        if self.is_leader() {
            let mut post_pickup_path = plan_path(mission.target_tile, self.deposit_pos, self.facing);
            let next_facing = match post_pickup_path.pop_front() {
                Some(PathStep::Turn(dir)) => dir,
                _ => self.facing,
            };
            if next_facing != self.facing {
                self.outbox.push((None, Payload::Turn(next_facing)));
                self.facing = next_facing;
                return Action::Wait { robot_id: self.robot_id };
            }
            Action::Pickup { robot_id: self.robot_id, pos: self.pos }
        } else {
            // The follower has nothing to align before pickup — it simply
            // keeps offering a Pickup at its own tile every step until the
            // leader's is accepted alongside it and the pair forms.
            Action::Pickup { robot_id: self.robot_id, pos: self.pos }
        }
    }

    fn act_delivering(&mut self, _step: Step) -> Action {
        if self.partner_id.is_none() && self.pos != self.deposit_pos {
            self.outbox.push((None, Payload::MissionAbort));
            self.reset_to_exploring();
            return Action::Wait { robot_id: self.robot_id };
        }
        if self.partner_id.is_none() && self.pos == self.deposit_pos {
            if self.is_leader() {
                self.outbox.push((None, Payload::MissionComplete));
            }
            self.reset_to_exploring();
            return Action::Wait { robot_id: self.robot_id };
        }
        self.next_path_action()
    }

    fn next_path_action(&mut self) -> Action {
        match self.path.pop_front() {
            Some(PathStep::Turn(new_direction)) => {
                self.facing = new_direction;
                Action::Turn { robot_id: self.robot_id, new_direction }
            }
            Some(PathStep::Move) => Action::Move { robot_id: self.robot_id },
            None => Action::Wait { robot_id: self.robot_id },
        }
    }
}
