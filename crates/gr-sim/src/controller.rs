//! The `SimulationController` and its step pipeline.

use std::collections::BTreeSet;

use gr_agent::{Action, Agent};
use gr_board::{Board, Tile};
use gr_bus::MessageBus;
use gr_core::{RobotId, Step, Team, TeamRoster};

use crate::conflict::{self, AgentSnapshot};
use crate::error::{SimError, SimResult};
use crate::observer::SimObserver;

/// The main simulation runner.
///
/// `SimulationController` owns the board, the message bus, the team roster,
/// and every agent, and drives the seven-phase step pipeline:
///
/// 1. **Deliver inbound**: drain the bus at the current step into each
///    receiver's inbox.
/// 2. **Collect actions**: call `Agent::decide` for every agent in ascending
///    `RobotId` order, gathering its action and outbox.
/// 3. **Enqueue outbound**: hand every collected outbox message to the bus.
/// 4. **Resolve conflicts** ([`conflict::resolve`]).
/// 5. **Execute valid actions** against the board.
/// 6. **Handle deposits**: dissolve any partnership standing on its own
///    team's deposit tile and credit the sink.
/// 7. **Advance the step counter.**
///
/// Create via [`SimulationBuilder`][crate::SimulationBuilder].
pub struct SimulationController {
    board: Board,
    bus: MessageBus,
    roster: TeamRoster,
    agents: Vec<Agent>,
    step: Step,
}

impl SimulationController {
    pub(crate) fn new(board: Board, roster: TeamRoster, agents: Vec<Agent>) -> Self {
        Self { board, bus: MessageBus::new(), roster, agents, step: Step::ZERO }
    }

    pub fn step_count(&self) -> Step {
        self.step
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn agent(&self, id: RobotId) -> &Agent {
        &self.agents[id.index()]
    }

    /// Run until `self.step_count() == target`, calling observer hooks at
    /// every step boundary.
    pub fn run<O: SimObserver>(&mut self, target: Step, observer: &mut O) -> SimResult<()> {
        while self.step < target {
            self.run_one_step(observer)?;
        }
        observer.on_sim_end(self.step);
        Ok(())
    }

    /// Run exactly `n` steps from the current position.
    pub fn run_steps<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.run_one_step(observer)?;
        }
        Ok(())
    }

    fn run_one_step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.step;
        observer.on_step_start(now);
        self.process_step(now)?;
        observer.on_step_end(now, &self.board);
        self.step = self.step.offset(1);
        Ok(())
    }

    fn process_step(&mut self, now: Step) -> SimResult<()> {
        // ── Phase 1: deliver inbound ───────────────────────────────────────
        for (receiver, envelope) in self.bus.drain(now, &self.roster) {
            self.agents[receiver.index()].receive(envelope);
        }

        // ── Phase 2: collect actions ───────────────────────────────────────
        //
        // Ascending RobotId order (the agent vec is already indexed that
        // way), matching the registry-order requirement in the step
        // pipeline.
        let mut actions = Vec::with_capacity(self.agents.len());
        let mut outboxes = Vec::with_capacity(self.agents.len());
        for agent in &mut self.agents {
            let fan = self.board.observe_fan(agent.pos, agent.facing);
            let action = agent.decide(now, &fan, &self.roster);
            actions.push(action);
            outboxes.push((agent.robot_id, agent.drain_outbox()));
        }

        // ── Phase 3: enqueue outbound ───────────────────────────────────────
        for (sender, outbox) in outboxes {
            for (receiver, payload) in outbox {
                match receiver {
                    Some(to) => self.bus.send(sender, to, now, payload),
                    None => self.bus.broadcast(sender, now, payload),
                }
            }
        }

        // ── Phase 4: resolve conflicts ───────────────────────────────────────
        let snapshots: Vec<AgentSnapshot> = self
            .agents
            .iter()
            .map(|a| AgentSnapshot {
                robot_id: a.robot_id,
                team: a.team,
                pos: a.pos,
                facing: a.facing,
                partner_id: a.partner_id,
            })
            .collect();
        let outcome = conflict::resolve(&actions, &snapshots, &self.board);

        // ── Phase 5: execute valid actions ───────────────────────────────────────
        for action in &outcome.actions {
            self.execute_action(*action)?;
        }
        // A pickup pair decrements the tile's gold exactly once per pair,
        // not once per participating robot — handled here rather than in
        // `execute_action`, which only applies Turn/Move.
        for (first, second, pos) in &outcome.new_partnerships {
            self.board.tile_at_mut(*pos)?.take(*pos)?;
            self.agents[first.index()].partner_id = Some(*second);
            self.agents[second.index()].partner_id = Some(*first);
        }
        for (first, second, pos) in &outcome.broken_partnerships {
            self.agents[first.index()].partner_id = None;
            self.agents[second.index()].partner_id = None;
            self.board.tile_at_mut(*pos)?.add(*pos)?;
        }

        // ── Phase 6: handle deposits ───────────────────────────────────────
        self.handle_deposits()?;

        Ok(())
    }

    /// Apply one action's physical effect. `Pickup` itself does nothing
    /// here — gold and partnership bookkeeping for a formed pair happens
    /// once per pair in `process_step`, not once per participating robot.
    fn execute_action(&mut self, action: Action) -> SimResult<()> {
        match action {
            Action::Turn { robot_id, new_direction } => {
                self.agents[robot_id.index()].facing = new_direction;
            }
            Action::Move { robot_id } => {
                let agent = &mut self.agents[robot_id.index()];
                let from = agent.pos;
                let to = from.step(agent.facing);
                agent.pos = to;
                self.board.move_robot(robot_id, from, to);
            }
            Action::Pickup { .. } | Action::Wait { .. } => {}
        }
        Ok(())
    }

    fn handle_deposits(&mut self) -> SimResult<()> {
        let mut processed: BTreeSet<RobotId> = BTreeSet::new();
        let ids: Vec<RobotId> = self.agents.iter().map(|a| a.robot_id).collect();
        for id in ids {
            if processed.contains(&id) {
                continue;
            }
            let (team, pos, partner) = {
                let agent = &self.agents[id.index()];
                (agent.team, agent.pos, agent.partner_id)
            };
            let Some(partner_id) = partner else {
                continue;
            };
            if !self.board.tile_at(pos)?.is_deposit_for(team) {
                continue;
            }
            let partner_pos = self.agents[partner_id.index()].pos;
            if partner_pos != pos {
                return Err(SimError::PartnerDesync {
                    leader: id.min(partner_id),
                    follower: id.max(partner_id),
                    leader_pos: pos,
                    follower_pos: partner_pos,
                });
            }
            self.board.tile_at_mut(pos)?.deposit_gold(pos, 1)?;
            self.agents[id.index()].partner_id = None;
            self.agents[partner_id.index()].partner_id = None;
            processed.insert(id);
            processed.insert(partner_id);
        }
        Ok(())
    }

    pub fn sink_total(&self, team: Team) -> u32 {
        self.board
            .find_deposit(team)
            .and_then(|pos| self.board.tile_at(pos).ok())
            .map(|tile| match tile {
                Tile::Deposit { sink_total, .. } => *sink_total,
                Tile::Plain { .. } => 0,
            })
            .unwrap_or(0)
    }
}
