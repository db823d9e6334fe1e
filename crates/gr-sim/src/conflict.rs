//! Per-step conflict resolution: the pure function that turns the multiset
//! of actions collected from every agent into the ordered action list the
//! controller actually executes, plus the partnership changes that fall out
//! of pickup pairing and paired-action disagreement.

use std::collections::BTreeMap;

use gr_agent::Action;
use gr_board::Board;
use gr_core::{Direction, Position, RobotId, Team};

/// Everything `resolve` needs to know about one agent, snapshotted before
/// this step's execution phase — exactly the read-only slice of `Agent`
/// state the conflict pass is allowed to see.
#[derive(Copy, Clone, Debug)]
pub struct AgentSnapshot {
    pub robot_id: RobotId,
    pub team: Team,
    pub pos: Position,
    pub facing: Direction,
    pub partner_id: Option<RobotId>,
}

pub struct ConflictOutcome {
    /// `other ++ valid_moves ++ valid_pickups ++ valid_paired`, ready for
    /// the execution phase.
    pub actions: Vec<Action>,
    /// New partnerships formed by a pickup pairing this step: `(first,
    /// second, tile)`, ascending `robot_id` within each pair.
    pub new_partnerships: Vec<(RobotId, RobotId, Position)>,
    /// Partnerships dissolved this step by disagreeing paired actions. The
    /// pair's shared tile gains one unit of gold; partnership ends.
    pub broken_partnerships: Vec<(RobotId, RobotId, Position)>,
}

fn resulting_position(pos: Position, facing: Direction) -> Position {
    pos.step(facing)
}

pub fn resolve(actions: &[Action], agents: &[AgentSnapshot], board: &Board) -> ConflictOutcome {
    let by_id: BTreeMap<RobotId, &AgentSnapshot> = agents.iter().map(|a| (a.robot_id, a)).collect();

    let mut other = Vec::new();
    let mut move_candidates = Vec::new();
    let mut pickup_groups: BTreeMap<Position, Vec<Action>> = BTreeMap::new();
    let mut paired_groups: BTreeMap<(RobotId, RobotId), Vec<Action>> = BTreeMap::new();

    for &action in actions {
        let snapshot = by_id[&action.robot_id()];
        if let Some(partner) = snapshot.partner_id {
            let key = (snapshot.robot_id.min(partner), snapshot.robot_id.max(partner));
            paired_groups.entry(key).or_default().push(action);
            continue;
        }
        match action {
            Action::Move { .. } => {
                let target = resulting_position(snapshot.pos, snapshot.facing);
                if board.in_bounds(target) {
                    move_candidates.push(action);
                }
                // Out-of-bounds moves are silently dropped.
            }
            Action::Pickup { pos, .. } => {
                pickup_groups.entry(pos).or_default().push(action);
            }
            Action::Turn { .. } | Action::Wait { .. } => other.push(action),
        }
    }

    let mut valid_pickups = Vec::new();
    let mut new_partnerships = Vec::new();
    for (pos, requests) in pickup_groups {
        let gold = board.tile_at(pos).map(|t| t.gold_count()).unwrap_or(0);
        let red: Vec<RobotId> = requests
            .iter()
            .filter(|a| by_id[&a.robot_id()].team == Team::Red)
            .map(|a| a.robot_id())
            .collect();
        let blue: Vec<RobotId> = requests
            .iter()
            .filter(|a| by_id[&a.robot_id()].team == Team::Blue)
            .map(|a| a.robot_id())
            .collect();

        let red_qualifies = red.len() == 2 && gold >= 1;
        let blue_qualifies = blue.len() == 2 && gold >= 1;

        let (accept_red, accept_blue) = if red_qualifies && blue_qualifies {
            if gold >= 2 {
                (true, true)
            } else {
                (false, false)
            }
        } else {
            (red_qualifies, blue_qualifies)
        };

        if accept_red {
            let mut pair = red.clone();
            pair.sort();
            new_partnerships.push((pair[0], pair[1], pos));
            for &id in &pair {
                valid_pickups.push(Action::Pickup { robot_id: id, pos });
            }
        }
        if accept_blue {
            let mut pair = blue.clone();
            pair.sort();
            new_partnerships.push((pair[0], pair[1], pos));
            for &id in &pair {
                valid_pickups.push(Action::Pickup { robot_id: id, pos });
            }
        }
    }

    let mut valid_paired = Vec::new();
    let mut broken_partnerships = Vec::new();
    for ((a, b), pair_actions) in paired_groups {
        if pair_actions.len() < 2 {
            // A partner that didn't act this step (shouldn't happen in
            // practice, since every agent emits exactly one action/step).
            valid_paired.extend(pair_actions);
            continue;
        }
        let (a1, a2) = (pair_actions[0], pair_actions[1]);
        if matches!(a1, Action::Pickup { .. }) || matches!(a2, Action::Pickup { .. }) {
            continue;
        }

        let same_variant = std::mem::discriminant(&a1) == std::mem::discriminant(&a2);
        let facing_agrees = !matches!(a1, Action::Move { .. }) || by_id[&a].facing == by_id[&b].facing;

        if same_variant && facing_agrees {
            for action in [a1, a2] {
                let snapshot = by_id[&action.robot_id()];
                if !matches!(action, Action::Move { .. }) || board.in_bounds(resulting_position(snapshot.pos, snapshot.facing)) {
                    valid_paired.push(action);
                }
            }
        } else {
            let shared_pos = by_id[&a].pos;
            broken_partnerships.push((a, b, shared_pos));
            for action in [a1, a2] {
                let snapshot = by_id[&action.robot_id()];
                if !matches!(action, Action::Move { .. }) || board.in_bounds(resulting_position(snapshot.pos, snapshot.facing)) {
                    valid_paired.push(action);
                }
            }
        }
    }

    let mut actions = other;
    actions.extend(move_candidates);
    actions.extend(valid_pickups);
    actions.extend(valid_paired);

    ConflictOutcome { actions, new_partnerships, broken_partnerships }
}
