//! An agent's private model of the board, built up from its own fan scans
//! and `Observations` broadcasts from team-mates.

use std::collections::HashMap;

use gr_core::{Direction, ObservedTile, Position, Step};

use crate::error::{AgentError, AgentResult};

/// How stale a sensed tile is allowed to be before it's ignored as a mission
/// candidate. Gold reported more than this many steps ago may well be gone.
const MISSION_STALENESS_LIMIT: u64 = 100;

/// Coldness assigned to a cell never yet observed — large enough to always
/// dominate the exploration score's coldness term over any real reading.
const NEVER_SEEN_COLDNESS: u64 = 10_000;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SensedTile {
    pub last_seen_step: Step,
    pub gold_count: u32,
    pub same_team_count: u32,
}

/// Linear weights for the exploration-target score. Defaults match the
/// values suggested as a starting point.
#[derive(Copy, Clone, Debug)]
pub struct ExplorationWeights {
    pub coldness: f64,
    pub gold: f64,
    pub cost: f64,
    pub density: f64,
}

impl Default for ExplorationWeights {
    fn default() -> Self {
        Self {
            coldness: 5.0,
            gold: 10.0,
            cost: 50.0,
            density: 150.0,
        }
    }
}

impl ExplorationWeights {
    /// Reject weights that can't possibly produce a sane score ordering —
    /// the only validation this crate needs, since every other input
    /// (positions, steps) comes from the controller, not the command line.
    pub fn validate(self) -> AgentResult<Self> {
        for (name, value) in [
            ("coldness", self.coldness),
            ("gold", self.gold),
            ("cost", self.cost),
            ("density", self.density),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AgentError::Config { name, value });
            }
        }
        Ok(self)
    }
}

/// Penalty for reaching `to` from `from` while facing `facing`: 0 straight
/// ahead on-axis, 2 directly behind on-axis, 1 everywhere else (one turn
/// suffices to line up with any off-axis cell).
fn turn_penalty(from: Position, to: Position, facing: Direction) -> u32 {
    if from == to {
        return 0;
    }
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let ahead = match facing {
        Direction::North => dx == 0 && dy < 0,
        Direction::South => dx == 0 && dy > 0,
        Direction::East => dy == 0 && dx > 0,
        Direction::West => dy == 0 && dx < 0,
    };
    if ahead {
        return 0;
    }
    let behind = match facing {
        Direction::North => dx == 0 && dy > 0,
        Direction::South => dx == 0 && dy < 0,
        Direction::East => dy == 0 && dx < 0,
        Direction::West => dy == 0 && dx > 0,
    };
    if behind {
        2
    } else {
        1
    }
}

#[derive(Default)]
pub struct LocalMap {
    tiles: HashMap<Position, SensedTile>,
}

impl LocalMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pos: Position) -> Option<&SensedTile> {
        self.tiles.get(&pos)
    }

    /// Fold in one freshly sensed tile, own scan or relayed broadcast alike.
    /// Stale/out-of-order reports (older than what's already on file) are
    /// dropped rather than overwriting a newer reading.
    pub fn observe(&mut self, tile: ObservedTile, step: Step) {
        let entry = self.tiles.entry(tile.pos).or_insert(SensedTile {
            last_seen_step: Step::ZERO,
            gold_count: 0,
            same_team_count: 0,
        });
        if step < entry.last_seen_step {
            return;
        }
        entry.last_seen_step = step;
        entry.gold_count = tile.gold_count;
        entry.same_team_count = tile.same_team_count;
    }

    /// Unconditionally drop a tile's recorded gold to zero: the team has
    /// just watched the last unit get picked up there.
    pub fn mark_consumed(&mut self, pos: Position, step: Step) {
        let entry = self.tiles.entry(pos).or_insert(SensedTile {
            last_seen_step: step,
            gold_count: 0,
            same_team_count: 0,
        });
        entry.gold_count = 0;
        entry.last_seen_step = entry.last_seen_step.max(step);
    }

    /// The best known gold tile to head for: minimizes the round trip
    /// `self -> tile -> deposit` among tiles still believed to carry gold
    /// and not reported stale.
    pub fn best_mission_candidate(
        &self,
        from: Position,
        deposit: Position,
        step: Step,
    ) -> Option<(Position, u32)> {
        self.tiles
            .iter()
            .filter(|(_, t)| t.gold_count > 0 && step.since(t.last_seen_step) <= MISSION_STALENESS_LIMIT)
            .map(|(&pos, _)| (pos, from.manhattan_distance(pos) + pos.manhattan_distance(deposit)))
            .min_by_key(|(pos, cost)| (*cost, *pos))
    }

    /// The cell that maximizes the exploration score over the whole board,
    /// with the agent's own cell forced out of contention.
    pub fn best_exploration_target(
        &self,
        from: Position,
        facing: Direction,
        step: Step,
        weights: &ExplorationWeights,
        width: i32,
        height: i32,
    ) -> Position {
        let mut best_pos = from;
        let mut best_score = f64::NEG_INFINITY;
        for y in 0..height {
            for x in 0..width {
                let pos = Position::new(x, y);
                if pos == from {
                    continue;
                }
                let (coldness, gold_bonus, density) = match self.tiles.get(&pos) {
                    Some(t) => (step.since(t.last_seen_step), t.gold_count, t.same_team_count),
                    None => (NEVER_SEEN_COLDNESS, 0, 0),
                };
                let cost = from.manhattan_distance(pos) + turn_penalty(from, pos, facing);
                let score = weights.coldness * coldness as f64 + weights.gold * gold_bonus as f64
                    - weights.cost * cost as f64
                    - weights.density * density as f64;
                if score > best_score {
                    best_score = score;
                    best_pos = pos;
                }
            }
        }
        best_pos
    }
}
