//! The grid board: tile storage plus a position-indexed robot registry.
//!
//! Tiles are stored in a flat, row-major `Vec<Tile>` indexed by
//! `y * width + x` — direct O(1) indexing is sufficient at this scale, so
//! unlike the teacher's CSR-graph-plus-R-tree spatial index, no separate
//! spatial acceleration structure is built. The robot-location index uses a
//! `BTreeMap` of `BTreeSet`s (ordered, unlike the teacher's plain
//! `HashMap`-of-`Vec`s equivalent) so that iterating robots at a tile is
//! deterministic, matching the REDESIGN note calling for reproducible tie
//! breaking.

use std::collections::{BTreeMap, BTreeSet};

use gr_core::{Direction, Position, RobotId, Team};

use crate::error::BoardError;
use crate::tile::Tile;

/// Offsets of the fan-shaped observation window, relative to an agent facing
/// `facing`: three cells at forward distance 1, five at forward distance 2,
/// rotated to the agent's orientation.
fn fan_offsets(facing: Direction) -> [(i32, i32); 8] {
    let (fx, fy) = facing.offset();
    let (lx, ly) = (-fy, fx);
    [
        (fx - lx, fy - ly),
        (fx, fy),
        (fx + lx, fy + ly),
        (2 * fx - 2 * lx, 2 * fy - 2 * ly),
        (2 * fx - lx, 2 * fy - ly),
        (2 * fx, 2 * fy),
        (2 * fx + lx, 2 * fy + ly),
        (2 * fx + 2 * lx, 2 * fy + 2 * ly),
    ]
}

pub struct Board {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    robots_at: BTreeMap<Position, BTreeSet<RobotId>>,
}

impl Board {
    pub(crate) fn new(width: i32, height: i32, tiles: Vec<Tile>) -> Self {
        debug_assert_eq!(tiles.len(), (width * height) as usize);
        Self {
            width,
            height,
            tiles,
            robots_at: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    #[inline]
    fn index_of(&self, pos: Position) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    pub fn tile_at(&self, pos: Position) -> Result<&Tile, BoardError> {
        if !self.in_bounds(pos) {
            return Err(BoardError::OutOfBounds(pos));
        }
        Ok(&self.tiles[self.index_of(pos)])
    }

    pub fn tile_at_mut(&mut self, pos: Position) -> Result<&mut Tile, BoardError> {
        if !self.in_bounds(pos) {
            return Err(BoardError::OutOfBounds(pos));
        }
        let idx = self.index_of(pos);
        Ok(&mut self.tiles[idx])
    }

    /// Robots currently occupying `pos`, in ascending `RobotId` order.
    pub fn robots_at(&self, pos: Position) -> impl Iterator<Item = RobotId> + '_ {
        self.robots_at
            .get(&pos)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Place `robot` at `pos` for the first time (simulation init).
    pub fn place_robot(&mut self, robot: RobotId, pos: Position) {
        self.robots_at.entry(pos).or_default().insert(robot);
    }

    /// Move `robot` from `from` to `to`, garbage-collecting the vacated
    /// position's entry once empty so `robots_at` never reports a phantom
    /// occupant at a tile nobody stands on.
    pub fn move_robot(&mut self, robot: RobotId, from: Position, to: Position) {
        if let Some(set) = self.robots_at.get_mut(&from) {
            set.remove(&robot);
            if set.is_empty() {
                self.robots_at.remove(&from);
            }
        }
        self.robots_at.entry(to).or_default().insert(robot);
    }

    /// The in-bounds cells of the fan-shaped window in front of an agent at
    /// `from` facing `facing`, each paired with its gold count and the
    /// robots currently standing there. `gr-agent` turns this into
    /// `ObservedTile`s once it knows which of those robots share its team.
    pub fn observe_fan(&self, from: Position, facing: Direction) -> Vec<(Position, u32, Vec<RobotId>)> {
        fan_offsets(facing)
            .into_iter()
            .map(|(dx, dy)| Position::new(from.x + dx, from.y + dy))
            .filter(|pos| self.in_bounds(*pos))
            .map(|pos| {
                let gold = self.tiles[self.index_of(pos)].gold_count();
                let robots: Vec<RobotId> = self.robots_at(pos).collect();
                (pos, gold, robots)
            })
            .collect()
    }

    pub fn find_deposit(&self, team: Team) -> Option<Position> {
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Position::new(x, y);
                if self.tiles[self.index_of(pos)].is_deposit_for(team) {
                    return Some(pos);
                }
            }
        }
        None
    }

    /// A `(agents, tile)` snapshot shaped `state[y][x]`, matching the
    /// external visualizer's expected layout.
    pub fn snapshot(&self) -> Vec<Vec<(Vec<RobotId>, Tile)>> {
        let mut rows = Vec::with_capacity(self.height as usize);
        for y in 0..self.height {
            let mut row = Vec::with_capacity(self.width as usize);
            for x in 0..self.width {
                let pos = Position::new(x, y);
                let robots: Vec<RobotId> = self.robots_at(pos).collect();
                row.push((robots, self.tiles[self.index_of(pos)]));
            }
            rows.push(row);
        }
        rows
    }
}
