//! Greedy Manhattan pathfinding: no obstacle avoidance, just a direct
//! run of `Move`s along one axis, then the other, turning at most twice.

use std::collections::VecDeque;

use gr_core::{Direction, Position};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PathStep {
    Turn(Direction),
    Move,
}

fn axis_direction(delta: i32, horizontal: bool) -> Option<Direction> {
    match (horizontal, delta.signum()) {
        (true, 1) => Some(Direction::East),
        (true, -1) => Some(Direction::West),
        (false, 1) => Some(Direction::South),
        (false, -1) => Some(Direction::North),
        _ => None,
    }
}

fn is_horizontal(dir: Direction) -> bool {
    matches!(dir, Direction::East | Direction::West)
}

/// Plan a path from `from` to `to`: prefer the axis already aligned with
/// `facing` to save a turn; otherwise tackle the larger displacement first.
/// Emits `abs(dx)` moves, an optional turn, then `abs(dy)` moves (or the
/// reverse), never more than two turns.
pub fn plan_path(from: Position, to: Position, facing: Direction) -> VecDeque<PathStep> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let mut steps = VecDeque::new();
    if dx == 0 && dy == 0 {
        return steps;
    }

    let horizontal_first = if dx != 0 && is_horizontal(facing) {
        true
    } else if dy != 0 && !is_horizontal(facing) {
        false
    } else {
        dx.abs() >= dy.abs()
    };

    let mut current_facing = facing;
    if horizontal_first {
        emit_axis(&mut steps, dx, true, &mut current_facing);
        emit_axis(&mut steps, dy, false, &mut current_facing);
    } else {
        emit_axis(&mut steps, dy, false, &mut current_facing);
        emit_axis(&mut steps, dx, true, &mut current_facing);
    }
    steps
}

fn emit_axis(steps: &mut VecDeque<PathStep>, delta: i32, horizontal: bool, facing: &mut Direction) {
    if let Some(dir) = axis_direction(delta, horizontal) {
        if dir != *facing {
            steps.push_back(PathStep::Turn(dir));
            *facing = dir;
        }
        for _ in 0..delta.abs() {
            steps.push_back(PathStep::Move);
        }
    }
}
