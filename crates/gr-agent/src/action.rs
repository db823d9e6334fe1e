//! The closed set of actions an agent can emit each step.

use gr_core::{Direction, Position, RobotId};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Action {
    Turn { robot_id: RobotId, new_direction: Direction },
    Move { robot_id: RobotId },
    Pickup { robot_id: RobotId, pos: Position },
    Wait { robot_id: RobotId },
}

impl Action {
    pub fn robot_id(&self) -> RobotId {
        match self {
            Action::Turn { robot_id, .. } => *robot_id,
            Action::Move { robot_id } => *robot_id,
            Action::Pickup { robot_id, .. } => *robot_id,
            Action::Wait { robot_id } => *robot_id,
        }
    }
}
