//! Team affiliation and direction-facing enums, plus the team roster used to
//! expand broadcast messages.

use crate::RobotId;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    #[inline]
    pub fn opponent(self) -> Team {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::Red => write!(f, "red"),
            Team::Blue => write!(f, "blue"),
        }
    }
}

/// The four cardinal headings a robot can face.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// `(dx, dy)` for one step in this direction. North decreases `y`.
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// `true` if both directions share an axis (both horizontal or both
    /// vertical) — used to decide path-planning tie-breaks.
    #[inline]
    pub fn same_axis(self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::North | Direction::South, Direction::North | Direction::South)
                | (Direction::East | Direction::West, Direction::East | Direction::West)
        )
    }
}

/// Static membership roster for both teams, used by the message bus to
/// expand a broadcast into one envelope per same-team recipient.
#[derive(Clone, Debug)]
pub struct TeamRoster {
    red: Vec<RobotId>,
    blue: Vec<RobotId>,
}

impl TeamRoster {
    pub fn new(red: Vec<RobotId>, blue: Vec<RobotId>) -> Self {
        Self { red, blue }
    }

    #[inline]
    pub fn members(&self, team: Team) -> &[RobotId] {
        match team {
            Team::Red => &self.red,
            Team::Blue => &self.blue,
        }
    }

    pub fn all(&self) -> impl Iterator<Item = (RobotId, Team)> + '_ {
        self.red
            .iter()
            .map(|&id| (id, Team::Red))
            .chain(self.blue.iter().map(|&id| (id, Team::Blue)))
    }

    pub fn team_of(&self, robot: RobotId) -> Option<Team> {
        if self.red.contains(&robot) {
            Some(Team::Red)
        } else if self.blue.contains(&robot) {
            Some(Team::Blue)
        } else {
            None
        }
    }
}
