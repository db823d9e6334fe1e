//! Fluent builder for constructing a [`SimulationController`].

use gr_agent::Agent;
use gr_board::BoardBuilder;
use gr_core::{Direction, Position, RobotId, SimRng, Team, TeamRoster};

use crate::config::SimConfig;
use crate::controller::SimulationController;
use crate::error::{SimError, SimResult};

/// Fluent builder for [`SimulationController`].
///
/// # Required input
///
/// - [`SimConfig`] — board size, total gold, team size, deposit placement,
///   and the RNG seed.
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                                          |
/// |------------------|---------------------------------------------------|
/// | `.red_start(v)`  | All agents at the red deposit, facing `South`      |
/// | `.blue_start(v)` | All agents at the blue deposit, facing `North`     |
///
/// # Example
///
/// ```rust,ignore
/// let config = SimConfig::new(20, 20, 40, 10, 1);
/// let mut controller = SimulationBuilder::new(config).build()?;
/// controller.run_steps(500, &mut NoopObserver)?;
/// ```
pub struct SimulationBuilder {
    config: SimConfig,
    red_start: Option<Vec<(Position, Direction)>>,
    blue_start: Option<Vec<(Position, Direction)>>,
}

impl SimulationBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, red_start: None, blue_start: None }
    }

    /// Supply each red agent's starting position and facing. Must be length
    /// `team_size`.
    pub fn red_start(mut self, start: Vec<(Position, Direction)>) -> Self {
        self.red_start = Some(start);
        self
    }

    /// Supply each blue agent's starting position and facing. Must be length
    /// `team_size`.
    pub fn blue_start(mut self, start: Vec<(Position, Direction)>) -> Self {
        self.blue_start = Some(start);
        self
    }

    /// Validate inputs, build the board and every agent, and return a
    /// ready-to-run [`SimulationController`].
    pub fn build(self) -> SimResult<SimulationController> {
        if self.config.team_size == 0 {
            return Err(SimError::Config("team_size must be at least 1".to_string()));
        }

        let mut rng = SimRng::new(self.config.seed);

        let mut board_builder = BoardBuilder::new(self.config.width, self.config.height).total_gold(self.config.total_gold);
        if let Some(pos) = self.config.deposit_red {
            board_builder = board_builder.deposit_red(pos);
        }
        if let Some(pos) = self.config.deposit_blue {
            board_builder = board_builder.deposit_blue(pos);
        }
        let mut board = board_builder.build(&mut rng);

        // When not explicitly supplied, the board sampled these without
        // collision (see `BoardBuilder::build`) — read them back so the
        // default start positions and each agent's deposit target line up
        // with where the tiles actually ended up.
        let deposit_red = board.find_deposit(Team::Red).expect("board always places a red deposit");
        let deposit_blue = board.find_deposit(Team::Blue).expect("board always places a blue deposit");

        let red_start = match self.red_start {
            Some(s) => {
                if s.len() != self.config.team_size {
                    return Err(SimError::RosterMismatch {
                        expected: self.config.team_size,
                        got: s.len(),
                        what: "red start positions",
                    });
                }
                s
            }
            None => vec![(deposit_red, Direction::South); self.config.team_size],
        };
        let blue_start = match self.blue_start {
            Some(s) => {
                if s.len() != self.config.team_size {
                    return Err(SimError::RosterMismatch {
                        expected: self.config.team_size,
                        got: s.len(),
                        what: "blue start positions",
                    });
                }
                s
            }
            None => vec![(deposit_blue, Direction::North); self.config.team_size],
        };

        let mut agents = Vec::with_capacity(self.config.team_size * 2);
        let mut red_ids = Vec::with_capacity(self.config.team_size);
        let mut blue_ids = Vec::with_capacity(self.config.team_size);

        for (i, &(pos, facing)) in red_start.iter().enumerate() {
            let id = RobotId(i as u32);
            board.place_robot(id, pos);
            red_ids.push(id);
            agents.push(Agent::new(
                id,
                Team::Red,
                pos,
                facing,
                deposit_red,
                self.config.width,
                self.config.height,
                self.config.team_size,
            ));
        }
        for (i, &(pos, facing)) in blue_start.iter().enumerate() {
            let id = RobotId((self.config.team_size + i) as u32);
            board.place_robot(id, pos);
            blue_ids.push(id);
            agents.push(Agent::new(
                id,
                Team::Blue,
                pos,
                facing,
                deposit_blue,
                self.config.width,
                self.config.height,
                self.config.team_size,
            ));
        }

        let roster = TeamRoster::new(red_ids, blue_ids);
        Ok(SimulationController::new(board, roster, agents))
    }
}
