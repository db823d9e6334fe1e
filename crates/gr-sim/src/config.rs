//! Simulation configuration: board size, gold total, deposit placement, and
//! per-team roster size.

use gr_core::Position;

#[derive(Clone, Debug)]
pub struct SimConfig {
    pub width: i32,
    pub height: i32,
    pub total_gold: u32,
    /// Deposit positions, or `None` to have the board sample them at random
    /// (with collision avoidance between the two) from the RNG seeded by
    /// `seed`.
    pub deposit_red: Option<Position>,
    pub deposit_blue: Option<Position>,
    pub team_size: usize,
    pub seed: u64,
}

impl SimConfig {
    pub fn new(width: i32, height: i32, total_gold: u32, team_size: usize, seed: u64) -> Self {
        Self {
            width,
            height,
            total_gold,
            deposit_red: None,
            deposit_blue: None,
            team_size,
            seed,
        }
    }

    pub fn with_deposits(mut self, red: Position, blue: Position) -> Self {
        self.deposit_red = Some(red);
        self.deposit_blue = Some(blue);
        self
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new(20, 20, 40, 10, 0)
    }
}
