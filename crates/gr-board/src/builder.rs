//! Fluent board construction, mirroring the teacher's
//! `RoadNetworkBuilder` pattern: accumulate parameters, validate once in
//! `build()`.

use gr_core::{Position, SimRng, Team};

use crate::board::Board;
use crate::tile::Tile;

pub struct BoardBuilder {
    width: i32,
    height: i32,
    deposit_red: Option<Position>,
    deposit_blue: Option<Position>,
    total_gold: u32,
}

impl BoardBuilder {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height, deposit_red: None, deposit_blue: None, total_gold: 0 }
    }

    pub fn deposits(mut self, red: Position, blue: Position) -> Self {
        self.deposit_red = Some(red);
        self.deposit_blue = Some(blue);
        self
    }

    /// Supply only the red deposit position, leaving blue to be sampled
    /// (with collision avoidance) at `build()` time.
    pub fn deposit_red(mut self, pos: Position) -> Self {
        self.deposit_red = Some(pos);
        self
    }

    /// Supply only the blue deposit position, leaving red to be sampled
    /// (with collision avoidance) at `build()` time.
    pub fn deposit_blue(mut self, pos: Position) -> Self {
        self.deposit_blue = Some(pos);
        self
    }

    pub fn total_gold(mut self, n: u32) -> Self {
        self.total_gold = n;
        self
    }

    fn random_tile_pos(width: i32, height: i32, rng: &mut SimRng) -> Position {
        Position::new(rng.gen_range(0..width), rng.gen_range(0..height))
    }

    /// Build the board, placing both deposit tiles and then scattering
    /// `total_gold` units of gold across plain tiles.
    ///
    /// Matches `core/board.py::Board.__init__`: when a deposit position
    /// isn't supplied, sample it uniformly at random; the blue deposit is
    /// re-sampled until it lands somewhere other than the red one, so the
    /// two never collide.
    pub fn build(self, rng: &mut SimRng) -> Board {
        let mut tiles = vec![Tile::plain(); (self.width * self.height) as usize];

        let deposit_red = self.deposit_red.unwrap_or_else(|| Self::random_tile_pos(self.width, self.height, rng));
        let mut deposit_blue = self
            .deposit_blue
            .unwrap_or_else(|| Self::random_tile_pos(self.width, self.height, rng));
        if self.deposit_blue.is_none() {
            while deposit_blue == deposit_red {
                deposit_blue = Self::random_tile_pos(self.width, self.height, rng);
            }
        }

        let red_idx = (deposit_red.y * self.width + deposit_red.x) as usize;
        let blue_idx = (deposit_blue.y * self.width + deposit_blue.x) as usize;
        tiles[red_idx] = Tile::deposit(Team::Red);
        tiles[blue_idx] = Tile::deposit(Team::Blue);

        let mut board = Board::new(self.width, self.height, tiles);

        let mut placed = 0u32;
        while placed < self.total_gold {
            let pos = Self::random_tile_pos(self.width, self.height, rng);
            if board.tile_at_mut(pos).unwrap().add(pos).is_ok() {
                placed += 1;
            }
        }

        board
    }
}
