//! Unit tests for gr-board.

#[cfg(test)]
mod tile {
    use gr_core::{Position, Team};

    use crate::tile::Tile;

    #[test]
    fn take_and_add_plain() {
        let at = Position::new(0, 0);
        let mut t = Tile::plain();
        assert!(t.take(at).is_err());
        t.add(at).unwrap();
        t.add(at).unwrap();
        assert_eq!(t.gold_count(), 2);
        t.take(at).unwrap();
        assert_eq!(t.gold_count(), 1);
    }

    #[test]
    fn deposit_rejects_take_and_add() {
        let at = Position::new(0, 0);
        let mut t = Tile::deposit(Team::Red);
        assert!(t.take(at).is_err());
        assert!(t.add(at).is_err());
        t.deposit_gold(at, 3).unwrap();
        assert!(t.is_deposit_for(Team::Red));
        assert!(!t.is_deposit_for(Team::Blue));
    }

    #[test]
    fn plain_rejects_deposit() {
        let at = Position::new(0, 0);
        let mut t = Tile::plain();
        assert!(t.deposit_gold(at, 1).is_err());
    }
}

#[cfg(test)]
mod board {
    use gr_core::{Position, RobotId, SimRng, Team};

    use crate::BoardBuilder;

    #[test]
    fn deposits_are_placed() {
        let mut rng = SimRng::new(0);
        let board = BoardBuilder::new(5, 5)
            .deposits(Position::new(0, 0), Position::new(4, 4))
            .total_gold(0)
            .build(&mut rng);

        assert!(board.find_deposit(Team::Red) == Some(Position::new(0, 0)));
        assert!(board.find_deposit(Team::Blue) == Some(Position::new(4, 4)));
    }

    #[test]
    fn gold_scatter_hits_target_count() {
        let mut rng = SimRng::new(7);
        let board = BoardBuilder::new(4, 4)
            .deposits(Position::new(0, 0), Position::new(3, 3))
            .total_gold(10)
            .build(&mut rng);

        let total: u32 = board
            .snapshot()
            .iter()
            .flatten()
            .map(|(_, tile)| tile.gold_count())
            .sum();
        assert_eq!(total, 10);
    }

    #[test]
    fn out_of_bounds_rejected() {
        let mut rng = SimRng::new(0);
        let board = BoardBuilder::new(3, 3).total_gold(0).build(&mut rng);
        assert!(!board.in_bounds(Position::new(-1, 0)));
        assert!(!board.in_bounds(Position::new(3, 0)));
        assert!(board.tile_at(Position::new(3, 0)).is_err());
    }

    #[test]
    fn move_robot_vacates_old_position() {
        let mut rng = SimRng::new(0);
        let mut board = BoardBuilder::new(3, 3).total_gold(0).build(&mut rng);
        let r = RobotId(0);
        let a = Position::new(0, 0);
        let b = Position::new(1, 0);

        board.place_robot(r, a);
        assert_eq!(board.robots_at(a).collect::<Vec<_>>(), vec![r]);

        board.move_robot(r, a, b);
        assert!(board.robots_at(a).next().is_none());
        assert_eq!(board.robots_at(b).collect::<Vec<_>>(), vec![r]);
    }

    #[test]
    fn robots_at_same_tile_are_ordered() {
        let mut rng = SimRng::new(0);
        let mut board = BoardBuilder::new(3, 3).total_gold(0).build(&mut rng);
        let pos = Position::new(1, 1);
        board.place_robot(RobotId(3), pos);
        board.place_robot(RobotId(1), pos);
        board.place_robot(RobotId(2), pos);

        assert_eq!(
            board.robots_at(pos).collect::<Vec<_>>(),
            vec![RobotId(1), RobotId(2), RobotId(3)]
        );
    }

    #[test]
    fn snapshot_shape_matches_board_dimensions() {
        let mut rng = SimRng::new(0);
        let board = BoardBuilder::new(4, 6).total_gold(0).build(&mut rng);
        let snap = board.snapshot();
        assert_eq!(snap.len(), 6);
        assert!(snap.iter().all(|row| row.len() == 4));
    }

    #[test]
    fn observe_fan_covers_eight_cells_when_clear_of_edges() {
        use gr_core::Direction;
        let mut rng = SimRng::new(0);
        let board = BoardBuilder::new(9, 9).total_gold(0).build(&mut rng);
        let cells = board.observe_fan(Position::new(4, 4), Direction::North);
        assert_eq!(cells.len(), 8);
        assert!(cells.iter().any(|(p, _, _)| *p == Position::new(4, 3)));
        assert!(cells.iter().any(|(p, _, _)| *p == Position::new(4, 2)));
    }

    #[test]
    fn observe_fan_clips_at_board_edge() {
        use gr_core::Direction;
        let mut rng = SimRng::new(0);
        let board = BoardBuilder::new(9, 9).total_gold(0).build(&mut rng);
        let cells = board.observe_fan(Position::new(0, 0), Direction::North);
        assert!(cells.is_empty());
    }

    #[test]
    fn observe_fan_reports_occupants() {
        use gr_core::Direction;
        let mut rng = SimRng::new(0);
        let mut board = BoardBuilder::new(9, 9).total_gold(0).build(&mut rng);
        board.place_robot(RobotId(7), Position::new(4, 3));
        let cells = board.observe_fan(Position::new(4, 4), Direction::North);
        let front = cells.iter().find(|(p, _, _)| *p == Position::new(4, 3)).unwrap();
        assert_eq!(front.2, vec![RobotId(7)]);
    }
}
