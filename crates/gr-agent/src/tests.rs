//! Unit tests for gr-agent.

#[cfg(test)]
mod path {
    use gr_core::{Direction, Position};

    use crate::path::{plan_path, PathStep};

    #[test]
    fn straight_ahead_needs_no_turn() {
        let steps = plan_path(Position::new(0, 0), Position::new(0, -3), Direction::North);
        assert_eq!(steps.len(), 3);
        assert!(steps.iter().all(|s| *s == PathStep::Move));
    }

    #[test]
    fn prefers_axis_already_aligned_with_facing() {
        let steps = plan_path(Position::new(0, 0), Position::new(2, 2), Direction::East);
        assert_eq!(steps[0], PathStep::Move);
    }

    #[test]
    fn turns_toward_larger_displacement_when_unaligned() {
        let steps = plan_path(Position::new(0, 0), Position::new(1, 5), Direction::West);
        assert_eq!(steps[0], PathStep::Turn(Direction::South));
    }

    #[test]
    fn same_position_yields_empty_path() {
        let steps = plan_path(Position::new(3, 3), Position::new(3, 3), Direction::North);
        assert!(steps.is_empty());
    }
}

#[cfg(test)]
mod sensed {
    use gr_core::{Direction, ObservedTile, Position, Step};

    use crate::sensed::{ExplorationWeights, LocalMap};

    #[test]
    fn observe_then_get_round_trips() {
        let mut map = LocalMap::new();
        let tile = ObservedTile { pos: Position::new(1, 1), gold_count: 3, same_team_count: 0 };
        map.observe(tile, Step(5));
        let stored = map.get(Position::new(1, 1)).unwrap();
        assert_eq!(stored.gold_count, 3);
        assert_eq!(stored.last_seen_step, Step(5));
    }

    #[test]
    fn stale_observation_is_ignored() {
        let mut map = LocalMap::new();
        let pos = Position::new(1, 1);
        map.observe(ObservedTile { pos, gold_count: 5, same_team_count: 0 }, Step(10));
        map.observe(ObservedTile { pos, gold_count: 99, same_team_count: 0 }, Step(2));
        assert_eq!(map.get(pos).unwrap().gold_count, 5);
    }

    #[test]
    fn gold_consumed_zeroes_regardless_of_prior_value() {
        let mut map = LocalMap::new();
        let pos = Position::new(2, 2);
        map.observe(ObservedTile { pos, gold_count: 7, same_team_count: 0 }, Step(1));
        map.mark_consumed(pos, Step(2));
        assert_eq!(map.get(pos).unwrap().gold_count, 0);
    }

    #[test]
    fn mission_candidate_ignores_stale_and_empty_tiles() {
        let mut map = LocalMap::new();
        map.observe(ObservedTile { pos: Position::new(5, 0), gold_count: 2, same_team_count: 0 }, Step(0));
        map.observe(ObservedTile { pos: Position::new(1, 0), gold_count: 0, same_team_count: 0 }, Step(50));
        map.observe(ObservedTile { pos: Position::new(9, 9), gold_count: 4, same_team_count: 0 }, Step(0));

        let candidate = map.best_mission_candidate(Position::new(0, 0), Position::new(0, 0), Step(200));
        assert!(candidate.is_none(), "all candidates are older than the staleness limit");

        let candidate = map.best_mission_candidate(Position::new(0, 0), Position::new(0, 0), Step(10));
        assert_eq!(candidate.unwrap().0, Position::new(5, 0));
    }

    #[test]
    fn exploration_prefers_never_seen_cells() {
        let mut map = LocalMap::new();
        map.observe(ObservedTile { pos: Position::new(1, 0), gold_count: 0, same_team_count: 0 }, Step(99));
        let weights = ExplorationWeights::default();
        let target = map.best_exploration_target(Position::new(0, 0), Direction::East, Step(100), &weights, 3, 3);
        assert_ne!(target, Position::new(1, 0));
        assert_ne!(target, Position::new(0, 0));
    }

    #[test]
    fn weight_validation_rejects_negative_and_nan() {
        let bad = ExplorationWeights { coldness: -1.0, ..ExplorationWeights::default() };
        assert!(bad.validate().is_err());
        let nan = ExplorationWeights { gold: f64::NAN, ..ExplorationWeights::default() };
        assert!(nan.validate().is_err());
        assert!(ExplorationWeights::default().validate().is_ok());
    }
}

#[cfg(test)]
mod agent {
    use gr_bus::{Envelope, Payload};
    use gr_core::{Direction, Position, RobotId, Step, Team, TeamRoster};

    use crate::action::Action;
    use crate::agent::Agent;
    use crate::fsm::AgentState;

    fn roster() -> TeamRoster {
        TeamRoster::new((0..10).map(RobotId).collect(), (10..20).map(RobotId).collect())
    }

    fn new_agent(id: u32, pos: Position) -> Agent {
        Agent::new(RobotId(id), Team::Red, pos, Direction::East, Position::new(0, 0), 9, 9, 10)
    }

    #[test]
    fn idle_agent_explores_when_nothing_is_known() {
        let mut a = new_agent(0, Position::new(4, 4));
        let action = a.decide(Step(0), &[], &roster());
        assert_eq!(action.robot_id(), RobotId(0));
        assert_eq!(a.state(), AgentState::Exploring);
    }

    #[test]
    fn fan_observations_populate_local_map_and_broadcast() {
        let mut a = new_agent(0, Position::new(4, 4));
        let fan = vec![(Position::new(4, 3), 2, vec![])];
        a.decide(Step(0), &fan, &roster());
        let outbox = a.drain_outbox();
        assert!(outbox.iter().any(|(receiver, payload)| {
            receiver.is_none() && matches!(payload, Payload::Observations(tiles) if tiles.len() == 1)
        }));
    }

    #[test]
    fn mission_abort_resets_agent_to_exploring() {
        let mut a = new_agent(0, Position::new(4, 4));
        a.decide(Step(0), &[], &roster());
        a.receive(Envelope {
            sender: RobotId(1),
            receiver: Some(RobotId(0)),
            step: Step(0),
            payload: Payload::MissionAbort,
        });
        a.decide(Step(1), &[], &roster());
        assert_eq!(a.state(), AgentState::Exploring);
        assert!(a.current_mission().is_none());
    }

    #[test]
    fn known_gold_tile_triggers_election_and_transitions_to_proposing() {
        let mut a = new_agent(2, Position::new(0, 0));
        let fan = vec![(Position::new(2, 0), 3, vec![])];
        let action = a.decide(Step(0), &fan, &roster());
        assert_eq!(a.state(), AgentState::Proposing);
        assert_eq!(action.robot_id(), RobotId(2));
        let outbox = a.drain_outbox();
        assert!(outbox
            .iter()
            .any(|(receiver, payload)| receiver.is_none() && matches!(payload, Payload::PrepareRequest(_))));
    }

    #[test]
    fn prepare_request_gets_a_unicast_reply() {
        let mut acceptor = new_agent(5, Position::new(1, 1));
        acceptor.decide(Step(0), &[], &roster());
        acceptor.drain_outbox();

        let req = gr_consensus::PrepareRequest {
            paxos_id: gr_consensus::ProposalId::new(1, RobotId(2)),
            mission: gr_consensus::Mission { target_tile: Position::new(2, 0), cost: 2 },
        };
        acceptor.receive(Envelope {
            sender: RobotId(2),
            receiver: Some(RobotId(5)),
            step: Step(1),
            payload: Payload::PrepareRequest(req),
        });
        acceptor.decide(Step(2), &[], &roster());
        let outbox = acceptor.drain_outbox();
        assert!(outbox.iter().any(|(receiver, payload)| {
            *receiver == Some(RobotId(2)) && matches!(payload, Payload::PrepareResponse { .. })
        }));
    }

    #[test]
    fn wait_action_keeps_robot_in_place_when_path_empty() {
        let mut a = new_agent(0, Position::new(0, 0));
        // No fan, no known gold: the agent should still produce a valid
        // action addressed to itself, never panicking on an empty path.
        let action = a.decide(Step(0), &[], &roster());
        match action {
            Action::Turn { robot_id, .. } | Action::Move { robot_id } | Action::Wait { robot_id } => {
                assert_eq!(robot_id, RobotId(0));
            }
            Action::Pickup { robot_id, .. } => assert_eq!(robot_id, RobotId(0)),
        }
    }
}
