//! Unit tests for gr-consensus.

use gr_core::{Position, RobotId, Step};

use crate::handler::{PaxosHandler, ProposalFailure};
use crate::mission::Mission;

fn mission_at(x: i32, y: i32) -> Mission {
    Mission {
        target_tile: Position::new(x, y),
        cost: 4,
    }
}

#[test]
fn single_proposer_reaches_majority() {
    let leader_id = RobotId(0);
    let mut leader = PaxosHandler::new(leader_id, 10);
    let req = leader.start_election(mission_at(3, 3), Step(0));

    let mut acceptors: Vec<PaxosHandler> = (1..10).map(|i| PaxosHandler::new(RobotId(i), 10)).collect();

    let mut accept_req = None;
    for (i, acceptor) in acceptors.iter_mut().enumerate() {
        let pos = Position::new(i as i32, 0);
        if let Some(resp) = acceptor.handle_prepare_request(&req, pos) {
            if let Some(ar) = leader.handle_prepare_response(RobotId((i + 1) as u32), req.paxos_id, resp) {
                accept_req = Some(ar);
            }
        }
    }
    let accept_req = accept_req.expect("majority should have been reached");
    assert_eq!(accept_req.mission.leader_id, leader_id);
    assert_ne!(accept_req.mission.follower_id, leader_id);

    let mut tallies: Vec<PaxosHandler> = (0..10).map(|i| PaxosHandler::new(RobotId(i), 10)).collect();
    for (i, learner) in tallies.iter_mut().enumerate() {
        if let Some(resp) = learner.handle_accept_request(&accept_req) {
            learner.handle_accept_response(RobotId(i as u32), resp);
        }
    }
    assert!(tallies.iter().filter(|l| l.consensus_reached()).count() >= 6);
    let values: Vec<_> = tallies
        .iter()
        .filter_map(|l| l.final_value())
        .collect();
    assert!(values.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn follower_chosen_by_lowest_bid_then_id() {
    let mut leader = PaxosHandler::new(RobotId(0), 4);
    let req = leader.start_election(mission_at(10, 10), Step(0));

    // Three acceptors at varying distances; closest wins regardless of id order.
    let far = Position::new(0, 0);
    let near = Position::new(9, 10);
    let tie_a = Position::new(5, 10);
    let tie_b = Position::new(5, 10);

    let mut r1 = PaxosHandler::new(RobotId(1), 4);
    let mut r2 = PaxosHandler::new(RobotId(2), 4);
    let mut r3 = PaxosHandler::new(RobotId(3), 4);

    let resp1 = r1.handle_prepare_request(&req, far).unwrap();
    let resp2 = r2.handle_prepare_request(&req, near).unwrap();
    let resp3 = r3.handle_prepare_request(&req, tie_a).unwrap();
    let _ = tie_b;

    leader.handle_prepare_response(RobotId(1), req.paxos_id, resp1);
    leader.handle_prepare_response(RobotId(2), req.paxos_id, resp2);
    let accept_req = leader
        .handle_prepare_response(RobotId(3), req.paxos_id, resp3)
        .unwrap();

    assert_eq!(accept_req.mission.follower_id, RobotId(2));
}

#[test]
fn higher_prepare_preempts_outstanding_proposer() {
    let mut acceptor = PaxosHandler::new(RobotId(5), 10);
    let low = acceptor.start_election(mission_at(1, 1), Step(0));
    assert!(acceptor.is_proposing());

    // A higher-numbered request from a different robot arrives.
    let mut other = PaxosHandler::new(RobotId(9), 10);
    let high = other.start_election(mission_at(2, 2), Step(0));
    assert!(high.paxos_id > low.paxos_id);

    acceptor
        .handle_prepare_request(&high, Position::new(0, 0))
        .unwrap();
    assert!(!acceptor.is_proposing());
    assert_eq!(
        acceptor.check_proposal_failure(Step(1)),
        Some(ProposalFailure::Preempted)
    );
}

#[test]
fn stale_prepare_is_rejected() {
    let mut acceptor = PaxosHandler::new(RobotId(2), 10);
    let high = PaxosHandler::new(RobotId(9), 10).start_election(mission_at(2, 2), Step(0));
    acceptor
        .handle_prepare_request(&high, Position::new(0, 0))
        .unwrap();

    let low = PaxosHandler::new(RobotId(1), 10).start_election(mission_at(3, 3), Step(0));
    assert!(acceptor
        .handle_prepare_request(&low, Position::new(0, 0))
        .is_none());
}

#[test]
fn proposal_times_out_without_majority() {
    let mut leader = PaxosHandler::new(RobotId(0), 10);
    leader.start_election(mission_at(1, 1), Step(0));
    assert_eq!(leader.check_proposal_failure(Step(10)), None);
    assert_eq!(
        leader.check_proposal_failure(Step(76)),
        Some(ProposalFailure::TimedOut)
    );
    assert!(!leader.is_proposing());
}

#[test]
fn duplicate_accept_response_does_not_inflate_tally() {
    let mut learner = PaxosHandler::new(RobotId(0), 4);
    let mission = crate::mission::FullMission {
        target_tile: Position::new(1, 1),
        cost: 2,
        leader_id: RobotId(0),
        follower_id: RobotId(1),
    };
    let paxos_id = crate::mission::ProposalId::new(1, RobotId(0));
    let resp = crate::handler::AcceptResponse { paxos_id, mission };

    learner.handle_accept_response(RobotId(1), resp);
    learner.handle_accept_response(RobotId(1), resp);
    learner.handle_accept_response(RobotId(1), resp);
    assert!(!learner.consensus_reached());

    learner.handle_accept_response(RobotId(2), resp);
    learner.handle_accept_response(RobotId(3), resp);
    assert!(learner.consensus_reached());
}
