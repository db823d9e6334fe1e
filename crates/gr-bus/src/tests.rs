//! Unit tests for gr-bus.

use gr_core::{Position, RobotId, Step, Team, TeamRoster};

use crate::{MessageBus, Payload};

fn roster() -> TeamRoster {
    TeamRoster::new(vec![RobotId(0), RobotId(1), RobotId(2)], vec![RobotId(10), RobotId(11)])
}

#[test]
fn unicast_is_delayed_by_one_step() {
    let mut bus = MessageBus::new();
    bus.send(RobotId(0), RobotId(1), Step(5), Payload::MissionAbort);

    assert!(bus.drain(Step(5), &roster()).is_empty());
    let delivered = bus.drain(Step(6), &roster());
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].0, RobotId(1));
    assert_eq!(delivered[0].1.sender, RobotId(0));
}

#[test]
fn broadcast_fans_out_to_whole_team_including_sender() {
    let mut bus = MessageBus::new();
    bus.broadcast(RobotId(0), Step(0), Payload::GoldConsumed(Position::new(2, 2)));

    let delivered = bus.drain(Step(1), &roster());
    let receivers: Vec<RobotId> = delivered.iter().map(|(r, _)| *r).collect();
    assert_eq!(receivers.len(), 3);
    assert!(receivers.contains(&RobotId(0)));
    assert!(receivers.contains(&RobotId(1)));
    assert!(receivers.contains(&RobotId(2)));
    assert!(!receivers.contains(&RobotId(10)));
}

#[test]
fn drain_of_empty_step_returns_nothing() {
    let mut bus = MessageBus::new();
    assert!(bus.drain(Step(100), &roster()).is_empty());
    assert!(bus.is_empty());
}

#[test]
fn next_step_reports_the_earliest_pending_delivery() {
    let mut bus = MessageBus::new();
    bus.send(RobotId(10), RobotId(11), Step(20), Payload::MissionComplete);
    bus.send(RobotId(0), RobotId(1), Step(3), Payload::MissionAbort);
    assert_eq!(bus.next_step(), Some(Step(4)));

    bus.drain(Step(4), &roster());
    assert_eq!(bus.next_step(), Some(Step(21)));
}

#[test]
fn messages_for_different_teams_do_not_cross() {
    let mut bus = MessageBus::new();
    bus.broadcast(RobotId(10), Step(0), Payload::MissionComplete);
    let delivered = bus.drain(Step(1), &roster());
    let receivers: Vec<RobotId> = delivered.iter().map(|(r, _)| *r).collect();
    assert_eq!(receivers, vec![RobotId(10), RobotId(11)]);
}

#[test]
fn same_team_field_is_preserved_on_delivery() {
    let mut bus = MessageBus::new();
    bus.send(RobotId(1), RobotId(2), Step(0), Payload::Turn(gr_core::Direction::North));
    let delivered = bus.drain(Step(1), &roster());
    assert_eq!(roster().team_of(delivered[0].0), Some(Team::Red));
}
