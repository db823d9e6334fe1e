//! Agent finite-state-machine states.

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum AgentState {
    Exploring,
    Proposing,
    Executing,
    AwaitingPartner,
    Delivering,
}
