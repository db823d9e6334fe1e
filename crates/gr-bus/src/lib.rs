//! `gr-bus` — delayed-delivery message bus for the gold-rush simulation.
//!
//! # Crate layout
//!
//! | Module      | Contents                                           |
//! |-------------|-----------------------------------------------------|
//! | [`message`] | `Payload`, `Envelope`                              |
//! | [`bus`]     | `MessageBus` (`BTreeMap<Step, Vec<Envelope>>`)     |
//!
//! # Delivery model (summary)
//!
//! A message sent while resolving step `t` becomes visible in its
//! recipient's inbox at step `t + 1` — the bus never delivers same-step.
//! Unicast messages go to exactly one robot; broadcasts fan out to every
//! member of the sender's team, the sender included.

pub mod bus;
pub mod message;

#[cfg(test)]
mod tests;

pub use bus::{MessageBus, DELIVERY_DELAY};
pub use message::{Envelope, Payload};
