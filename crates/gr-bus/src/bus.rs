//! `MessageBus` — step-indexed delayed-delivery queue.
//!
//! # Why this exists
//!
//! Agents don't see each other's messages the instant they're sent — the
//! simulation models a fixed one-step transit delay, so a message sent while
//! resolving step `t` is only visible to its recipient(s) when step `t + 1`
//! delivers its inbox. A `BTreeMap` keyed by delivery step gives O(log D)
//! insert and an O(log D) pop of exactly the step due right now, where D is
//! the number of distinct future steps currently holding mail — in practice
//! a handful, since the delay is fixed at one step.
//!
//! # Performance note
//!
//! `send`/`broadcast` never do more than append to one queue entry; the
//! expansion of a broadcast into one envelope per recipient happens lazily,
//! at `drain` time, where the current roster is known.

use std::collections::BTreeMap;

use gr_core::{RobotId, Step, TeamRoster};

use crate::message::{Envelope, Payload};

/// Delay, in steps, between a message being sent and becoming visible to its
/// recipient(s). Fixed at 1 for this simulation.
pub const DELIVERY_DELAY: u64 = 1;

/// A priority queue mapping delivery steps to the envelopes due that step.
#[derive(Default)]
pub struct MessageBus {
    inner: BTreeMap<Step, Vec<Envelope>>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a unicast message, sent at `step`, for delivery at
    /// `step + DELIVERY_DELAY`.
    pub fn send(&mut self, sender: RobotId, receiver: RobotId, step: Step, payload: Payload) {
        self.enqueue(Envelope {
            sender,
            receiver: Some(receiver),
            step,
            payload,
        });
    }

    /// Queue a team-wide broadcast, sent at `step`. Expanded to one envelope
    /// per team member (including the sender) at drain time.
    pub fn broadcast(&mut self, sender: RobotId, step: Step, payload: Payload) {
        self.enqueue(Envelope {
            sender,
            receiver: None,
            step,
            payload,
        });
    }

    fn enqueue(&mut self, envelope: Envelope) {
        let delivery_step = envelope.step + DELIVERY_DELAY;
        self.inner.entry(delivery_step).or_default().push(envelope);
    }

    /// Remove and return every envelope due at exactly `step`, expanding
    /// broadcasts into one `(receiver, Envelope)` pair per same-team member —
    /// the sender included, mirroring the original simulator's behaviour of
    /// delivering a robot's own broadcast back to itself.
    ///
    /// Returns an empty vector if nothing is due (common case — avoids an
    /// allocation for the `Option` wrapper the caller would otherwise need).
    pub fn drain(&mut self, step: Step, roster: &TeamRoster) -> Vec<(RobotId, Envelope)> {
        let Some(envelopes) = self.inner.remove(&step) else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(envelopes.len());
        for envelope in envelopes {
            match envelope.receiver {
                Some(receiver) => out.push((receiver, envelope)),
                None => {
                    let Some(team) = roster.team_of(envelope.sender) else {
                        continue;
                    };
                    for member in roster.members(team) {
                        out.push((*member, envelope.clone()));
                    }
                }
            }
        }
        out
    }

    /// The earliest step with at least one envelope queued, or `None` if
    /// the bus is empty.
    pub fn next_step(&self) -> Option<Step> {
        self.inner.keys().next().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
