//! `gr-core` — foundational types shared by every gold-rush crate.
//!
//! This crate is a dependency of every other `gr-*` crate. It intentionally
//! has no `gr-*` dependencies and minimal external ones (`rand`). It has no
//! fallible operations of its own, so it carries no error module — matching
//! `dt-agent`/`dt-behavior`'s own omission of `error.rs` where there is
//! nothing to report.
//!
//! # What lives here
//!
//! | Module          | Contents                                         |
//! |-----------------|----------------------------------------------------|
//! | [`ids`]         | `RobotId`                                          |
//! | [`grid`]        | `Position`                                         |
//! | [`team`]        | `Team`, `Direction`, `TeamRoster`                   |
//! | [`step`]        | `Step`                                             |
//! | [`rng`]         | `SimRng`                                           |
//! | [`observation`] | `ObservedTile`                                     |

pub mod grid;
pub mod ids;
pub mod observation;
pub mod rng;
pub mod step;
pub mod team;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use grid::Position;
pub use ids::RobotId;
pub use observation::ObservedTile;
pub use rng::SimRng;
pub use step::Step;
pub use team::{Direction, Team, TeamRoster};
