//! `gr-board` — the grid: tiles, gold, and the robot position index.
//!
//! | Module      | Contents                                 |
//! |-------------|-------------------------------------------|
//! | [`tile`]    | `Tile`                                     |
//! | [`board`]   | `Board`                                    |
//! | [`builder`] | `BoardBuilder`                             |
//! | [`error`]   | `BoardError`, `BoardResult<T>`             |

pub mod board;
pub mod builder;
pub mod error;
pub mod tile;

#[cfg(test)]
mod tests;

pub use board::Board;
pub use builder::BoardBuilder;
pub use error::{BoardError, BoardResult};
pub use tile::Tile;
