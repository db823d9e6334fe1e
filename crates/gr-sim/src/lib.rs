//! `gr-sim` — the step loop orchestrator for the gold-rush simulation.
//!
//! # Seven-phase step pipeline
//!
//! ```text
//! for step in 0..:
//!   ① Deliver inbound — drain the bus at the current step into inboxes.
//!   ② Collect actions — Agent::decide for every agent, ascending RobotId.
//!   ③ Enqueue outbound — hand collected outboxes to the bus.
//!   ④ Resolve conflicts — conflict::resolve turns the action multiset into
//!                         an ordered, validated action list plus any
//!                         partnership changes.
//!   ⑤ Execute          — apply Turn/Move against the board.
//!   ⑥ Handle deposits  — dissolve partnerships standing on their own
//!                         deposit tile, credit the sink.
//!   ⑦ Advance the step counter.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gr_sim::{NoopObserver, SimConfig, SimulationBuilder};
//!
//! let config = SimConfig::new(20, 20, 40, 10, 1);
//! let mut controller = SimulationBuilder::new(config).build()?;
//! controller.run_steps(500, &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod conflict;
pub mod config;
pub mod controller;
pub mod error;
pub mod observer;


pub use builder::SimulationBuilder;
pub use conflict::{AgentSnapshot, ConflictOutcome};
pub use config::SimConfig;
pub use controller::SimulationController;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
