//! Simulation observer trait for progress reporting and data collection.

use gr_board::Board;
use gr_core::Step;

/// Callbacks invoked by [`Controller::run`][crate::Controller::run] at key
/// points in the step loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait SimObserver {
    /// Called at the very start of each step, before any processing.
    fn on_step_start(&mut self, _step: Step) {}

    /// Called at the end of each step, once deposits have been handled.
    fn on_step_end(&mut self, _step: Step, _board: &Board) {}

    /// Called once after the run terminates, successfully or not.
    fn on_sim_end(&mut self, _final_step: Step) {}
}

/// A [`SimObserver`] that does nothing. Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
