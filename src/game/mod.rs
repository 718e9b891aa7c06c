//! The guess-the-node game.
//!
//! A [`Stepper`] nominates nodes; a [`Game`] checks each nomination against
//! the hidden target and prunes the graph until the target is nominated.

pub mod driver;
pub mod session;
pub mod stepper;

pub use driver::{Feedback, Game, GameState};
pub use session::{drive, run_many, Batch, Report, SessionOptions, Summary};
pub use stepper::{BalancedStepper, NaiveStepper, Stepper};
