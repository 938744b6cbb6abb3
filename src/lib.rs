//! BLOCKFALL - falling-block puzzle core
//!
//! The simulation is headless: a driver hands [`Game`] frame time and
//! player actions, then draws whatever the read accessors report.

pub mod bag;
pub mod board;
pub mod game;
pub mod gravity;
pub mod piece;
pub mod score;
pub mod settings;
pub mod tetromino;

pub use game::{Action, Game, GameState, SessionState};
