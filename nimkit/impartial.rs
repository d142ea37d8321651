//! Impartial games - both players have the same moves

pub mod classifier;
pub mod games;
pub mod impartial_game;
pub mod selector;
pub mod session;
pub mod survey;
pub mod transposition_table;
pub mod variant;
