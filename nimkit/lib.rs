//! Evaluation engine for small impartial combinatorial games.
//!
//! Every supported [game](crate::impartial::games) exposes a move enumerator and a transition
//! function through [`ImpartialGame`](crate::impartial::impartial_game::ImpartialGame).
//! Positions are classified as winning or losing for the player to move by a
//! [classifier](crate::impartial::classifier), and a [session](crate::impartial::session::Session)
//! ties one game, its classifier and the computer opponent together.

#![warn(missing_docs)]

pub mod error;
pub mod impartial;
pub mod numeric;

mod display;

pub use error::{Error, Result};
