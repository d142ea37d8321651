//! Shared trait for short impartial games

use crate::{
    error::{Error, Result},
    numeric::nimber::Nimber,
};
use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

/// A short impartial game under the normal play convention: the player who cannot move loses.
pub trait ImpartialGame: Sized + Clone + Hash + Eq + Display + Send + Sync {
    /// Single move of the game
    type Move: Copy + Eq + Hash + Debug + Display + Send + Sync;

    /// List of all legal moves from the position. Empty list means the position is terminal.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Check if `movement` is one of [`ImpartialGame::legal_moves`] without enumerating them
    fn is_legal(&self, movement: Self::Move) -> bool;

    /// Position after making a move.
    ///
    /// The move must be legal, see [`ImpartialGame::apply_move`] for the checked version.
    fn transition(&self, movement: Self::Move) -> Self;

    /// Representative of all positions that are equivalent to this one.
    ///
    /// Used as the key of the transposition table. The default doesn't merge any positions.
    fn canonical(&self) -> Self {
        self.clone()
    }

    /// Position after making a move, or [`Error::InvalidMove`] if the move is not legal.
    /// Input position is never modified.
    fn apply_move(&self, movement: Self::Move) -> Result<Self> {
        if self.is_legal(movement) {
            Ok(self.transition(movement))
        } else {
            Err(Error::invalid_move(self, &movement))
        }
    }

    /// Check if there are no moves left
    fn is_terminal(&self) -> bool {
        self.legal_moves().is_empty()
    }

    /// Positions reachable in one move
    fn successors(&self) -> Vec<Self> {
        self.legal_moves()
            .into_iter()
            .map(|m| self.transition(m))
            .collect()
    }

    /// Check if the player to move wins, by plain minimax over the whole game tree.
    ///
    /// Exponential, without any caching. Meant as a reference for small positions, use a
    /// [classifier](crate::impartial::classifier) otherwise.
    fn is_winning_exhaustive(&self) -> bool {
        self.successors()
            .iter()
            .any(|successor| !successor.is_winning_exhaustive())
    }

    /// Sprague-Grundy value: position is equivalent to a Nim heap of this size
    fn nim_value(&self) -> Nimber {
        Nimber::mex(self.successors().iter().map(Self::nim_value))
    }
}
