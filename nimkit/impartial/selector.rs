//! Computer opponent and hints

use crate::{
    error::{Error, Result},
    impartial::{classifier::PositionClassifier, impartial_game::ImpartialGame},
};
use rand::{Rng, seq::IndexedRandom};
use std::fmt::Display;

/// Playing strength of the computer opponent, from `0` (random legal moves) to
/// [`Skill::MAX`] (always optimal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill(u8);

impl Skill {
    /// Highest skill level
    pub const MAX: u8 = 10;

    /// Blunders most of the time
    pub const EASY: Self = Self(3);

    /// Blunders roughly every other move
    pub const MEDIUM: Self = Self(6);

    /// Blunders rarely
    pub const HARD: Self = Self(9);

    /// Never blunders
    pub const OPTIMAL: Self = Self(Self::MAX);

    /// Create skill level, fails if `level` is above [`Skill::MAX`]
    pub fn new(level: u8) -> Result<Self> {
        if level > Self::MAX {
            return Err(Error::InvalidParameter(format!(
                "skill level {level} is above the maximum of {}",
                Self::MAX
            )));
        }
        Ok(Self(level))
    }

    /// Get the underlying level
    pub const fn level(self) -> u8 {
        self.0
    }

    /// Probability of ignoring the analysis and playing a random legal move.
    /// Decreases monotonically with the level, zero at [`Skill::OPTIMAL`].
    pub fn blunder_probability(self) -> f64 {
        f64::from(Self::MAX - self.0) / f64::from(Self::MAX)
    }
}

impl Display for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

/// Moves after which the opponent is left in a losing position
pub fn winning_moves<G, C>(position: &G, classifier: &mut C) -> Vec<G::Move>
where
    G: ImpartialGame,
    C: PositionClassifier<G>,
{
    position
        .legal_moves()
        .into_iter()
        .filter(|m| !classifier.is_winning(&position.transition(*m)))
        .collect()
}

/// Pick a move for the player to move.
///
/// With probability [`Skill::blunder_probability`] a uniformly random legal move is played.
/// Otherwise one of the [winning moves](winning_moves) is chosen uniformly, and if there are
/// none (the position is lost anyway) any legal move is played.
pub fn select_move<G, C, R>(
    position: &G,
    classifier: &mut C,
    skill: Skill,
    rng: &mut R,
) -> Result<G::Move>
where
    G: ImpartialGame,
    C: PositionClassifier<G>,
    R: Rng + ?Sized,
{
    let legal = position.legal_moves();
    if legal.is_empty() {
        return Err(Error::EmptyMoveSet);
    }

    if !rng.random_bool(skill.blunder_probability()) {
        let winning = winning_moves(position, classifier);
        if let Some(movement) = winning.choose(rng) {
            return Ok(*movement);
        }
    }

    legal.choose(rng).copied().ok_or(Error::EmptyMoveSet)
}
