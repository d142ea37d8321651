//! Single game from setup to the last move.
//!
//! A session goes `NotStarted -> InProgress -> Terminal`. Every [`Session::initialize`] starts a
//! logically new game with a fresh analysis, so nothing learned in one game leaks into the next.

use crate::{
    error::{Error, Result},
    impartial::{
        impartial_game::ImpartialGame,
        selector::Skill,
        variant::{Analysis, Game, Move, Parameters},
    },
};
use rand::Rng;
use std::fmt::{self, Display};

/// Stage of a [`Session`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// No game has been set up yet
    NotStarted,
    /// Moves are still possible
    InProgress,
    /// No moves are left, the player who moved last has won
    Terminal,
}

impl Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not started"),
            Self::InProgress => write!(f, "in progress"),
            Self::Terminal => write!(f, "terminal"),
        }
    }
}

/// Game in play together with its exclusively owned analysis
#[derive(Debug)]
struct Active {
    parameters: Parameters,
    game: Game,
    analysis: Analysis,
    moves_played: usize,
}

/// One game session
#[derive(Debug, Default)]
pub struct Session {
    active: Option<Active>,
}

impl Session {
    /// Create session that is not started yet
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Get the stage of the session
    pub fn phase(&self) -> Phase {
        match &self.active {
            None => Phase::NotStarted,
            Some(active) if active.game.is_terminal() => Phase::Terminal,
            Some(_) => Phase::InProgress,
        }
    }

    fn active(&self) -> Result<&Active> {
        self.active.as_ref().ok_or(Error::NotStarted)
    }

    fn active_mut(&mut self) -> Result<&mut Active> {
        self.active.as_mut().ok_or(Error::NotStarted)
    }

    /// Start a new game from random parameters, discarding any previous game and its analysis
    pub fn initialize<R>(&mut self, parameters: Parameters, rng: &mut R) -> Result<&Game>
    where
        R: Rng + ?Sized,
    {
        let (game, analysis) = parameters.initialize(rng)?;
        log::debug!("new {} session starting at {}", parameters.kind(), game);
        let active = self.active.insert(Active {
            parameters,
            game,
            analysis,
            moves_played: 0,
        });
        Ok(&active.game)
    }

    /// Start a new game with the same parameters as the current one
    pub fn restart<R>(&mut self, rng: &mut R) -> Result<&Game>
    where
        R: Rng + ?Sized,
    {
        let parameters = self.active()?.parameters.clone();
        self.initialize(parameters, rng)
    }

    /// Get the current position
    pub fn game(&self) -> Result<&Game> {
        self.active().map(|active| &active.game)
    }

    /// Get the parameters the current game was drawn from
    pub fn parameters(&self) -> Result<&Parameters> {
        self.active().map(|active| &active.parameters)
    }

    /// Number of moves accepted since the game started
    pub fn moves_played(&self) -> Result<usize> {
        self.active().map(|active| active.moves_played)
    }

    /// List of all legal moves in the current position
    pub fn legal_moves(&self) -> Result<Vec<Move>> {
        self.game().map(Game::legal_moves)
    }

    /// Make a move. Rejected moves leave the position unchanged.
    pub fn apply_move(&mut self, movement: Move) -> Result<Phase> {
        let active = self.active_mut()?;
        active.game = active.game.apply_move(movement)?;
        active.moves_played += 1;
        log::debug!(
            "move {}: {} -> {}",
            active.moves_played,
            movement,
            active.game
        );

        let phase = self.phase();
        if phase == Phase::Terminal {
            log::debug!("game over after {} moves", self.moves_played()?);
        }
        Ok(phase)
    }

    /// Check if the player to move wins under optimal play
    pub fn is_winning_position(&mut self) -> Result<bool> {
        let active = self.active_mut()?;
        active.analysis.is_winning(&active.game)
    }

    /// Pick a move for the computer player, fails with [`Error::EmptyMoveSet`] in a terminal
    /// position
    pub fn select_move<R>(&mut self, skill: Skill, rng: &mut R) -> Result<Move>
    where
        R: Rng + ?Sized,
    {
        let active = self.active_mut()?;
        active.analysis.select_move(&active.game, skill, rng)
    }

    /// Optimal move for the player to move
    pub fn hint<R>(&mut self, rng: &mut R) -> Result<Move>
    where
        R: Rng + ?Sized,
    {
        self.select_move(Skill::OPTIMAL, rng)
    }

    /// Number of positions remembered by the analysis of the current game
    pub fn cached_positions(&self) -> Result<usize> {
        self.active().map(|active| active.analysis.cached_positions())
    }
}
