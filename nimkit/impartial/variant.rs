//! All supported games behind a single interface.
//!
//! Each enum here has one arm per game. Mixing arms, e.g. applying a Card Nim move to a
//! Dawson-Kayles position, fails with [`Error::VariantMismatch`].

use crate::{
    error::{Error, Result},
    impartial::{
        classifier::{PositionClassifier, SearchClassifier},
        games::{
            card_nim::{CardNim, CardNimParams, NimSum, TakeCards},
            dawson_kayles::{DawsonKayles, DawsonKaylesParams, PairTowers},
            split_cards::{SplitCards, SplitCardsMove, SplitCardsParams},
            subtract_factor::{SubtractDivisor, SubtractFactor, SubtractFactorParams, ValueTable},
            take_coins::{GatherCoins, TakeCoins, TakeCoinsParams},
        },
        impartial_game::ImpartialGame,
        selector::{self, Skill},
    },
};
use rand::Rng;
use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// Name of a game, without any position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum VariantKind {
    #[allow(missing_docs)]
    CardNim,
    #[allow(missing_docs)]
    DawsonKayles,
    #[allow(missing_docs)]
    SubtractFactor,
    #[allow(missing_docs)]
    TakeCoins,
    #[allow(missing_docs)]
    SplitCards,
}

impl VariantKind {
    /// All games
    pub const ALL: [Self; 5] = [
        Self::CardNim,
        Self::DawsonKayles,
        Self::SubtractFactor,
        Self::TakeCoins,
        Self::SplitCards,
    ];

    /// Name used on the command line and in parameter files
    pub const fn name(self) -> &'static str {
        match self {
            Self::CardNim => "card-nim",
            Self::DawsonKayles => "dawson-kayles",
            Self::SubtractFactor => "subtract-factor",
            Self::TakeCoins => "take-coins",
            Self::SplitCards => "split-cards",
        }
    }
}

impl Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for VariantKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::InvalidParameter(format!("unknown game '{s}'")))
    }
}

/// Position of any game
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[allow(missing_docs)]
pub enum Game {
    CardNim(CardNim),
    DawsonKayles(DawsonKayles),
    SubtractFactor(SubtractFactor),
    TakeCoins(TakeCoins),
    SplitCards(SplitCards),
}

/// Move in any game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum Move {
    CardNim(TakeCards),
    DawsonKayles(PairTowers),
    SubtractFactor(SubtractDivisor),
    TakeCoins(GatherCoins),
    SplitCards(SplitCardsMove),
}

fn narrow<T>(values: &[u64]) -> Result<Vec<T>>
where
    T: TryFrom<u64>,
{
    values
        .iter()
        .map(|v| {
            T::try_from(*v)
                .map_err(|_| Error::InvalidParameter(format!("value {v} is out of range")))
        })
        .collect()
}

impl Game {
    /// Get the game this position belongs to
    pub const fn kind(&self) -> VariantKind {
        match self {
            Self::CardNim(_) => VariantKind::CardNim,
            Self::DawsonKayles(_) => VariantKind::DawsonKayles,
            Self::SubtractFactor(_) => VariantKind::SubtractFactor,
            Self::TakeCoins(_) => VariantKind::TakeCoins,
            Self::SplitCards(_) => VariantKind::SplitCards,
        }
    }

    /// Build a position from its sequence of integers.
    ///
    /// `extra` is the threshold for Subtract a Factor (default `0`) and the take limit for
    /// Split Cards (default `1`), other games ignore it. Subtract a Factor expects exactly one
    /// value. Positions beyond the size limits of their game are rejected.
    pub fn from_sequence(kind: VariantKind, values: &[u64], extra: Option<u64>) -> Result<Self> {
        match kind {
            VariantKind::CardNim => CardNim::try_new(narrow(values)?).map(Self::CardNim),
            VariantKind::DawsonKayles => {
                DawsonKayles::from_bits(&narrow::<u8>(values)?).map(Self::DawsonKayles)
            }
            VariantKind::SubtractFactor => match values {
                [value] => {
                    SubtractFactor::new(*value, extra.unwrap_or(0)).map(Self::SubtractFactor)
                }
                _ => Err(Error::InvalidParameter(format!(
                    "{kind} position is a single value, got {}",
                    values.len()
                ))),
            },
            VariantKind::TakeCoins => TakeCoins::try_new(narrow(values)?).map(Self::TakeCoins),
            VariantKind::SplitCards => {
                let max_take = u32::try_from(extra.unwrap_or(1)).map_err(|_| {
                    Error::InvalidParameter("take limit is out of range".to_owned())
                })?;
                SplitCards::new(narrow(values)?, max_take).map(Self::SplitCards)
            }
        }
    }
}

impl Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CardNim(g) => write!(f, "{g}"),
            Self::DawsonKayles(g) => write!(f, "{g}"),
            Self::SubtractFactor(g) => write!(f, "{g}"),
            Self::TakeCoins(g) => write!(f, "{g}"),
            Self::SplitCards(g) => write!(f, "{g}"),
        }
    }
}

impl ImpartialGame for Game {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        match self {
            Self::CardNim(g) => g.legal_moves().into_iter().map(Move::CardNim).collect(),
            Self::DawsonKayles(g) => g.legal_moves().into_iter().map(Move::DawsonKayles).collect(),
            Self::SubtractFactor(g) => g
                .legal_moves()
                .into_iter()
                .map(Move::SubtractFactor)
                .collect(),
            Self::TakeCoins(g) => g.legal_moves().into_iter().map(Move::TakeCoins).collect(),
            Self::SplitCards(g) => g.legal_moves().into_iter().map(Move::SplitCards).collect(),
        }
    }

    fn is_legal(&self, movement: Move) -> bool {
        match (self, movement) {
            (Self::CardNim(g), Move::CardNim(m)) => g.is_legal(m),
            (Self::DawsonKayles(g), Move::DawsonKayles(m)) => g.is_legal(m),
            (Self::SubtractFactor(g), Move::SubtractFactor(m)) => g.is_legal(m),
            (Self::TakeCoins(g), Move::TakeCoins(m)) => g.is_legal(m),
            (Self::SplitCards(g), Move::SplitCards(m)) => g.is_legal(m),
            _ => false,
        }
    }

    fn transition(&self, movement: Move) -> Self {
        match (self, movement) {
            (Self::CardNim(g), Move::CardNim(m)) => Self::CardNim(g.transition(m)),
            (Self::DawsonKayles(g), Move::DawsonKayles(m)) => Self::DawsonKayles(g.transition(m)),
            (Self::SubtractFactor(g), Move::SubtractFactor(m)) => {
                Self::SubtractFactor(g.transition(m))
            }
            (Self::TakeCoins(g), Move::TakeCoins(m)) => Self::TakeCoins(g.transition(m)),
            (Self::SplitCards(g), Move::SplitCards(m)) => Self::SplitCards(g.transition(m)),
            // Moves of other games are never legal, see `is_legal`
            _ => self.clone(),
        }
    }

    fn canonical(&self) -> Self {
        match self {
            Self::CardNim(g) => Self::CardNim(g.canonical()),
            Self::DawsonKayles(g) => Self::DawsonKayles(g.canonical()),
            Self::SubtractFactor(g) => Self::SubtractFactor(g.canonical()),
            Self::TakeCoins(g) => Self::TakeCoins(g.canonical()),
            Self::SplitCards(g) => Self::SplitCards(g.canonical()),
        }
    }

    /// Checked transition that also reports moves from another game
    fn apply_move(&self, movement: Move) -> Result<Self> {
        if movement.kind() != self.kind() {
            return Err(Error::VariantMismatch {
                expected: self.kind(),
                found: movement.kind(),
            });
        }
        if self.is_legal(movement) {
            Ok(self.transition(movement))
        } else {
            Err(Error::invalid_move(self, &movement))
        }
    }
}

impl Move {
    /// Get the game this move belongs to
    pub const fn kind(&self) -> VariantKind {
        match self {
            Self::CardNim(_) => VariantKind::CardNim,
            Self::DawsonKayles(_) => VariantKind::DawsonKayles,
            Self::SubtractFactor(_) => VariantKind::SubtractFactor,
            Self::TakeCoins(_) => VariantKind::TakeCoins,
            Self::SplitCards(_) => VariantKind::SplitCards,
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CardNim(m) => write!(f, "{m}"),
            Self::DawsonKayles(m) => write!(f, "{m}"),
            Self::SubtractFactor(m) => write!(f, "{m}"),
            Self::TakeCoins(m) => write!(f, "{m}"),
            Self::SplitCards(m) => write!(f, "{m}"),
        }
    }
}

/// Parameters of a random starting position of any game
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "variant", rename_all = "kebab-case")
)]
#[allow(missing_docs)]
pub enum Parameters {
    CardNim(CardNimParams),
    DawsonKayles(DawsonKaylesParams),
    SubtractFactor(SubtractFactorParams),
    TakeCoins(TakeCoinsParams),
    SplitCards(SplitCardsParams),
}

impl Parameters {
    /// Default parameters of a game
    pub fn default_for(kind: VariantKind) -> Self {
        match kind {
            VariantKind::CardNim => Self::CardNim(CardNimParams::default()),
            VariantKind::DawsonKayles => Self::DawsonKayles(DawsonKaylesParams::default()),
            VariantKind::SubtractFactor => Self::SubtractFactor(SubtractFactorParams::default()),
            VariantKind::TakeCoins => Self::TakeCoins(TakeCoinsParams::default()),
            VariantKind::SplitCards => Self::SplitCards(SplitCardsParams::default()),
        }
    }

    /// Get the game these parameters are for
    pub const fn kind(&self) -> VariantKind {
        match self {
            Self::CardNim(_) => VariantKind::CardNim,
            Self::DawsonKayles(_) => VariantKind::DawsonKayles,
            Self::SubtractFactor(_) => VariantKind::SubtractFactor,
            Self::TakeCoins(_) => VariantKind::TakeCoins,
            Self::SplitCards(_) => VariantKind::SplitCards,
        }
    }

    /// Check bounds of the parameters
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::CardNim(p) => p.validate(),
            Self::DawsonKayles(p) => p.validate(),
            Self::SubtractFactor(p) => p.validate(),
            Self::TakeCoins(p) => p.validate(),
            Self::SplitCards(p) => p.validate(),
        }
    }

    /// Draw a random starting position with at least one legal move, together with a fresh
    /// analysis for it
    pub fn initialize<R>(&self, rng: &mut R) -> Result<(Game, Analysis)>
    where
        R: Rng + ?Sized,
    {
        match self {
            Self::CardNim(p) => Ok((
                Game::CardNim(p.initialize(rng)?),
                Analysis::CardNim(NimSum),
            )),
            Self::DawsonKayles(p) => {
                let mut classifier = SearchClassifier::new();
                let game = p.initialize(rng, &mut classifier)?;
                Ok((Game::DawsonKayles(game), Analysis::DawsonKayles(classifier)))
            }
            Self::SubtractFactor(p) => {
                let game = p.initialize(rng)?;
                let table = ValueTable::build(game.threshold(), game.value());
                Ok((Game::SubtractFactor(game), Analysis::SubtractFactor(table)))
            }
            Self::TakeCoins(p) => Ok((
                Game::TakeCoins(p.initialize(rng)?),
                Analysis::TakeCoins(SearchClassifier::new()),
            )),
            Self::SplitCards(p) => Ok((
                Game::SplitCards(p.initialize(rng)?),
                Analysis::SplitCards(SearchClassifier::new()),
            )),
        }
    }
}

/// Classifier suited to each game: closed form for Card Nim, value table for Subtract a Factor
/// and memoized search for the rest.
#[derive(Debug)]
#[allow(missing_docs)]
pub enum Analysis {
    CardNim(NimSum),
    DawsonKayles(SearchClassifier<DawsonKayles>),
    SubtractFactor(ValueTable),
    TakeCoins(SearchClassifier<TakeCoins>),
    SplitCards(SearchClassifier<SplitCards>),
}

impl Analysis {
    /// Fresh analysis for a game
    pub fn for_kind(kind: VariantKind) -> Self {
        match kind {
            VariantKind::CardNim => Self::CardNim(NimSum),
            VariantKind::DawsonKayles => Self::DawsonKayles(SearchClassifier::new()),
            VariantKind::SubtractFactor => Self::SubtractFactor(ValueTable::new(0)),
            VariantKind::TakeCoins => Self::TakeCoins(SearchClassifier::new()),
            VariantKind::SplitCards => Self::SplitCards(SearchClassifier::new()),
        }
    }

    /// Get the game this analysis is for
    pub const fn kind(&self) -> VariantKind {
        match self {
            Self::CardNim(_) => VariantKind::CardNim,
            Self::DawsonKayles(_) => VariantKind::DawsonKayles,
            Self::SubtractFactor(_) => VariantKind::SubtractFactor,
            Self::TakeCoins(_) => VariantKind::TakeCoins,
            Self::SplitCards(_) => VariantKind::SplitCards,
        }
    }

    /// Check if the player to move wins under optimal play
    pub fn is_winning(&mut self, game: &Game) -> Result<bool> {
        let expected = self.kind();
        match (&mut *self, game) {
            (Self::CardNim(c), Game::CardNim(g)) => Ok(c.is_winning(g)),
            (Self::DawsonKayles(c), Game::DawsonKayles(g)) => Ok(c.is_winning(g)),
            (Self::SubtractFactor(c), Game::SubtractFactor(g)) => Ok(c.is_winning(g)),
            (Self::TakeCoins(c), Game::TakeCoins(g)) => Ok(c.is_winning(g)),
            (Self::SplitCards(c), Game::SplitCards(g)) => Ok(c.is_winning(g)),
            _ => Err(Error::VariantMismatch {
                expected,
                found: game.kind(),
            }),
        }
    }

    /// Moves after which the opponent is left in a losing position
    pub fn winning_moves(&mut self, game: &Game) -> Result<Vec<Move>> {
        fn wrap<M>(moves: Vec<M>, f: fn(M) -> Move) -> Vec<Move> {
            moves.into_iter().map(f).collect()
        }

        let expected = self.kind();
        match (&mut *self, game) {
            (Self::CardNim(c), Game::CardNim(g)) => {
                Ok(wrap(selector::winning_moves(g, c), Move::CardNim))
            }
            (Self::DawsonKayles(c), Game::DawsonKayles(g)) => {
                Ok(wrap(selector::winning_moves(g, c), Move::DawsonKayles))
            }
            (Self::SubtractFactor(c), Game::SubtractFactor(g)) => {
                Ok(wrap(selector::winning_moves(g, c), Move::SubtractFactor))
            }
            (Self::TakeCoins(c), Game::TakeCoins(g)) => {
                Ok(wrap(selector::winning_moves(g, c), Move::TakeCoins))
            }
            (Self::SplitCards(c), Game::SplitCards(g)) => {
                Ok(wrap(selector::winning_moves(g, c), Move::SplitCards))
            }
            _ => Err(Error::VariantMismatch {
                expected,
                found: game.kind(),
            }),
        }
    }

    /// Pick a move for the player to move, see [`selector::select_move`]
    pub fn select_move<R>(&mut self, game: &Game, skill: Skill, rng: &mut R) -> Result<Move>
    where
        R: Rng + ?Sized,
    {
        let expected = self.kind();
        match (&mut *self, game) {
            (Self::CardNim(c), Game::CardNim(g)) => {
                selector::select_move(g, c, skill, rng).map(Move::CardNim)
            }
            (Self::DawsonKayles(c), Game::DawsonKayles(g)) => {
                selector::select_move(g, c, skill, rng).map(Move::DawsonKayles)
            }
            (Self::SubtractFactor(c), Game::SubtractFactor(g)) => {
                selector::select_move(g, c, skill, rng).map(Move::SubtractFactor)
            }
            (Self::TakeCoins(c), Game::TakeCoins(g)) => {
                selector::select_move(g, c, skill, rng).map(Move::TakeCoins)
            }
            (Self::SplitCards(c), Game::SplitCards(g)) => {
                selector::select_move(g, c, skill, rng).map(Move::SplitCards)
            }
            _ => Err(Error::VariantMismatch {
                expected,
                found: game.kind(),
            }),
        }
    }

    /// Number of positions remembered by the analysis
    pub fn cached_positions(&self) -> usize {
        match self {
            Self::CardNim(_) => 0,
            Self::DawsonKayles(c) => c.transposition_table().len(),
            Self::SubtractFactor(c) => c
                .max_value()
                .map_or(0, |max| (max - c.threshold() + 1) as usize),
            Self::TakeCoins(c) => c.transposition_table().len(),
            Self::SplitCards(c) => c.transposition_table().len(),
        }
    }

    /// Forget everything learned so far
    pub fn reset(&mut self) {
        match self {
            Self::CardNim(c) => PositionClassifier::<CardNim>::reset(c),
            Self::DawsonKayles(c) => c.reset(),
            Self::SubtractFactor(c) => c.reset(),
            Self::TakeCoins(c) => c.reset(),
            Self::SplitCards(c) => c.reset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn kind_names_round_trip() {
        for kind in VariantKind::ALL {
            assert_eq!(kind.name().parse::<VariantKind>(), Ok(kind));
        }
        assert!("chess".parse::<VariantKind>().is_err());
    }

    #[test]
    fn from_sequence() {
        assert_eq!(
            Game::from_sequence(VariantKind::CardNim, &[1, 2, 3], None),
            Ok(Game::CardNim(CardNim::new(vec![1, 2, 3])))
        );
        assert!(Game::from_sequence(VariantKind::DawsonKayles, &[1, 2], None).is_err());
        assert!(Game::from_sequence(VariantKind::SubtractFactor, &[10, 4], None).is_err());
        assert_eq!(
            Game::from_sequence(VariantKind::SubtractFactor, &[10], Some(4)),
            SubtractFactor::new(10, 4).map(Game::SubtractFactor)
        );
        assert!(Game::from_sequence(VariantKind::CardNim, &[u64::MAX], None).is_err());
        assert!(Game::from_sequence(VariantKind::SplitCards, &[3, 0], Some(2)).is_err());
    }

    #[test]
    fn from_sequence_rejects_oversized_positions() {
        let rejected = [
            (VariantKind::DawsonKayles, vec![1; 200], None),
            (VariantKind::SubtractFactor, vec![100_000_000_000], None),
            (VariantKind::CardNim, vec![u64::from(u32::MAX), 1], None),
            (VariantKind::CardNim, vec![1; 9], None),
            (VariantKind::TakeCoins, vec![1; 11], None),
            (VariantKind::TakeCoins, vec![31], None),
            (VariantKind::SplitCards, vec![20, 5], Some(2)),
        ];
        for (kind, values, extra) in rejected {
            assert!(
                matches!(
                    Game::from_sequence(kind, &values, extra),
                    Err(Error::InvalidParameter(_))
                ),
                "{kind} {values:?}"
            );
        }

        let accepted = [
            (VariantKind::DawsonKayles, vec![1; 20], None),
            (VariantKind::SubtractFactor, vec![100_000], Some(2)),
            (VariantKind::CardNim, vec![32; 8], None),
            (VariantKind::TakeCoins, vec![3; 10], None),
            (VariantKind::SplitCards, vec![12, 12], Some(8)),
        ];
        for (kind, values, extra) in accepted {
            assert!(Game::from_sequence(kind, &values, extra).is_ok(), "{kind}");
        }
    }

    #[test]
    fn mismatched_move() {
        let game = Game::CardNim(CardNim::new(vec![2]));
        assert_eq!(
            game.apply_move(Move::DawsonKayles(PairTowers { left: 0 })),
            Err(Error::VariantMismatch {
                expected: VariantKind::CardNim,
                found: VariantKind::DawsonKayles,
            })
        );

        let mut analysis = Analysis::for_kind(VariantKind::TakeCoins);
        assert!(analysis.is_winning(&game).is_err());
    }

    #[test]
    fn every_game_initializes_with_defaults() {
        let mut rng = StdRng::seed_from_u64(17);
        for kind in VariantKind::ALL {
            let params = Parameters::default_for(kind);
            assert_eq!(params.kind(), kind);
            let (game, mut analysis) = params.initialize(&mut rng).unwrap();
            assert_eq!(game.kind(), kind);
            assert_eq!(analysis.kind(), kind);
            assert!(!game.is_terminal());

            let winning = analysis.is_winning(&game).unwrap();
            let best = analysis.winning_moves(&game).unwrap();
            assert_eq!(winning, !best.is_empty());
            for movement in best {
                let next = game.apply_move(movement).unwrap();
                assert!(!analysis.is_winning(&next).unwrap());
            }
        }
    }

    #[test]
    fn legal_moves_are_wrapped() {
        let game = Game::from_sequence(VariantKind::DawsonKayles, &[1, 1, 1], None).unwrap();
        assert_eq!(
            game.legal_moves(),
            vec![
                Move::DawsonKayles(PairTowers { left: 0 }),
                Move::DawsonKayles(PairTowers { left: 1 }),
            ]
        );
        assert_eq!(game.to_string(), "[111]");
    }

    #[test]
    fn game_is_an_impartial_game() {
        let game = Game::from_sequence(VariantKind::CardNim, &[1, 2, 3], None).unwrap();
        let shuffled = Game::from_sequence(VariantKind::CardNim, &[3, 0, 2, 1], None).unwrap();
        assert_eq!(game.canonical(), shuffled.canonical());
        assert!(!SearchClassifier::new().is_winning(&game));
        assert!(!game.is_legal(Move::TakeCoins(GatherCoins { index: 1 })));
        assert_eq!(game.successors().len(), 6);
    }
}
