//! Nim played with piles of cards. A player takes any positive number of cards from a single
//! pile.
//!
//! Position is lost for the player to move exactly when the nim sum (xor) of pile sizes is zero,
//! so no search is needed to classify it, see [`NimSum`].

use crate::{
    display,
    error::{Error, Result},
    impartial::{
        classifier::PositionClassifier,
        games::{check_range, sample_until},
        impartial_game::ImpartialGame,
    },
    numeric::nimber::Nimber,
};
use rand::Rng;
use std::fmt::{self, Display};

/// Largest number of piles accepted by [`CardNimParams`]
pub const MAX_PILES: usize = 8;

/// Largest pile size accepted by [`CardNimParams`]
pub const MAX_PILE_SIZE: u32 = 32;

/// Row of card piles
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CardNim {
    piles: Vec<u32>,
}

impl CardNim {
    /// Create position from pile sizes without checking any limits
    #[inline]
    pub const fn new(piles: Vec<u32>) -> Self {
        Self { piles }
    }

    /// Create position, fails with more than [`MAX_PILES`] piles or a pile above
    /// [`MAX_PILE_SIZE`]
    pub fn try_new(piles: Vec<u32>) -> Result<Self> {
        if piles.len() > MAX_PILES {
            return Err(Error::InvalidParameter(format!(
                "{} piles exceed the maximum of {MAX_PILES}",
                piles.len()
            )));
        }
        if let Some(pile) = piles.iter().find(|pile| **pile > MAX_PILE_SIZE) {
            return Err(Error::InvalidParameter(format!(
                "pile of {pile} exceeds the maximum of {MAX_PILE_SIZE}"
            )));
        }
        Ok(Self::new(piles))
    }

    /// Get pile sizes in display order
    #[inline]
    pub fn piles(&self) -> &[u32] {
        &self.piles
    }

    /// Nim sum of all piles
    pub fn nim_sum(&self) -> Nimber {
        self.piles.iter().copied().map(Nimber::new).sum()
    }
}

impl Display for CardNim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display::brackets(f, |f| display::commas(f, &self.piles))
    }
}

/// Take `amount` cards from pile number `pile`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TakeCards {
    /// Index of the pile
    pub pile: usize,
    /// Number of cards taken
    pub amount: u32,
}

impl Display for TakeCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "take {} from pile {}", self.amount, self.pile)
    }
}

impl ImpartialGame for CardNim {
    type Move = TakeCards;

    fn legal_moves(&self) -> Vec<TakeCards> {
        let mut moves = Vec::new();
        for (pile, count) in self.piles.iter().copied().enumerate() {
            for amount in 1..=count {
                moves.push(TakeCards { pile, amount });
            }
        }
        moves
    }

    fn is_legal(&self, movement: TakeCards) -> bool {
        self.piles
            .get(movement.pile)
            .is_some_and(|count| (1..=*count).contains(&movement.amount))
    }

    fn transition(&self, movement: TakeCards) -> Self {
        let mut piles = self.piles.clone();
        piles[movement.pile] -= movement.amount;
        Self::new(piles)
    }

    /// Order of piles doesn't matter and empty piles don't contribute anything
    fn canonical(&self) -> Self {
        let mut piles = self
            .piles
            .iter()
            .copied()
            .filter(|count| *count > 0)
            .collect::<Vec<_>>();
        piles.sort_unstable();
        Self::new(piles)
    }

    fn nim_value(&self) -> Nimber {
        self.nim_sum()
    }
}

/// Closed form classifier for [`CardNim`]: position is winning iff the nim sum is not zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NimSum;

impl PositionClassifier<CardNim> for NimSum {
    #[inline]
    fn is_winning(&mut self, position: &CardNim) -> bool {
        !position.nim_sum().is_zero()
    }

    fn reset(&mut self) {}
}

/// Parameters of a random Card Nim starting position
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CardNimParams {
    /// Smallest number of piles
    pub min_piles: usize,
    /// Largest number of piles
    pub max_piles: usize,
    /// Smallest number of cards in a pile
    pub min_size: u32,
    /// Largest number of cards in a pile
    pub max_size: u32,
}

impl Default for CardNimParams {
    fn default() -> Self {
        Self {
            min_piles: 3,
            max_piles: 5,
            min_size: 1,
            max_size: 7,
        }
    }
}

impl CardNimParams {
    /// Check bounds of the parameters
    pub fn validate(&self) -> Result<()> {
        check_range("piles", self.min_piles, self.max_piles, 1, MAX_PILES)?;
        check_range("pile size", self.min_size, self.max_size, 0, MAX_PILE_SIZE)?;
        if self.max_size == 0 {
            return Err(Error::InvalidParameter(
                "pile size: piles cannot all be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Draw a random starting position with at least one card
    pub fn initialize<R>(&self, rng: &mut R) -> Result<CardNim>
    where
        R: Rng + ?Sized,
    {
        self.validate()?;
        sample_until(
            rng,
            |rng| {
                let piles = rng.random_range(self.min_piles..=self.max_piles);
                CardNim::new(
                    (0..piles)
                        .map(|_| rng.random_range(self.min_size..=self.max_size))
                        .collect(),
                )
            },
            |position| !position.is_terminal(),
        )
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for CardNim {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        use quickcheck::Arbitrary;

        let piles = usize::arbitrary(g) % 5;
        Self::new((0..piles).map(|_| u32::arbitrary(g) % 9).collect())
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        use quickcheck::Arbitrary;

        Box::new(self.piles.shrink().map(Self::new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impartial::classifier::SearchClassifier;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn moves_and_transitions() {
        let position = CardNim::new(vec![0, 2, 1]);
        assert_eq!(
            position.legal_moves(),
            vec![
                TakeCards { pile: 1, amount: 1 },
                TakeCards { pile: 1, amount: 2 },
                TakeCards { pile: 2, amount: 1 },
            ]
        );
        assert_eq!(
            position.apply_move(TakeCards { pile: 1, amount: 2 }),
            Ok(CardNim::new(vec![0, 0, 1]))
        );
        assert!(position.apply_move(TakeCards { pile: 0, amount: 1 }).is_err());
        assert!(position.apply_move(TakeCards { pile: 1, amount: 0 }).is_err());
        assert!(position.apply_move(TakeCards { pile: 3, amount: 1 }).is_err());
        assert_eq!(position.to_string(), "[0, 2, 1]");
    }

    #[test]
    fn size_limits() {
        assert!(CardNim::try_new(vec![MAX_PILE_SIZE; MAX_PILES]).is_ok());
        assert!(CardNim::try_new(vec![1; MAX_PILES + 1]).is_err());
        assert!(CardNim::try_new(vec![3, MAX_PILE_SIZE + 1]).is_err());
    }

    #[test]
    fn huge_piles_do_not_overflow() {
        let position = CardNim::new(vec![u32::MAX, 1]);
        let take_all = TakeCards {
            pile: 0,
            amount: u32::MAX,
        };
        assert!(position.is_legal(take_all));
        assert_eq!(position.transition(take_all).piles(), &[0, 1]);
        assert!(NimSum.is_winning(&position));
        assert_eq!(CardNim::new(vec![3, 4]).legal_moves().len(), 7);
    }

    #[test]
    fn one_two_three_is_lost() {
        let position = CardNim::new(vec![1, 2, 3]);
        assert!(position.nim_sum().is_zero());
        assert!(!NimSum.is_winning(&position));
        assert!(!SearchClassifier::new().is_winning(&position));
    }

    #[test]
    fn three_four_is_won() {
        let position = CardNim::new(vec![3, 4]);
        assert_eq!(position.nim_sum(), Nimber::new(7));
        assert!(NimSum.is_winning(&position));
    }

    #[test]
    fn canonical_ignores_order_and_empty_piles() {
        assert_eq!(
            CardNim::new(vec![3, 0, 1, 2]).canonical(),
            CardNim::new(vec![1, 2, 3])
        );
    }

    #[test]
    fn initialize_respects_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let params = CardNimParams::default();
        for _ in 0..32 {
            let position = params.initialize(&mut rng).unwrap();
            assert!((params.min_piles..=params.max_piles).contains(&position.piles().len()));
            assert!(
                position
                    .piles()
                    .iter()
                    .all(|p| (params.min_size..=params.max_size).contains(p))
            );
            assert!(!position.is_terminal());
        }
    }

    #[test]
    fn invalid_params() {
        let mut rng = StdRng::seed_from_u64(0);
        let params = CardNimParams {
            min_piles: 4,
            max_piles: 2,
            ..CardNimParams::default()
        };
        assert!(params.initialize(&mut rng).is_err());

        let params = CardNimParams {
            max_piles: MAX_PILES + 1,
            ..CardNimParams::default()
        };
        assert!(params.validate().is_err());

        let params = CardNimParams {
            min_size: 0,
            max_size: 0,
            ..CardNimParams::default()
        };
        assert!(params.validate().is_err());
    }

    quickcheck::quickcheck! {
        fn nim_sum_agrees_with_search(position: CardNim) -> bool {
            NimSum.is_winning(&position) == SearchClassifier::new().is_winning(&position)
        }
    }
}
