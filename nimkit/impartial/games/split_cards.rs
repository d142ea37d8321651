//! Split cards. A move either takes between one and `k` cards from a single pile, or splits a
//! pile into two non-empty piles. Piles that run out of cards leave the table, so the number of
//! piles changes as the game goes on.

use crate::{
    display,
    error::{Error, Result},
    impartial::{
        games::{check_range, sample_until},
        impartial_game::ImpartialGame,
    },
};
use rand::Rng;
use std::fmt::{self, Display};

/// Largest number of cards on the table accepted by [`SplitCardsParams`]
pub const MAX_TOTAL_CARDS: u32 = 24;

/// Largest take limit
pub const MAX_TAKE: u32 = 8;

/// Piles of cards and the most cards a single take may remove
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SplitCards {
    piles: Vec<u32>,
    max_take: u32,
}

impl SplitCards {
    /// Create position, fails on empty piles, more than [`MAX_TOTAL_CARDS`] cards or a take limit
    /// outside of `1..=MAX_TAKE`
    pub fn new(piles: Vec<u32>, max_take: u32) -> Result<Self> {
        if !(1..=MAX_TAKE).contains(&max_take) {
            return Err(Error::InvalidParameter(format!(
                "take limit {max_take} is outside of 1..={MAX_TAKE}"
            )));
        }
        if piles.contains(&0) {
            return Err(Error::InvalidParameter(
                "empty piles are not part of the game".to_owned(),
            ));
        }
        let total = piles.iter().map(|pile| u64::from(*pile)).sum::<u64>();
        if total > u64::from(MAX_TOTAL_CARDS) {
            return Err(Error::InvalidParameter(format!(
                "{total} cards exceed the maximum of {MAX_TOTAL_CARDS}"
            )));
        }
        Ok(Self { piles, max_take })
    }

    /// Get pile sizes
    #[inline]
    pub fn piles(&self) -> &[u32] {
        &self.piles
    }

    /// Get the most cards a single take may remove
    #[inline]
    pub const fn max_take(&self) -> u32 {
        self.max_take
    }

    /// Total number of cards on the table
    pub fn total(&self) -> u32 {
        self.piles.iter().sum()
    }
}

impl Display for SplitCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display::brackets(f, |f| display::commas(f, &self.piles))?;
        write!(f, " k={}", self.max_take)
    }
}

/// Move in [`SplitCards`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SplitCardsMove {
    /// Take `amount` cards from pile number `pile`
    Take {
        /// Index of the pile
        pile: usize,
        /// Number of cards taken
        amount: u32,
    },

    /// Split pile number `pile` into piles of `at` and `size - at` cards
    Split {
        /// Index of the pile
        pile: usize,
        /// Size of the first part
        at: u32,
    },
}

impl Display for SplitCardsMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Take { pile, amount } => write!(f, "take {amount} from pile {pile}"),
            Self::Split { pile, at } => write!(f, "split pile {pile} at {at}"),
        }
    }
}

impl ImpartialGame for SplitCards {
    type Move = SplitCardsMove;

    fn legal_moves(&self) -> Vec<SplitCardsMove> {
        let mut moves = Vec::new();
        for (pile, size) in self.piles.iter().copied().enumerate() {
            for amount in 1..=size.min(self.max_take) {
                moves.push(SplitCardsMove::Take { pile, amount });
            }
            for at in 1..size {
                moves.push(SplitCardsMove::Split { pile, at });
            }
        }
        moves
    }

    fn is_legal(&self, movement: SplitCardsMove) -> bool {
        match movement {
            SplitCardsMove::Take { pile, amount } => self
                .piles
                .get(pile)
                .is_some_and(|size| (1..=(*size).min(self.max_take)).contains(&amount)),
            SplitCardsMove::Split { pile, at } => self
                .piles
                .get(pile)
                .is_some_and(|size| (1..*size).contains(&at)),
        }
    }

    fn transition(&self, movement: SplitCardsMove) -> Self {
        let mut piles = self.piles.clone();
        match movement {
            SplitCardsMove::Take { pile, amount } => {
                piles[pile] -= amount;
                if piles[pile] == 0 {
                    piles.remove(pile);
                }
            }
            SplitCardsMove::Split { pile, at } => {
                let rest = piles[pile] - at;
                piles[pile] = at;
                piles.insert(pile + 1, rest);
            }
        }
        Self {
            piles,
            max_take: self.max_take,
        }
    }

    /// Piles are independent, their order doesn't matter
    fn canonical(&self) -> Self {
        let mut piles = self.piles.clone();
        piles.sort_unstable();
        Self {
            piles,
            max_take: self.max_take,
        }
    }
}

/// Parameters of a random Split Cards starting position
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SplitCardsParams {
    /// Smallest number of piles
    pub min_piles: usize,
    /// Largest number of piles
    pub max_piles: usize,
    /// Smallest number of cards in a pile
    pub min_size: u32,
    /// Largest number of cards in a pile
    pub max_size: u32,
    /// Most cards a single take may remove
    pub max_take: u32,
}

impl Default for SplitCardsParams {
    fn default() -> Self {
        Self {
            min_piles: 1,
            max_piles: 3,
            min_size: 2,
            max_size: 6,
            max_take: 3,
        }
    }
}

impl SplitCardsParams {
    /// Check bounds of the parameters
    pub fn validate(&self) -> Result<()> {
        check_range("piles", self.min_piles, self.max_piles, 1, MAX_TOTAL_CARDS as usize)?;
        check_range("pile size", self.min_size, self.max_size, 1, MAX_TOTAL_CARDS)?;
        check_range("take limit", self.max_take, self.max_take, 1, MAX_TAKE)?;
        if self.max_piles as u64 * u64::from(self.max_size) > u64::from(MAX_TOTAL_CARDS) {
            return Err(Error::InvalidParameter(format!(
                "up to {} piles of {} cards exceed {MAX_TOTAL_CARDS} cards",
                self.max_piles, self.max_size
            )));
        }
        Ok(())
    }

    /// Draw a random starting position
    pub fn initialize<R>(&self, rng: &mut R) -> Result<SplitCards>
    where
        R: Rng + ?Sized,
    {
        self.validate()?;
        sample_until(
            rng,
            |rng| {
                let piles = rng.random_range(self.min_piles..=self.max_piles);
                (0..piles)
                    .map(|_| rng.random_range(self.min_size..=self.max_size))
                    .collect::<Vec<_>>()
            },
            |piles| !piles.is_empty(),
        )
        .and_then(|piles| SplitCards::new(piles, self.max_take))
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for SplitCards {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        use quickcheck::Arbitrary;

        let piles = usize::arbitrary(g) % 4;
        Self {
            piles: (0..piles).map(|_| u32::arbitrary(g) % 5 + 1).collect(),
            max_take: u32::arbitrary(g) % 3 + 1,
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        use quickcheck::Arbitrary;

        let max_take = self.max_take;
        Box::new(
            self.piles
                .shrink()
                .filter(|piles| !piles.contains(&0))
                .map(move |piles| Self { piles, max_take }),
        )
    }
}
