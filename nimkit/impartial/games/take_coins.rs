//! Take coins. Coins lie in a row of positions. A move picks an interior position whose both
//! neighbours hold a coin, and moves one coin from each neighbour onto it.
//!
//! Each move removes one coin from the two outer stacks and adds one to the middle, so the
//! total count drops by one and the game always ends.

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

/// Largest number of positions accepted by [`TakeCoinsParams`]
pub const MAX_POSITIONS: usize = 10;

/// Largest starting number of coins on a position accepted by [`TakeCoinsParams`]
pub const MAX_COINS: u32 = 3;

/// Most coins in play on a row built with [`TakeCoins::try_new`]. Gathering piles coins up in
/// the middle, so single positions may hold more than [`MAX_COINS`] later in the game.
pub const MAX_TOTAL_COINS: u32 = MAX_POSITIONS as u32 * MAX_COINS;

/// Row of coin stacks
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TakeCoins {
    coins: Vec<u32>,
}

impl TakeCoins {
    /// Create position from coin counts without checking any limits
    #[inline]
    pub const fn new(coins: Vec<u32>) -> Self {
        Self { coins }
    }

    /// Create position, fails with more than [`MAX_POSITIONS`] positions or more than
    /// [`MAX_TOTAL_COINS`] coins in play
    pub fn try_new(coins: Vec<u32>) -> Result<Self> {
        if coins.len() > MAX_POSITIONS {
            return Err(Error::InvalidParameter(format!(
                "{} positions exceed the maximum of {MAX_POSITIONS}",
                coins.len()
            )));
        }
        let position = Self::new(coins);
        if position.total() > u64::from(MAX_TOTAL_COINS) {
            return Err(Error::InvalidParameter(format!(
                "{} coins exceed the maximum of {MAX_TOTAL_COINS}",
                position.total()
            )));
        }
        Ok(position)
    }

    /// Get coin counts
    #[inline]
    pub fn coins(&self) -> &[u32] {
        &self.coins
    }

    /// Total number of coins in play
    pub fn total(&self) -> u64 {
        self.coins.iter().map(|c| u64::from(*c)).sum()
    }

    /// Naive rating that calls a position "winning" whenever any move exists.
    ///
    /// This is not a game theoretic classification, use a
    /// [`SearchClassifier`](crate::impartial::classifier::SearchClassifier) for that.
    pub fn has_any_move(&self) -> bool {
        !self.is_terminal()
    }
}

impl Display for TakeCoins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display::brackets(f, |f| display::commas(f, &self.coins))
    }
}

/// Gather one coin from each neighbour onto position `index`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GatherCoins {
    /// Interior position receiving the coins
    pub index: usize,
}

impl Display for GatherCoins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gather onto {}", self.index)
    }
}

impl ImpartialGame for TakeCoins {
    type Move = GatherCoins;

    fn legal_moves(&self) -> Vec<GatherCoins> {
        (1..self.coins.len().saturating_sub(1))
            .map(|index| GatherCoins { index })
            .filter(|m| self.is_legal(*m))
            .collect()
    }

    fn is_legal(&self, movement: GatherCoins) -> bool {
        let index = movement.index;
        // Boundary positions never receive coins, whatever their neighbours hold
        if index == 0 || index >= self.coins.len().saturating_sub(1) {
            return false;
        }
        self.coins[index - 1] >= 1 && self.coins[index + 1] >= 1
    }

    fn transition(&self, movement: GatherCoins) -> Self {
        let index = movement.index;
        let mut coins = self.coins.clone();
        coins[index] += 1;
        coins[index - 1] -= 1;
        coins[index + 1] -= 1;
        Self::new(coins)
    }

    /// Rules are symmetric, row read backwards is equivalent
    fn canonical(&self) -> Self {
        let reversed = self.coins.iter().rev().copied().collect::<Vec<_>>();
        if reversed < self.coins {
            Self::new(reversed)
        } else {
            self.clone()
        }
    }
}

/// Parameters of a random Take Coins starting position
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TakeCoinsParams {
    /// Smallest number of positions
    pub min_positions: usize,
    /// Largest number of positions
    pub max_positions: usize,
    /// Largest number of coins on a single position
    pub max_coins: u32,
}

impl Default for TakeCoinsParams {
    fn default() -> Self {
        Self {
            min_positions: 5,
            max_positions: 7,
            max_coins: 3,
        }
    }
}

impl TakeCoinsParams {
    /// Check bounds of the parameters
    pub fn validate(&self) -> Result<()> {
        check_range(
            "positions",
            self.min_positions,
            self.max_positions,
            3,
            MAX_POSITIONS,
        )?;
        if !(1..=MAX_COINS).contains(&self.max_coins) {
            return Err(Error::InvalidParameter(format!(
                "coins: {} is outside of 1..={MAX_COINS}",
                self.max_coins
            )));
        }
        Ok(())
    }

    /// Draw a random starting position with at least one legal move
    pub fn initialize<R>(&self, rng: &mut R) -> Result<TakeCoins>
    where
        R: Rng + ?Sized,
    {
        self.validate()?;
        sample_until(
            rng,
            |rng| {
                let positions = rng.random_range(self.min_positions..=self.max_positions);
                TakeCoins::new(
                    (0..positions)
                        .map(|_| rng.random_range(0..=self.max_coins))
                        .collect(),
                )
            },
            |position| !position.is_terminal(),
        )
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for TakeCoins {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        use quickcheck::Arbitrary;

        let length = usize::arbitrary(g) % 7;
        Self::new((0..length).map(|_| u32::arbitrary(g) % 3).collect())
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        use quickcheck::Arbitrary;

        Box::new(self.coins.shrink().map(Self::new))
    }
}
