//! Dawson-Kayles played with a row of towers. A move pairs two adjacent towers that are both
//! still standing and removes them from play. The player who makes the last pairing wins.
//!
//! Adjacency is what makes the game interesting: a removed pair splits the row into two
//! independent rows, so unlike [Card Nim](super::card_nim) the order of the towers matters.

use crate::{
    display,
    error::{Error, Result},
    impartial::{
        classifier::{PositionClassifier, SearchClassifier},
        games::{check_range, sample_until},
        impartial_game::ImpartialGame,
    },
};
use rand::Rng;
use std::fmt::{self, Display};

/// Largest number of towers accepted by [`DawsonKaylesParams`]
pub const MAX_TOWERS: usize = 20;

/// Row of towers, `true` when the tower is still available
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DawsonKayles {
    towers: Vec<bool>,
}

impl DawsonKayles {
    /// Create position from tower availability without checking the row length
    #[inline]
    pub const fn new(towers: Vec<bool>) -> Self {
        Self { towers }
    }

    /// Create position, fails on rows longer than [`MAX_TOWERS`]
    pub fn try_new(towers: Vec<bool>) -> Result<Self> {
        if towers.len() > MAX_TOWERS {
            return Err(Error::InvalidParameter(format!(
                "{} towers exceed the maximum of {MAX_TOWERS}",
                towers.len()
            )));
        }
        Ok(Self::new(towers))
    }

    /// Row of `length` available towers
    #[inline]
    pub fn new_row(length: usize) -> Self {
        Self::new(vec![true; length])
    }

    /// Create position from binary tokens, `1` for available tower and `0` for consumed one.
    /// Fails on other tokens and on rows longer than [`MAX_TOWERS`].
    pub fn from_bits(bits: &[u8]) -> Result<Self> {
        bits.iter()
            .map(|bit| match bit {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(Error::InvalidParameter(format!(
                    "tower must be 0 or 1, got {bit}"
                ))),
            })
            .collect::<Result<Vec<_>>>()
            .and_then(Self::try_new)
    }

    /// Get tower availability
    #[inline]
    pub fn towers(&self) -> &[bool] {
        &self.towers
    }

    /// Binary tokens of the row, `1` for available tower
    pub fn bits(&self) -> Vec<u8> {
        self.towers.iter().map(|t| u8::from(*t)).collect()
    }
}

impl Display for DawsonKayles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display::brackets(f, |f| display::packed(f, &self.bits()))
    }
}

/// Pair towers at `left` and `left + 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairTowers {
    /// Index of the left tower of the pair
    pub left: usize,
}

impl Display for PairTowers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pair {} and {}", self.left, self.left + 1)
    }
}

impl ImpartialGame for DawsonKayles {
    type Move = PairTowers;

    fn legal_moves(&self) -> Vec<PairTowers> {
        self.towers
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[0] && pair[1])
            .map(|(left, _)| PairTowers { left })
            .collect()
    }

    fn is_legal(&self, movement: PairTowers) -> bool {
        movement
            .left
            .checked_add(2)
            .and_then(|end| self.towers.get(movement.left..end))
            .is_some_and(|pair| pair[0] && pair[1])
    }

    fn transition(&self, movement: PairTowers) -> Self {
        let mut towers = self.towers.clone();
        towers[movement.left] = false;
        towers[movement.left + 1] = false;
        Self::new(towers)
    }

    /// Game is symmetric, row read backwards is equivalent
    fn canonical(&self) -> Self {
        let reversed = self.towers.iter().rev().copied().collect::<Vec<_>>();
        if reversed < self.towers {
            Self::new(reversed)
        } else {
            self.clone()
        }
    }
}

/// Parameters of a random Dawson-Kayles starting position: a full row of towers
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DawsonKaylesParams {
    /// Smallest number of towers
    pub min_towers: usize,
    /// Largest number of towers
    pub max_towers: usize,
    /// Resample until the first player has a winning strategy
    pub require_first_player_win: bool,
}

impl Default for DawsonKaylesParams {
    fn default() -> Self {
        Self {
            min_towers: 6,
            max_towers: 14,
            require_first_player_win: true,
        }
    }
}

impl DawsonKaylesParams {
    /// Check bounds of the parameters
    pub fn validate(&self) -> Result<()> {
        check_range("towers", self.min_towers, self.max_towers, 2, MAX_TOWERS)
    }

    /// Draw a random starting position.
    ///
    /// Positions are classified with `classifier`, so the cache can be reused by the game that
    /// follows.
    pub fn initialize<R>(
        &self,
        rng: &mut R,
        classifier: &mut SearchClassifier<DawsonKayles>,
    ) -> Result<DawsonKayles>
    where
        R: Rng + ?Sized,
    {
        self.validate()?;
        sample_until(
            rng,
            |rng| DawsonKayles::new_row(rng.random_range(self.min_towers..=self.max_towers)),
            |position| !self.require_first_player_win || classifier.is_winning(position),
        )
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for DawsonKayles {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        use quickcheck::Arbitrary;

        let length = usize::arbitrary(g) % 11;
        Self::new((0..length).map(|_| bool::arbitrary(g)).collect())
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        use quickcheck::Arbitrary;

        Box::new(self.towers.shrink().map(Self::new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn two_towers() {
        let mut classifier = SearchClassifier::new();
        let position = DawsonKayles::from_bits(&[1, 1]).unwrap();
        assert_eq!(position.legal_moves(), vec![PairTowers { left: 0 }]);

        let next = position.apply_move(PairTowers { left: 0 }).unwrap();
        assert_eq!(next.bits(), vec![0, 0]);
        assert!(next.is_terminal());
        assert!(classifier.is_winning(&position));
        assert!(!classifier.is_winning(&next));
    }

    #[test]
    fn three_towers() {
        let mut classifier = SearchClassifier::new();
        let position = DawsonKayles::from_bits(&[1, 1, 1]).unwrap();
        assert_eq!(
            position.legal_moves(),
            vec![PairTowers { left: 0 }, PairTowers { left: 1 }]
        );
        assert_eq!(
            position.apply_move(PairTowers { left: 0 }).unwrap().bits(),
            vec![0, 0, 1]
        );
        assert_eq!(
            position.apply_move(PairTowers { left: 1 }).unwrap().bits(),
            vec![1, 0, 0]
        );
        assert!(classifier.is_winning(&position));
    }

    #[test]
    fn illegal_pairs() {
        let position = DawsonKayles::from_bits(&[1, 0, 1, 1]).unwrap();
        assert!(position.apply_move(PairTowers { left: 0 }).is_err());
        assert!(position.apply_move(PairTowers { left: 3 }).is_err());
        assert!(position.apply_move(PairTowers { left: 2 }).is_ok());
        assert!(DawsonKayles::from_bits(&[1, 2]).is_err());
    }

    #[test]
    fn row_length_limit() {
        assert!(DawsonKayles::from_bits(&[1; MAX_TOWERS]).is_ok());
        assert_eq!(
            DawsonKayles::from_bits(&[1; MAX_TOWERS + 1]),
            Err(Error::InvalidParameter(format!(
                "{} towers exceed the maximum of {MAX_TOWERS}",
                MAX_TOWERS + 1
            )))
        );
        assert!(DawsonKayles::try_new(vec![true; 200]).is_err());
    }

    #[test]
    fn rows_match_known_nim_values() {
        let expected = [0, 0, 1, 1, 2, 0, 3, 1, 1, 0];
        for (length, value) in expected.into_iter().enumerate() {
            assert_eq!(
                DawsonKayles::new_row(length).nim_value().value(),
                value,
                "row of {length}"
            );
        }
    }

    #[test]
    fn canonical_is_mirror_invariant() {
        let a = DawsonKayles::from_bits(&[1, 1, 0, 1]).unwrap();
        let b = DawsonKayles::from_bits(&[1, 0, 1, 1]).unwrap();
        assert_eq!(a.canonical(), b.canonical());
        assert_eq!(a.to_string(), "[1101]");
    }

    #[test]
    fn initialize_picks_first_player_win() {
        let mut rng = StdRng::seed_from_u64(5);
        let params = DawsonKaylesParams {
            min_towers: 4,
            max_towers: 10,
            require_first_player_win: true,
        };
        for _ in 0..16 {
            let mut classifier = SearchClassifier::new();
            let position = params.initialize(&mut rng, &mut classifier).unwrap();
            assert!(![5, 9].contains(&position.towers().len()));
            assert!(classifier.is_winning(&position));
        }
    }

    #[test]
    fn initialize_gives_up_on_losing_rows() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut classifier = SearchClassifier::new();
        let params = DawsonKaylesParams {
            min_towers: 5,
            max_towers: 5,
            require_first_player_win: true,
        };
        assert!(params.initialize(&mut rng, &mut classifier).is_err());

        let params = DawsonKaylesParams {
            require_first_player_win: false,
            ..params
        };
        assert_eq!(
            params.initialize(&mut rng, &mut classifier),
            Ok(DawsonKayles::new_row(5))
        );
    }

    #[test]
    fn too_many_towers() {
        let params = DawsonKaylesParams {
            max_towers: MAX_TOWERS + 1,
            ..DawsonKaylesParams::default()
        };
        assert!(params.validate().is_err());
    }
}
