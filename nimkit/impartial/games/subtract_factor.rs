//! Subtract a factor. A single number is in play, a move subtracts one of its proper divisors
//! as long as the result doesn't drop below a fixed threshold.
//!
//! Every move decreases the value, so all outcomes between the threshold and the starting value
//! are computed in a single bottom-up pass by [`ValueTable`].

use crate::{
    error::{Error, Result},
    impartial::{
        classifier::PositionClassifier,
        games::{check_range, sample_until},
        impartial_game::ImpartialGame,
    },
    numeric::divisors::proper_divisors,
};
use rand::Rng;
use std::fmt::{self, Display};

/// Largest value accepted by [`SubtractFactorParams`]
pub const MAX_VALUE: u64 = 100_000;

/// Current value and the threshold it must stay at or above
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SubtractFactor {
    value: u64,
    threshold: u64,
}

impl SubtractFactor {
    /// Create position, fails if `value` is already below `threshold` or above [`MAX_VALUE`]
    pub fn new(value: u64, threshold: u64) -> Result<Self> {
        if value > MAX_VALUE {
            return Err(Error::InvalidParameter(format!(
                "value {value} exceeds the maximum of {MAX_VALUE}"
            )));
        }
        if value < threshold {
            return Err(Error::InvalidParameter(format!(
                "value {value} is below threshold {threshold}"
            )));
        }
        Ok(Self { value, threshold })
    }

    /// Get the current value
    #[inline]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Get the threshold
    #[inline]
    pub const fn threshold(&self) -> u64 {
        self.threshold
    }
}

impl Display for SubtractFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (threshold {})", self.value, self.threshold)
    }
}

/// Subtract `divisor` from the current value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubtractDivisor {
    /// Proper divisor of the current value
    pub divisor: u64,
}

impl Display for SubtractDivisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subtract {}", self.divisor)
    }
}

impl ImpartialGame for SubtractFactor {
    type Move = SubtractDivisor;

    fn legal_moves(&self) -> Vec<SubtractDivisor> {
        proper_divisors(self.value)
            .into_iter()
            .filter(|divisor| self.value - divisor >= self.threshold)
            .map(|divisor| SubtractDivisor { divisor })
            .collect()
    }

    fn is_legal(&self, movement: SubtractDivisor) -> bool {
        let divisor = movement.divisor;
        divisor >= 1
            && divisor < self.value
            && self.value % divisor == 0
            && self.value - divisor >= self.threshold
    }

    fn transition(&self, movement: SubtractDivisor) -> Self {
        Self {
            value: self.value - movement.divisor,
            threshold: self.threshold,
        }
    }
}

/// Outcomes of all values from the threshold upwards.
///
/// `win[v]` is true iff some proper divisor `d` of `v` with `v - d >= threshold` leads to a
/// losing `win[v - d]`. Values are filled in increasing order, so every lookup hits an already
/// computed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueTable {
    threshold: u64,
    outcomes: Vec<bool>,
}

impl ValueTable {
    /// Create empty table for a threshold
    pub const fn new(threshold: u64) -> Self {
        Self {
            threshold,
            outcomes: Vec::new(),
        }
    }

    /// Table with all outcomes between `threshold` and `initial_value` computed
    pub fn build(threshold: u64, initial_value: u64) -> Self {
        let mut table = Self::new(threshold);
        table.extend_to(initial_value);
        table
    }

    /// Get the threshold of the table
    #[inline]
    pub const fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Outcome of `value` if it was computed already
    pub fn outcome(&self, value: u64) -> Option<bool> {
        let idx = value.checked_sub(self.threshold)?;
        self.outcomes.get(idx as usize).copied()
    }

    /// Largest value with a known outcome
    pub fn max_value(&self) -> Option<u64> {
        (!self.outcomes.is_empty()).then(|| self.threshold + self.outcomes.len() as u64 - 1)
    }

    fn extend_to(&mut self, value: u64) {
        let threshold = self.threshold;
        let first = threshold + self.outcomes.len() as u64;
        for v in first..=value {
            let winning = proper_divisors(v)
                .into_iter()
                .filter(|d| v - d >= threshold)
                .any(|d| !self.outcomes[(v - d - threshold) as usize]);
            self.outcomes.push(winning);
        }
    }
}

impl PositionClassifier<SubtractFactor> for ValueTable {
    fn is_winning(&mut self, position: &SubtractFactor) -> bool {
        if position.threshold != self.threshold {
            log::debug!(
                "threshold changed from {} to {}, rebuilding value table",
                self.threshold,
                position.threshold
            );
            *self = Self::new(position.threshold);
        }
        let Some(offset) = position.value.checked_sub(self.threshold) else {
            return false;
        };
        self.extend_to(position.value);
        self.outcomes[offset as usize]
    }

    fn reset(&mut self) {
        self.outcomes.clear();
    }
}

/// Parameters of a random Subtract a Factor starting position
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SubtractFactorParams {
    /// Smallest starting value
    pub min_value: u64,
    /// Largest starting value
    pub max_value: u64,
    /// Smallest threshold
    pub min_threshold: u64,
    /// Largest threshold
    pub max_threshold: u64,
}

impl Default for SubtractFactorParams {
    fn default() -> Self {
        Self {
            min_value: 30,
            max_value: 120,
            min_threshold: 2,
            max_threshold: 12,
        }
    }
}

impl SubtractFactorParams {
    /// Check bounds of the parameters
    pub fn validate(&self) -> Result<()> {
        check_range("value", self.min_value, self.max_value, 0, MAX_VALUE)?;
        check_range(
            "threshold",
            self.min_threshold,
            self.max_threshold,
            0,
            MAX_VALUE,
        )?;
        // Value v has a legal move iff 1 is a proper divisor of it and v - 1 stays in range
        if self.max_value < 2 || self.max_value <= self.min_threshold {
            return Err(Error::InvalidParameter(format!(
                "no value up to {} has a legal move with threshold {}",
                self.max_value, self.min_threshold
            )));
        }
        Ok(())
    }

    /// Draw a random starting position with at least one legal move
    pub fn initialize<R>(&self, rng: &mut R) -> Result<SubtractFactor>
    where
        R: Rng + ?Sized,
    {
        self.validate()?;
        sample_until(
            rng,
            |rng| {
                let value = rng.random_range(self.min_value..=self.max_value);
                let threshold = rng.random_range(self.min_threshold..=self.max_threshold);
                SubtractFactor::new(value, threshold).ok()
            },
            |position| position.is_some_and(|position| !position.is_terminal()),
        )?
        .ok_or_else(|| Error::InvalidParameter("value below threshold".to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impartial::classifier::SearchClassifier;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn ten_over_four() {
        let position = SubtractFactor::new(10, 4).unwrap();
        assert_eq!(
            position.legal_moves(),
            [1, 2, 5].map(|divisor| SubtractDivisor { divisor })
        );

        let table = ValueTable::build(4, 10);
        let outcomes = (4..=10)
            .map(|v| table.outcome(v).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(outcomes, [false, true, true, false, true, false, true]);
        assert_eq!(table.outcome(10), Some(true));
        assert_eq!(table.outcome(3), None);
        assert_eq!(table.outcome(11), None);
        assert_eq!(table.max_value(), Some(10));
    }

    #[test]
    fn threshold_blocks_moves() {
        let position = SubtractFactor::new(4, 4).unwrap();
        assert!(position.is_terminal());
        assert!(!ValueTable::new(4).is_winning(&position));

        let position = SubtractFactor::new(1, 0).unwrap();
        assert!(position.is_terminal());

        assert!(SubtractFactor::new(3, 4).is_err());
    }

    #[test]
    fn value_limit() {
        assert!(SubtractFactor::new(MAX_VALUE, 0).is_ok());
        assert!(SubtractFactor::new(MAX_VALUE + 1, 0).is_err());
        assert!(SubtractFactor::new(100_000_000_000, 0).is_err());
    }

    #[test]
    fn value_below_threshold_is_lost() {
        let position = SubtractFactor {
            value: 3,
            threshold: 4,
        };
        assert!(position.is_terminal());
        assert!(!ValueTable::new(4).is_winning(&position));
    }

    #[test]
    fn illegal_divisors() {
        let position = SubtractFactor::new(12, 5).unwrap();
        assert!(position.apply_move(SubtractDivisor { divisor: 0 }).is_err());
        assert!(position.apply_move(SubtractDivisor { divisor: 5 }).is_err());
        assert!(position.apply_move(SubtractDivisor { divisor: 12 }).is_err());
        assert!(position.apply_move(SubtractDivisor { divisor: 24 }).is_err());
        // 12 - 6 = 6 keeps the value above the threshold
        assert_eq!(
            position.apply_move(SubtractDivisor { divisor: 6 }),
            SubtractFactor::new(6, 5)
        );
        // 12 - 8 would, but 8 doesn't divide 12
        assert!(position.apply_move(SubtractDivisor { divisor: 8 }).is_err());
    }

    #[test]
    fn table_agrees_with_search() {
        for threshold in 0..6 {
            let mut table = ValueTable::new(threshold);
            let mut search = SearchClassifier::new();
            for value in threshold..80 {
                let position = SubtractFactor::new(value, threshold).unwrap();
                assert_eq!(
                    table.is_winning(&position),
                    search.is_winning(&position),
                    "{position}"
                );
            }
        }
    }

    #[test]
    fn table_follows_threshold_change() {
        let mut table = ValueTable::build(4, 10);
        assert!(table.is_winning(&SubtractFactor::new(10, 4).unwrap()));
        // With threshold 0 odd values only have odd divisors, so every odd value is lost
        assert!(!table.is_winning(&SubtractFactor::new(9, 0).unwrap()));
        assert_eq!(table.threshold(), 0);

        table.reset();
        assert_eq!(table.max_value(), None);
    }

    #[test]
    fn initialize_respects_bounds() {
        let mut rng = StdRng::seed_from_u64(2);
        let params = SubtractFactorParams::default();
        for _ in 0..32 {
            let position = params.initialize(&mut rng).unwrap();
            assert!((params.min_value..=params.max_value).contains(&position.value()));
            assert!(
                (params.min_threshold..=params.max_threshold).contains(&position.threshold())
            );
            assert!(!position.is_terminal());
        }
    }

    #[test]
    fn invalid_params() {
        let params = SubtractFactorParams {
            min_value: 5,
            max_value: 5,
            min_threshold: 5,
            max_threshold: 9,
        };
        assert!(params.validate().is_err());

        let params = SubtractFactorParams {
            max_value: MAX_VALUE + 1,
            ..SubtractFactorParams::default()
        };
        assert!(params.validate().is_err());
    }
}
