//! Values of impartial games

use auto_ops::impl_op_ex;
use std::{fmt::Display, iter::Sum};

/// Value of a single Nim heap. Every impartial position is equivalent to one.
///
/// `+` is the nim sum (xor): value of two independent games played side by side.
#[repr(transparent)]
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nimber(u32);

impl Nimber {
    /// Heap of `value` tokens
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the heap size
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Zero is the only value lost for the player to move
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Smallest value not among `options`, i.e. the value of a position whose successors have
    /// exactly these values.
    pub fn mex(options: impl IntoIterator<Item = Self>) -> Self {
        let options = options.into_iter().collect::<Vec<_>>();
        // Answer is at most the number of options, larger values can't matter
        let mut seen = vec![false; options.len() + 1];
        for option in options {
            if let Some(slot) = seen.get_mut(option.0 as usize) {
                *slot = true;
            }
        }
        let first_missing = seen.iter().position(|seen| !seen).unwrap_or(seen.len());
        Self(first_missing as u32)
    }
}

impl_op_ex!(+|lhs: &Nimber, rhs: &Nimber| -> Nimber { Nimber(lhs.0 ^ rhs.0) });
impl_op_ex!(+=|lhs: &mut Nimber, rhs: &Nimber| { lhs.0 ^= rhs.0 });
impl_op_ex!(-|lhs: &Nimber, rhs: &Nimber| -> Nimber { Nimber(lhs.0 ^ rhs.0) });

impl Sum for Nimber {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, n| acc + n)
    }
}

impl<'a> Sum<&'a Nimber> for Nimber {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Display for Nimber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "*{}", self.0)
    }
}
