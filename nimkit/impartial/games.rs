//! Impartial games

use crate::error::{Error, Result};
use rand::Rng;

pub mod card_nim;
pub mod dawson_kayles;
pub mod split_cards;
pub mod subtract_factor;
pub mod take_coins;

/// Number of random starting positions tried before initialization gives up
pub const SAMPLING_ATTEMPTS: usize = 64;

/// Draw starting positions until one is accepted
fn sample_until<R, T>(
    rng: &mut R,
    mut sample: impl FnMut(&mut R) -> T,
    mut accept: impl FnMut(&T) -> bool,
) -> Result<T>
where
    R: Rng + ?Sized,
{
    for attempt in 1..=SAMPLING_ATTEMPTS {
        let candidate = sample(rng);
        if accept(&candidate) {
            return Ok(candidate);
        }
        log::debug!("starting position rejected, attempt {attempt}/{SAMPLING_ATTEMPTS}");
    }
    Err(Error::InvalidParameter(format!(
        "no acceptable starting position found in {SAMPLING_ATTEMPTS} attempts"
    )))
}

/// Check that `min..=max` is a non-empty range within `lower..=upper`
fn check_range<T>(name: &str, min: T, max: T, lower: T, upper: T) -> Result<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if min > max {
        return Err(Error::InvalidParameter(format!(
            "{name}: minimum {min} is greater than maximum {max}"
        )));
    }
    if min < lower || max > upper {
        return Err(Error::InvalidParameter(format!(
            "{name}: range {min}..={max} is outside of {lower}..={upper}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn ranges() {
        assert!(check_range("x", 1, 3, 0, 5).is_ok());
        assert!(check_range("x", 3, 3, 3, 3).is_ok());
        assert!(check_range("x", 4, 3, 0, 5).is_err());
        assert!(check_range("x", 1, 6, 0, 5).is_err());
    }

    #[test]
    fn sampling_gives_up() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut drawn = 0;
        let result = sample_until(&mut rng, |_| drawn += 1, |()| false);
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
        assert_eq!(drawn, SAMPLING_ATTEMPTS);
    }
}
