//! Numeric types and arithmetic helpers used by the games

pub mod divisors;
pub mod nimber;
