//! Formatting helpers shared by position types

use std::fmt::{self, Display, Write};

fn joined(w: &mut impl Write, separator: &str, xs: &[impl Display]) -> fmt::Result {
    let mut items = xs.iter();
    if let Some(first) = items.next() {
        write!(w, "{first}")?;
    }
    for item in items {
        write!(w, "{separator}{item}")?;
    }
    Ok(())
}

/// `1, 2, 3`
#[inline]
pub fn commas(w: &mut impl Write, xs: &[impl Display]) -> fmt::Result {
    joined(w, ", ", xs)
}

/// Row of digits without separators, used for binary rows such as towers
#[inline]
pub fn packed(w: &mut impl Write, xs: &[impl Display]) -> fmt::Result {
    joined(w, "", xs)
}

/// Wrap output of `middle` in square brackets
pub fn brackets<W>(w: &mut W, middle: impl FnOnce(&mut W) -> fmt::Result) -> fmt::Result
where
    W: Write,
{
    w.write_char('[')?;
    middle(w)?;
    w.write_char(']')
}
