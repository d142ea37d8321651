//! Factorization utility

/// Proper divisors of `n` (every divisor except `n` itself), in ascending order.
///
/// Found by trial division up to `sqrt(n)`. Values `0` and `1` have no proper divisors.
pub fn proper_divisors(n: u64) -> Vec<u64> {
    if n <= 1 {
        return Vec::new();
    }

    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = 1;
    while d <= n / d {
        if n % d == 0 {
            small.push(d);
            let pair = n / d;
            if pair != d && pair != n {
                large.push(pair);
            }
        }
        d += 1;
    }
    small.extend(large.into_iter().rev());
    small
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_values() {
        assert_eq!(proper_divisors(0), Vec::<u64>::new());
        assert_eq!(proper_divisors(1), Vec::<u64>::new());
        assert_eq!(proper_divisors(2), vec![1]);
        assert_eq!(proper_divisors(10), vec![1, 2, 5]);
        assert_eq!(proper_divisors(12), vec![1, 2, 3, 4, 6]);
        assert_eq!(proper_divisors(16), vec![1, 2, 4, 8]);
        assert_eq!(proper_divisors(49), vec![1, 7]);
        assert_eq!(proper_divisors(97), vec![1]);
    }

    #[test]
    fn agrees_with_naive_division() {
        for n in 0..500_u64 {
            let naive = (1..n).filter(|d| n % d == 0).collect::<Vec<_>>();
            assert_eq!(proper_divisors(n), naive, "n = {n}");
        }
    }

    #[test]
    fn powers_of_two() {
        let divisors = proper_divisors(1 << 40);
        assert_eq!(divisors.len(), 40);
        assert_eq!(divisors.last(), Some(&(1 << 39)));
    }
}
