//! Factorial and binomial bookkeeping for weight-distribution estimates,
//! such as the sphere-packing bound a perfect code meets with equality.

use crate::error::{CodeError, Result};
use rustc_hash::FxHashMap;

/// Largest argument whose factorial fits in a `u128`.
pub const MAX_FACTORIAL_ARG: u64 = 34;

/// Memoizing factorial and binomial calculator.
///
/// The cache is an owned value: callers decide where it lives and how long,
/// and no global state is involved. It grows monotonically and is not
/// synchronized: single-threaded use only, like the rest of the crate.
#[derive(Debug, Clone, Default)]
pub struct FactorialCache {
    cache: FxHashMap<u64, u128>,
}

impl FactorialCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// `n!`, memoized across calls.
    ///
    /// # Errors
    ///
    /// [`CodeError::FactorialOverflow`] for arguments past
    /// [`MAX_FACTORIAL_ARG`], where the result no longer fits the integer
    /// domain.
    pub fn factorial(&mut self, n: u64) -> Result<u128> {
        if n > MAX_FACTORIAL_ARG {
            return Err(CodeError::FactorialOverflow(n));
        }
        if let Some(&value) = self.cache.get(&n) {
            return Ok(value);
        }
        let mut value: u128 = 1;
        for i in 2..=n {
            value *= u128::from(i);
        }
        self.cache.insert(n, value);
        Ok(value)
    }

    /// The binomial coefficient `C(n, k)`.
    ///
    /// # Errors
    ///
    /// [`CodeError::InvalidBinomial`] when `k > n`, and
    /// [`CodeError::FactorialOverflow`] when `n` is out of factorial range.
    pub fn binomial(&mut self, n: u64, k: u64) -> Result<u128> {
        if k > n {
            return Err(CodeError::InvalidBinomial { n, k });
        }
        Ok(self.factorial(n)? / (self.factorial(k)? * self.factorial(n - k)?))
    }

    /// The number of length-`n` words inside a Hamming ball of radius
    /// `(d - 1) / 2`: the denominator of the sphere-packing bound for a
    /// distance-`d` code. A perfect code, such as the [7,4] Hamming code,
    /// meets `2^n` divided by this with equality.
    pub fn sphere_packing_terms(&mut self, n: u64, d: u64) -> Result<u128> {
        let radius = d.saturating_sub(1) / 2;
        let mut sum = 0;
        for i in 0..=radius {
            sum += self.binomial(n, i)?;
        }
        Ok(sum)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn small_factorials() {
        let mut cache = FactorialCache::new();
        assert_eq!(cache.factorial(0).unwrap(), 1);
        assert_eq!(cache.factorial(1).unwrap(), 1);
        assert_eq!(cache.factorial(5).unwrap(), 120);
        assert_eq!(cache.factorial(10).unwrap(), 3_628_800);
        // memoized value comes back unchanged
        assert_eq!(cache.factorial(5).unwrap(), 120);
    }

    #[test]
    fn factorial_domain_is_bounded() {
        let mut cache = FactorialCache::new();
        assert!(cache.factorial(MAX_FACTORIAL_ARG).is_ok());
        assert_eq!(
            cache.factorial(MAX_FACTORIAL_ARG + 1),
            Err(CodeError::FactorialOverflow(35))
        );
    }

    #[test]
    fn binomials() {
        let mut cache = FactorialCache::new();
        assert_eq!(cache.binomial(7, 0).unwrap(), 1);
        assert_eq!(cache.binomial(7, 1).unwrap(), 7);
        assert_eq!(cache.binomial(7, 3).unwrap(), 35);
        assert_eq!(cache.binomial(7, 7).unwrap(), 1);
        assert_eq!(
            cache.binomial(3, 5),
            Err(CodeError::InvalidBinomial { n: 3, k: 5 })
        );
    }

    #[test]
    fn hamming_bound_for_the_perfect_code() {
        let mut cache = FactorialCache::new();
        let ball = cache.sphere_packing_terms(7, 3).unwrap();
        assert_eq!(ball, 8); // C(7,0) + C(7,1)
        assert_eq!((1u128 << 7) / ball, 16);
    }

    #[test]
    fn degenerate_distances_cover_only_the_word_itself() {
        let mut cache = FactorialCache::new();
        assert_eq!(cache.sphere_packing_terms(7, 0).unwrap(), 1);
        assert_eq!(cache.sphere_packing_terms(7, 1).unwrap(), 1);
        assert_eq!(cache.sphere_packing_terms(7, 2).unwrap(), 1);
    }
}
