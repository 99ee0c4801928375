//! Theoretical bounds on entropy lost by conversion.
//!
//! Each narrowing step of the converter is a binary decision: the buffered
//! value is usable with probability `q` and recycled with probability
//! `p = 1 - q`. The information lost per output is bounded by `H(p) / q`,
//! where `p` is at most `out * in / max` for a buffer of width `max`.

use crate::num::Word;

/// Binary entropy function `H(p)` in bits.
///
/// Returns 0 at and outside the endpoints.
pub fn binary_entropy(p: f64) -> f64 {
    if p <= 0.0 || p >= 1.0 {
        return 0.0;
    }
    let q = 1.0 - p;
    -p * p.log2() - q * q.log2()
}

fn loss_for(p: f64) -> f64 {
    let q = 1.0 - p;
    if q <= 0.0 {
        return f64::INFINITY;
    }
    binary_entropy(p) / q
}

/// Upper bound on the expected entropy lost producing one value in
/// `[0, out)` from samples of cardinality `input`, buffering in `T`.
///
/// Individual conversions can lose more, but not on average.
pub fn max_entropy_loss<T: Word>(out: u64, input: u64) -> f64 {
    let p = out as f64 * input as f64 / T::max_value().widen() as f64;
    loss_for(p)
}

/// Tighter estimate of the expected loss, assuming the buffered range is
/// spread evenly over its possible values.
pub fn expected_entropy_loss<T: Word>(out: u64, input: u64) -> f64 {
    let p = out.saturating_sub(2) as f64 * input as f64 / (3.0 * T::max_value().widen() as f64);
    loss_for(p)
}

/// Worst-case ratio of output entropy to input entropy for values in
/// `[0, out)` drawn from a binary source.
pub fn min_efficiency<T: Word>(out: u64) -> f64 {
    let bits = (out as f64).log2();
    bits / (max_entropy_loss::<T>(out, 2) + bits)
}

/// Entropy of a uniformly random permutation of `n` items, `log2(n!)`.
pub fn shuffle_output_entropy(n: u64) -> f64 {
    (2..=n).map(|i| (i as f64).log2()).sum()
}

/// Upper bound on the entropy lost by one Fisher–Yates shuffle of `n`
/// items.
pub fn max_shuffle_loss<T: Word>(n: u64) -> f64 {
    (2..=n).map(|i| max_entropy_loss::<T>(i, 2)).sum()
}

/// Worst-case efficiency of shuffling `n` items. This is a loose bound.
pub fn shuffle_efficiency<T: Word>(n: u64) -> f64 {
    let output = shuffle_output_entropy(n);
    output / (output + max_shuffle_loss::<T>(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_entropy_peaks_at_half() {
        assert_eq!(binary_entropy(0.0), 0.0);
        assert_eq!(binary_entropy(1.0), 0.0);
        assert!((binary_entropy(0.5) - 1.0).abs() < 1e-12);
        assert!(binary_entropy(0.1) < binary_entropy(0.3));
    }

    #[test]
    fn test_loss_shrinks_with_width() {
        let l16 = max_entropy_loss::<u16>(6, 2);
        let l32 = max_entropy_loss::<u32>(6, 2);
        let l64 = max_entropy_loss::<u64>(6, 2);
        assert!(l16 > l32);
        assert!(l32 > l64);
        assert!(l64 < 1e-15);
    }

    #[test]
    fn test_expected_loss_below_maximum() {
        for out in 3..100 {
            assert!(expected_entropy_loss::<u32>(out, 2) < max_entropy_loss::<u32>(out, 2));
        }
        assert_eq!(expected_entropy_loss::<u32>(2, 2), 0.0);
    }

    #[test]
    fn test_impossible_ratio_is_infinite() {
        assert!(max_entropy_loss::<u8>(200, 2).is_infinite());
    }

    #[test]
    fn test_deck_entropy() {
        // log2(52!) is about 225.58 bits.
        assert!((shuffle_output_entropy(52) - 225.58).abs() < 0.01);
        assert!(shuffle_efficiency::<u64>(52) > 0.999_999);
        assert!(shuffle_efficiency::<u16>(52) < shuffle_efficiency::<u32>(52));
        assert!(min_efficiency::<u32>(6) > 0.99);
    }
}
