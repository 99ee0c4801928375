//! Integer capabilities used by the converter.
//!
//! Two families are distinguished:
//!
//! - [`Word`]: unsigned storage for buffered entropy (`value`, `range`,
//!   `buffer`, `buffer_max`). Its width bounds how much entropy can be held
//!   between calls, and therefore how little is wasted.
//! - [`Integer`]: caller-facing sample values, signed or unsigned. Spans
//!   between two `Integer`s are computed in 128-bit arithmetic.

use num_traits::{AsPrimitive, NumCast, PrimInt, Unsigned};
use std::fmt::Debug;

/// Unsigned integer used to store buffered entropy.
///
/// Every `Word` is also an [`Integer`], so results can be returned directly.
pub trait Word: Integer + Unsigned + AsPrimitive<u128> {
    /// Width of the type in bits.
    const BITS: u32;

    /// Converts from `u128`, returning `None` if the value does not fit.
    #[inline]
    fn try_narrow(v: u128) -> Option<Self> {
        <Self as NumCast>::from(v)
    }

    /// Widens to `u128`.
    #[inline]
    fn widen(self) -> u128 {
        <Self as AsPrimitive<u128>>::as_(self)
    }
}

macro_rules! impl_word {
    ($($t:ty),*) => {
        $(
            impl Word for $t {
                const BITS: u32 = <$t>::BITS;
            }
        )*
    };
}

impl_word!(u8, u16, u32, u64, usize);

/// Integer type of generator samples and converter outputs.
///
/// Implemented for the primitive integers up to 64 bits so that every span
/// fits in an `i128` difference.
pub trait Integer: PrimInt + AsPrimitive<i128> + Debug + 'static {
    /// Number of values in `[min, max]` minus one, i.e. `max - min`.
    ///
    /// Callers guarantee `min <= max`.
    #[inline]
    fn span(min: Self, max: Self) -> u128 {
        (max.as_() - min.as_()) as u128
    }

    /// Returns `self + delta`, or `None` if the result is not representable.
    #[inline]
    fn offset(self, delta: u128) -> Option<Self> {
        let delta = i128::try_from(delta).ok()?;
        <Self as NumCast>::from(self.as_().checked_add(delta)?)
    }
}

macro_rules! impl_integer {
    ($($t:ty),*) => {
        $(impl Integer for $t {})*
    };
}

impl_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Returns true if `span + 1` is a power of two, i.e. `span == 2^k - 1`.
#[inline]
pub(crate) fn is_all_ones(span: u128) -> bool {
    span & span.wrapping_add(1) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_handles_signed_ranges() {
        assert_eq!(i8::span(i8::MIN, i8::MAX), 255);
        assert_eq!(i64::span(i64::MIN, i64::MAX), u64::MAX as u128);
        assert_eq!(u32::span(1, 6), 5);
    }

    #[test]
    fn test_offset_checks_bounds() {
        assert_eq!(1i32.offset(5), Some(6));
        assert_eq!((-128i8).offset(255), Some(127));
        assert_eq!(200u8.offset(100), None);
    }

    #[test]
    fn test_all_ones_detection() {
        assert!(is_all_ones(1));
        assert!(is_all_ones(255));
        assert!(is_all_ones(u32::MAX as u128));
        assert!(!is_all_ones(5));
        assert!(!is_all_ones(9));
    }

    #[test]
    fn test_word_roundtrip_limits() {
        assert_eq!(u16::try_narrow(65_536), None);
        assert_eq!(u16::try_narrow(65_535), Some(u16::MAX));
        assert_eq!(<u64 as Word>::BITS, 64);
    }
}
