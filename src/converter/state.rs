//! Buffered entropy.
//!
//! Two small integer pairs hold everything the converter knows:
//!
//! - [`Interval`]: `value` uniform in `[0, range)`.
//! - [`BitBuffer`]: `buffer` uniform in `[0, buffer_max]`, where
//!   `buffer_max` is always `2^k - 1`. Only used when the generator's range
//!   is a power of two.
//!
//! Both are `Copy` so a conversion can work on a scratch copy and commit it
//! only on success. The public converter that owns them is not.

use crate::num::Word;

/// Uniform value in `[0, range)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Interval<T> {
    pub(crate) value: T,
    pub(crate) range: T,
}

impl<T: Word> Interval<T> {
    /// Zero bits of entropy: a single-point distribution.
    pub(crate) fn empty() -> Self {
        Self {
            value: T::zero(),
            range: T::one(),
        }
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.range > T::zero() && self.value < self.range
    }
}

/// Residual bits from the last raw power-of-two sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BitBuffer<B> {
    pub(crate) buffer: B,
    pub(crate) buffer_max: B,
}

impl<B: Word> BitBuffer<B> {
    pub(crate) fn empty() -> Self {
        Self {
            buffer: B::zero(),
            buffer_max: B::zero(),
        }
    }

    #[inline]
    pub(crate) fn is_exhausted(&self) -> bool {
        self.buffer_max == B::zero()
    }

    /// Stores a fresh raw sample uniform in `[0, max]`, `max = 2^k - 1`.
    #[inline]
    pub(crate) fn load(&mut self, sample: B, max: B) {
        self.buffer = sample;
        self.buffer_max = max;
    }

    /// Takes the lowest buffered bit.
    ///
    /// Callers refill with [`BitBuffer::load`] first when exhausted.
    #[inline]
    pub(crate) fn next_bit(&mut self) -> B {
        let bit = self.buffer & B::one();
        self.buffer = self.buffer >> 1;
        self.buffer_max = self.buffer_max >> 1;
        bit
    }

    /// Number of distinct buffered states, `buffer_max + 1`.
    pub(crate) fn cardinality(&self) -> u128 {
        self.buffer_max.widen() + 1
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.buffer <= self.buffer_max && crate::num::is_all_ones(self.buffer_max.widen())
    }
}

/// Everything the converter buffers between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Entropy<T, B> {
    pub(crate) interval: Interval<T>,
    pub(crate) bits: BitBuffer<B>,
}

impl<T: Word, B: Word> Entropy<T, B> {
    pub(crate) fn empty() -> Self {
        Self {
            interval: Interval::empty(),
            bits: BitBuffer::empty(),
        }
    }

    /// Size of the combined sample space, `range * (buffer_max + 1)`.
    ///
    /// Exact: both factors are at most `2^64`, and `range < 2^64`.
    pub(crate) fn buffered_range(&self) -> u128 {
        self.interval.range.widen() * self.bits.cardinality()
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.interval.is_valid() && self.bits.is_valid()
    }
}
