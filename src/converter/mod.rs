//! Entropy conversion between uniform integer distributions.
//!
//! [`EntropyConverter`] reads uniform integers from a [`Generator`] and
//! produces uniform integers in any other range, buffering leftover entropy
//! between calls so that almost none of the input is thrown away.
//!
//! # Example
//!
//! ```
//! use entropy_converter::{EntropyConverter, RngSource};
//!
//! let mut converter = EntropyConverter::<u64>::new();
//! let mut device = RngSource::seeded(7);
//!
//! let roll = converter.convert_between(1, 6, &mut device).unwrap();
//! assert!((1..=6).contains(&roll));
//! ```

mod adapters;
mod error;
mod narrow;
mod state;

pub use adapters::Uniform;
pub use error::ConvertError;

use crate::num::{is_all_ones, Integer, Word};
use crate::source::Generator;
use state::Entropy;

/// Converts entropy between uniform random integers.
///
/// `T` stores the buffered output entropy and `B` buffers raw samples from
/// power-of-two generators. `B` must be at least as wide as the generator's
/// samples; `T` should be much wider than the output ranges requested, since
/// the expected waste shrinks as `T` grows.
///
/// A converter holds literal entropy and cannot be cloned. Use
/// [`EntropyConverter::take`] to move the buffered entropy elsewhere.
///
/// ```compile_fail
/// use entropy_converter::EntropyConverter;
///
/// let a = EntropyConverter::<u32>::new();
/// let b = a.clone();
/// ```
///
/// The converter performs no locking; use one instance per thread.
#[derive(Debug)]
pub struct EntropyConverter<T: Word = u32, B: Word = u32> {
    entropy: Entropy<T, B>,
}

impl<T: Word, B: Word> EntropyConverter<T, B> {
    /// Creates a converter holding zero entropy.
    pub fn new() -> Self {
        Self {
            entropy: Entropy::empty(),
        }
    }

    /// Discards all buffered entropy.
    pub fn reset(&mut self) {
        self.entropy = Entropy::empty();
        tracing::debug!("Converter entropy discarded");
    }

    /// Moves the buffered entropy into a new converter, leaving `self` empty.
    pub fn take(&mut self) -> Self {
        let taken = Self {
            entropy: self.entropy,
        };
        self.entropy = Entropy::empty();
        tracing::debug!(
            buffered_range = taken.buffered_range(),
            "Converter entropy transferred"
        );
        taken
    }

    /// Size of the buffered sample space.
    ///
    /// `log2` of this is the buffered entropy in bits. An empty converter
    /// reports 1. Intended for measurement only.
    pub fn buffered_range(&self) -> u128 {
        self.entropy.buffered_range()
    }

    /// Buffered entropy in bits.
    pub fn buffered_entropy(&self) -> f64 {
        (self.buffered_range() as f64).log2()
    }

    /// Returns a uniform value in `[0, target)` read from `gen`.
    pub fn convert<G>(&mut self, target: T, gen: &mut G) -> Result<T, ConvertError<G::Error>>
    where
        G: Generator,
    {
        if target.is_zero() {
            return Err(ConvertError::InvalidOutputRange);
        }
        self.convert_between(T::zero(), target - T::one(), gen)
    }

    /// Returns a uniform value in `[out_min, out_max]` read from `gen`,
    /// using the generator's declared bounds as the input range.
    pub fn convert_between<R, G>(
        &mut self,
        out_min: R,
        out_max: R,
        gen: &mut G,
    ) -> Result<R, ConvertError<G::Error>>
    where
        R: Integer,
        G: Generator,
    {
        let (in_min, in_max) = (gen.min(), gen.max());
        self.convert_from(out_min, out_max, in_min, in_max, || gen.generate())
    }

    /// Returns a uniform value in `[out_min, out_max]` from a source that
    /// yields uniform values in `[in_min, in_max]`.
    pub fn convert_from<R, I, E, S>(
        &mut self,
        out_min: R,
        out_max: R,
        in_min: I,
        in_max: I,
        source: S,
    ) -> Result<R, ConvertError<E>>
    where
        R: Integer,
        I: Integer,
        S: FnMut() -> Result<I, E>,
    {
        self.convert_from_limited(out_min, out_max, in_min, in_max, source, T::max_value())
    }

    /// Like [`EntropyConverter::convert_from`], but never buffers more than
    /// `limit` states. Lower limits waste more entropy.
    pub fn convert_from_limited<R, I, E, S>(
        &mut self,
        out_min: R,
        out_max: R,
        in_min: I,
        in_max: I,
        mut source: S,
        limit: T,
    ) -> Result<R, ConvertError<E>>
    where
        R: Integer,
        I: Integer,
        S: FnMut() -> Result<I, E>,
    {
        if out_min == out_max {
            return Ok(out_max);
        }
        if out_min > out_max {
            return Err(ConvertError::InvalidOutputRange);
        }
        if in_min >= in_max {
            return Err(ConvertError::InvalidInputRange);
        }

        let target =
            T::try_narrow(R::span(out_min, out_max) + 1).ok_or(ConvertError::RangeTooLarge)?;
        let in_span = I::span(in_min, in_max);

        // Draw one raw sample and shift it to start at zero.
        let mut draw = move || -> Result<u128, ConvertError<E>> {
            let g = source().map_err(ConvertError::Generator)?;
            if g < in_min || g > in_max {
                return Err(ConvertError::SourceOutOfRange);
            }
            Ok(I::span(in_min, g))
        };

        let mut work = self.entropy;
        let result = if is_all_ones(in_span) {
            let buffer_max = B::try_narrow(in_span).ok_or(ConvertError::BufferTooSmall)?;
            let two = T::one() + T::one();

            let bits = &mut work.bits;
            narrow::narrow(&mut work.interval, target, two, limit, || {
                if bits.is_exhausted() {
                    let sample = B::try_narrow(draw()?).ok_or(ConvertError::SourceOutOfRange)?;
                    bits.load(sample, buffer_max);
                }
                T::try_narrow(bits.next_bit().widen()).ok_or(ConvertError::SourceOutOfRange)
            })?
        } else {
            let source_range = in_span
                .checked_add(1)
                .and_then(T::try_narrow)
                .ok_or(ConvertError::BufferTooSmall)?;
            target
                .checked_mul(&source_range)
                .ok_or(ConvertError::BufferTooSmall)?;

            narrow::narrow(&mut work.interval, target, source_range, limit, || {
                T::try_narrow(draw()?).ok_or(ConvertError::SourceOutOfRange)
            })?
        };

        debug_assert!(work.is_valid());
        let out = out_min
            .offset(result.widen())
            .ok_or(ConvertError::InvalidOutputRange)?;
        self.entropy = work;
        Ok(out)
    }

    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        self.entropy.is_valid()
    }
}

impl<T: Word, B: Word> Default for EntropyConverter<T, B> {
    fn default() -> Self {
        Self::new()
    }
}
