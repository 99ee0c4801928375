//! Measured entropy consumption.
//!
//! Each routine drives a fresh converter from a [`Counting`] generator and
//! reports the entropy that went in, the entropy that came out, and the
//! theoretical bound on the difference. Entropy still buffered inside the
//! converter at the end is not counted as consumed.

use super::bounds::{expected_entropy_loss, max_entropy_loss};
use crate::converter::{ConvertError, EntropyConverter};
use crate::num::Word;
use crate::source::{Counting, Generator};
use serde::{Deserialize, Serialize};

/// Result of a measurement run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// What was measured.
    pub label: String,
    /// Width of the converter's buffer in bits.
    pub width: u32,
    /// Number of trials (conversions or shuffles).
    pub trials: u64,
    /// Entropy consumed, net of what is still buffered.
    pub input_bits: f64,
    /// Entropy delivered.
    pub output_bits: f64,
    /// Upper bound on the expected loss over all trials.
    pub bound_bits: f64,
    /// Tighter estimate of the loss, where one is known.
    pub expected_bits: Option<f64>,
    /// Entropy left in the converter at the end.
    pub buffered_bits: f64,
}

impl Measurement {
    /// Total entropy lost.
    pub fn loss_bits(&self) -> f64 {
        self.input_bits - self.output_bits
    }

    /// Entropy lost per trial.
    pub fn loss_per_trial(&self) -> f64 {
        self.loss_bits() / self.trials.max(1) as f64
    }

    /// Bound on the loss per trial.
    pub fn bound_per_trial(&self) -> f64 {
        self.bound_bits / self.trials.max(1) as f64
    }

    /// Fraction of the consumed entropy that reached the output.
    pub fn efficiency(&self) -> f64 {
        if self.input_bits <= 0.0 {
            return 1.0;
        }
        self.output_bits / self.input_bits
    }

    /// Returns true if the measured loss is within `tolerance` bits of the
    /// bound.
    pub fn within_bound(&self, tolerance: f64) -> bool {
        self.loss_bits() <= self.bound_bits + tolerance
    }
}

fn finish<T: Word, B: Word>(
    label: String,
    trials: u64,
    consumed_bits: f64,
    output_bits: f64,
    bound_bits: f64,
    converter: &EntropyConverter<T, B>,
) -> Measurement {
    let buffered_bits = converter.buffered_entropy();
    let measurement = Measurement {
        label,
        width: <T as Word>::BITS,
        trials,
        input_bits: consumed_bits - buffered_bits,
        output_bits,
        bound_bits,
        expected_bits: None,
        buffered_bits,
    };
    tracing::debug!(
        label = %measurement.label,
        width = measurement.width,
        loss_per_trial = measurement.loss_per_trial(),
        bound_per_trial = measurement.bound_per_trial(),
        "Measurement complete"
    );
    measurement
}

fn narrow_target<T: Word, E>(n: u64) -> Result<T, ConvertError<E>> {
    T::try_narrow(n as u128).ok_or(ConvertError::RangeTooLarge)
}

/// Converts `trials` values in `[0, target)` and measures the loss.
pub fn measure_fixed_target<T, G>(
    gen: G,
    target: u64,
    trials: u64,
) -> Result<Measurement, ConvertError<G::Error>>
where
    T: Word,
    G: Generator,
{
    let mut device = Counting::new(gen);
    let mut converter = EntropyConverter::<T>::new();
    let t = narrow_target::<T, _>(target)?;

    for _ in 0..trials {
        converter.convert(t, &mut device)?;
    }

    let output_bits = trials as f64 * (target as f64).log2();
    let bound_bits = trials as f64 * max_entropy_loss::<T>(target, 2);
    Ok(finish(
        format!("{} conversions to base {}", trials, target),
        trials,
        device.entropy(),
        output_bits,
        bound_bits,
        &converter,
    ))
}

/// Shuffles a deck of `deck` cards `trials` times and measures the loss.
pub fn measure_shuffle<T, G>(
    gen: G,
    trials: u64,
    deck: u64,
) -> Result<Measurement, ConvertError<G::Error>>
where
    T: Word,
    G: Generator,
{
    let mut device = Counting::new(gen);
    let mut converter = EntropyConverter::<T>::new();
    let mut output_bits = 0.0;
    let mut bound_bits = 0.0;

    for _ in 0..trials {
        for size in 2..=deck {
            converter.convert(narrow_target::<T, _>(size)?, &mut device)?;
            output_bits += (size as f64).log2();
            bound_bits += max_entropy_loss::<T>(size, 2);
        }
    }

    Ok(finish(
        format!("{} shuffles of a deck of {}", trials, deck),
        trials,
        device.entropy(),
        output_bits,
        bound_bits,
        &converter,
    ))
}

/// Converts base-`from` digits into base-`to` digits `trials` times.
///
/// The base-`from` digits are themselves produced by a second converter
/// reading `gen`; only the entropy of those digits counts as input.
pub fn measure_conversion<T, G>(
    gen: G,
    from: u64,
    to: u64,
    trials: u64,
) -> Result<Measurement, ConvertError<G::Error>>
where
    T: Word,
    G: Generator,
{
    if from < 2 {
        return Err(ConvertError::InvalidInputRange);
    }

    let mut device = gen;
    let mut digits = EntropyConverter::<T>::new();
    let mut converter = EntropyConverter::<T>::new();
    let digit_range = narrow_target::<T, _>(from)?;
    let mut digit_count = 0u64;

    for _ in 0..trials {
        converter
            .convert_from(1, to, 0, from - 1, || {
                let digit = digits.convert(digit_range, &mut device)?;
                digit_count += 1;
                Ok(digit.widen() as u64)
            })
            .map_err(ConvertError::flatten)?;
    }

    let output_bits = trials as f64 * (to as f64).log2();
    let bound_bits = trials as f64 * max_entropy_loss::<T>(to, from);
    Ok(finish(
        format!("{} conversions from base {} to base {}", trials, from, to),
        trials,
        digit_count as f64 * (from as f64).log2(),
        output_bits,
        bound_bits,
        &converter,
    ))
}

/// Converts into a randomly wandering sequence of targets.
///
/// Each target is derived from the previous output, clamped to `[5, 1000]`,
/// so the converter sees a spread of target sizes.
pub fn measure_random_targets<T, G>(
    gen: G,
    trials: u64,
) -> Result<Measurement, ConvertError<G::Error>>
where
    T: Word,
    G: Generator,
{
    const MIN_TARGET: u64 = 5;
    const MAX_TARGET: u64 = 1000;

    let mut device = Counting::new(gen);
    let mut converter = EntropyConverter::<T>::new();
    let mut target = 50u64;
    let mut output_bits = 0.0;
    let mut bound_bits = 0.0;
    let mut expected_bits = 0.0;

    for _ in 0..trials {
        output_bits += (target as f64).log2();
        bound_bits += max_entropy_loss::<T>(target, 2);
        expected_bits += expected_entropy_loss::<T>(target, 2);

        let r = converter.convert(narrow_target::<T, _>(target)?, &mut device)?;
        target = (2 + r.widen() as u64 * 2).clamp(MIN_TARGET, MAX_TARGET);
    }

    let mut measurement = finish(
        format!("{} conversions to random targets", trials),
        trials,
        device.entropy(),
        output_bits,
        bound_bits,
        &converter,
    );
    measurement.expected_bits = Some(expected_bits);
    Ok(measurement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::RngSource;

    /// Repeats a measurement until the accumulated loss is within the
    /// accumulated bound, as a single short run can exceed it by chance.
    fn assert_loss_bounded<F>(mut run: F)
    where
        F: FnMut(u64) -> Measurement,
    {
        let mut loss = 0.0;
        let mut bound = 0.01;
        for seed in 0..10 {
            let m = run(seed);
            loss += m.loss_bits();
            bound += m.bound_bits;
            if loss <= bound {
                return;
            }
        }
        panic!("loss {} exceeds bound {}", loss, bound);
    }

    #[test]
    fn test_fixed_target_loss_within_bound() {
        for target in [2u64, 3, 6, 10, 52, 99] {
            assert_loss_bounded(|seed| {
                measure_fixed_target::<u16, _>(RngSource::seeded(seed), target, 1000).unwrap()
            });
            assert_loss_bounded(|seed| {
                measure_fixed_target::<u32, _>(RngSource::seeded(seed), target, 1000).unwrap()
            });
            assert_loss_bounded(|seed| {
                measure_fixed_target::<u64, _>(RngSource::seeded(seed), target, 1000).unwrap()
            });
        }
    }

    #[test]
    fn test_loss_shrinks_with_buffer_width() {
        let narrow = measure_fixed_target::<u16, _>(RngSource::seeded(31), 6, 60_000).unwrap();
        let middle = measure_fixed_target::<u32, _>(RngSource::seeded(31), 6, 60_000).unwrap();
        let wide = measure_fixed_target::<u64, _>(RngSource::seeded(31), 6, 60_000).unwrap();
        assert!(middle.loss_per_trial() < narrow.loss_per_trial());
        assert!(wide.loss_per_trial() < middle.loss_per_trial());
        assert!(wide.loss_bits().abs() < 1e-3);
        assert!(wide.efficiency() > 0.999_999);
    }

    #[test]
    fn test_shuffle_measurement() {
        let m = measure_shuffle::<u32, _>(RngSource::seeded(32), 100, 52).unwrap();
        assert_eq!(m.trials, 100);
        assert!((m.output_bits - 100.0 * 225.58).abs() < 1.0);
        assert!(m.loss_bits() >= -1e-6);
        assert!(m.width == 32);
    }

    #[test]
    fn test_conversion_measurement() {
        let m = measure_conversion::<u64, _>(RngSource::seeded(33), 10, 11, 1000).unwrap();
        assert!(m.loss_bits() >= -1e-6);
        assert!(m.within_bound(1.0));
    }

    #[test]
    fn test_random_target_measurement() {
        let m = measure_random_targets::<u32, _>(RngSource::seeded(34), 1000).unwrap();
        let expected = m.expected_bits.unwrap();
        assert!(expected <= m.bound_bits);
        assert!(m.loss_bits() >= -1e-6);
    }

    #[test]
    fn test_target_wider_than_buffer() {
        let result = measure_fixed_target::<u8, _>(RngSource::seeded(35), 1000, 1);
        assert!(matches!(result, Err(ConvertError::RangeTooLarge)));
    }
}
