//! Callable views of a converter for generic sampling code.

use super::{ConvertError, EntropyConverter};
use crate::num::{Integer, Word};
use crate::source::Generator;

impl<T: Word, B: Word> EntropyConverter<T, B> {
    /// Binds `gen`, returning `count -> [0, count)`.
    ///
    /// This is the shape Fisher–Yates style shuffles expect.
    pub fn with_generator<'a, G>(
        &'a mut self,
        gen: &'a mut G,
    ) -> impl FnMut(T) -> Result<T, ConvertError<G::Error>> + 'a
    where
        G: Generator,
    {
        move |count| self.convert(count, gen)
    }

    /// Returns a distribution over `[a, b]` that can be sampled with any
    /// generator.
    pub fn make_uniform<R: Integer>(&mut self, a: R, b: R) -> Uniform<'_, T, B, R> {
        Uniform {
            converter: self,
            low: a,
            high: b,
        }
    }

    /// Returns a zero-argument sampler over `[a, b]` bound to `gen`.
    pub fn make_uniform_with<'a, R, G>(
        &'a mut self,
        a: R,
        b: R,
        gen: &'a mut G,
    ) -> impl FnMut() -> Result<R, ConvertError<G::Error>> + 'a
    where
        R: Integer,
        G: Generator,
    {
        move || self.convert_between(a, b, gen)
    }

    /// Shuffles `items` in place so that every permutation is equally
    /// likely.
    ///
    /// Fails with [`ConvertError::RangeTooLarge`] if `items.len()` does not
    /// fit in `T`. On error the slice may be partially shuffled.
    pub fn shuffle<V, G>(&mut self, items: &mut [V], gen: &mut G) -> Result<(), ConvertError<G::Error>>
    where
        G: Generator,
    {
        for i in (1..items.len()).rev() {
            let j = self.convert_between(0, i, gen)?;
            items.swap(i, j);
        }
        Ok(())
    }
}

/// Uniform distribution over a closed range, backed by a converter.
///
/// Created by [`EntropyConverter::make_uniform`].
#[derive(Debug)]
pub struct Uniform<'a, T: Word, B: Word, R> {
    converter: &'a mut EntropyConverter<T, B>,
    low: R,
    high: R,
}

impl<T: Word, B: Word, R: Integer> Uniform<'_, T, B, R> {
    /// Draws one value in the range, reading entropy from `gen`.
    pub fn sample<G: Generator>(&mut self, gen: &mut G) -> Result<R, ConvertError<G::Error>> {
        self.converter.convert_between(self.low, self.high, gen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::RngSource;
    use std::collections::HashMap;

    #[test]
    fn test_with_generator_bounds_output() {
        let mut converter = EntropyConverter::<u64>::new();
        let mut device = RngSource::seeded(21);
        let mut rand = converter.with_generator(&mut device);
        for count in 1..100u64 {
            assert!(rand(count).unwrap() < count);
        }
    }

    #[test]
    fn test_uniform_samples_within_range() {
        let mut converter = EntropyConverter::<u32>::new();
        let mut device = RngSource::seeded(22);
        let mut d6 = converter.make_uniform(1u8, 6);
        for _ in 0..1000 {
            let roll = d6.sample(&mut device).unwrap();
            assert!((1..=6).contains(&roll));
        }
    }

    #[test]
    fn test_bound_uniform_samples_within_range() {
        let mut converter = EntropyConverter::<u32>::new();
        let mut device = RngSource::seeded(23);
        let mut coin = converter.make_uniform_with(-1i32, 1, &mut device);
        for _ in 0..1000 {
            assert!((-1..=1).contains(&coin().unwrap()));
        }
    }

    #[test]
    fn test_shuffle_preserves_elements() {
        let mut converter = EntropyConverter::<u64>::new();
        let mut device = RngSource::seeded(24);
        let mut deck: Vec<u32> = (0..52).collect();
        converter.shuffle(&mut deck, &mut device).unwrap();

        let mut sorted = deck.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..52).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_permutations_are_uniform() {
        let mut converter = EntropyConverter::<u32>::new();
        let mut device = RngSource::seeded(25);
        let trials = 60_000;
        let mut counts: HashMap<[u8; 3], u32> = HashMap::new();
        for _ in 0..trials {
            let mut items = [0u8, 1, 2];
            converter.shuffle(&mut items, &mut device).unwrap();
            *counts.entry(items).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        for (perm, count) in counts {
            assert!(
                (9_000..=11_000).contains(&count),
                "permutation {:?} seen {} times",
                perm,
                count
            );
        }
    }

    #[test]
    fn test_shuffle_through_fisher_yates_adapter() {
        let mut converter = EntropyConverter::<u64>::new();
        let mut device = RngSource::seeded(26);
        let mut items: Vec<u64> = (0..20).collect();
        {
            let mut rand = converter.with_generator(&mut device);
            for i in (1..items.len()).rev() {
                let j = rand(i as u64 + 1).unwrap() as usize;
                items.swap(i, j);
            }
        }
        items.sort_unstable();
        assert_eq!(items, (0..20).collect::<Vec<_>>());
    }
}
