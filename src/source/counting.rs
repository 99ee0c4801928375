//! Generator wrapper that accounts for consumed entropy.

use super::Generator;
use crate::num::Integer;

/// Counts draws from the wrapped generator.
///
/// Each draw from a generator over `[min, max]` carries
/// `log2(max - min + 1)` bits, so the total input entropy of a run is
/// `draws * bits_per_draw`.
#[derive(Debug)]
pub struct Counting<G> {
    inner: G,
    draws: u64,
}

impl<G: Generator> Counting<G> {
    /// Wraps `inner` with a zeroed counter.
    pub fn new(inner: G) -> Self {
        Self { inner, draws: 0 }
    }

    /// Successful draws so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Entropy of a single draw in bits.
    pub fn bits_per_draw(&self) -> f64 {
        let states = <G::Item as Integer>::span(self.inner.min(), self.inner.max()) + 1;
        (states as f64).log2()
    }

    /// Entropy consumed so far in bits.
    pub fn entropy(&self) -> f64 {
        self.draws as f64 * self.bits_per_draw()
    }

    /// Clears the counter.
    pub fn reset(&mut self) {
        self.draws = 0;
    }

    /// Returns the wrapped generator.
    pub fn into_inner(self) -> G {
        self.inner
    }
}

impl<G: Generator> Generator for Counting<G> {
    type Item = G::Item;
    type Error = G::Error;

    fn min(&self) -> G::Item {
        self.inner.min()
    }

    fn max(&self) -> G::Item {
        self.inner.max()
    }

    fn generate(&mut self) -> Result<G::Item, G::Error> {
        let sample = self.inner.generate()?;
        self.draws += 1;
        Ok(sample)
    }
}
